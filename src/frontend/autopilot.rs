//! Stand-in for a human at the keyboard
//!
//! Picks a random aim, holds the same keys a player would until the barrel
//! gets there, then presses fire. Used by the headless binary and tests; it
//! never touches a side the planner is driving.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{ANGLE_STEP, POWER_STEP};
use crate::sim::{AimKeys, GameState, InputEvent, PerSide, Tank, TickInput};

#[derive(Debug, Clone)]
pub struct AutoPilot {
    rng: Pcg32,
    /// Which sides this pilot plays
    pub sides: PerSide<bool>,
    /// Aim being steered toward this turn
    goal: Option<(f32, f32)>,
}

impl AutoPilot {
    pub fn new(seed: u64, sides: PerSide<bool>) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            sides,
            goal: None,
        }
    }

    pub fn input(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        let side = state.turn;
        if state.shell.is_some() || !self.sides[side] || state.ai_side() == Some(side) {
            self.goal = None;
            return input;
        }

        let rng = &mut self.rng;
        let (angle, power) = *self
            .goal
            .get_or_insert_with(|| (rng.random_range(20.0..70.0), rng.random_range(18.0..36.0)));

        let keys = steer(&state.tanks[side], angle, power);
        if keys == AimKeys::default() {
            input.events.push(InputEvent::Fire(side));
            self.goal = None;
        } else {
            input.held[side] = keys;
        }
        input
    }
}

/// Keys that move `tank` toward (angle, power); none once within half a step
fn steer(tank: &Tank, angle: f32, power: f32) -> AimKeys {
    let raise = tank.angle < angle - ANGLE_STEP / 2.0;
    let lower = tank.angle > angle + ANGLE_STEP / 2.0;
    let (left, right) = if tank.facing >= 0 {
        (lower, raise)
    } else {
        (raise, lower)
    };
    AimKeys {
        left,
        right,
        up: tank.power < power - POWER_STEP / 2.0,
        down: tank.power > power + POWER_STEP / 2.0,
    }
}
