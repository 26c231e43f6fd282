//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically. Order within a
//! tick: discrete events, held aim keys, then either shell flight or AI
//! planning.

use glam::Vec2;

use super::ai::plan_shot;
use super::state::{GameEvent, GameState, PerSide};
use super::tank::{AimKeys, Side};
use crate::consts::*;

/// Edge-triggered actions, applied once per press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    NewMatch,
    RegenerateTerrain,
    ToggleAi,
    Quit,
    Fire(Side),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Level-triggered aim keys, applied every tick while held
    pub held: PerSide<AimKeys>,
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn event(event: InputEvent) -> Self {
        Self {
            events: vec![event],
            ..Default::default()
        }
    }
}

/// Blast score for a tank `distance` away from an impact:
/// full bonus at the centre, nothing at or beyond the blast reach.
pub fn blast_bonus(distance: f32) -> u32 {
    let reach = CRATER_RADIUS as f32 + BLAST_MARGIN;
    if distance.is_nan() || distance >= reach {
        return 0;
    }
    (BLAST_BONUS_MAX * (1.0 - distance.max(0.0) / reach)) as u32
}

/// Advance the match by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    for &event in &input.events {
        handle_event(state, event);
        if state.quit_requested {
            return;
        }
    }

    let turn = state.turn;
    state.tanks[turn].apply_aim(input.held[turn]);

    if state.shell.is_some() {
        update_shell(state);
    } else if state.ai_side() == Some(turn) {
        ai_fire(state, turn);
    }
}

fn handle_event(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::NewMatch => state.new_match(),
        InputEvent::RegenerateTerrain => state.regenerate_terrain(),
        InputEvent::ToggleAi => state.toggle_ai(),
        InputEvent::Quit => {
            log::info!("Quit requested");
            state.quit_requested = true;
            state.events.push(GameEvent::QuitRequested);
        }
        InputEvent::Fire(side) => {
            state.fire(side);
        }
    }
}

/// Fly the live shell one step and resolve whatever it hits
fn update_shell(state: &mut GameState) {
    let Some(mut shell) = state.shell else {
        return;
    };
    let shooter = state.turn;
    let width = state.terrain.width() as f32;
    let height = state.terrain.height() as f32;

    shell.step(state.wind, width, height);

    if !shell.alive {
        log::debug!("{} shell left the field", shooter.label());
        state.events.push(GameEvent::ShellLost { shooter });
    } else {
        let (ix, iy) = shell.cell();
        if state.terrain.collides(ix, iy) {
            explode(state, ix, iy, shooter);
            shell.alive = false;
        } else {
            // Only the opponent can take a direct hit
            let target = shooter.opponent();
            let tank = &state.tanks[target];
            if tank.alive && tank.torso().distance(shell.pos) < HIT_RADIUS {
                log::info!("{} direct hit on {}", shooter.label(), target.label());
                state.events.push(GameEvent::DirectHit { shooter, target });
                explode(state, ix, iy, shooter);
                state.award(shooter, DIRECT_HIT_BONUS);
                shell.alive = false;
            }
        }
    }

    if shell.alive {
        state.shell = Some(shell);
        return;
    }

    state.shell = None;
    state.turn = shooter.opponent();
    state.settle_tanks();
    log::debug!("Turn passes to {}", state.turn.label());
    state.events.push(GameEvent::TurnPassed { to: state.turn });
}

/// Carve a crater and score every non-firing tank caught in the blast
fn explode(state: &mut GameState, x: i32, y: i32, shooter: Side) {
    state.terrain.destroy(x, y, CRATER_RADIUS);
    state.events.push(GameEvent::Impact { shooter, x, y });

    let center = Vec2::new(x as f32, y as f32);
    let victims: Vec<f32> = state
        .tanks
        .iter()
        .filter(|(side, tank)| *side != shooter && tank.alive)
        .map(|(_, tank)| tank.torso().distance(center))
        .collect();
    for distance in victims {
        state.award(shooter, blast_bonus(distance));
    }
}

fn ai_fire(state: &mut GameState, side: Side) {
    let target_x = state.tanks[side.opponent()].x;
    let plan = plan_shot(
        &state.terrain,
        &state.tanks[side],
        target_x,
        state.wind,
        &state.ai,
        &mut state.rng,
    );
    state.tanks[side].set_aim(plan.angle, plan.power);
    state.fire(side);
}
