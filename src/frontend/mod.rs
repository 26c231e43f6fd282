//! Input/render boundary
//!
//! The simulation never draws or reads devices. Each tick the run loop asks a
//! `Frontend` for input and then hands it a read-only `Frame` borrowed from the
//! match state, plus the events that tick produced.

pub mod autopilot;
pub mod console;
pub mod text;

pub use autopilot::AutoPilot;
pub use console::ConsoleFrontend;

use glam::Vec2;

use crate::sim::{GameEvent, GameState, PerSide, Side, Terrain, TickInput};

pub trait Frontend {
    /// Input for the next tick
    fn poll(&mut self, state: &GameState) -> TickInput;
    /// Show the state after a tick
    fn present(&mut self, frame: &Frame<'_>, events: &[GameEvent]);
}

/// What a renderer needs to draw one tank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankView {
    /// Anchor x and ground contact y
    pub base: Vec2,
    /// Tip of the barrel
    pub muzzle: Vec2,
    pub angle: f32,
    pub power: f32,
    pub facing: i8,
    pub alive: bool,
}

/// Read-only snapshot of everything drawable, valid for one tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub terrain: &'a Terrain,
    pub tanks: PerSide<TankView>,
    pub shell: Option<Vec2>,
    pub wind: f32,
    pub scores: PerSide<u32>,
    pub turn: Side,
    pub ai_for_p2: bool,
    pub tick: u64,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let view = |side: Side| {
            let tank = &state.tanks[side];
            TankView {
                base: Vec2::new(tank.x as f32, tank.ground_y as f32),
                muzzle: tank.muzzle(),
                angle: tank.angle,
                power: tank.power,
                facing: tank.facing,
                alive: tank.alive,
            }
        };
        Self {
            terrain: &state.terrain,
            tanks: PerSide::new(view(Side::One), view(Side::Two)),
            shell: state.shell.filter(|s| s.alive).map(|s| s.pos),
            wind: state.wind,
            scores: state.scores,
            turn: state.turn,
            ai_for_p2: state.ai_for_p2,
            tick: state.time_ticks,
        }
    }

    /// "P1", "P2" or "P2 (AI)"
    pub fn turn_label(&self) -> String {
        if self.ai_for_p2 && self.turn == Side::Two {
            format!("{} (AI)", self.turn.label())
        } else {
            self.turn.label().to_string()
        }
    }

    /// One-line status: wind, both aims, scores, turn
    pub fn hud_line(&self) -> String {
        format!(
            "Wind: {:+.2}  P1 Angle: {:4.1} Power: {:4.1}  P2 Angle: {:4.1} Power: {:4.1}  Score P1:{} P2:{}  Turn: {}",
            self.wind,
            self.tanks.one.angle,
            self.tanks.one.power,
            self.tanks.two.angle,
            self.tanks.two.power,
            self.scores.one,
            self.scores.two,
            self.turn_label(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{InputEvent, tick};

    #[test]
    fn test_capture_reflects_state() {
        let mut state = GameState::new(17);
        let frame = Frame::capture(&state);
        assert!(frame.shell.is_none());
        assert_eq!(frame.tanks.one.base.x, state.tanks.one.x as f32);
        assert_eq!(frame.tanks.two.facing, -1);

        tick(&mut state, &TickInput::event(InputEvent::Fire(Side::One)));
        let frame = Frame::capture(&state);
        assert_eq!(frame.shell, state.shell.map(|s| s.pos));
        assert_eq!(frame.tick, 1);
    }

    #[test]
    fn test_turn_label_marks_ai() {
        let mut state = GameState::new(17);
        state.ai_for_p2 = true;
        assert_eq!(Frame::capture(&state).turn_label(), "P1");
        state.turn = Side::Two;
        assert_eq!(Frame::capture(&state).turn_label(), "P2 (AI)");
        assert!(Frame::capture(&state).hud_line().ends_with("Turn: P2 (AI)"));
    }
}
