//! Headless frontend: autopilot input, text output

use std::io::Write;

use super::{AutoPilot, Frame, Frontend, text};
use crate::sim::{GameEvent, GameState, TickInput};

pub struct ConsoleFrontend<W: Write> {
    pilot: AutoPilot,
    /// Draw a full frame every N ticks (0 = never)
    render_every: u64,
    cols: usize,
    rows: usize,
    out: W,
}

impl<W: Write> ConsoleFrontend<W> {
    pub fn new(pilot: AutoPilot, render_every: u64, cols: usize, rows: usize, out: W) -> Self {
        Self {
            pilot,
            render_every,
            cols,
            rows,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Frontend for ConsoleFrontend<W> {
    fn poll(&mut self, state: &GameState) -> TickInput {
        self.pilot.input(state)
    }

    fn present(&mut self, frame: &Frame<'_>, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::TurnPassed { .. } | GameEvent::MatchStarted { .. } => {
                    if let Err(e) = writeln!(self.out, "[{:>6}] {}", frame.tick, frame.hud_line()) {
                        log::warn!("Console write failed: {}", e);
                    }
                }
                _ => log::trace!("{:?}", event),
            }
        }

        if self.render_every > 0 && frame.tick % self.render_every == 0 {
            let picture = text::render(frame, self.cols, self.rows);
            if let Err(e) = self.out.write_all(picture.as_bytes()) {
                log::warn!("Console write failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PerSide;

    #[test]
    fn test_turn_change_writes_status_line() {
        let mut state = GameState::new(3);
        let mut console = ConsoleFrontend::new(
            AutoPilot::new(0, PerSide::new(true, true)),
            0,
            80,
            24,
            Vec::new(),
        );
        let events = state.drain_events();
        console.present(&Frame::capture(&state), &events);

        let written = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains("Turn: P1"));
    }

    #[test]
    fn test_renders_on_schedule() {
        let mut state = GameState::new(3);
        state.time_ticks = 10;
        let mut console = ConsoleFrontend::new(
            AutoPilot::new(0, PerSide::new(true, true)),
            5,
            40,
            10,
            Vec::new(),
        );
        console.present(&Frame::capture(&state), &[]);
        let written = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(written.lines().count(), 11);
    }
}
