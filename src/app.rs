//! Fixed timestep run loop
//!
//! Owns the match state and a frontend. Every tick is poll, simulate,
//! present, in that order, on one thread.

use std::time::{Duration, Instant};

use crate::consts::MAX_SUBSTEPS;
use crate::frontend::{Frame, Frontend};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

pub struct App<F: Frontend> {
    pub state: GameState,
    frontend: F,
    /// Ticks per second; 0 = unpaced
    tick_rate: u32,
    max_ticks: Option<u64>,
    accumulator: f32,
}

impl<F: Frontend> App<F> {
    /// Start a match configured from `settings`
    pub fn new(settings: &Settings, frontend: F) -> Self {
        let mut state = GameState::new(settings.resolved_seed());
        state.ai_for_p2 = settings.ai_for_p2;
        state.ai = settings.ai;
        Self::with_state(state, frontend, settings.tick_rate, settings.max_ticks)
    }

    pub fn with_state(state: GameState, frontend: F, tick_rate: u32, max_ticks: Option<u64>) -> Self {
        Self {
            state,
            frontend,
            tick_rate,
            max_ticks,
            accumulator: 0.0,
        }
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Whether the loop should stop (quit requested or tick budget spent)
    pub fn finished(&self) -> bool {
        self.state.quit_requested
            || self
                .max_ticks
                .is_some_and(|limit| self.state.time_ticks >= limit)
    }

    /// Run exactly one tick. Returns false once the loop should stop.
    pub fn step(&mut self) -> bool {
        if self.finished() {
            return false;
        }
        let input = self.frontend.poll(&self.state);
        tick(&mut self.state, &input);
        let events = self.state.drain_events();
        self.frontend.present(&Frame::capture(&self.state), &events);
        !self.finished()
    }

    /// Feed `dt` seconds of wall time and run the ticks it pays for
    pub fn update(&mut self, dt: f32) -> bool {
        if self.tick_rate == 0 {
            return self.step();
        }
        let sim_dt = 1.0 / self.tick_rate as f32;
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= sim_dt && substeps < MAX_SUBSTEPS {
            if !self.step() {
                return false;
            }
            self.accumulator -= sim_dt;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(sim_dt);
        }
        !self.finished()
    }

    /// Loop until quit or the tick budget runs out
    pub fn run(&mut self) {
        log::info!(
            "Running at {} ticks/s{}",
            self.tick_rate,
            if self.tick_rate == 0 { " (unpaced)" } else { "" }
        );
        let mut last = Instant::now();
        loop {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            if !self.update(dt) {
                break;
            }
            if self.tick_rate > 0 {
                let sim_dt = 1.0 / self.tick_rate as f32;
                let wait = (sim_dt - self.accumulator).max(0.0);
                std::thread::sleep(Duration::from_secs_f32(wait));
            }
        }
        log::info!(
            "Stopped after {} ticks. Score P1:{} P2:{}",
            self.state.time_ticks,
            self.state.scores.one,
            self.state.scores.two
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameEvent, InputEvent, TickInput};

    /// Records what it was shown; quits on request
    #[derive(Default)]
    struct Recorder {
        frames: u64,
        events: Vec<GameEvent>,
        quit_at: Option<u64>,
    }

    impl Frontend for Recorder {
        fn poll(&mut self, state: &GameState) -> TickInput {
            match self.quit_at {
                Some(at) if state.time_ticks + 1 >= at => TickInput::event(InputEvent::Quit),
                _ => TickInput::default(),
            }
        }

        fn present(&mut self, _frame: &Frame<'_>, events: &[GameEvent]) {
            self.frames += 1;
            self.events.extend_from_slice(events);
        }
    }

    #[test]
    fn test_unpaced_run_stops_at_budget() {
        let mut app = App::with_state(GameState::new(1), Recorder::default(), 0, Some(25));
        app.run();
        assert_eq!(app.state.time_ticks, 25);
        assert_eq!(app.frontend().frames, 25);
        // The construction event is delivered with the first frame
        assert!(matches!(app.frontend().events[0], GameEvent::MatchStarted { .. }));
    }

    #[test]
    fn test_quit_ends_run() {
        let recorder = Recorder {
            quit_at: Some(10),
            ..Default::default()
        };
        let mut app = App::with_state(GameState::new(1), recorder, 0, None);
        app.run();
        assert!(app.state.quit_requested);
        assert_eq!(app.state.time_ticks, 10);
        assert!(!app.step());
    }

    #[test]
    fn test_update_runs_whole_ticks_only() {
        let mut app = App::with_state(GameState::new(1), Recorder::default(), 60, None);
        assert!(app.update(2.5 / 60.0));
        assert_eq!(app.state.time_ticks, 2);
        assert!(app.update(0.6 / 60.0));
        assert_eq!(app.state.time_ticks, 3);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut app = App::with_state(GameState::new(1), Recorder::default(), 120, None);
        app.update(1.0);
        assert_eq!(app.state.time_ticks, u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_new_applies_settings() {
        let settings = Settings {
            seed: Some(5),
            ai_for_p2: true,
            ..Default::default()
        };
        let app = App::new(&settings, Recorder::default());
        assert_eq!(app.state.seed, 5);
        assert!(app.state.ai_for_p2);
    }
}
