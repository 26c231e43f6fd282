//! Match state and core simulation types
//!
//! `GameState` is the single owner of everything that changes during a match:
//! terrain, both tanks, the (at most one) live shell, turn, wind and scores.

use std::ops::{Index, IndexMut};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ai::AiConfig;
use super::shell::Shell;
use super::tank::{Side, Tank};
use super::terrain::Terrain;
use crate::consts::*;

/// Tank anchors as fractions of field width
const ANCHOR_FRACTIONS: PerSide<f32> = PerSide { one: 0.12, two: 0.88 };

/// One value per side, indexed by `Side`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerSide<T> {
    pub one: T,
    pub two: T,
}

impl<T> PerSide<T> {
    pub fn new(one: T, two: T) -> Self {
        Self { one, two }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::One, &self.one), (Side::Two, &self.two)].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Side, &mut T)> {
        [(Side::One, &mut self.one), (Side::Two, &mut self.two)].into_iter()
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::One => &self.one,
            Side::Two => &self.two,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::One => &mut self.one,
            Side::Two => &mut self.two,
        }
    }
}

/// Where the match currently is in its turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Turn owner may aim and fire
    Aiming(Side),
    /// A shell is live; nobody may fire
    ShellInFlight { shooter: Side },
}

/// Things that happened during a tick, for frontends and logs
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    MatchStarted { wind: f32 },
    TerrainRegenerated,
    AiToggled { enabled: bool },
    ShellFired { side: Side, angle: f32, power: f32 },
    /// Explosion centre
    Impact { shooter: Side, x: i32, y: i32 },
    DirectHit { shooter: Side, target: Side },
    ScoreAwarded { side: Side, points: u32 },
    /// Shell left the field without hitting anything
    ShellLost { shooter: Side },
    TurnPassed { to: Side },
    QuitRequested,
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the match RNG was created from
    pub seed: u64,
    pub(super) rng: Pcg32,
    pub terrain: Terrain,
    pub tanks: PerSide<Tank>,
    /// The only shell that may exist
    pub shell: Option<Shell>,
    pub turn: Side,
    /// Constant for the whole round
    pub wind: f32,
    pub scores: PerSide<u32>,
    /// Side Two is driven by the planner
    pub ai_for_p2: bool,
    pub ai: AiConfig,
    pub time_ticks: u64,
    pub quit_requested: bool,
    /// Events since the last `drain_events`
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New match on the standard field
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, FIELD_WIDTH, FIELD_HEIGHT)
    }

    pub fn with_field(seed: u64, width: usize, height: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::generated(width, height, &mut rng);
        let wind = rng.random_range(-WIND_MAX..WIND_MAX);
        let anchor = |fraction: f32| (width as f32 * fraction) as i32;

        let mut state = Self {
            seed,
            rng,
            terrain,
            tanks: PerSide::new(
                Tank::new(Side::One, anchor(ANCHOR_FRACTIONS.one)),
                Tank::new(Side::Two, anchor(ANCHOR_FRACTIONS.two)),
            ),
            shell: None,
            turn: Side::One,
            wind,
            scores: PerSide::default(),
            ai_for_p2: false,
            ai: AiConfig::default(),
            time_ticks: 0,
            quit_requested: false,
            events: Vec::new(),
        };
        state.settle_tanks();
        log::info!("Match seeded with {} (wind {:+.3})", seed, wind);
        state.events.push(GameEvent::MatchStarted { wind });
        state
    }

    pub fn phase(&self) -> MatchPhase {
        match self.shell {
            Some(_) => MatchPhase::ShellInFlight { shooter: self.turn },
            None => MatchPhase::Aiming(self.turn),
        }
    }

    /// Side currently driven by the planner, if any
    pub fn ai_side(&self) -> Option<Side> {
        self.ai_for_p2.then_some(Side::Two)
    }

    /// Drop every tank onto whatever terrain is now under it
    pub fn settle_tanks(&mut self) {
        let terrain = &self.terrain;
        for (_, tank) in self.tanks.iter_mut() {
            tank.ground_y = terrain.ground_y_at(tank.x);
        }
    }

    /// Fresh terrain and wind, both tanks revived, Side One to play.
    /// Scores carry over.
    pub fn new_match(&mut self) {
        self.terrain.generate(&mut self.rng);
        self.wind = self.rng.random_range(-WIND_MAX..WIND_MAX);
        self.shell = None;
        for (_, tank) in self.tanks.iter_mut() {
            tank.alive = true;
        }
        self.settle_tanks();
        self.turn = Side::One;
        log::info!("New match (wind {:+.3})", self.wind);
        self.events.push(GameEvent::MatchStarted { wind: self.wind });
    }

    /// Fresh terrain only; scores, turn, aim and wind are kept
    pub fn regenerate_terrain(&mut self) {
        self.terrain.generate(&mut self.rng);
        self.settle_tanks();
        log::info!("Terrain regenerated");
        self.events.push(GameEvent::TerrainRegenerated);
    }

    pub fn toggle_ai(&mut self) {
        self.ai_for_p2 = !self.ai_for_p2;
        log::info!("AI for P2: {}", if self.ai_for_p2 { "on" } else { "off" });
        self.events.push(GameEvent::AiToggled {
            enabled: self.ai_for_p2,
        });
    }

    /// Fire for `side` if it owns the turn and nothing is in flight.
    /// Returns whether a shell was spawned; illegal requests are ignored.
    pub fn fire(&mut self, side: Side) -> bool {
        if self.turn != side || self.shell.is_some() {
            log::trace!("Ignoring fire from {} ({:?})", side.label(), self.phase());
            return false;
        }
        self.spawn_shell(side);
        true
    }

    fn spawn_shell(&mut self, side: Side) {
        assert!(
            self.shell.is_none(),
            "second shell spawned while one is still live"
        );
        let tank = &self.tanks[side];
        self.shell = Some(tank.launch());
        log::debug!(
            "{} fires: angle {:.1} power {:.1}",
            side.label(),
            tank.angle,
            tank.power
        );
        self.events.push(GameEvent::ShellFired {
            side,
            angle: tank.angle,
            power: tank.power,
        });
    }

    pub fn award(&mut self, side: Side, points: u32) {
        if points == 0 {
            return;
        }
        self.scores[side] += points;
        log::debug!("{} +{} (now {})", side.label(), points, self.scores[side]);
        self.events.push(GameEvent::ScoreAwarded { side, points });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
