//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable side order (Side One before Side Two)
//! - No rendering or platform dependencies

pub mod ai;
pub mod shell;
pub mod state;
pub mod tank;
pub mod terrain;
pub mod tick;

pub use ai::{AiConfig, ShotPlan, plan_shot};
pub use shell::Shell;
pub use state::{GameEvent, GameState, MatchPhase, PerSide};
pub use tank::{AimKeys, Side, Tank};
pub use terrain::Terrain;
pub use tick::{InputEvent, TickInput, blast_bonus, tick};
