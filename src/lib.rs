//! Pocket Artillery - a two-player turn-based artillery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, shells, tanks, match state, AI)
//! - `frontend`: Input/render boundary (frame snapshots, text renderer, autopilot)
//! - `app`: Fixed timestep run loop
//! - `settings`: JSON + command-line configuration

pub mod app;
pub mod frontend;
pub mod settings;
pub mod sim;

pub use app::App;
pub use settings::{Cli, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: usize = 960;
    pub const FIELD_HEIGHT: usize = 540;

    /// Downward acceleration per tick²
    pub const GRAVITY: f32 = 0.22;
    /// Wind is sampled from [-WIND_MAX, WIND_MAX] once per match
    pub const WIND_MAX: f32 = 0.18;
    /// How strongly wind feeds into horizontal velocity each tick
    pub const WIND_COUPLING: f32 = 0.02;

    /// Shells survive this far past the left/right edges
    pub const SHELL_MARGIN_X: f32 = 20.0;
    /// Shells survive this far below the bottom edge
    pub const SHELL_MARGIN_BOTTOM: f32 = 40.0;

    /// Aim limits (degrees above the horizon)
    pub const ANGLE_MIN: f32 = 5.0;
    pub const ANGLE_MAX: f32 = 85.0;
    /// Power limits
    pub const POWER_MIN: f32 = 12.0;
    pub const POWER_MAX: f32 = 40.0;
    /// Aim nudge per tick while a key is held
    pub const ANGLE_STEP: f32 = 0.8;
    pub const POWER_STEP: f32 = 0.4;

    /// Tank defaults
    pub const START_ANGLE: f32 = 45.0;
    pub const START_POWER: f32 = 28.0;
    /// Barrel pivot height above the ground contact
    pub const PIVOT_HEIGHT: f32 = 12.0;
    /// Hit-test point height above the ground contact
    pub const TORSO_HEIGHT: f32 = 10.0;
    pub const BARREL_LENGTH: f32 = 18.0;
    /// Launch speed = power * MUZZLE_SPEED_SCALE
    pub const MUZZLE_SPEED_SCALE: f32 = 0.8;

    /// Direct hit radius around a tank's torso point
    pub const HIT_RADIUS: f32 = 16.0;
    pub const DIRECT_HIT_BONUS: u32 = 30;
    /// Crater radius carved by every explosion
    pub const CRATER_RADIUS: i32 = 24;
    /// Blast reach beyond the crater edge for scoring
    pub const BLAST_MARGIN: f32 = 4.0;
    /// Blast bonus at zero distance
    pub const BLAST_BONUS_MAX: f32 = 40.0;
}

/// Unit direction for an angle in degrees, in screen space (y grows downward)
#[inline]
pub fn screen_direction(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
