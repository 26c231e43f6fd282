//! Predictive aiming for the computer-controlled side
//!
//! The planner is stateless: it draws one power and a handful of angles,
//! flies each candidate through the current terrain and wind with the same
//! integration the live shell uses, and keeps whichever lands closest to the
//! opponent's anchor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::shell::Shell;
use super::tank::Tank;
use super::terrain::Terrain;

/// Planner tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Angles sampled per decision (at least one is always tried)
    pub candidates: u32,
    pub angle_min: f32,
    pub angle_max: f32,
    /// One power is drawn per decision from this range
    pub power_min: f32,
    pub power_max: f32,
    /// Trajectory budget per candidate (ticks)
    pub max_steps: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            candidates: 10,
            angle_min: 30.0,
            angle_max: 80.0,
            power_min: 24.0,
            power_max: 30.0,
            max_steps: 240,
        }
    }
}

/// The chosen aim and how well it is expected to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    pub angle: f32,
    pub power: f32,
    /// Where the simulated shell stopped
    pub landing_x: f32,
    /// Horizontal distance from the landing point to the target anchor
    pub miss: f32,
}

/// Uniform sample in [lo, hi); a collapsed range yields `lo` exactly
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Fly a shell aimed at (angle, power) and report where it stops: off the
/// field, into the ground, or at the step budget. The flight starts at the
/// barrel pivot, not the muzzle.
pub fn simulate_landing(
    terrain: &Terrain,
    shooter: &Tank,
    angle: f32,
    power: f32,
    wind: f32,
    max_steps: u32,
) -> f32 {
    let mut probe = shooter.clone();
    probe.set_aim(angle, power);
    let mut shell = Shell::new(probe.pivot(), probe.muzzle_velocity());

    let width = terrain.width() as f32;
    let height = terrain.height() as f32;
    for _ in 0..max_steps {
        shell.step(wind, width, height);
        let pos = shell.pos;
        if pos.y >= height || pos.x < 0.0 || pos.x > width {
            break;
        }
        if pos.y >= terrain.ground_y_at(pos.x as i32) as f32 {
            break;
        }
    }
    shell.pos.x
}

/// Pick the best sampled aim for `shooter` against a target anchored at `target_x`.
/// Always returns a plan, even if every candidate flies straight off the field.
pub fn plan_shot<R: Rng + ?Sized>(
    terrain: &Terrain,
    shooter: &Tank,
    target_x: i32,
    wind: f32,
    config: &AiConfig,
    rng: &mut R,
) -> ShotPlan {
    let power = sample_range(rng, config.power_min, config.power_max);
    let target = target_x as f32;
    let candidate = |rng: &mut R| {
        let angle = sample_range(rng, config.angle_min, config.angle_max);
        let landing_x = simulate_landing(terrain, shooter, angle, power, wind, config.max_steps);
        ShotPlan {
            angle,
            power,
            landing_x,
            miss: (landing_x - target).abs(),
        }
    };

    let mut plan = candidate(&mut *rng);
    for _ in 1..config.candidates {
        let next = candidate(&mut *rng);
        if next.miss < plan.miss {
            plan = next;
        }
    }
    log::debug!(
        "{} plans angle {:.1} power {:.1}, expected miss {:.0}px",
        shooter.side.label(),
        plan.angle,
        plan.power,
        plan.miss
    );
    plan
}
