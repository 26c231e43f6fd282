//! Tanks: aim state, ground contact and muzzle derivation

use glam::Vec2;

use super::shell::Shell;
use crate::consts::*;
use crate::screen_direction;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::One => "P1",
            Side::Two => "P2",
        }
    }

    /// +1 faces right, -1 faces left
    pub fn facing(self) -> i8 {
        match self {
            Side::One => 1,
            Side::Two => -1,
        }
    }
}

/// Aim keys held this tick, as physical keys (arrows for P1, A/D/W/S for P2)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AimKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tank {
    pub side: Side,
    /// Fixed horizontal anchor
    pub x: i32,
    pub facing: i8,
    /// Degrees above the horizon, measured toward `facing`
    pub angle: f32,
    pub power: f32,
    /// Topmost solid row under `x`, refreshed whenever the terrain changes
    pub ground_y: i32,
    pub alive: bool,
}

impl Tank {
    pub fn new(side: Side, x: i32) -> Self {
        Self {
            side,
            x,
            facing: side.facing(),
            angle: START_ANGLE,
            power: START_POWER,
            ground_y: 0,
            alive: true,
        }
    }

    /// Barrel launch angle in degrees, mirrored for left-facing tanks
    pub fn launch_degrees(&self) -> f32 {
        if self.facing >= 0 {
            self.angle
        } else {
            180.0 - self.angle
        }
    }

    /// Barrel rotation point
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.ground_y as f32 - PIVOT_HEIGHT)
    }

    /// Point used for direct-hit and blast distance checks
    pub fn torso(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.ground_y as f32 - TORSO_HEIGHT)
    }

    /// Tip of the barrel
    pub fn muzzle(&self) -> Vec2 {
        self.pivot() + screen_direction(self.launch_degrees()) * BARREL_LENGTH
    }

    pub fn muzzle_velocity(&self) -> Vec2 {
        screen_direction(self.launch_degrees()) * self.power * MUZZLE_SPEED_SCALE
    }

    /// Shell leaving the barrel with the current aim
    pub fn launch(&self) -> Shell {
        Shell::new(self.muzzle(), self.muzzle_velocity())
    }

    /// Nudge aim from held keys. Left/right are screen directions, so a
    /// left-facing tank raises its barrel with `left`.
    pub fn apply_aim(&mut self, keys: AimKeys) {
        let raise = if self.facing >= 0 { keys.right } else { keys.left };
        let lower = if self.facing >= 0 { keys.left } else { keys.right };
        if lower {
            self.angle -= ANGLE_STEP;
        }
        if raise {
            self.angle += ANGLE_STEP;
        }
        if keys.up {
            self.power += POWER_STEP;
        }
        if keys.down {
            self.power -= POWER_STEP;
        }
        self.clamp_aim();
    }

    pub fn set_aim(&mut self, angle: f32, power: f32) {
        self.angle = angle;
        self.power = power;
        self.clamp_aim();
    }

    fn clamp_aim(&mut self) {
        self.angle = self.angle.clamp(ANGLE_MIN, ANGLE_MAX);
        self.power = self.power.clamp(POWER_MIN, POWER_MAX);
    }
}
