//! The single in-flight projectile

use glam::Vec2;

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Shell {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            alive: true,
        }
    }

    /// One explicit Euler step: move, then accelerate by wind and gravity.
    /// Expires once it leaves a `width` x `height` field (plus margins).
    pub fn step(&mut self, wind: f32, width: f32, height: f32) {
        self.pos += self.vel;
        self.vel.x += wind * WIND_COUPLING;
        self.vel.y += GRAVITY;

        if self.pos.x < -SHELL_MARGIN_X
            || self.pos.x > width + SHELL_MARGIN_X
            || self.pos.y > height + SHELL_MARGIN_BOTTOM
        {
            self.alive = false;
        }
    }

    /// Integer cell the shell currently occupies
    pub fn cell(&self) -> (i32, i32) {
        (self.pos.x.round() as i32, self.pos.y.round() as i32)
    }
}
