// Spring-follow heart cursor.

use glam::Vec2;

use super::constants::*;

#[derive(Clone, Copy, Debug)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: CURSOR_STIFFNESS,
            damping: CURSOR_DAMPING,
            mass: CURSOR_MASS,
        }
    }
}

/// Damped spring pulling `pos` toward `target` on both axes.
#[derive(Clone, Copy, Debug)]
pub struct SpringFollower {
    pub params: SpringParams,
    pub pos: Vec2,
    pub vel: Vec2,
    pub target: Vec2,
}

impl SpringFollower {
    pub fn new(params: SpringParams, at: Vec2) -> Self {
        Self {
            params,
            pos: at,
            vel: Vec2::ZERO,
            target: at,
        }
    }

    /// Advance by `dt` seconds using fixed substeps (semi-implicit Euler).
    pub fn step(&mut self, dt: f32) -> Vec2 {
        if !(dt > 0.0) {
            return self.pos;
        }
        let n = (dt / CURSOR_MAX_SUBSTEP_SEC).ceil().max(1.0) as u32;
        let h = dt / n as f32;
        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;
        for _ in 0..n {
            let accel = (-stiffness * (self.pos - self.target) - damping * self.vel) / mass;
            self.vel += accel * h;
            self.pos += self.vel * h;
        }
        self.pos
    }

    pub fn is_settled(&self, eps: f32) -> bool {
        self.pos.distance(self.target) < eps && self.vel.length() < eps
    }
}

/// Heart glyph trailing the pointer, parked off-screen until first movement.
#[derive(Clone, Copy, Debug)]
pub struct HeartCursor {
    follower: SpringFollower,
    visible: bool,
}

impl Default for HeartCursor {
    fn default() -> Self {
        let parked = Vec2::splat(CURSOR_PARKED_PX);
        Self {
            follower: SpringFollower::new(SpringParams::default(), parked),
            visible: false,
        }
    }
}

impl HeartCursor {
    pub fn on_move(&mut self, client_x: f32, client_y: f32) {
        self.follower.target = Vec2::new(client_x, client_y) - Vec2::splat(CURSOR_HALF_SIZE_PX);
        self.visible = true;
    }

    pub fn on_enter(&mut self) {
        self.visible = true;
    }

    pub fn on_leave(&mut self) {
        self.visible = false;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.follower.target
    }

    /// Top-left corner of the glyph after `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        self.follower.step(dt)
    }
}
