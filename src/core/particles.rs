// Heart particle field: celebration bursts and confetti rain.
//
// The field owns every live particle in a single `Vec`. Each frame advances
// all of them, then compacts the list so that only visible particles remain;
// nothing outside the field holds on to a particle across frames.

use glam::Vec2;
use rand::Rng;

use super::constants::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Crimson,
    Gold,
}

impl Accent {
    pub fn css(self) -> &'static str {
        match self {
            Accent::Crimson => ACCENT_CRIMSON,
            Accent::Gold => ACCENT_GOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Burst,
    Rain,
}

#[derive(Clone, Debug)]
pub struct ParticleParams {
    pub burst_count: usize,
    pub burst_force: f32,
    pub rain_probability: f32,
    pub rain_spawn_y: f32,
    pub shrink_per_frame: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            burst_count: BURST_PARTICLE_COUNT,
            burst_force: BURST_FORCE,
            rain_probability: RAIN_PROBABILITY,
            rain_spawn_y: RAIN_SPAWN_Y,
            shrink_per_frame: PARTICLE_SHRINK_PER_FRAME,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Life lost per frame.
    pub decay: f32,
    /// 1.0 at spawn, removed once it reaches 0.
    pub life: f32,
    /// Frames lived; `life` is recomputed from it every frame.
    pub age: u32,
    pub accent: Accent,
    pub origin: Origin,
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, at: Vec2, force: f32, origin: Origin) -> Self {
        let size = rng.gen::<f32>() * PARTICLE_SIZE_SPAN + PARTICLE_SIZE_MIN;
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let speed = (rng.gen::<f32>() * PARTICLE_SPEED_SPAN + PARTICLE_SPEED_MIN) * force;
        let accent = if rng.gen::<f32>() > 0.5 {
            Accent::Crimson
        } else {
            Accent::Gold
        };
        let decay = rng.gen_range(PARTICLE_DECAY_MIN..PARTICLE_DECAY_MAX);
        Self {
            pos: at,
            vel: Vec2::from_angle(angle) * speed,
            size,
            decay,
            life: 1.0,
            age: 0,
            accent,
            origin,
        }
    }

    #[inline]
    pub fn update(&mut self, shrink: f32) {
        self.pos += self.vel;
        self.age += 1;
        self.life = 1.0 - self.decay * self.age as f32;
        self.size *= shrink;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Opacity to draw with.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    pub fn heart(&self) -> HeartPath {
        heart_path(self.pos, self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub c1: Vec2,
    pub c2: Vec2,
    pub to: Vec2,
}

/// Closed heart outline: four cubic Béziers starting and ending at `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartPath {
    pub start: Vec2,
    pub segments: [CubicSegment; 4],
}

/// Heart of height `size` whose top notch sits at `origin`.
pub fn heart_path(origin: Vec2, size: f32) -> HeartPath {
    let Vec2 { x, y } = origin;
    let top = size * HEART_TOP_CURVE_RATIO;
    let half = size / 2.0;
    let mid = y + (size + top) / 2.0;
    let notch = Vec2::new(x, y + top);
    HeartPath {
        start: notch,
        segments: [
            // top left
            CubicSegment {
                c1: Vec2::new(x, y),
                c2: Vec2::new(x - half, y),
                to: Vec2::new(x - half, y + top),
            },
            // bottom left
            CubicSegment {
                c1: Vec2::new(x - half, mid),
                c2: Vec2::new(x, mid),
                to: Vec2::new(x, y + size),
            },
            // bottom right
            CubicSegment {
                c1: Vec2::new(x, mid),
                c2: Vec2::new(x + half, mid),
                to: Vec2::new(x + half, y + top),
            },
            // top right
            CubicSegment {
                c1: Vec2::new(x + half, y),
                c2: Vec2::new(x, y),
                to: notch,
            },
        ],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPhase {
    Idle,
    Burst,
    Raining,
    BurstAndRain,
}

/// Anything that can react to the proposal being accepted.
pub trait Celebrate {
    fn trigger_explosion(&mut self);
    fn set_celebrated(&mut self, on: bool);
}

pub struct ParticleField<R: Rng> {
    pub params: ParticleParams,
    particles: Vec<Particle>,
    viewport: Vec2,
    celebrated: bool,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(rng: R, width: f32, height: f32) -> Self {
        Self {
            params: ParticleParams::default(),
            particles: Vec::new(),
            viewport: Vec2::new(width.max(0.0), height.max(0.0)),
            celebrated: false,
            rng,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn is_celebrated(&self) -> bool {
        self.celebrated
    }

    pub fn phase(&self) -> FieldPhase {
        let bursting = self.particles.iter().any(|p| p.origin == Origin::Burst);
        match (bursting, self.celebrated) {
            (false, false) => FieldPhase::Idle,
            (true, false) => FieldPhase::Burst,
            (false, true) => FieldPhase::Raining,
            (true, true) => FieldPhase::BurstAndRain,
        }
    }

    /// Enqueue a full burst at the viewport centre.
    pub fn explode(&mut self) {
        let centre = self.viewport / 2.0;
        let force = self.params.burst_force;
        let count = self.params.burst_count;
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle::spawn(&mut self.rng, centre, force, Origin::Burst);
            self.particles.push(p);
        }
    }

    /// Move, fade and shrink every particle, drop the expired ones, then
    /// maybe add one raindrop if celebrating.
    pub fn advance_frame(&mut self) {
        let shrink = self.params.shrink_per_frame;
        for p in self.particles.iter_mut() {
            p.update(shrink);
        }
        self.particles.retain(Particle::is_alive);

        if self.celebrated && self.rng.gen::<f32>() < self.params.rain_probability {
            let x = self.rng.gen::<f32>() * self.viewport.x;
            let at = Vec2::new(x, self.params.rain_spawn_y);
            let p = Particle::spawn(&mut self.rng, at, 1.0, Origin::Rain);
            self.particles.push(p);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<R: Rng> Celebrate for ParticleField<R> {
    fn trigger_explosion(&mut self) {
        self.explode();
    }

    fn set_celebrated(&mut self, on: bool) {
        self.celebrated = on;
    }
}
