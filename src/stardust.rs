//! Stardust: small twinkling points with momentum.
//!
//! Unlike aurora layers, the pointer does not move a particle directly. It
//! adds an impulse to the particle's dynamic velocity, which friction then
//! bleeds off every tick. With friction in (0, 1) the dynamic velocity decays
//! geometrically once the pointer leaves.

use glam::Vec2;
use rand::Rng;

use crate::forces;
use crate::params::StardustParams;
use crate::viewport::Viewport;

/// Particles larger than this get a soft halo.
pub const HALO_SIZE_THRESHOLD: f32 = 1.5;

/// Halo radius as a multiple of particle size.
pub const HALO_SCALE: f32 = 3.0;

/// Halo center alpha as a fraction of the particle's current opacity.
pub const HALO_ALPHA: f32 = 0.3;

/// Vertical wrap margin as a multiple of particle size.
const WRAP_MARGIN_SCALE: f32 = 3.0;

/// One twinkling point.
#[derive(Debug, Clone, PartialEq)]
pub struct DustParticle {
    /// Logical position in viewport pixels, before parallax.
    pub position: Vec2,
    /// Visual position at the start of the last tick, where the particle is drawn.
    pub drawn_at: Vec2,
    /// Radius in pixels.
    pub size: f32,
    /// Fixed drift per tick, chosen at spawn.
    pub drift: Vec2,
    /// Dynamic velocity from pointer impulses, decayed by friction.
    pub velocity: Vec2,
    /// Base opacity before twinkling.
    pub opacity: f32,
    pub twinkle_phase: f32,
    pub twinkle_speed: f32,
}

impl DustParticle {
    /// Create a particle with randomized state inside `size`.
    pub fn spawn<R: Rng>(params: &StardustParams, size: Vec2, rng: &mut R) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y);
        Self {
            position,
            drawn_at: position,
            size: params.size_min + rng.gen::<f32>() * (params.size_max - params.size_min),
            drift: Vec2::new(
                (rng.gen::<f32>() - 0.5) * params.speed_multiplier,
                (rng.gen::<f32>() - 0.5) * params.speed_multiplier,
            ),
            velocity: Vec2::ZERO,
            opacity: params.opacity_min
                + rng.gen::<f32>() * (params.opacity_max - params.opacity_min),
            twinkle_speed: 0.01 + rng.gen::<f32>() * 0.02,
            twinkle_phase: rng.gen::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Where the particle is drawn for the given scroll offset.
    pub fn visual_position(&self, scroll: f32, scroll_speed: f32) -> Vec2 {
        forces::parallax(self.position, scroll, scroll_speed)
    }

    /// Opacity after twinkle modulation.
    pub fn current_opacity(&self) -> f32 {
        self.opacity * forces::twinkle(self.twinkle_phase)
    }

    /// Whether this particle is drawn with a halo.
    pub fn has_halo(&self) -> bool {
        self.size > HALO_SIZE_THRESHOLD
    }

    /// Advance this particle by one tick.
    pub fn step(&mut self, params: &StardustParams, viewport: &Viewport) {
        let scroll = viewport.scroll();
        let visual = self.visual_position(scroll, params.scroll_speed);
        self.drawn_at = visual;

        self.velocity += forces::quadratic_repulsion(
            visual,
            viewport.pointer(),
            params.mouse_repel_distance,
            params.mouse_repel_force,
        );

        self.velocity *= params.friction;
        self.position += self.drift + self.velocity;

        self.position.x = forces::wrap_edge(self.position.x, viewport.width(), 0.0);

        let visual_y = self.visual_position(scroll, params.scroll_speed).y;
        self.position.y = forces::wrap_visual(
            self.position.y,
            visual_y,
            viewport.height(),
            self.size * WRAP_MARGIN_SCALE,
        );

        self.twinkle_phase += self.twinkle_speed;
    }
}

/// The full set of dust particles for one scene.
#[derive(Debug, Clone)]
pub struct StardustField {
    params: StardustParams,
    particles: Vec<DustParticle>,
}

impl StardustField {
    /// Spawn `params.num_particles` particles inside `size`.
    pub fn new<R: Rng>(params: StardustParams, size: Vec2, rng: &mut R) -> Self {
        let particles = (0..params.num_particles)
            .map(|_| DustParticle::spawn(&params, size, rng))
            .collect();
        Self { params, particles }
    }

    /// Advance every particle by one tick.
    pub fn tick(&mut self, viewport: &Viewport) {
        for particle in &mut self.particles {
            particle.step(&self.params, viewport);
        }
    }

    pub fn params(&self) -> &StardustParams {
        &self.params
    }

    pub fn particles(&self) -> &[DustParticle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [DustParticle] {
        &mut self.particles
    }
}
