//! Owned simulation state.
//!
//! A [`Scene`] holds everything one running backdrop needs: the viewport
//! signals, both entity sets, the parameters they were built from and the
//! random source used to spawn them. Ticking and resetting are explicit
//! methods, so the whole simulation can be driven without a window.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::aurora::{AuroraField, GlowLayer};
use crate::error::ParamError;
use crate::params::ParamSet;
use crate::stardust::{DustParticle, StardustField};
use crate::viewport::Viewport;

/// Aurora and stardust entities plus the environment they react to.
#[derive(Debug, Clone)]
pub struct Scene {
    params: ParamSet,
    viewport: Viewport,
    aurora: AuroraField,
    stardust: StardustField,
    rng: StdRng,
    generation: u64,
}

impl Scene {
    /// Build a scene seeded from system entropy.
    pub fn new(params: ParamSet, viewport: Viewport) -> Result<Self, ParamError> {
        Self::build(params, viewport, StdRng::from_entropy())
    }

    /// Build a scene with a fixed seed, for reproducible runs.
    pub fn with_seed(params: ParamSet, viewport: Viewport, seed: u64) -> Result<Self, ParamError> {
        Self::build(params, viewport, StdRng::seed_from_u64(seed))
    }

    fn build(params: ParamSet, viewport: Viewport, mut rng: StdRng) -> Result<Self, ParamError> {
        params.validate()?;
        let size = viewport.size();
        let aurora = AuroraField::new(params.aurora.clone(), size, &mut rng);
        let stardust = StardustField::new(params.stardust.clone(), size, &mut rng);
        Ok(Self {
            params,
            viewport,
            aurora,
            stardust,
            rng,
            generation: 0,
        })
    }

    /// Discard every entity and respawn both sets under `params`.
    ///
    /// The viewport size and scroll offset carry over; the pointer returns to
    /// the center until it moves again. An invalid parameter set is rejected
    /// and the current entities are left untouched.
    pub fn reset(&mut self, params: ParamSet) -> Result<(), ParamError> {
        params.validate()?;
        let size = self.viewport.size();
        self.viewport.recenter_pointer();
        self.aurora = AuroraField::new(params.aurora.clone(), size, &mut self.rng);
        self.stardust = StardustField::new(params.stardust.clone(), size, &mut self.rng);
        self.params = params;
        self.generation += 1;
        log::debug!(
            "scene reset #{}: {} glow layers, {} dust particles",
            self.generation,
            self.aurora.layers().len(),
            self.stardust.particles().len()
        );
        Ok(())
    }

    /// Advance the simulation by one frame: all aurora layers, then all dust.
    ///
    /// Nothing moves while the viewport is empty; wrapping against a zero
    /// extent would pile every entity onto one edge.
    pub fn tick(&mut self) {
        if self.viewport.is_empty() {
            return;
        }
        self.aurora.tick(&self.viewport);
        self.stardust.tick(&self.viewport);
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn aurora(&self) -> &AuroraField {
        &self.aurora
    }

    pub fn aurora_mut(&mut self) -> &mut AuroraField {
        &mut self.aurora
    }

    pub fn stardust(&self) -> &StardustField {
        &self.stardust
    }

    pub fn stardust_mut(&mut self) -> &mut StardustField {
        &mut self.stardust
    }

    pub fn layers(&self) -> &[GlowLayer] {
        self.aurora.layers()
    }

    pub fn particles(&self) -> &[DustParticle] {
        self.stardust.particles()
    }

    /// How many times this scene has been reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
