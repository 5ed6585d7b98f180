//! Turns a [`Scene`] into sprite lists for the GPU.
//!
//! The aurora and stardust layers are kept in separate lists because they
//! blend differently: glows add light, dust is painted over them. Within the
//! dust list a particle's halo always precedes its disc so it sits beneath.
//!
//! Entities are placed where they stood when the last tick began, with the
//! pulse and twinkle phases that tick advanced to.

use crate::aurora::GlowLayer;
use crate::scene::Scene;
use crate::shader::{Falloff, Sprite};
use crate::stardust::{DustParticle, HALO_ALPHA, HALO_SCALE};

/// Sprites for one rendered frame. Reused between frames.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    /// Aurora glows, drawn first with additive blending.
    pub glow: Vec<Sprite>,
    /// Stardust halos and discs, alpha-blended on top.
    pub dust: Vec<Sprite>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.glow.clear();
        self.dust.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.glow.is_empty() && self.dust.is_empty()
    }
}

/// Builds [`Frame`]s from scene state.
pub struct Compositor;

impl Compositor {
    /// Replace the contents of `frame` with the current scene.
    pub fn compose(scene: &Scene, frame: &mut Frame) {
        frame.clear();
        frame.glow.extend(scene.layers().iter().map(glow_sprite));
        for particle in scene.particles() {
            push_dust(&mut frame.dust, particle);
        }
    }
}

fn glow_sprite(layer: &GlowLayer) -> Sprite {
    Sprite::new(
        layer.drawn_at.to_array(),
        layer.rendered_radius(),
        Falloff::Glow,
        layer.color.to_array(),
    )
}

fn push_dust(out: &mut Vec<Sprite>, particle: &DustParticle) {
    let center = particle.drawn_at.to_array();
    let opacity = particle.current_opacity();

    if particle.has_halo() {
        out.push(Sprite::new(
            center,
            particle.size * HALO_SCALE,
            Falloff::Halo,
            [1.0, 1.0, 1.0, opacity * HALO_ALPHA],
        ));
    }

    out.push(Sprite::new(
        center,
        particle.size,
        Falloff::Disc,
        [1.0, 1.0, 1.0, opacity],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSet;
    use crate::viewport::Viewport;

    fn scene() -> Scene {
        Scene::with_seed(ParamSet::default(), Viewport::new(800.0, 600.0), 11).unwrap()
    }

    #[test]
    fn test_one_glow_per_layer() {
        let scene = scene();
        let mut frame = Frame::new();
        Compositor::compose(&scene, &mut frame);
        assert_eq!(frame.glow.len(), scene.layers().len());
        assert!(frame.glow.iter().all(|s| s.falloff() == Some(Falloff::Glow)));
    }

    #[test]
    fn test_halo_precedes_disc() {
        let mut scene = scene();
        for (i, p) in scene.stardust_mut().particles_mut().iter_mut().enumerate() {
            p.size = if i % 2 == 0 { 2.0 } else { 1.0 };
        }

        let mut frame = Frame::new();
        Compositor::compose(&scene, &mut frame);

        let halos = scene.particles().iter().filter(|p| p.has_halo()).count();
        assert_eq!(frame.dust.len(), scene.particles().len() + halos);

        for (i, sprite) in frame.dust.iter().enumerate() {
            if sprite.falloff() == Some(Falloff::Halo) {
                let disc = frame.dust[i + 1];
                assert_eq!(disc.falloff(), Some(Falloff::Disc));
                assert_eq!(disc.center, sprite.center);
                assert_eq!(sprite.radius, disc.radius * HALO_SCALE);
                assert!((sprite.color[3] - disc.color[3] * HALO_ALPHA).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_sprites_use_pre_tick_visual_position() {
        let mut scene = scene();
        scene.viewport_mut().set_scroll(200.0);
        let layer_before = scene.layers()[0].position;
        let particle_before = scene.particles()[0].position;
        scene.tick();

        let mut frame = Frame::new();
        Compositor::compose(&scene, &mut frame);

        let layer = &scene.layers()[0];
        assert_eq!(frame.glow[0].center, [layer_before.x, layer_before.y - 200.0 * 0.3]);
        assert_eq!(frame.glow[0].radius, layer.rendered_radius());

        let disc = frame
            .dust
            .iter()
            .find(|s| s.falloff() == Some(Falloff::Disc))
            .unwrap();
        assert_eq!(disc.center, [particle_before.x, particle_before.y - 200.0 * 0.05]);
    }

    #[test]
    fn test_compose_replaces_previous_frame() {
        let scene = scene();
        let mut frame = Frame::new();
        Compositor::compose(&scene, &mut frame);
        let first = frame.glow.len() + frame.dust.len();
        Compositor::compose(&scene, &mut frame);
        assert_eq!(frame.glow.len() + frame.dust.len(), first);
    }
}
