//! Aurora field: soft glow layers that drift, pulse and shy away from the pointer.
//!
//! Layers are created once per scene with randomized state and are never
//! individually destroyed. The pointer nudges a layer's logical position
//! directly with a linear falloff; vertical wraparound is measured on the
//! parallaxed position so layers scrolled off-screen slide back in.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::forces;
use crate::params::AuroraParams;
use crate::viewport::Viewport;

/// An RGB color with an alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowColor {
    /// sRGB components in 0.0-1.0.
    pub rgb: Vec3,
    pub alpha: f32,
}

impl GlowColor {
    /// Build a color from 8-bit components.
    pub fn from_rgb8(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: Vec3::new(r as f32, g as f32, b as f32) / 255.0,
            alpha,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.rgb.x, self.rgb.y, self.rgb.z, self.alpha]
    }
}

/// Palette cycled by layer index: (r, g, b, alpha relative to `opacity`).
pub const AURORA_PALETTE: [(u8, u8, u8, f32); 4] = [
    (74, 159, 255, 1.0),  // brand blue
    (1, 95, 223, 0.8),    // deep blue
    (30, 210, 252, 0.67), // cyan
    (138, 43, 226, 0.53), // purple accent
];

/// Color of the layer at `index` for a given peak opacity.
pub fn palette_color(index: usize, opacity: f32) -> GlowColor {
    let (r, g, b, weight) = AURORA_PALETTE[index % AURORA_PALETTE.len()];
    GlowColor::from_rgb8(r, g, b, opacity * weight)
}

/// One soft circular glow.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowLayer {
    /// Logical position in viewport pixels, before parallax.
    pub position: Vec2,
    /// Visual position at the start of the last tick, where the layer is drawn.
    pub drawn_at: Vec2,
    /// Base radius before pulsing.
    pub radius: f32,
    pub color: GlowColor,
    /// Fixed drift per tick.
    pub velocity: Vec2,
    /// Pulse phase in radians.
    pub pulse_phase: f32,
    /// Phase advance per tick.
    pub pulse_speed: f32,
}

impl GlowLayer {
    /// Create the layer at `index` with randomized state inside `size`.
    pub fn spawn<R: Rng>(index: usize, params: &AuroraParams, size: Vec2, rng: &mut R) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y);
        Self {
            position,
            drawn_at: position,
            radius: params.radius_min + rng.gen::<f32>() * (params.radius_max - params.radius_min),
            color: palette_color(index, params.opacity),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * params.speed_multiplier,
                (rng.gen::<f32>() - 0.5) * params.speed_multiplier,
            ),
            pulse_speed: params.pulse_speed * 0.5 + rng.gen::<f32>() * params.pulse_speed,
            pulse_phase: rng.gen::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Where the layer is drawn for the given scroll offset.
    pub fn visual_position(&self, scroll: f32, scroll_speed: f32) -> Vec2 {
        forces::parallax(self.position, scroll, scroll_speed)
    }

    /// Radius after pulse modulation.
    pub fn rendered_radius(&self) -> f32 {
        self.radius * forces::pulse(self.pulse_phase)
    }

    /// Advance this layer by one tick.
    pub fn step(&mut self, params: &AuroraParams, viewport: &Viewport) {
        let scroll = viewport.scroll();
        let visual = self.visual_position(scroll, params.scroll_speed);
        self.drawn_at = visual;

        self.position += forces::linear_repulsion(
            visual,
            viewport.pointer(),
            params.mouse_repel_distance,
            params.mouse_repel_force,
        );

        self.position += self.velocity;

        self.position.x = forces::wrap_edge(self.position.x, viewport.width(), self.radius);

        let visual_y = self.visual_position(scroll, params.scroll_speed).y;
        self.position.y =
            forces::wrap_visual(self.position.y, visual_y, viewport.height(), self.radius * 2.0);

        self.pulse_phase += self.pulse_speed;
    }
}

/// The full set of glow layers for one scene.
#[derive(Debug, Clone)]
pub struct AuroraField {
    params: AuroraParams,
    layers: Vec<GlowLayer>,
}

impl AuroraField {
    /// Spawn `params.num_layers` layers inside `size`.
    pub fn new<R: Rng>(params: AuroraParams, size: Vec2, rng: &mut R) -> Self {
        let layers = (0..params.num_layers as usize)
            .map(|i| GlowLayer::spawn(i, &params, size, rng))
            .collect();
        Self { params, layers }
    }

    /// Advance every layer by one tick.
    pub fn tick(&mut self, viewport: &Viewport) {
        for layer in &mut self.layers {
            layer.step(&self.params, viewport);
        }
    }

    pub fn params(&self) -> &AuroraParams {
        &self.params
    }

    pub fn layers(&self) -> &[GlowLayer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [GlowLayer] {
        &mut self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_params() -> AuroraParams {
        AuroraParams {
            mouse_repel_distance: 0.0,
            ..AuroraParams::default()
        }
    }

    #[test]
    fn test_spawn_within_envelope() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = AuroraParams::default();
        let field = AuroraField::new(params.clone(), Vec2::new(800.0, 600.0), &mut rng);

        assert_eq!(field.layers().len(), 12);
        for layer in field.layers() {
            assert!(layer.radius >= params.radius_min && layer.radius <= params.radius_max);
            assert!(layer.position.x >= 0.0 && layer.position.x <= 800.0);
            assert!(layer.position.y >= 0.0 && layer.position.y <= 600.0);
            assert!(layer.velocity.x.abs() <= params.speed_multiplier * 0.5);
            assert!(layer.pulse_speed >= params.pulse_speed * 0.5);
            assert!(layer.pulse_speed <= params.pulse_speed * 1.5);
        }
    }

    #[test]
    fn test_palette_cycles() {
        let a = palette_color(0, 0.15);
        let b = palette_color(4, 0.15);
        assert_eq!(a, b);
        assert!((palette_color(1, 1.0).alpha - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_wrap_uses_radius_margin() {
        let viewport = Viewport::new(800.0, 600.0);
        let params = still_params();
        let mut layer = GlowLayer {
            position: Vec2::new(-99.5, 300.0),
            drawn_at: Vec2::ZERO,
            radius: 100.0,
            color: palette_color(0, 0.15),
            velocity: Vec2::new(-1.0, 0.0),
            pulse_phase: 0.0,
            pulse_speed: 0.0,
        };

        layer.step(&params, &viewport);
        assert_eq!(layer.position.x, 900.0);
    }

    #[test]
    fn test_vertical_wrap_respects_parallax() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_scroll(1000.0);
        let params = still_params();

        // Visual y = 700 - 1000 * 0.3 = 400: on screen, no wrap
        let mut layer = GlowLayer {
            position: Vec2::new(400.0, 700.0),
            drawn_at: Vec2::ZERO,
            radius: 50.0,
            color: palette_color(0, 0.15),
            velocity: Vec2::ZERO,
            pulse_phase: 0.0,
            pulse_speed: 0.0,
        };
        layer.step(&params, &viewport);
        assert_eq!(layer.position.y, 700.0);

        // Visual y = 150 - 300 = -150 < -100: shifts down by 600 + 200
        layer.position.y = 150.0;
        layer.step(&params, &viewport);
        assert_eq!(layer.position.y, 950.0);
    }

    #[test]
    fn test_pointer_pushes_layer_away() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_pointer(450.0, 300.0);
        let params = AuroraParams::default();

        let mut layer = GlowLayer {
            position: Vec2::new(400.0, 300.0),
            drawn_at: Vec2::ZERO,
            radius: 200.0,
            color: palette_color(0, 0.15),
            velocity: Vec2::ZERO,
            pulse_phase: 0.0,
            pulse_speed: 0.0,
        };
        layer.step(&params, &viewport);
        assert!(layer.position.x < 400.0);
        assert_eq!(layer.position.y, 300.0);
    }

    #[test]
    fn test_drawn_at_is_pre_step_visual_position() {
        let mut viewport = Viewport::new(800.0, 600.0);
        viewport.set_scroll(100.0);
        let params = still_params();

        // Wraps this tick: drawn at the old edge, stored at the new one
        let mut layer = GlowLayer {
            position: Vec2::new(-99.5, 300.0),
            drawn_at: Vec2::ZERO,
            radius: 100.0,
            color: palette_color(0, 0.15),
            velocity: Vec2::new(-1.0, 0.0),
            pulse_phase: 0.0,
            pulse_speed: 0.0,
        };
        layer.step(&params, &viewport);
        assert_eq!(layer.drawn_at, Vec2::new(-99.5, 300.0 - 100.0 * 0.3));
        assert_eq!(layer.position.x, 900.0);
    }
}
