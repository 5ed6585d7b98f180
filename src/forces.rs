//! Pure per-tick math shared by the aurora and stardust simulators.
//!
//! Everything here is a plain function of its inputs so the physics can be
//! tested without a window or a GPU.

use glam::Vec2;

/// Amplitude of the glow radius pulse around a baseline of 1.0.
pub const PULSE_AMPLITUDE: f32 = 0.3;

/// Baseline of the twinkle opacity multiplier.
pub const TWINKLE_BASELINE: f32 = 0.7;

/// Amplitude of the twinkle opacity multiplier.
pub const TWINKLE_AMPLITUDE: f32 = 0.3;

/// Where an entity is drawn, given its logical position and the page scroll.
///
/// Only `y` moves; the offset is `scroll * scroll_speed`.
#[inline]
pub fn parallax(logical: Vec2, scroll: f32, scroll_speed: f32) -> Vec2 {
    Vec2::new(logical.x, logical.y - scroll * scroll_speed)
}

/// Proximity falloff `1 - d/R`, or `None` when the pointer is out of reach
/// or sits exactly on the entity.
#[inline]
fn falloff(distance: f32, repel_distance: f32) -> Option<f32> {
    if distance < repel_distance && distance > 0.0 {
        Some(1.0 - distance / repel_distance)
    } else {
        None
    }
}

/// Displacement pushing an entity at `visual` away from `pointer`, with a
/// linear falloff.
///
/// The result is `-(pointer - visual) * (1 - d/R) * force`.
pub fn linear_repulsion(visual: Vec2, pointer: Vec2, repel_distance: f32, force: f32) -> Vec2 {
    let delta = pointer - visual;
    match falloff(delta.length(), repel_distance) {
        Some(f) => -delta * (f * force),
        None => Vec2::ZERO,
    }
}

/// Velocity impulse pushing an entity at `visual` away from `pointer`, with
/// a quadratic ease-in falloff.
///
/// The result is `-(pointer - visual) * (1 - d/R)^2 * force`.
pub fn quadratic_repulsion(visual: Vec2, pointer: Vec2, repel_distance: f32, force: f32) -> Vec2 {
    let delta = pointer - visual;
    match falloff(delta.length(), repel_distance) {
        Some(f) => -delta * (f * f * force),
        None => Vec2::ZERO,
    }
}

/// Toroidal wrap on one axis: leaving past `-margin` re-enters at
/// `extent + margin` and vice versa.
#[inline]
pub fn wrap_edge(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

/// Vertical wrap evaluated on the parallaxed position.
///
/// Returns the new logical `y`. When the visual `y` leaves
/// `[-margin, extent + margin]`, the logical `y` shifts by a full span of
/// `extent + 2 * margin` so the entity slides back in from the other side.
#[inline]
pub fn wrap_visual(logical_y: f32, visual_y: f32, extent: f32, margin: f32) -> f32 {
    let span = extent + margin * 2.0;
    if visual_y < -margin {
        logical_y + span
    } else if visual_y > extent + margin {
        logical_y - span
    } else {
        logical_y
    }
}

/// Radius multiplier for a glow layer, in `[0.7, 1.3]`.
#[inline]
pub fn pulse(phase: f32) -> f32 {
    1.0 + PULSE_AMPLITUDE * phase.sin()
}

/// Opacity multiplier for a dust particle, in `[0.4, 1.0]`.
#[inline]
pub fn twinkle(phase: f32) -> f32 {
    TWINKLE_BASELINE + TWINKLE_AMPLITUDE * phase.sin()
}
