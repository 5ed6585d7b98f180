//! Integration tests for the simulation lifecycle.
//!
//! These drive a headless [`Scene`] or [`Stage`] through the public API and
//! check the behavioral guarantees of the animation: wraparound, friction,
//! pulsing, pointer repulsion, teardown and parameter-driven restarts.

use aurora_backdrop::forces::{linear_repulsion, quadratic_repulsion};
use aurora_backdrop::prelude::*;
use aurora_backdrop::InputOutcome;
use aurora_backdrop::viewport::LINE_HEIGHT;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceId, MouseScrollDelta, TouchPhase, WindowEvent};

const WIDTH: f32 = 640.0;
const HEIGHT: f32 = 480.0;

/// Parameters with the pointer switched off and brisk drift.
fn untouched_params() -> ParamSet {
    let mut params = ParamSet::default();
    params.aurora.mouse_repel_distance = 0.0;
    params.aurora.speed_multiplier = 8.0;
    params.stardust.mouse_repel_distance = 0.0;
    params.stardust.speed_multiplier = 8.0;
    params
}

fn scene_with(params: ParamSet, seed: u64) -> Scene {
    Scene::with_seed(params, Viewport::new(WIDTH, HEIGHT), seed).unwrap()
}

// ============================================================================
// Wraparound
// ============================================================================

#[test]
fn test_entities_stay_within_wrap_margins() {
    let mut scene = scene_with(untouched_params(), 1);
    const EPS: f32 = 1e-3;

    for _ in 0..2_000 {
        scene.tick();

        for layer in scene.layers() {
            let r = layer.radius;
            assert!(layer.position.x >= -r - EPS && layer.position.x <= WIDTH + r + EPS);
            assert!(layer.position.y >= -2.0 * r - EPS && layer.position.y <= HEIGHT + 2.0 * r + EPS);
        }

        for p in scene.particles() {
            let m = 3.0 * p.size;
            assert!(p.position.x >= -EPS && p.position.x <= WIDTH + EPS);
            assert!(p.position.y >= -m - EPS && p.position.y <= HEIGHT + m + EPS);
        }
    }
}

#[test]
fn test_vertical_wrap_follows_scrolled_position() {
    let mut scene = scene_with(untouched_params(), 2);
    scene.viewport_mut().set_scroll(1_000.0);
    let aurora_speed = scene.params().aurora.scroll_speed;
    const EPS: f32 = 1e-3;

    for _ in 0..2_000 {
        scene.tick();
    }
    // Once settled, wraparound holds on the drawn (parallaxed) position
    for layer in scene.layers() {
        let visual = layer.visual_position(1_000.0, aurora_speed);
        let m = 2.0 * layer.radius;
        assert!(visual.y >= -m - EPS && visual.y <= HEIGHT + m + EPS);
    }
}

// ============================================================================
// Friction
// ============================================================================

#[test]
fn test_friction_decays_single_impulse_geometrically() {
    let mut params = untouched_params();
    params.stardust.friction = 0.95;
    let mut scene = scene_with(params, 3);

    let impulse = Vec2::new(3.0, -4.0);
    scene.stardust_mut().particles_mut()[0].velocity = impulse;

    for n in 1..=50 {
        scene.tick();
        let expected = impulse.length() * 0.95f32.powi(n);
        let actual = scene.particles()[0].velocity.length();
        assert!(
            (actual - expected).abs() <= expected * 1e-4,
            "tick {}: {} vs {}",
            n,
            actual,
            expected
        );
    }

    for _ in 0..1_000 {
        scene.tick();
    }
    assert!(scene.particles()[0].velocity.length() < 1e-6);
}

// ============================================================================
// Pulse
// ============================================================================

#[test]
fn test_rendered_radius_stays_within_pulse_band() {
    let mut params = untouched_params();
    params.aurora.pulse_speed = 0.005;
    let mut scene = scene_with(params, 4);

    for _ in 0..3_000 {
        scene.tick();
        for layer in scene.layers() {
            let r = layer.rendered_radius();
            assert!(r >= layer.radius * 0.7 - 1e-3);
            assert!(r <= layer.radius * 1.3 + 1e-3);
        }
    }
}

// ============================================================================
// Repulsion
// ============================================================================

#[test]
fn test_pointer_on_top_of_particle_applies_nothing() {
    let mut params = ParamSet::default();
    params.stardust.speed_multiplier = 0.0;
    params.aurora.mouse_repel_distance = 0.0;
    let mut scene = scene_with(params, 5);

    let target = scene.particles()[0].position;
    scene.viewport_mut().set_pointer(target.x, target.y);
    scene.tick();

    let p = &scene.particles()[0];
    assert!(p.velocity.x.is_finite() && p.velocity.y.is_finite());
    assert_eq!(p.velocity, Vec2::ZERO);
    assert_eq!(p.position, target);
}

#[test]
fn test_repulsion_boundary_and_direction() {
    let visual = Vec2::new(100.0, 100.0);

    // Exactly on the boundary
    let edge = Vec2::new(100.0, 160.0);
    assert_eq!(linear_repulsion(visual, edge, 60.0, 1.0), Vec2::ZERO);
    assert_eq!(quadratic_repulsion(visual, edge, 60.0, 1.0), Vec2::ZERO);

    // Inside the boundary the push points away from the pointer
    let pointer = Vec2::new(110.0, 120.0);
    let away = visual - pointer;
    assert!(linear_repulsion(visual, pointer, 60.0, 1.0).dot(away) > 0.0);
    assert!(quadratic_repulsion(visual, pointer, 60.0, 1.0).dot(away) > 0.0);
}

#[test]
fn test_nearby_pointer_pushes_particle_away() {
    let mut params = ParamSet::default();
    params.stardust.speed_multiplier = 0.0;
    let mut scene = scene_with(params, 6);

    let target = scene.particles()[0].position;
    scene.viewport_mut().set_pointer(target.x + 10.0, target.y);
    scene.tick();

    assert!(scene.particles()[0].velocity.x < 0.0);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_frame_after_unmount_is_a_no_op() {
    let mut stage = Stage::new(ParamSet::default()).unwrap().with_seed(7);
    stage.mount(WIDTH, HEIGHT).unwrap();
    assert!(stage.frame());

    stage.unmount();
    assert!(!stage.has_pending_frame());
    assert!(!stage.is_listening());
    assert!(stage.scene().is_none());

    // A frame or input that arrives late must do nothing
    assert!(!stage.frame());
    let resize = WindowEvent::Resized(PhysicalSize::new(100, 100));
    assert_eq!(stage.handle_event(&resize), InputOutcome::Ignored);
    assert!(stage.scene().is_none());

    stage.unmount();
    assert!(!stage.frame());
}

#[test]
fn test_resize_keeps_entities() {
    let mut stage = Stage::new(ParamSet::default()).unwrap().with_seed(8);
    stage.mount(WIDTH, HEIGHT).unwrap();
    let before = stage.scene().unwrap().layers().to_vec();

    let resize = WindowEvent::Resized(PhysicalSize::new(1024, 768));
    assert_eq!(stage.handle_event(&resize), InputOutcome::Resized);

    let scene = stage.scene().unwrap();
    assert_eq!(scene.viewport().size(), Vec2::new(1024.0, 768.0));
    assert_eq!(scene.layers(), &before[..]);
}

#[test]
fn test_minimized_window_leaves_scene_intact() {
    let mut stage = Stage::new(ParamSet::default()).unwrap().with_seed(3);
    stage.mount(1280.0, 720.0).unwrap();
    stage.frame();
    let layers = stage.scene().unwrap().layers().to_vec();
    let particles = stage.scene().unwrap().particles().to_vec();

    let minimized = WindowEvent::Resized(PhysicalSize::new(0, 0));
    assert_eq!(stage.handle_event(&minimized), InputOutcome::Resized);

    // Frames keep coming so the loop resumes on restore, but nothing moves
    for _ in 0..10 {
        assert!(stage.frame());
    }
    assert!(stage.has_pending_frame());

    let restored = WindowEvent::Resized(PhysicalSize::new(1280, 720));
    stage.handle_event(&restored);

    let scene = stage.scene().unwrap();
    assert_eq!(scene.layers(), &layers[..]);
    assert_eq!(scene.particles(), &particles[..]);

    // Still spread across the width rather than stacked on one edge
    let spread = scene
        .particles()
        .iter()
        .filter(|p| p.position.x > 1.0)
        .count();
    assert!(spread > scene.particles().len() / 2);
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_wheel_and_cursor_reach_scene() {
    let mut stage = Stage::new(ParamSet::default()).unwrap().with_seed(12);
    stage.mount(WIDTH, HEIGHT).unwrap();

    let wheel = WindowEvent::MouseWheel {
        device_id: DeviceId::dummy(),
        delta: MouseScrollDelta::LineDelta(0.0, -1.0),
        phase: TouchPhase::Moved,
    };
    assert_eq!(stage.handle_event(&wheel), InputOutcome::Scrolled);
    assert_eq!(stage.scene().unwrap().viewport().scroll(), LINE_HEIGHT);

    let cursor = WindowEvent::CursorMoved {
        device_id: DeviceId::dummy(),
        position: PhysicalPosition::new(33.0, 44.0),
    };
    assert_eq!(stage.handle_event(&cursor), InputOutcome::PointerMoved);
    assert_eq!(stage.scene().unwrap().viewport().pointer(), Vec2::new(33.0, 44.0));

    stage.unmount();
    assert_eq!(stage.handle_event(&wheel), InputOutcome::Ignored);
}

#[test]
fn test_scrolling_shifts_drawn_positions() {
    let mut stage = Stage::new(untouched_params()).unwrap().with_seed(13);
    stage.mount(WIDTH, HEIGHT).unwrap();
    let before = stage.scene().unwrap().layers()[0].position;

    let wheel = WindowEvent::MouseWheel {
        device_id: DeviceId::dummy(),
        delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -100.0)),
        phase: TouchPhase::Moved,
    };
    stage.handle_event(&wheel);
    stage.frame();

    let scene = stage.scene().unwrap();
    let speed = scene.params().aurora.scroll_speed;
    assert_eq!(scene.layers()[0].drawn_at, Vec2::new(before.x, before.y - 100.0 * speed));
}

// ============================================================================
// Parameter changes
// ============================================================================

#[test]
fn test_param_change_rebuilds_with_new_counts() {
    let mut stage = Stage::new(ParamSet::default()).unwrap().with_seed(9);
    stage.mount(WIDTH, HEIGHT).unwrap();

    for _ in 0..30 {
        stage.frame();
    }
    let old_layers = stage.scene().unwrap().layers().to_vec();

    let mut params = ParamSet::default();
    params.aurora.num_layers = 3;
    params.stardust.num_particles = 120;
    stage.set_params(params).unwrap();

    let scene = stage.scene().unwrap();
    assert_eq!(scene.layers().len(), 3);
    assert_eq!(scene.particles().len(), 120);
    assert_eq!(scene.generation(), 1);
    assert!(scene.particles().iter().all(|p| p.velocity == Vec2::ZERO));

    // Freshly spawned, not the first three survivors
    assert!(scene
        .layers()
        .iter()
        .zip(old_layers.iter())
        .any(|(new, old)| new.position != old.position));
}

#[test]
fn test_every_field_change_restarts() {
    let mut scene = scene_with(ParamSet::default(), 10);
    for _ in 0..5 {
        scene.tick();
    }

    let mut params = scene.params().clone();
    params.stardust.friction = 0.95;
    scene.reset(params.clone()).unwrap();

    assert_eq!(scene.params(), &params);
    assert_eq!(scene.stardust().params().friction, 0.95);
    assert_eq!(scene.generation(), 1);
}

#[test]
fn test_loaded_file_drives_scene() {
    let path = std::env::temp_dir().join("aurora_backdrop_scene_tests.json");
    let mut params = ParamSet::default();
    params.aurora.num_layers = 4;
    params.save(&path).unwrap();

    let loaded = ParamSet::load(&path).unwrap();
    let scene = Scene::with_seed(loaded, Viewport::new(WIDTH, HEIGHT), 11).unwrap();
    assert_eq!(scene.layers().len(), 4);

    let _ = std::fs::remove_file(path);
}
