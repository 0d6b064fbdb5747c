// Host-side tests for the pointer interaction state machine and its
// smoothed scalars.

use glam::{Quat, Vec2, Vec3};
use planet_core::constants::{
    COMPRESSION_SCALE_ACTIVE, MAX_OUTWARD, RELEASE_SENSITIVITY, SPHERE_RADIUS, SPIN_BOOST_TARGET,
};
use planet_core::interaction::{InteractionState, PointerPhase};
use planet_core::spatial::SurfaceProbe;

fn make_state() -> InteractionState {
    InteractionState::new(SPHERE_RADIUS)
}

#[test]
fn move_activates_hovering() {
    let mut s = make_state();
    assert_eq!(s.phase, PointerPhase::Idle);
    s.pointer_moved(Vec2::ZERO, Vec2::new(100.0, 100.0), 0.0);
    assert_eq!(s.phase, PointerPhase::Hovering);
    assert!(s.pointer_active());
}

#[test]
fn press_requires_a_sphere_hit() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 0.0);
    s.pointer_down(false, Vec2::ZERO);
    assert_eq!(s.phase, PointerPhase::Hovering);
    assert!(s.orbit_enabled);

    s.pointer_down(true, Vec2::ZERO);
    assert_eq!(s.phase, PointerPhase::Pressed);
    assert!(!s.orbit_enabled, "press must own the pointer exclusively");
}

#[test]
fn release_converts_drag_delta_into_angular_velocity() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::new(200.0, 300.0), 0.0);
    s.pointer_down(true, Vec2::new(200.0, 300.0));
    // Drag 100 px right, no vertical movement
    s.pointer_moved(Vec2::ZERO, Vec2::new(300.0, 300.0), 0.1);

    let v = s.pointer_up().expect("release after press yields momentum");
    let expected = Vec3::new(0.0, 100.0 * RELEASE_SENSITIVITY, 0.0);
    assert!((v - expected).length() < 1e-6, "got {v:?}");
    assert_eq!(s.phase, PointerPhase::Hovering);
    assert!(s.orbit_enabled);

    // A second release without a press yields nothing
    assert!(s.pointer_up().is_none());
}

#[test]
fn leave_resets_to_idle_from_any_state() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 0.0);
    s.pointer_down(true, Vec2::ZERO);
    s.pointer_left();
    assert_eq!(s.phase, PointerPhase::Idle);
    assert!(s.orbit_enabled);
    assert!(!s.magnet_active);
}

#[test]
fn compression_converges_to_target_while_pressed() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 0.0);
    s.pointer_down(true, Vec2::ZERO);

    let mut prev = s.compression_factor;
    for frame in 0..120 {
        s.advance(frame as f64 / 60.0);
        assert!(
            s.compression_factor <= prev + 1e-6,
            "compression must approach the target monotonically (frame {frame})"
        );
        prev = s.compression_factor;
    }
    assert!((s.compression_factor - COMPRESSION_SCALE_ACTIVE).abs() < 1e-3);
    assert!((s.spin_speed_factor - SPIN_BOOST_TARGET).abs() < 1e-2);
}

#[test]
fn compression_returns_to_one_after_release() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 0.0);
    s.pointer_down(true, Vec2::ZERO);
    for frame in 0..60 {
        s.advance(frame as f64 / 60.0);
    }
    s.pointer_up();
    for frame in 60..260 {
        s.advance(frame as f64 / 60.0);
    }
    assert!((s.compression_factor - 1.0).abs() < 1e-3);
    assert!((s.spin_speed_factor - 1.0).abs() < 1e-3);
}

#[test]
fn compressing_is_snappier_than_decompressing() {
    // Count frames to cover half the remaining distance in each direction
    let half_frames = |pressed: bool| -> usize {
        let mut s = make_state();
        s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 0.0);
        if pressed {
            s.pointer_down(true, Vec2::ZERO);
        } else {
            // Start compressed, then release
            s.pointer_down(true, Vec2::ZERO);
            for f in 0..600 {
                s.advance(f as f64 / 60.0);
            }
            s.pointer_up();
        }
        let start = s.compression_factor;
        let target = if pressed { COMPRESSION_SCALE_ACTIVE } else { 1.0 };
        let mut frames = 0;
        while (s.compression_factor - target).abs() > (start - target).abs() / 2.0 {
            s.advance(1000.0 + frames as f64 / 60.0);
            frames += 1;
            assert!(frames < 100, "never reached half distance");
        }
        frames
    };
    assert!(half_frames(true) < half_frames(false));
}

#[test]
fn ripple_starts_on_release_and_expires() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 0.0);
    assert!(!s.ripple_active(0.0), "no ripple before any release");

    s.pointer_down(true, Vec2::ZERO);
    s.advance(1.0);
    s.pointer_up();
    s.advance(2.0);
    assert!(s.ripple_active(2.0));
    assert_eq!(s.ripple_progress(2.0), 0.0);
    assert!((s.ripple_progress(2.75) - 0.5).abs() < 1e-6);
    assert!(!s.ripple_active(4.0), "ripple inert once progress reaches 1");
    assert_eq!(s.ripple_progress(10.0), 1.0);
}

#[test]
fn afk_timeout_after_three_seconds() {
    let mut s = make_state();
    s.pointer_moved(Vec2::ZERO, Vec2::ZERO, 10.0);
    assert!(!s.is_afk(12.9));
    assert!(s.is_afk(13.1));
}

#[test]
fn probe_drives_outward_alpha_and_magnet_target() {
    let mut s = make_state();
    // Probe halfway into the hover reach: maximal outward target
    let probe = SurfaceProbe {
        hit: false,
        distance: SPHERE_RADIUS + 20.0,
        direction: Vec3::X,
        surface_point: Vec3::new(SPHERE_RADIUS, 0.0, 0.0),
    };
    for _ in 0..200 {
        s.apply_probe(&probe, SPHERE_RADIUS);
    }
    assert!(s.magnet_active);
    assert!((s.outward_alpha - 1.0).abs() < 1e-3);
    let expected = Vec3::new(SPHERE_RADIUS + MAX_OUTWARD * s.outward_alpha, 0.0, 0.0);
    assert!((s.magnet_world_target - expected).length() < 1e-3);
}

#[test]
fn outward_alpha_decays_when_idle() {
    let mut s = make_state();
    s.outward_alpha = 1.0;
    for _ in 0..100 {
        s.decay_outward();
    }
    assert!(s.outward_alpha < 1e-3);
    assert!(!s.magnet_active);
}

#[test]
fn magnet_local_tracks_world_target_through_rotation() {
    let mut s = make_state();
    let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    s.magnet_active = true;
    s.magnet_world_target = Vec3::new(SPHERE_RADIUS, 0.0, 0.0);
    for _ in 0..400 {
        s.settle_magnet(rotation);
    }
    assert!((s.deform_alpha - 1.0).abs() < 1e-3);
    let expected = rotation.inverse() * s.magnet_world_target;
    assert!(
        (s.magnet_local - expected).length() < 1e-3,
        "magnet should settle at the local-frame target"
    );
}
