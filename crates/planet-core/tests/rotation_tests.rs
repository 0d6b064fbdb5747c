// Host-side tests for drag rotation, momentum damping, and precession.

use glam::{Quat, Vec2, Vec3};
use planet_core::constants::{
    DAMPING_FACTOR, DRAG_SENSITIVITY, INITIAL_PITCH, INITIAL_YAW, PRECESSION_BASE_DELTA,
};
use planet_core::rotation::Orientation;

fn make_orientation() -> Orientation {
    Orientation::new(INITIAL_PITCH, INITIAL_YAW)
}

#[test]
fn initial_orientation_matches_euler_angles() {
    let o = make_orientation();
    let expected = Quat::from_euler(glam::EulerRot::XYZ, INITIAL_PITCH, INITIAL_YAW, 0.0);
    assert!(o.rotation.abs_diff_eq(expected, 1e-6));
}

#[test]
fn drag_rotates_immediately_about_the_perpendicular_axis() {
    let mut o = make_orientation();
    let before = o.rotation;
    // 100 px rightward drag: axis (0, 1, 0), angle 100 * sensitivity
    o.step(true, Vec2::new(100.0, 0.0), 1.0, 0.0);
    let expected = (before * Quat::from_axis_angle(Vec3::Y, 100.0 * DRAG_SENSITIVITY)).normalize();
    assert!(o.rotation.abs_diff_eq(expected, 1e-5));
    // Drag leaves stored momentum untouched
    assert_eq!(o.angular_velocity, Vec3::ZERO);
}

#[test]
fn sub_pixel_drag_jitter_is_ignored() {
    let mut o = make_orientation();
    let before = o.rotation;
    o.step(true, Vec2::new(0.05, -0.05), 1.0, 0.0);
    assert!(o.rotation.abs_diff_eq(before, 1e-7));
}

#[test]
fn momentum_magnitude_follows_the_damping_recurrence() {
    let mut o = make_orientation();
    let m = 0.2_f32;
    o.set_momentum(Vec3::new(0.0, m, 0.0));
    for k in 1..=40 {
        o.step(false, Vec2::ZERO, 1.0, 0.0);
        let expected = m * DAMPING_FACTOR.powi(k);
        let got = o.angular_velocity.length();
        assert!(
            (got - expected).abs() < 1e-6,
            "frame {k}: |w| = {got}, expected {expected}"
        );
    }
}

#[test]
fn momentum_decays_to_rest_within_the_expected_frame_count() {
    let mut o = make_orientation();
    let m = 0.5_f32;
    let eps = (planet_core::constants::MOMENTUM_FLOOR_SQ).sqrt();
    o.set_momentum(Vec3::new(0.0, m, 0.0));

    let bound = ((eps / m).ln() / DAMPING_FACTOR.ln()).ceil() as usize;
    for _ in 0..bound + 1 {
        o.step(false, Vec2::ZERO, 1.0, 0.0);
    }
    assert!(
        o.angular_velocity.length_squared() <= planet_core::constants::MOMENTUM_FLOOR_SQ,
        "momentum should be at rest after {bound} frames, got {}",
        o.angular_velocity.length()
    );
}

#[test]
fn precession_takes_over_below_the_momentum_floor() {
    let mut o = make_orientation();
    o.set_momentum(Vec3::new(0.0, 1e-4, 0.0));
    let before = o.rotation;
    o.step(false, Vec2::ZERO, 1.0, 2.0);
    // Momentum below the floor is not applied or damped; the planet precesses
    assert_eq!(o.angular_velocity, Vec3::new(0.0, 1e-4, 0.0));
    let angle = o.rotation.angle_between(before);
    assert!(
        (angle - PRECESSION_BASE_DELTA).abs() < 1e-5,
        "precession angle {angle}"
    );
}

#[test]
fn precession_rate_scales_with_the_spin_factor() {
    let mut a = make_orientation();
    let mut b = make_orientation();
    let before = a.rotation;
    a.step(false, Vec2::ZERO, 1.0, 1.0);
    b.step(false, Vec2::ZERO, 2.2, 1.0);
    let angle_a = a.rotation.angle_between(before);
    let angle_b = b.rotation.angle_between(before);
    assert!((angle_b / angle_a - 2.2).abs() < 1e-3);
}

#[test]
fn drag_then_momentum_round_trip() {
    let mut o = make_orientation();
    // Several frames of live drag
    for _ in 0..5 {
        o.step(true, Vec2::new(12.0, -4.0), 1.0, 0.0);
    }
    // Release hands over stored momentum
    o.set_momentum(Vec3::new(0.02, 0.06, 0.0));
    let before = o.rotation;
    o.step(false, Vec2::ZERO, 1.0, 0.0);
    assert!(!o.rotation.abs_diff_eq(before, 1e-9), "momentum must rotate");
    assert!(o.angular_velocity.length() < 0.0633, "damping must apply");
}
