// Host-side tests for ray/sphere queries and the outward-intensity curve.

use glam::Vec3;
use planet_core::constants::{HOVER_REACH, SPHERE_RADIUS};
use planet_core::spatial::{closest_approach, outward_target, probe, ray_sphere, tent01};

#[test]
fn ray_sphere_intersection_basic() {
    // Ray from origin pointing in +Z direction
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);

    // Sphere at (0, 0, 5) with radius 2
    let center = Vec3::new(0.0, 0.0, 5.0);
    let result = ray_sphere(ray_origin, ray_dir, center, 2.0);
    assert!(result.is_some());

    let t = result.unwrap();
    assert!((t - 3.0).abs() < 1e-4, "entry distance should be 3, got {t}");
}

#[test]
fn ray_sphere_intersection_miss() {
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(1.0, 0.0, 0.0);
    let center = Vec3::new(0.0, 0.0, 5.0);
    assert!(ray_sphere(ray_origin, ray_dir, center, 2.0).is_none());
}

#[test]
fn ray_sphere_behind_origin_is_rejected() {
    // Sphere entirely behind the ray origin
    let ray_origin = Vec3::new(0.0, 0.0, 10.0);
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);
    let center = Vec3::new(0.0, 0.0, 5.0);
    assert!(ray_sphere(ray_origin, ray_dir, center, 2.0).is_none());
}

#[test]
fn closest_approach_never_projects_backward() {
    let ray_origin = Vec3::new(0.0, 0.0, 10.0);
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);
    let center = Vec3::new(0.0, 3.0, 5.0);
    let (dist, closest) = closest_approach(ray_origin, ray_dir, center);
    // Closest forward point is the origin itself
    assert_eq!(closest, ray_origin);
    assert!((dist - center.distance(ray_origin)).abs() < 1e-5);
}

#[test]
fn probe_hit_reports_exact_radius() {
    // Straight shot through the center: definitely a hit
    let ro = Vec3::new(0.0, 0.0, 15.0);
    let rd = Vec3::new(0.0, 0.0, -1.0);
    let p = probe(ro, rd, Vec3::ZERO, SPHERE_RADIUS, Vec3::Z);
    assert!(p.hit);
    // Continuity: reported distance is forced to the radius on a hit
    assert_eq!(p.distance, SPHERE_RADIUS);
    assert!((p.surface_point.z - SPHERE_RADIUS).abs() < 1e-4);
    assert!((p.direction - Vec3::Z).length() < 1e-4);
}

#[test]
fn probe_miss_uses_closest_approach_geometry() {
    // Ray passing 8 units above the center of a radius-5 sphere
    let ro = Vec3::new(-20.0, 8.0, 0.0);
    let rd = Vec3::new(1.0, 0.0, 0.0);
    let p = probe(ro, rd, Vec3::ZERO, 5.0, Vec3::Z);
    assert!(!p.hit);
    assert!((p.distance - 8.0).abs() < 1e-4);
    assert!((p.direction - Vec3::Y).length() < 1e-4);
    // Surface point sits on the sphere along that direction
    assert!((p.surface_point.length() - 5.0).abs() < 1e-4);
    assert!((p.surface_point - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
}

#[test]
fn probe_degenerate_direction_falls_back_to_axis() {
    // Ray origin exactly at the center: the entry intersection lies behind
    // the origin and the closest-approach point is the center itself, so the
    // direction must come from the fallback axis.
    let ro = Vec3::ZERO;
    let rd = Vec3::new(0.0, 0.0, 1.0);
    let fallback = Vec3::new(0.0, 1.0, 0.0);
    let p = probe(ro, rd, Vec3::ZERO, 5.0, fallback);
    assert!(!p.hit);
    assert!((p.direction - fallback).length() < 1e-4);
    assert!((p.surface_point - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
}

#[test]
fn tent_peaks_at_half() {
    assert_eq!(tent01(0.0), 0.0);
    assert_eq!(tent01(1.0), 0.0);
    assert!((tent01(0.5) - 1.0).abs() < 1e-6);
    // Clamped outside [0, 1]
    assert_eq!(tent01(-2.0), 0.0);
    assert_eq!(tent01(3.0), 0.0);
}

#[test]
fn outward_target_tent_over_hover_reach() {
    let r = SPHERE_RADIUS;
    // Zero at the surface and at the edge of reach
    assert_eq!(outward_target(r, r), 0.0);
    assert_eq!(outward_target(r + HOVER_REACH, r), 0.0);
    // Maximal halfway out
    assert!((outward_target(r + HOVER_REACH / 2.0, r) - 1.0).abs() < 1e-6);
    // Zero beyond reach (a ray passing 50 units from a radius-5 sphere
    // included)
    for extra in [1.0_f32, 5.0, 10.0, 500.0] {
        assert_eq!(outward_target(r + HOVER_REACH + extra, r), 0.0);
    }
    // Strictly increasing on the inner half
    let mut prev = 0.0;
    for k in 1..=10 {
        let d = r + HOVER_REACH * 0.05 * k as f32;
        let v = outward_target(d, r);
        assert!(v > prev, "tent not increasing at step {k}");
        prev = v;
    }
}
