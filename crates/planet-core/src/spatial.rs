//! Ray/sphere queries for pointer picking and the magnetic target.

use glam::Vec3;

use crate::constants::{HOVER_REACH, TENT_SHARPNESS};

/// Result of probing the planet sphere with the pointer ray.
///
/// `distance` is the distance from the sphere center to the ray at closest
/// approach, forced to exactly the radius when the ray intersects so the
/// field stays continuous across the hit/miss boundary. `direction` is the
/// outward unit direction from the center toward the probe and
/// `surface_point` the matching point on the sphere surface.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceProbe {
    pub hit: bool,
    pub distance: f32,
    pub direction: Vec3,
    pub surface_point: Vec3,
}

/// Ray/sphere intersection; returns the entry distance along the ray.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Distance from `center` to the ray at closest approach, never projecting
/// backward along the ray.
#[inline]
pub fn closest_approach(ray_origin: Vec3, ray_dir: Vec3, center: Vec3) -> (f32, Vec3) {
    let oc = center - ray_origin;
    let t = oc.dot(ray_dir).max(0.0);
    let closest = ray_origin + ray_dir * t;
    (closest.distance(center), closest)
}

/// Probe the sphere with a pointer ray.
///
/// `fallback_axis` is used as the outward direction when the closest-approach
/// point coincides with the center (pointer dead on the sphere axis).
pub fn probe(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
    fallback_axis: Vec3,
) -> SurfaceProbe {
    let (mut distance, closest) = closest_approach(ray_origin, ray_dir, center);

    if let Some(t) = ray_sphere(ray_origin, ray_dir, center, radius) {
        let hit_point = ray_origin + ray_dir * t;
        let direction = (hit_point - center).normalize_or_zero();
        distance = radius; // enforce continuity
        return SurfaceProbe {
            hit: true,
            distance,
            direction,
            surface_point: hit_point,
        };
    }

    let offset = closest - center;
    let direction = if offset.length_squared() > 1e-12 {
        offset.normalize()
    } else {
        fallback_axis.normalize_or_zero()
    };
    SurfaceProbe {
        hit: false,
        distance,
        direction,
        surface_point: center + direction * radius,
    }
}

/// Triangular "tent" curve with peak at u=0.5, zero at u=0 and u=1.
#[inline]
pub fn tent01(u: f32) -> f32 {
    let x = u.clamp(0.0, 1.0);
    let t = 1.0 - 2.0 * (x - 0.5).abs();
    t.powf(TENT_SHARPNESS)
}

/// Outward-intensity target for a probe distance: zero at the surface and at
/// the edge of reach, peaking halfway between.
#[inline]
pub fn outward_target(distance: f32, radius: f32) -> f32 {
    tent01((distance - radius) / HOVER_REACH)
}
