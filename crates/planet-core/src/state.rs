//! Camera state shared with the web frontend.
//!
//! This type intentionally avoids referencing platform-specific APIs and is
//! suitable for use on both native and web targets. The frontend consumes it
//! to build view/projection matrices; the simulation uses it for picking rays
//! and screen-space projection.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Compute a world-space ray through a normalized-device-coordinate point.
    ///
    /// Returns `(ray_origin, ray_direction)`; the direction falls back to the
    /// camera forward axis when the unprojected segment is degenerate.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        let dir = far - self.eye;
        let rd = if dir.length_squared() > 1e-12 {
            dir.normalize()
        } else {
            (self.target - self.eye).normalize_or_zero()
        };
        (self.eye, rd)
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// Returns `None` for points at or behind the eye plane (w ≈ 0).
    pub fn project_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * Vec4::from((world, 1.0));
        if clip.w.abs() < 1e-6 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -3.0, 15.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 3000.0,
        }
    }
}
