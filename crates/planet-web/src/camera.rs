//! Orbit + smooth-zoom camera rig around the planet.
//!
//! The rig owns pointer input only while the simulation has not claimed it
//! (pressing the planet suspends orbiting). Zoom targets are approached with
//! a per-frame lerp so wheel steps never snap.

use glam::{Vec2, Vec3};
use planet_core::Camera;

use crate::constants::{
    ORBIT_DAMPING, ORBIT_PITCH_LIMIT, ORBIT_ROTATE_SPEED, ZOOM_LERP, ZOOM_MAX_DISTANCE,
    ZOOM_MIN_DISTANCE, ZOOM_SENSITIVITY,
};

pub struct OrbitRig {
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,
    distance: f32,
    target_distance: f32,
    dragging: bool,
    last_px: Vec2,
}

impl OrbitRig {
    /// Start from the camera's current eye position.
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.length().max(ZOOM_MIN_DISTANCE);
        let pitch = (offset.y / distance).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            yaw,
            pitch,
            target_yaw: yaw,
            target_pitch: pitch,
            distance,
            target_distance: distance,
            dragging: false,
            last_px: Vec2::ZERO,
        }
    }

    pub fn begin_drag(&mut self, px: Vec2) {
        self.dragging = true;
        self.last_px = px;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Accumulate pointer movement into the orbit targets while dragging.
    pub fn pointer_moved(&mut self, px: Vec2, viewport: Vec2) {
        if !self.dragging || viewport.y <= 0.0 {
            return;
        }
        let delta = px - self.last_px;
        self.last_px = px;
        let per_pixel = std::f32::consts::TAU / viewport.y * ORBIT_ROTATE_SPEED;
        self.target_yaw -= delta.x * per_pixel;
        self.target_pitch = (self.target_pitch + delta.y * per_pixel)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Wheel zoom: exponential step toward a clamped target distance.
    pub fn zoom(&mut self, delta_y: f32) {
        self.target_distance = (self.target_distance * (delta_y * ZOOM_SENSITIVITY).exp())
            .clamp(ZOOM_MIN_DISTANCE, ZOOM_MAX_DISTANCE);
    }

    /// Per-frame damping toward the targets, then write the camera eye.
    pub fn update(&mut self, camera: &mut Camera, aspect: f32) {
        self.yaw += (self.target_yaw - self.yaw) * ORBIT_DAMPING;
        self.pitch += (self.target_pitch - self.pitch) * ORBIT_DAMPING;
        self.distance += (self.target_distance - self.distance) * ZOOM_LERP;

        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        camera.eye = camera.target
            + Vec3::new(sy * cp, sp, cy * cp) * self.distance;
        camera.aspect = aspect;
    }
}
