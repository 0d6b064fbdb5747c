//! Planet orientation: immediate drag rotation, momentum with exponential
//! damping after release, and the idle precession fallback.

use glam::{Quat, Vec2, Vec3};

use crate::constants::{
    DAMPING_FACTOR, DRAG_DEADZONE, DRAG_SENSITIVITY, MOMENTUM_FLOOR_SQ, PRECESSION_BASE_DELTA,
};

pub struct Orientation {
    pub rotation: Quat,
    pub angular_velocity: Vec3,
}

impl Orientation {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self {
            rotation: Quat::from_euler(glam::EulerRot::XYZ, pitch, yaw, 0.0),
            angular_velocity: Vec3::ZERO,
        }
    }

    /// Install the release momentum produced by the interaction state.
    pub fn set_momentum(&mut self, v: Vec3) {
        self.angular_velocity = v;
    }

    #[inline]
    fn turn(&mut self, axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// Advance one frame.
    ///
    /// While dragging, pointer deltas rotate the planet immediately (no
    /// damping) for responsive feel. After release, the stored angular
    /// velocity decays exponentially; once it falls below the floor the
    /// planet settles into a slow precession whose rate scales with the
    /// spin-speed factor.
    pub fn step(&mut self, dragging: bool, drag_velocity: Vec2, spin_speed_factor: f32, time: f32) {
        if dragging {
            let dv = drag_velocity;
            if dv.x.abs() > DRAG_DEADZONE || dv.y.abs() > DRAG_DEADZONE {
                let axis = Vec3::new(-dv.y, dv.x, 0.0).normalize();
                let angle = dv.length() * DRAG_SENSITIVITY;
                self.turn(axis, angle);
            }
        } else if self.angular_velocity.length_squared() > MOMENTUM_FLOOR_SQ {
            let angle = self.angular_velocity.length();
            let axis = self.angular_velocity / angle;
            self.turn(axis, angle);
            self.angular_velocity *= DAMPING_FACTOR;
        } else {
            let axis = Vec3::new(
                0.25 * (time * 0.25).sin(),
                1.0,
                0.25 * (time * 0.2).cos(),
            )
            .normalize();
            self.turn(axis, PRECESSION_BASE_DELTA * spin_speed_factor);
        }
    }
}
