//! Pointer interaction state: press/drag/release tracking and the smoothed
//! scalars every downstream stage reads.
//!
//! Event callbacks only mutate fields here; geometry is rewritten exclusively
//! by the frame step, so the renderer never observes a half-updated buffer.

use glam::{Quat, Vec2, Vec3};

use crate::constants::{
    AFK_TIMEOUT_SEC, COMPRESSION_SCALE_ACTIVE, DEFORM_ALPHA_EASE, EASE_PRESS, EASE_RELEASE,
    MAGNET_LERP, MAGNET_RANGE, MAX_OUTWARD, OUTWARD_EASE_ACTIVE, OUTWARD_EASE_DECAY,
    RELEASE_SENSITIVITY, RIPPLE_DURATION_SEC, SPIN_BOOST_TARGET,
};
use crate::spatial::SurfaceProbe;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// No pointer in the window, or it left the page entirely.
    Idle,
    /// Pointer active but not pressing the sphere.
    Hovering,
    /// Press began on the sphere surface; drag rotates the planet.
    Pressed,
}

pub struct InteractionState {
    pub phase: PointerPhase,
    /// Pointer position in normalized device coordinates.
    pub ndc: Vec2,
    /// Pointer position in page pixels (for cursor-proximity glow).
    pub cursor_px: Vec2,
    /// False until the first move event; proximity stays at its floor.
    pub cursor_moved: bool,
    last_move_at: f64,

    last_pointer_px: Vec2,
    drag_velocity: Vec2,

    /// Whether external camera-orbit controls may consume pointer input.
    pub orbit_enabled: bool,

    // Smoothed scalars (value += (target - value) * rate)
    pub deform_alpha: f32,
    pub outward_alpha: f32,
    pub compression_factor: f32,
    pub spin_speed_factor: f32,

    // Magnetic target, tracked in world space and smoothed in local space
    pub magnet_active: bool,
    pub magnet_local: Vec3,
    pub magnet_world_target: Vec3,

    ripple_started_at: f64,
    was_pressed: bool,
}

impl InteractionState {
    pub fn new(sphere_radius: f32) -> Self {
        Self {
            phase: PointerPhase::Idle,
            ndc: Vec2::ZERO,
            cursor_px: Vec2::ZERO,
            cursor_moved: false,
            last_move_at: 0.0,
            last_pointer_px: Vec2::ZERO,
            drag_velocity: Vec2::ZERO,
            orbit_enabled: true,
            deform_alpha: 0.0,
            outward_alpha: 0.0,
            compression_factor: 1.0,
            spin_speed_factor: 1.0,
            magnet_active: false,
            magnet_local: Vec3::new(0.0, 0.0, sphere_radius),
            magnet_world_target: Vec3::ZERO,
            ripple_started_at: f64::NEG_INFINITY,
            was_pressed: false,
        }
    }

    pub fn pressed(&self) -> bool {
        self.phase == PointerPhase::Pressed
    }

    pub fn pointer_active(&self) -> bool {
        self.phase != PointerPhase::Idle
    }

    /// Per-frame pointer delta while dragging, in pixels.
    pub fn drag_velocity(&self) -> Vec2 {
        self.drag_velocity
    }

    pub fn is_afk(&self, now: f64) -> bool {
        now - self.last_move_at > AFK_TIMEOUT_SEC
    }

    /// Pointer moved: track position and, while pressed, the drag delta.
    pub fn pointer_moved(&mut self, ndc: Vec2, page_px: Vec2, now: f64) {
        self.ndc = ndc;
        self.cursor_px = page_px;
        self.cursor_moved = true;
        self.last_move_at = now;
        if self.phase == PointerPhase::Idle {
            self.phase = PointerPhase::Hovering;
        }
        if self.phase == PointerPhase::Pressed {
            self.drag_velocity = page_px - self.last_pointer_px;
            self.last_pointer_px = page_px;
        }
    }

    /// Pointer pressed; enters `Pressed` only when the ray hit the sphere.
    /// While pressed, orbit controls are suspended (exclusive input).
    pub fn pointer_down(&mut self, hit_sphere: bool, page_px: Vec2) {
        if hit_sphere {
            self.phase = PointerPhase::Pressed;
            self.orbit_enabled = false;
            self.last_pointer_px = page_px;
            self.drag_velocity = Vec2::ZERO;
        }
    }

    /// Pointer released. Returns the angular velocity to hand to the
    /// rotation stage when a press ends, derived from the final drag delta.
    pub fn pointer_up(&mut self) -> Option<Vec3> {
        if self.phase != PointerPhase::Pressed {
            return None;
        }
        self.phase = PointerPhase::Hovering;
        self.orbit_enabled = true;
        let v = Vec3::new(
            -self.drag_velocity.y * RELEASE_SENSITIVITY,
            self.drag_velocity.x * RELEASE_SENSITIVITY,
            0.0,
        );
        Some(v)
    }

    /// Pointer left the window or the page entirely.
    pub fn pointer_left(&mut self) {
        self.phase = PointerPhase::Idle;
        self.magnet_active = false;
        self.orbit_enabled = true;
        self.drag_velocity = Vec2::ZERO;
    }

    /// Per-frame smoothing of the compression and spin scalars, plus ripple
    /// start detection. Compressing is snappier than decompressing.
    pub fn advance(&mut self, now: f64) {
        let pressed = self.pressed();
        let ease = if pressed { EASE_PRESS } else { EASE_RELEASE };

        let target_compression = if pressed { COMPRESSION_SCALE_ACTIVE } else { 1.0 };
        self.compression_factor += (target_compression - self.compression_factor) * ease;

        let target_spin = if pressed { SPIN_BOOST_TARGET } else { 1.0 };
        self.spin_speed_factor += (target_spin - self.spin_speed_factor) * ease;

        if self.was_pressed && !pressed {
            self.ripple_started_at = now;
        }
        self.was_pressed = pressed;
    }

    /// Ripple progress in [0, 1]; 1 once the wave has fully died out.
    pub fn ripple_progress(&self, now: f64) -> f32 {
        let p = (now - self.ripple_started_at) / RIPPLE_DURATION_SEC;
        p.clamp(0.0, 1.0) as f32
    }

    pub fn ripple_active(&self, now: f64) -> bool {
        self.ripple_progress(now) < 1.0
    }

    /// Fold a surface probe into the magnet state and the outward scalar.
    pub fn apply_probe(&mut self, probe: &SurfaceProbe, sphere_radius: f32) {
        let within_reach = probe.distance <= sphere_radius + MAGNET_RANGE;
        self.magnet_active = within_reach || probe.hit;

        let target = crate::spatial::outward_target(probe.distance, sphere_radius);
        self.outward_alpha += (target - self.outward_alpha) * OUTWARD_EASE_ACTIVE;

        let outward = MAX_OUTWARD * self.outward_alpha;
        self.magnet_world_target = probe.surface_point + probe.direction * outward;
    }

    /// No usable pointer this frame: decay the outward scalar toward zero
    /// instead of holding its last value.
    pub fn decay_outward(&mut self) {
        self.magnet_active = false;
        self.outward_alpha += (0.0 - self.outward_alpha) * OUTWARD_EASE_DECAY;
    }

    /// Smooth the activation alpha and pull the local-space magnet point
    /// toward the world target expressed in the planet's frame.
    pub fn settle_magnet(&mut self, planet_rotation: Quat) {
        let target = if self.magnet_active { 1.0 } else { 0.0 };
        self.deform_alpha += (target - self.deform_alpha) * DEFORM_ALPHA_EASE;
        if self.magnet_active {
            let target_local = planet_rotation.inverse() * self.magnet_world_target;
            self.magnet_local = self.magnet_local.lerp(target_local, MAGNET_LERP);
        }
    }
}
