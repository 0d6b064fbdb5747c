//! Per-frame planet deformation: radial compression, magnetic pull, outward
//! scatter, wobble, the post-release ripple wave, and the heat color shift.

use glam::Vec3;

use crate::constants::{
    INFLUENCE_SIGMA, MAGNET_STRENGTH, RIPPLE_AMPLITUDE, RIPPLE_DECAY, SCATTER_COEFF,
    SCATTER_OUTWARD, SCATTER_WOBBLE,
};
use crate::field::ParticleField;

/// Inputs for one deformation pass, sampled from the interaction state.
#[derive(Clone, Copy, Debug)]
pub struct DeformParams {
    pub time: f32,
    pub compression_factor: f32,
    pub deform_alpha: f32,
    pub magnet_local: Vec3,
    pub ripple_active: bool,
    pub ripple_progress: f32,
}

/// Scatter intensity: zero fully relaxed, peaking while compressed.
#[inline]
pub fn scatter_intensity(compression_factor: f32) -> f32 {
    (1.0 - compression_factor) * SCATTER_COEFF
}

/// True when every effect is negligible and the base buffers can be copied
/// through untouched.
#[inline]
pub fn is_idle(p: &DeformParams) -> bool {
    p.deform_alpha <= 0.001
        && (p.compression_factor - 1.0).abs() <= 1e-4
        && !p.ripple_active
        && scatter_intensity(p.compression_factor) <= 0.001
}

/// Rewrite the field's current positions and colors for this frame.
pub fn apply(field: &mut ParticleField, p: &DeformParams) {
    if is_idle(p) {
        field.reset_to_base();
        return;
    }

    let t = p.time;
    let sigma = INFLUENCE_SIGMA;
    let two_sigma2 = 2.0 * sigma * sigma;
    let scatter = scatter_intensity(p.compression_factor);
    let heat = 1.0 - p.compression_factor;
    let wobble_amount = scatter * SCATTER_WOBBLE;
    let scatter_dist = scatter * SCATTER_OUTWARD;
    let ripple_envelope = (-p.ripple_progress * RIPPLE_DECAY).exp();

    for i in 0..field.len() {
        let base = field.base_positions[i] * p.compression_factor;

        // Outward unit normal of the compressed base (zero at the origin)
        let normal = if base.length_squared() > 1e-6 {
            base / base.length()
        } else {
            Vec3::ZERO
        };

        // Distinct frequencies per axis prevent synchronized pulsing
        let fi = i as f32;
        let vel = field.velocities[i];
        let wobble = Vec3::new(
            vel.x * wobble_amount * (t * 3.0 + fi * 0.1).sin(),
            vel.y * wobble_amount * (t * 3.2 + fi * 0.15).sin(),
            vel.z * wobble_amount * (t * 2.8 + fi * 0.12).sin(),
        );

        let scatter_offset = normal * scatter_dist;

        // Outward-traveling decaying wave correlated with angular position
        let mut ripple_offset = 0.0;
        if p.ripple_active {
            let angle = base.y.atan2(base.x);
            let phase = angle * 2.0 + p.ripple_progress * std::f32::consts::TAU * 2.0;
            ripple_offset = phase.sin() * ripple_envelope * RIPPLE_AMPLITUDE;
        }

        // Gaussian magnet pull toward the tracked local-space target; weaker
        // while compressed to avoid over-pulling
        let delta = p.magnet_local - base;
        let w = (-delta.length_squared() / two_sigma2).exp();
        let k = MAGNET_STRENGTH * w * p.deform_alpha * p.compression_factor;

        field.positions[i] = base + delta * k + scatter_offset + wobble + normal * ripple_offset;

        let c = field.base_colors[i];
        field.colors[i] = Vec3::new(
            c.x * (1.0 + heat * 0.3),
            c.y * (1.0 - heat * 0.3),
            c.z + heat * 0.15,
        );
    }
}
