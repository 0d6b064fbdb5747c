//! Planet particle storage: immutable base arrays plus the per-frame
//! deformed copies handed to the renderer.

use glam::Vec3;
use rand::prelude::*;

/// Uniform value in (-spread/2, spread/2).
#[inline]
pub fn rand_spread(rng: &mut StdRng, spread: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * spread
}

/// SoA particle storage for the planet point cloud.
///
/// Base positions/colors never change after construction; `positions` and
/// `colors` are rewritten every frame by the deformation stage. The velocity
/// array is a fixed per-particle random vector used only to seed wobble phase
/// and amplitude, never integrated.
pub struct ParticleField {
    pub base_positions: Vec<Vec3>,
    pub base_colors: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
}

impl ParticleField {
    /// Build the planet sphere with a Fibonacci lattice distribution.
    ///
    /// Point `i` gets inclination `acos(1 - 2i/n)` and azimuth `i` times the
    /// golden angle, which spaces `n` points evenly over the sphere without
    /// clustering at the poles. Colors shade darker toward -Z.
    pub fn sphere(count: usize, radius: f32, rng: &mut StdRng) -> Self {
        let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let angle_increment = std::f32::consts::TAU * golden_ratio;

        let mut base_positions = Vec::with_capacity(count);
        let mut base_colors = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);

        for i in 0..count {
            let t = i as f32 / count as f32;
            let inclination = (1.0 - 2.0 * t).acos();
            let azimuth = angle_increment * i as f32;
            let p = Vec3::new(
                radius * inclination.sin() * azimuth.cos(),
                radius * inclination.sin() * azimuth.sin(),
                radius * inclination.cos(),
            );
            base_positions.push(p);

            let intensity = (p.z / radius + 1.0) / 2.0;
            let c = 1.0 - (1.0 - intensity) * 0.5;
            base_colors.push(Vec3::new(c, c * 0.4, 0.0));

            velocities.push(Vec3::new(
                rand_spread(rng, 2.0),
                rand_spread(rng, 2.0),
                rand_spread(rng, 2.0),
            ));
        }

        let positions = base_positions.clone();
        let colors = base_colors.clone();
        Self {
            base_positions,
            base_colors,
            velocities,
            positions,
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    /// Write the untouched base values into the current buffers (idle path).
    pub fn reset_to_base(&mut self) {
        self.positions.copy_from_slice(&self.base_positions);
        self.colors.copy_from_slice(&self.base_colors);
    }
}
