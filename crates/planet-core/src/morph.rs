//! Glyph morph stage: interpolation between the two glyph point sets with
//! fade-in/out for points that exist in only one variant, plus the
//! mid-transition spin/scatter perturbation.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{
    GLYPH_WOBBLE_SPREAD, MORPH_EASE_PRESSED, MORPH_EASE_RELEASED, TRANSITION_SCATTER,
    TRANSITION_SPIN,
};
use crate::field::rand_spread;
use crate::glyph::{scatter_target, GlyphPointSet};

/// Gradient endpoint colors for the traveling color wave.
const DARK: Vec3 = Vec3::new(0.87, 0.33, 0.0);
const BRIGHT: Vec3 = Vec3::new(1.0, 0.6, 0.0);

/// Unified morph buffers sized to the larger of the two variants.
pub struct MorphField {
    pub compact: GlyphPointSet,
    pub expanded: GlyphPointSet,
    /// 0 = fully compact variant, 1 = fully expanded variant.
    pub factor: f32,
    velocities: Vec<Vec3>,
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub opacities: Vec<f32>,
}

impl MorphField {
    pub fn new(compact: GlyphPointSet, expanded: GlyphPointSet, rng: &mut StdRng) -> Self {
        let max_points = compact.len().max(expanded.len());
        let velocities = (0..max_points)
            .map(|_| {
                Vec3::new(
                    rand_spread(rng, GLYPH_WOBBLE_SPREAD),
                    rand_spread(rng, GLYPH_WOBBLE_SPREAD),
                    rand_spread(rng, GLYPH_WOBBLE_SPREAD),
                )
            })
            .collect();

        let mut positions = vec![Vec3::ZERO; max_points];
        positions[..compact.len()].copy_from_slice(&compact.positions);
        let colors = vec![BRIGHT; max_points];
        let opacities = (0..max_points)
            .map(|i| if i < compact.len() { 1.0 } else { 0.0 })
            .collect();

        Self {
            compact,
            expanded,
            factor: 0.0,
            velocities,
            positions,
            colors,
            opacities,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Ease the morph factor toward the compact variant while pressed and the
    /// expanded variant otherwise.
    pub fn advance(&mut self, pressed: bool) {
        let (target, ease) = if pressed {
            (0.0, MORPH_EASE_PRESSED)
        } else {
            (1.0, MORPH_EASE_RELEASED)
        };
        self.factor += (target - self.factor) * ease;
    }

    /// The wireframe switches discretely at the morph midpoint.
    pub fn active_edges(&self) -> &[u32] {
        if self.factor < 0.5 {
            &self.compact.edges
        } else {
            &self.expanded.edges
        }
    }

    /// Perturbation intensity: triangular, peaking mid-transition.
    pub fn transition_intensity(&self) -> f32 {
        1.0 - (self.factor * 2.0 - 1.0).abs()
    }

    /// Rewrite positions, colors and opacities for this frame.
    pub fn apply(&mut self, time: f32) {
        let t = time;
        let max_points = self.len();
        let count_a = self.compact.len();
        let count_b = self.expanded.len();
        let intensity = self.transition_intensity();
        let spin_effect = intensity * TRANSITION_SPIN;
        let scatter_effect = intensity * TRANSITION_SCATTER;

        for i in 0..max_points {
            let source = if i < count_a {
                self.compact.positions[i]
            } else {
                Vec3::ZERO
            };
            let target = if i < count_b {
                self.expanded.positions[i]
            } else {
                scatter_target(i, max_points)
            };

            let fade_in = if i >= count_a { self.factor } else { 1.0 };
            let fade_out = if i >= count_b { 1.0 - self.factor } else { 1.0 };
            let opacity = fade_in.min(fade_out);

            let lerped = source + (target - source) * self.factor;

            // Spin the source point about Z, strongest mid-transition
            let fi = i as f32;
            let angle = source.y.atan2(source.x);
            let radius = source.truncate().length();
            let spin_angle = angle + spin_effect * (t * 4.0 + fi * 0.1).sin();
            let spun = Vec3::new(spin_angle.cos() * radius, spin_angle.sin() * radius, lerped.z);

            let vel = self.velocities[i];
            let wobble = Vec3::new(
                vel.x * scatter_effect * (t * 3.0 + fi * 0.05).sin(),
                vel.y * scatter_effect * (t * 3.2 + fi * 0.07).sin(),
                vel.z * scatter_effect * (t * 2.8 + fi * 0.06).sin(),
            );

            let x = lerped.x + (spun.x - lerped.x) * intensity + wobble.x;
            let y = lerped.y + (spun.y - lerped.y) * intensity + wobble.y;
            // Zero-opacity points collapse onto the view plane
            let z = (lerped.z + wobble.z) * opacity;

            self.positions[i] = Vec3::new(x, y, z);
            self.opacities[i] = opacity;

            // Traveling gradient wave over the final position
            let phase = y * 0.8 + x * 0.5 + t * 0.8;
            let value = phase.sin() * 0.5 + 0.5;
            self.colors[i] = DARK + (BRIGHT - DARK) * value;
        }
    }
}
