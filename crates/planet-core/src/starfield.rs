//! Background starfield and the floating quote sprites that drift with it.

use glam::Vec3;
use rand::prelude::*;

use crate::constants::{
    SPRITE_HOVER_RADIUS, SPRITE_HOVER_SCALE, SPRITE_HOVER_SCALE_MULTILINE, SPRITE_OPACITY_HOVER,
    SPRITE_OPACITY_IDLE, SPRITE_SCALE_EASE, SPRITE_SPREAD_XY, SPRITE_SPREAD_Z, STAR_DRIFT,
    STAR_SPREAD_XY, STAR_SPREAD_Z, STAR_WRAP_Z,
};
use crate::field::rand_spread;
use crate::spatial::closest_approach;

pub struct Starfield {
    pub positions: Vec<Vec3>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut StdRng) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rand_spread(rng, STAR_SPREAD_XY),
                    rand_spread(rng, STAR_SPREAD_XY),
                    rand_spread(rng, STAR_SPREAD_Z),
                )
            })
            .collect();
        Self { positions }
    }

    /// Drift toward the camera, wrapping to the back of the volume.
    /// Stars move faster while the planet spins faster.
    pub fn drift(&mut self, spin_speed_factor: f32) {
        let speed = STAR_DRIFT * spin_speed_factor;
        for p in &mut self.positions {
            p.z += speed;
            if p.z > STAR_WRAP_Z {
                p.z -= 2.0 * STAR_WRAP_Z;
            }
        }
    }
}

/// One floating quote billboard.
pub struct QuoteSprite {
    pub position: Vec3,
    /// Index into the configured quote list.
    pub text_index: usize,
    pub multi_line: bool,
    pub current_scale: f32,
    target_scale: f32,
    pub opacity: f32,
}

pub struct SpriteField {
    pub sprites: Vec<QuoteSprite>,
    pub hovered: Option<usize>,
}

impl SpriteField {
    /// Place one sprite per quote at a random spot in the drift volume.
    /// `multi_line` flags quotes that grow larger on hover to stay readable.
    pub fn new(multi_line: &[bool], rng: &mut StdRng) -> Self {
        let sprites = multi_line
            .iter()
            .enumerate()
            .map(|(i, &ml)| QuoteSprite {
                position: Vec3::new(
                    rand_spread(rng, SPRITE_SPREAD_XY),
                    rand_spread(rng, SPRITE_SPREAD_XY),
                    rand_spread(rng, SPRITE_SPREAD_Z),
                ),
                text_index: i,
                multi_line: ml,
                current_scale: 1.0,
                target_scale: 1.0,
                opacity: SPRITE_OPACITY_IDLE,
            })
            .collect();
        Self {
            sprites,
            hovered: None,
        }
    }

    /// Drift with the starfield; wrapping sprites get fresh X/Y for variety.
    pub fn drift(&mut self, spin_speed_factor: f32, rng: &mut StdRng) {
        let speed = STAR_DRIFT * spin_speed_factor;
        for s in &mut self.sprites {
            s.position.z += speed;
            if s.position.z > STAR_WRAP_Z {
                s.position.z -= 2.0 * STAR_WRAP_Z;
                s.position.x = rand_spread(rng, SPRITE_SPREAD_XY);
                s.position.y = rand_spread(rng, SPRITE_SPREAD_XY);
            }
        }
    }

    /// Hover test against the pointer ray (closest sprite within reach wins),
    /// then ease scales and opacity toward their targets. Pass `None` while
    /// the pointer is idle or dragging the planet.
    pub fn update_hover(&mut self, ray: Option<(Vec3, Vec3)>) {
        self.hovered = ray.and_then(|(ro, rd)| {
            let mut best: Option<(usize, f32)> = None;
            for (i, s) in self.sprites.iter().enumerate() {
                let (dist, closest) = closest_approach(ro, rd, s.position);
                if dist > SPRITE_HOVER_RADIUS {
                    continue;
                }
                let t = (closest - ro).length();
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
            best.map(|(i, _)| i)
        });

        for (i, s) in self.sprites.iter_mut().enumerate() {
            s.target_scale = if self.hovered == Some(i) {
                if s.multi_line {
                    SPRITE_HOVER_SCALE_MULTILINE
                } else {
                    SPRITE_HOVER_SCALE
                }
            } else {
                1.0
            };
            s.current_scale += (s.target_scale - s.current_scale) * SPRITE_SCALE_EASE;
            let target_opacity = if s.current_scale > 1.1 {
                SPRITE_OPACITY_HOVER
            } else {
                SPRITE_OPACITY_IDLE
            };
            s.opacity += (target_opacity - s.opacity) * SPRITE_SCALE_EASE;
        }
    }
}
