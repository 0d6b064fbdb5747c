//! Frame orchestrator: owns every simulation buffer and advances the whole
//! scene once per display refresh.
//!
//! Within one frame the order is fixed: interaction smoothing, then the
//! pointer's surface probe, then planet deformation, then the glyph morph,
//! then rotation/momentum, then background drift. Violating this order makes
//! the visuals lag their inputs by a frame.

use glam::{Quat, Vec2, Vec3};
use rand::prelude::*;

use crate::constants::{
    INITIAL_PITCH, INITIAL_YAW, PARTICLE_COUNT, SPHERE_RADIUS, STAR_COUNT, TEXT_DRIFT_PITCH,
    TEXT_DRIFT_YAW,
};
use crate::deform::{self, DeformParams};
use crate::field::ParticleField;
use crate::glyph::GlyphPointSet;
use crate::interaction::InteractionState;
use crate::morph::MorphField;
use crate::rotation::Orientation;
use crate::spatial::{self, ray_sphere};
use crate::starfield::{SpriteField, Starfield};
use crate::state::Camera;

/// Scene parameterization: one engine, configured rather than duplicated per
/// content variant.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub sphere_radius: f32,
    /// Seed for wobble velocities and star/sprite placement; the scene is
    /// fully deterministic for a given seed and event sequence.
    pub seed: u64,
    /// Floating quote texts; multi-line entries grow larger on hover.
    pub quote_texts: Vec<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            sphere_radius: SPHERE_RADIUS,
            seed: 42,
            quote_texts: Vec::new(),
        }
    }
}

pub struct PlanetScene {
    pub config: SceneConfig,
    pub camera: Camera,
    pub planet: ParticleField,
    pub morph: MorphField,
    pub interaction: InteractionState,
    pub orientation: Orientation,
    pub stars: Starfield,
    pub sprites: SpriteField,
    rng: StdRng,
    glow_time: f32,
    cursor_proximity: f32,
}

impl PlanetScene {
    pub fn new(config: SceneConfig, compact: GlyphPointSet, expanded: GlyphPointSet) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let planet = ParticleField::sphere(config.particle_count, config.sphere_radius, &mut rng);
        let morph = MorphField::new(compact, expanded, &mut rng);
        let stars = Starfield::new(STAR_COUNT, &mut rng);
        let multi_line: Vec<bool> = config.quote_texts.iter().map(|t| t.contains('\n')).collect();
        let sprites = SpriteField::new(&multi_line, &mut rng);
        let interaction = InteractionState::new(config.sphere_radius);

        log::info!(
            "[scene] particles={} glyph_points={}/{} stars={} quotes={}",
            planet.len(),
            morph.compact.len(),
            morph.expanded.len(),
            stars.positions.len(),
            sprites.sprites.len()
        );

        Self {
            config,
            camera: Camera::default(),
            planet,
            morph,
            interaction,
            orientation: Orientation::new(INITIAL_PITCH, INITIAL_YAW),
            stars,
            sprites,
            rng,
            glow_time: 0.0,
            cursor_proximity: 0.5,
        }
    }

    // ---------------- Event entry points ----------------
    // These only touch interaction state; buffers are rewritten in `step`.

    pub fn pointer_moved(&mut self, ndc: Vec2, page_px: Vec2, now: f64) {
        self.interaction.pointer_moved(ndc, page_px, now);
    }

    /// Pointer pressed. Returns whether the press landed on the sphere (and
    /// therefore captured the pointer away from the orbit controls).
    pub fn pointer_down(&mut self, ndc: Vec2, page_px: Vec2) -> bool {
        let (ro, rd) = self.camera.ray_from_ndc(ndc);
        let hit = ray_sphere(ro, rd, Vec3::ZERO, self.config.sphere_radius).is_some();
        self.interaction.ndc = ndc;
        self.interaction.pointer_down(hit, page_px);
        hit
    }

    pub fn pointer_up(&mut self) {
        if let Some(v) = self.interaction.pointer_up() {
            self.orientation.set_momentum(v);
        }
    }

    pub fn pointer_left(&mut self) {
        self.interaction.pointer_left();
    }

    /// Quote text index under the pointer, if any (for cursor styling and
    /// the click-to-read modal).
    pub fn hovered_quote(&self) -> Option<usize> {
        self.sprites
            .hovered
            .map(|i| self.sprites.sprites[i].text_index)
    }

    // ---------------- Frame step ----------------

    /// Advance the simulation one frame. `now` is seconds since start;
    /// `viewport` the page size in pixels (for cursor proximity).
    pub fn step(&mut self, now: f64, viewport: Vec2) {
        let t = now as f32;

        // 1. Interaction smoothing (compression, spin, ripple start)
        self.interaction.advance(now);

        // 2. Surface probe; an idle or AFK pointer lets the field relax
        if !self.interaction.pointer_active() || self.interaction.is_afk(now) {
            self.interaction.decay_outward();
        } else {
            let (ro, rd) = self.camera.ray_from_ndc(self.interaction.ndc);
            let fallback = self.orientation.rotation * Vec3::Z;
            let probe = spatial::probe(ro, rd, Vec3::ZERO, self.config.sphere_radius, fallback);
            self.interaction.apply_probe(&probe, self.config.sphere_radius);
        }
        self.interaction.settle_magnet(self.orientation.rotation);

        // 3. Planet deformation
        let params = DeformParams {
            time: t,
            compression_factor: self.interaction.compression_factor,
            deform_alpha: self.interaction.deform_alpha,
            magnet_local: self.interaction.magnet_local,
            ripple_active: self.interaction.ripple_active(now),
            ripple_progress: self.interaction.ripple_progress(now),
        };
        deform::apply(&mut self.planet, &params);

        // 4. Glyph morph
        self.morph.advance(self.interaction.pressed());
        self.morph.apply(t);

        // 5. Rotation / momentum
        self.orientation.step(
            self.interaction.pressed(),
            self.interaction.drag_velocity(),
            self.interaction.spin_speed_factor,
            t,
        );

        // 6. Background drift and sprite hover
        let spin = self.interaction.spin_speed_factor;
        self.stars.drift(spin);
        self.sprites.drift(spin, &mut self.rng);
        let hover_ray = (self.interaction.pointer_active() && !self.interaction.pressed())
            .then(|| self.camera.ray_from_ndc(self.interaction.ndc));
        self.sprites.update_hover(hover_ray);

        // 7. Scalar uniforms for the renderer
        self.glow_time += 0.01;
        self.cursor_proximity = self.compute_cursor_proximity(viewport);
    }

    /// Cursor proximity to the planet center in [0.5, 1.0]: 1 at the center,
    /// 0.5 a full screen diagonal away (and before the cursor ever moved).
    fn compute_cursor_proximity(&self, viewport: Vec2) -> f32 {
        if !self.interaction.cursor_moved || viewport.x <= 0.0 || viewport.y <= 0.0 {
            return 0.5;
        }
        let Some(center_ndc) = self.camera.project_to_ndc(Vec3::ZERO) else {
            return 0.5;
        };
        let center_px = Vec2::new(
            (center_ndc.x * 0.5 + 0.5) * viewport.x,
            (-center_ndc.y * 0.5 + 0.5) * viewport.y,
        );
        let dist = self.interaction.cursor_px.distance(center_px);
        let max_dist = viewport.length();
        let normalized = (dist / max_dist).min(1.0);
        1.0 - normalized * 0.5
    }

    // ---------------- Renderer views ----------------

    pub fn planet_rotation(&self) -> Quat {
        self.orientation.rotation
    }

    /// Gentle drift of the glyph group around its rest orientation, slightly
    /// boosted while the planet spins faster.
    pub fn text_rotation(&self, now: f64) -> Quat {
        let t = now as f32;
        let boost = 0.8 + 0.2 * self.interaction.spin_speed_factor;
        let yaw = INITIAL_YAW + TEXT_DRIFT_YAW * boost * (t * 0.6 + 1.2).sin();
        let pitch = INITIAL_PITCH + TEXT_DRIFT_PITCH * boost * (t * 0.8).cos();
        Quat::from_euler(glam::EulerRot::XYZ, pitch, yaw, 0.0)
    }

    /// Compression scale applied to the glow shell.
    pub fn glow_scale(&self) -> f32 {
        self.interaction.compression_factor
    }

    pub fn glow_time(&self) -> f32 {
        self.glow_time
    }

    pub fn spin_speed_factor(&self) -> f32 {
        self.interaction.spin_speed_factor
    }

    pub fn cursor_proximity(&self) -> f32 {
        self.cursor_proximity
    }

    pub fn orbit_enabled(&self) -> bool {
        self.interaction.orbit_enabled
    }
}
