// End-to-end scenarios driving the whole scene through its public surface:
// pointer events in, buffers and uniforms out.

use glam::{Vec2, Vec3};
use planet_core::constants::{COMPRESSION_SCALE_ACTIVE, DAMPING_FACTOR, MOMENTUM_FLOOR_SQ};
use planet_core::glyph::GlyphPointSet;
use planet_core::scene::{PlanetScene, SceneConfig};

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const CENTER_PX: Vec2 = Vec2::new(640.0, 360.0);

fn glyph(count: usize) -> GlyphPointSet {
    GlyphPointSet {
        positions: (0..count)
            .map(|i| Vec3::new(i as f32 * 0.05 - 1.0, (i % 5) as f32 * 0.05, 0.0))
            .collect(),
        edges: vec![],
    }
}

fn make_scene() -> PlanetScene {
    let config = SceneConfig {
        particle_count: 400,
        quote_texts: vec!["run your own node".into(), "first\nsecond".into()],
        ..SceneConfig::default()
    };
    PlanetScene::new(config, glyph(120), glyph(300))
}

fn run_frames(scene: &mut PlanetScene, start: usize, count: usize) -> f64 {
    let mut now = 0.0;
    for f in start..start + count {
        now = f as f64 / 60.0;
        scene.step(now, VIEWPORT);
    }
    now
}

#[test]
fn untouched_scene_keeps_exact_base_positions() {
    let mut scene = make_scene();
    run_frames(&mut scene, 0, 10);
    for i in 0..scene.planet.len() {
        assert_eq!(scene.planet.positions[i], scene.planet.base_positions[i]);
        assert_eq!(scene.planet.colors[i], scene.planet.base_colors[i]);
    }
}

#[test]
fn press_on_the_sphere_compresses_and_suspends_orbit() {
    let mut scene = make_scene();
    scene.pointer_moved(Vec2::ZERO, CENTER_PX, 0.0);
    // Screen center looks straight at the planet
    assert!(scene.pointer_down(Vec2::ZERO, CENTER_PX), "center ray must hit");
    assert!(!scene.orbit_enabled());

    let mut prev = 1.0_f32;
    for f in 1..90 {
        scene.step(f as f64 / 60.0, VIEWPORT);
        assert!(scene.interaction.compression_factor <= prev + 1e-6);
        prev = scene.interaction.compression_factor;
    }
    assert!((prev - COMPRESSION_SCALE_ACTIVE).abs() < 1e-3);

    // The cloud actually shrank
    let max_radius = scene
        .planet
        .positions
        .iter()
        .map(|p| p.length())
        .fold(0.0_f32, f32::max);
    assert!(
        max_radius < scene.config.sphere_radius,
        "compressed cloud should sit inside the rest radius, got {max_radius}"
    );

    scene.pointer_up();
    assert!(scene.orbit_enabled());
}

#[test]
fn press_off_the_sphere_is_not_a_grab() {
    let mut scene = make_scene();
    scene.pointer_moved(Vec2::new(0.95, 0.95), Vec2::new(1240.0, 20.0), 0.0);
    assert!(!scene.pointer_down(Vec2::new(0.95, 0.95), Vec2::new(1240.0, 20.0)));
    assert!(scene.orbit_enabled());
    assert!(!scene.interaction.pressed());
}

#[test]
fn drag_release_spins_then_coasts_to_rest() {
    let mut scene = make_scene();
    scene.pointer_moved(Vec2::ZERO, CENTER_PX, 0.0);
    scene.pointer_down(Vec2::ZERO, CENTER_PX);
    run_frames(&mut scene, 1, 30);

    // Drag 100 px right, no vertical movement, then release
    scene.pointer_moved(Vec2::ZERO, CENTER_PX + Vec2::new(100.0, 0.0), 0.51);
    scene.pointer_up();

    let w = scene.orientation.angular_velocity;
    assert!((w - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6, "got {w:?}");

    // Ripple fires on the first frame after release
    scene.step(31.0 / 60.0, VIEWPORT);
    assert!(scene.interaction.ripple_active(31.0 / 60.0));

    // Momentum decays exponentially to the rest floor
    let m = 0.5_f32;
    let eps = MOMENTUM_FLOOR_SQ.sqrt();
    let bound = ((eps / m).ln() / DAMPING_FACTOR.ln()).ceil() as usize;
    run_frames(&mut scene, 32, bound + 2);
    assert!(scene.orientation.angular_velocity.length_squared() <= MOMENTUM_FLOOR_SQ);
}

#[test]
fn afk_pointer_lets_the_field_relax_to_base() {
    let mut scene = make_scene();
    // Hover near the planet so the magnet engages
    scene.pointer_moved(Vec2::new(0.1, 0.1), CENTER_PX + Vec2::new(40.0, -30.0), 0.0);
    run_frames(&mut scene, 0, 30);
    assert!(scene.interaction.deform_alpha > 0.1, "magnet should engage");

    // No movement for well past the AFK timeout
    for f in 0..400 {
        scene.step(4.0 + f as f64 / 60.0, VIEWPORT);
    }
    assert!(scene.interaction.outward_alpha < 1e-3);
    assert!(scene.interaction.deform_alpha < 1e-3);
    for i in 0..scene.planet.len() {
        assert_eq!(
            scene.planet.positions[i], scene.planet.base_positions[i],
            "idle path must restore exact base positions"
        );
    }
}

#[test]
fn cursor_proximity_stays_in_band_and_tracks_the_cursor() {
    let mut scene = make_scene();
    scene.step(0.0, VIEWPORT);
    assert_eq!(scene.cursor_proximity(), 0.5, "floor before any movement");

    // Cursor on the planet's projected center: maximal proximity
    let center_ndc = scene.camera.project_to_ndc(Vec3::ZERO).unwrap();
    let center_px = Vec2::new(
        (center_ndc.x * 0.5 + 0.5) * VIEWPORT.x,
        (-center_ndc.y * 0.5 + 0.5) * VIEWPORT.y,
    );
    scene.pointer_moved(center_ndc, center_px, 0.1);
    scene.step(0.1, VIEWPORT);
    let near = scene.cursor_proximity();
    assert!((near - 1.0).abs() < 1e-3);

    // A far corner reads lower but never below the floor
    scene.pointer_moved(Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0), 0.2);
    scene.step(0.2, VIEWPORT);
    let far = scene.cursor_proximity();
    assert!(far < near);
    assert!((0.5..=1.0).contains(&far));
}

#[test]
fn morph_tracks_the_press_state() {
    let mut scene = make_scene();
    // Released: morph heads for the expanded variant
    run_frames(&mut scene, 0, 200);
    assert!((scene.morph.factor - 1.0).abs() < 1e-2);

    scene.pointer_moved(Vec2::ZERO, CENTER_PX, 3.4);
    scene.pointer_down(Vec2::ZERO, CENTER_PX);
    for f in 0..200 {
        scene.step(3.4 + f as f64 / 60.0, VIEWPORT);
    }
    assert!(scene.morph.factor < 1e-2, "pressed morph returns to compact");
}

#[test]
fn sprite_on_the_pointer_ray_reports_hover() {
    let mut scene = make_scene();
    // Park the first quote directly on the screen-center ray
    scene.sprites.sprites[0].position = Vec3::ZERO;
    scene.sprites.sprites[1].position = Vec3::new(700.0, 700.0, -1400.0);
    scene.pointer_moved(Vec2::ZERO, CENTER_PX, 0.0);
    scene.step(0.0, VIEWPORT);
    assert_eq!(scene.hovered_quote(), Some(0));

    // Pressing the planet suppresses sprite hover
    scene.pointer_down(Vec2::ZERO, CENTER_PX);
    scene.step(1.0 / 60.0, VIEWPORT);
    assert_eq!(scene.hovered_quote(), None);
}

#[test]
fn same_seed_same_scene() {
    let mut a = make_scene();
    let mut b = make_scene();
    assert_eq!(a.stars.positions, b.stars.positions);
    assert_eq!(a.planet.velocities, b.planet.velocities);

    // Identical event sequences stay identical through stepping
    for scene in [&mut a, &mut b] {
        scene.pointer_moved(Vec2::new(0.2, -0.1), Vec2::new(700.0, 500.0), 0.0);
        scene.pointer_down(Vec2::new(0.2, -0.1), Vec2::new(700.0, 500.0));
        run_frames(scene, 0, 60);
    }
    assert_eq!(a.planet.positions, b.planet.positions);
    assert_eq!(a.morph.positions, b.morph.positions);
}
