// Shared simulation tuning constants used by the frame step and tests.

// Planet point cloud
pub const PARTICLE_COUNT: usize = 5000;
pub const SPHERE_RADIUS: f32 = 5.0;
pub const INITIAL_PITCH: f32 = -0.12;
pub const INITIAL_YAW: f32 = 0.18;

// Magnetic deformation
pub const INFLUENCE_SIGMA: f32 = 4.0; // Gaussian falloff sigma (world units)
pub const MAGNET_STRENGTH: f32 = 0.32; // base pull toward the tracked target
pub const HOVER_REACH: f32 = 40.0; // how far outside the surface still influences
pub const MAX_OUTWARD: f32 = 2.2; // max outward offset of the tracked target
pub const TENT_SHARPNESS: f32 = 1.0; // triangular peak sharpness
pub const MAGNET_RANGE: f32 = 2000.0; // active over the whole page
pub const DEFORM_ALPHA_EASE: f32 = 0.12;
pub const MAGNET_LERP: f32 = 0.18;
pub const OUTWARD_EASE_ACTIVE: f32 = 0.25;
pub const OUTWARD_EASE_DECAY: f32 = 0.15;
pub const AFK_TIMEOUT_SEC: f64 = 3.0; // pointer idle time before the field relaxes

// Press-to-compress
pub const COMPRESSION_SCALE_ACTIVE: f32 = 0.72; // target radius scale while pressed
pub const EASE_PRESS: f32 = 0.25; // approach rate toward compressed
pub const EASE_RELEASE: f32 = 0.18; // approach rate back to normal
pub const SPIN_BOOST_TARGET: f32 = 2.2; // spin multiplier while pressed
pub const SCATTER_COEFF: f32 = 0.4; // scatter intensity per unit of compression
pub const SCATTER_WOBBLE: f32 = 0.8;
pub const SCATTER_OUTWARD: f32 = 1.5;

// Ripple wave released on pointer-up
pub const RIPPLE_DURATION_SEC: f64 = 1.5;
pub const RIPPLE_AMPLITUDE: f32 = 0.3;
pub const RIPPLE_DECAY: f32 = 3.0;

// Drag / momentum
pub const DRAG_SENSITIVITY: f32 = 0.01; // live rotation per pixel of drag
pub const RELEASE_SENSITIVITY: f32 = 0.005; // stored angular velocity per pixel
pub const DRAG_DEADZONE: f32 = 0.1; // ignore sub-pixel jitter
pub const DAMPING_FACTOR: f32 = 0.975; // momentum decay per frame
pub const MOMENTUM_FLOOR_SQ: f32 = 1e-5; // below this, fall back to precession
pub const PRECESSION_BASE_DELTA: f32 = 0.0015; // idle spin rate per frame

// Glyph morph
pub const MORPH_EASE_PRESSED: f32 = 0.10;
pub const MORPH_EASE_RELEASED: f32 = 0.08;
pub const SCATTER_TARGET_RADIUS: f32 = 10.0; // synthetic targets for absent points
pub const TRANSITION_SPIN: f32 = 0.4;
pub const TRANSITION_SCATTER: f32 = 0.3;
pub const GLYPH_WOBBLE_SPREAD: f32 = 0.15; // per-axis wobble velocity spread

// Starfield
pub const STAR_COUNT: usize = 10_000;
pub const STAR_SPREAD_XY: f32 = 2000.0;
pub const STAR_SPREAD_Z: f32 = 4000.0;
pub const STAR_DRIFT: f32 = 0.5; // per frame, scaled by the spin factor
pub const STAR_WRAP_Z: f32 = 2000.0;

// Floating quote sprites
pub const SPRITE_SPREAD_XY: f32 = 1500.0;
pub const SPRITE_SPREAD_Z: f32 = 3000.0;
pub const SPRITE_HOVER_RADIUS: f32 = 10.0; // ray proximity threshold
pub const SPRITE_SCALE_EASE: f32 = 0.1;
pub const SPRITE_HOVER_SCALE: f32 = 2.0;
pub const SPRITE_HOVER_SCALE_MULTILINE: f32 = 3.0;
pub const SPRITE_OPACITY_IDLE: f32 = 0.6;
pub const SPRITE_OPACITY_HOVER: f32 = 0.9;

// Text group drift around its rest orientation
pub const TEXT_DRIFT_YAW: f32 = 0.015;
pub const TEXT_DRIFT_PITCH: f32 = 0.012;
