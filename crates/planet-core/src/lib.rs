pub mod constants;
pub mod deform;
pub mod field;
pub mod glyph;
pub mod interaction;
pub mod morph;
pub mod rotation;
pub mod scene;
pub mod spatial;
pub mod starfield;
pub mod state;

pub use field::ParticleField;
pub use glyph::{GlyphError, GlyphPointSet};
pub use interaction::{InteractionState, PointerPhase};
pub use morph::MorphField;
pub use rotation::Orientation;
pub use scene::{PlanetScene, SceneConfig};
pub use spatial::SurfaceProbe;
pub use starfield::{QuoteSprite, SpriteField, Starfield};
pub use state::Camera;
