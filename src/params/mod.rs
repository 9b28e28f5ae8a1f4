//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, radians)
//! - Documented ranges and meanings
//! - Defaults matching the reference scene

mod path;
mod render;
mod scroll;
mod snow;
mod terrain;

// Re-export all types
pub use path::{CameraRigParams, PathParams, RockParams, TrailParams};
pub use render::{
    hex_color, linear_color, srgb_to_linear, RecordingConfig, RecordingProgress, RenderConfig,
};
pub use scroll::{ScrollParams, SECTION_TITLES};
pub use snow::SnowParams;
pub use terrain::{HeightfieldParams, Octave, SlopeShading, TerrainParams};

/// Everything needed to build a scene
#[derive(Debug, Clone)]
pub struct SceneParams {
    /// Noise seed; `None` runs without a noise source (flat ground)
    pub noise_seed: Option<u32>,

    /// Seed for tree scatter
    pub scatter_seed: u64,

    pub heightfield: HeightfieldParams,
    pub terrain: TerrainParams,
    pub path: PathParams,
    pub camera: CameraRigParams,
    pub rock: RockParams,
    pub trail: TrailParams,
    pub snow: SnowParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            noise_seed: Some(42),
            scatter_seed: 42,
            heightfield: HeightfieldParams::default(),
            terrain: TerrainParams::default(),
            path: PathParams::default(),
            camera: CameraRigParams::default(),
            rock: RockParams::default(),
            trail: TrailParams::default(),
            snow: SnowParams::default(),
        }
    }
}
