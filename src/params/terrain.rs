//! Heightfield, terrain mesh, tree scatter, and slope shading parameters.

/// One noise octave of the heightfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    /// Spatial frequency (noise units per meter)
    pub frequency: f64,

    /// Height contribution (meters per unit noise)
    pub amplitude_m: f64,
}

/// Heightfield shape shared by the mesh and every agent
#[derive(Debug, Clone, PartialEq)]
pub struct HeightfieldParams {
    /// Octaves summed before shaping
    pub octaves: Vec<Octave>,

    /// Exponent applied to |sum| (sharpens peaks, flattens valleys)
    pub exponent: f64,
}

impl Default for HeightfieldParams {
    fn default() -> Self {
        Self {
            octaves: vec![
                Octave {
                    frequency: 0.03,
                    amplitude_m: 6.0,
                },
                Octave {
                    frequency: 0.1,
                    amplitude_m: 2.0,
                },
                Octave {
                    frequency: 0.4,
                    amplitude_m: 0.4,
                },
            ],
            exponent: 1.25,
        }
    }
}

/// Rock/snow blend driven by the world-space up component of the normal
#[derive(Debug, Clone)]
pub struct SlopeShading {
    /// Albedo on steep faces (linear RGB)
    pub rock_color: [f32; 3],

    /// Albedo on flat ground (kept below 1.0 so lighting does not blow out)
    pub snow_color: [f32; 3],

    /// Slope (normal.y) above which ground counts as flat enough for snow
    pub snow_threshold: f32,

    /// Blend band below the threshold
    pub color_band_below: f32,

    /// Blend band above the threshold
    pub color_band_above: f32,

    pub rock_roughness: f32,

    /// Icy snow is glossier than rock
    pub snow_roughness: f32,

    /// Slope range over which roughness blends (start, end)
    pub roughness_band: (f32, f32),
}

impl Default for SlopeShading {
    fn default() -> Self {
        Self {
            rock_color: [0.3, 0.25, 0.3],
            snow_color: [0.35, 0.35, 0.4],
            snow_threshold: 0.6,
            color_band_below: 0.2,
            color_band_above: 0.1,
            rock_roughness: 0.9,
            snow_roughness: 0.4,
            roughness_band: (0.4, 0.8),
        }
    }
}

/// Terrain grid and prop scatter parameters
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Grid extent along X (meters)
    pub width_m: f32,

    /// Grid extent along Z (meters)
    pub depth_m: f32,

    /// Quads per side (vertices per side = segments + 1)
    pub segments: usize,

    /// Per-vertex chance of trying to place a tree
    pub tree_probability: f32,

    /// Trees only grow within |x| < this (meters)
    pub tree_lateral_limit_m: f32,

    /// Trees avoid the valley floor: elevation must exceed this (meters)
    pub tree_min_elevation_m: f32,

    /// Trees avoid peaks: elevation must stay below this (meters)
    pub tree_max_elevation_m: f32,

    /// Smallest tree scale
    pub tree_scale_min: f32,

    /// Random extra scale added on top of `tree_scale_min`
    pub tree_scale_jitter: f32,

    /// Tree albedo (#0f1f15)
    pub tree_color: [f32; 3],

    pub tree_roughness: f32,

    pub shading: SlopeShading,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width_m: 120.0,
            depth_m: 120.0,
            segments: 256,
            tree_probability: 0.015,
            tree_lateral_limit_m: 40.0,
            tree_min_elevation_m: 1.0,
            tree_max_elevation_m: 6.0,
            tree_scale_min: 0.5,
            tree_scale_jitter: 0.8,
            tree_color: [0.059, 0.122, 0.082],
            tree_roughness: 0.9,
            shading: SlopeShading::default(),
        }
    }
}
