//! Snowfall particle parameters.

/// Snowfall volume and motion
#[derive(Debug, Clone)]
pub struct SnowParams {
    pub count: usize,

    /// Side of the square spawn area in X and Z (meters)
    pub spread_m: f32,

    /// Respawn height (meters)
    pub ceiling_m: f32,

    /// Flakes below this height respawn (meters)
    pub floor_m: f32,

    /// Slowest flake speed (before `fall_scale`)
    pub min_speed: f32,

    /// Random extra speed added per flake
    pub speed_jitter: f32,

    /// Speed to meters-per-second multiplier
    pub fall_scale: f32,

    /// Horizontal sway amplitude (meters)
    pub sway_m: f32,

    /// Flake color (#ffe0d0, 0.6 alpha)
    pub color: [f32; 4],

    /// RNG seed for spawn positions
    pub seed: u64,
}

impl Default for SnowParams {
    fn default() -> Self {
        Self {
            count: 2000,
            spread_m: 80.0,
            ceiling_m: 40.0,
            floor_m: -5.0,
            min_speed: 0.05,
            speed_jitter: 0.1,
            fall_scale: 10.0,
            sway_m: 0.5,
            color: [1.0, 0.878, 0.816, 0.6],
            seed: 7,
        }
    }
}
