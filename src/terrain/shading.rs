//! Slope-based rock/snow surface classification.

use crate::params::SlopeShading;

/// Albedo and roughness of the ground at one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceShade {
    pub color: [f32; 3],
    pub roughness: f32,
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl SlopeShading {
    /// Snow coverage in [0, 1] for a slope (world-space normal.y)
    pub fn snow_cover(&self, slope: f32) -> f32 {
        smoothstep(
            self.snow_threshold - self.color_band_below,
            self.snow_threshold + self.color_band_above,
            slope,
        )
    }

    pub fn shade(&self, slope: f32) -> SurfaceShade {
        let cover = self.snow_cover(slope);
        let color = [0, 1, 2].map(|i| mix(self.rock_color[i], self.snow_color[i], cover));

        let (start, end) = self.roughness_band;
        let roughness = mix(
            self.rock_roughness,
            self.snow_roughness,
            smoothstep(start, end, slope),
        );

        SurfaceShade { color, roughness }
    }
}
