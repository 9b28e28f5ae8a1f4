//! Terrain elevation as a pure function of planar position.
//!
//! The mesh generator and every agent (camera, rock, trail) go through the
//! same `Heightfield`, so they all agree on where the ground is.
//!
//! Two coordinate conventions exist. The mesh is built in its own plane
//! `(x, y)` and then laid flat by a -90° rotation about X, which maps plane
//! `y` to world `-z`. Agents work in world space and therefore sample noise at
//! `(x, -z)`. Both entry points funnel into [`Heightfield::shaped`].

use std::sync::Arc;

use crate::noise::NoiseSource;
use crate::params::HeightfieldParams;

/// Shared ground-height function
///
/// Cheap to clone: the noise source is reference counted. Without a noise
/// source every query returns 0 (flat ground).
#[derive(Debug, Clone)]
pub struct Heightfield {
    noise: Option<Arc<NoiseSource>>,
    params: HeightfieldParams,
}

impl Heightfield {
    pub fn new(noise: Option<Arc<NoiseSource>>, params: HeightfieldParams) -> Self {
        Self { noise, params }
    }

    /// Heightfield with no noise source
    pub fn flat(params: HeightfieldParams) -> Self {
        Self::new(None, params)
    }

    pub fn has_noise(&self) -> bool {
        self.noise.is_some()
    }

    /// True when both heightfields read the same noise source instance
    /// with identical shaping
    pub fn same_source(&self, other: &Heightfield) -> bool {
        let same_noise = match (&self.noise, &other.noise) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_noise && self.params == other.params
    }

    /// Ground height under world position (x, z)
    pub fn elevation(&self, x: f32, z: f32) -> f32 {
        self.shaped(x as f64, -(z as f64))
    }

    /// Ground height at mesh-plane coordinates (x, y), before the mesh is laid flat
    pub fn mesh_elevation(&self, x: f32, y: f32) -> f32 {
        self.shaped(x as f64, y as f64)
    }

    fn shaped(&self, u: f64, v: f64) -> f32 {
        let Some(noise) = &self.noise else {
            return 0.0;
        };

        let sum: f64 = self
            .params
            .octaves
            .iter()
            .map(|o| noise.sample(u * o.frequency, v * o.frequency) * o.amplitude_m)
            .sum();

        let e = sum.abs().powf(self.params.exponent);
        // Only NaN can get past this; |s|^p is never negative
        if e > 0.0 {
            e as f32
        } else {
            0.0
        }
    }
}
