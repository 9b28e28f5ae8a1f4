//! Tree scatter over the terrain grid.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

use crate::params::TerrainParams;

/// One placed tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeInstance {
    /// Base of the trunk, on the ground (world space)
    pub position: Vec3,

    /// Uniform scale
    pub scale: f32,

    /// Rotation about Y (radians)
    pub rotation_y: f32,
}

impl TreeInstance {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.position,
        )
    }
}

/// Scatter rule applied to each terrain vertex in turn
pub struct TreeScatter<'a, R: Rng> {
    params: &'a TerrainParams,
    rng: R,
    trees: Vec<TreeInstance>,
}

impl<'a, R: Rng> TreeScatter<'a, R> {
    pub fn new(params: &'a TerrainParams, rng: R) -> Self {
        Self {
            params,
            rng,
            trees: Vec::new(),
        }
    }

    /// Maybe grow a tree at a grid vertex (world x, ground height, world z)
    ///
    /// The dice roll comes first so the random stream only depends on the
    /// number of vertices visited.
    pub fn consider(&mut self, position: Vec3) {
        let p = self.params;
        if self.rng.gen::<f32>() >= p.tree_probability {
            return;
        }
        let inside_band = position.x > -p.tree_lateral_limit_m && position.x < p.tree_lateral_limit_m;
        // Strictly between valley floor and peaks
        let good_height =
            position.y > p.tree_min_elevation_m && position.y < p.tree_max_elevation_m;
        if !(inside_band && good_height) {
            return;
        }

        let scale = p.tree_scale_min + self.rng.gen::<f32>() * p.tree_scale_jitter;
        let rotation_y = self.rng.gen::<f32>() * std::f32::consts::PI;
        self.trees.push(TreeInstance {
            position,
            scale,
            rotation_y,
        });
    }

    pub fn finish(self) -> Vec<TreeInstance> {
        self.trees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scatter_everywhere(params: &TerrainParams, seed: u64, points: &[Vec3]) -> Vec<TreeInstance> {
        let mut scatter = TreeScatter::new(params, StdRng::seed_from_u64(seed));
        for &p in points {
            scatter.consider(p);
        }
        scatter.finish()
    }

    #[test]
    fn test_certain_placement_respects_band_and_heights() {
        let params = TerrainParams {
            tree_probability: 1.0,
            ..TerrainParams::default()
        };
        let points = [
            Vec3::new(0.0, 3.0, 0.0),   // valid
            Vec3::new(45.0, 3.0, 0.0),  // outside lateral band
            Vec3::new(-40.0, 3.0, 0.0), // on the band edge
            Vec3::new(5.0, 1.0, 2.0),   // valley floor
            Vec3::new(5.0, 6.0, 2.0),   // peak
            Vec3::new(5.0, 0.2, 2.0),   // below floor
            Vec3::new(-12.0, 5.9, -30.0), // valid
        ];
        let trees = scatter_everywhere(&params, 1, &points);

        let spots: Vec<Vec3> = trees.iter().map(|t| t.position).collect();
        assert_eq!(spots, vec![points[0], points[6]]);
        for tree in &trees {
            assert!(tree.scale >= 0.5 && tree.scale < 1.3);
            assert!(tree.rotation_y >= 0.0 && tree.rotation_y < std::f32::consts::PI);
        }
    }

    #[test]
    fn test_zero_probability_places_nothing() {
        let params = TerrainParams {
            tree_probability: 0.0,
            ..TerrainParams::default()
        };
        let points = vec![Vec3::new(0.0, 3.0, 0.0); 500];
        assert!(scatter_everywhere(&params, 3, &points).is_empty());
    }

    #[test]
    fn test_acceptance_rate_is_low() {
        let params = TerrainParams::default();
        let points = vec![Vec3::new(0.0, 3.0, 0.0); 20_000];
        let count = scatter_everywhere(&params, 11, &points).len();
        // 1.5% of 20k = 300
        assert!(count > 200 && count < 400, "placed {} trees", count);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let params = TerrainParams::default();
        let points: Vec<Vec3> = (0..5000)
            .map(|i| Vec3::new((i % 70) as f32 - 35.0, 2.0 + (i % 3) as f32, i as f32 * 0.01))
            .collect();
        assert_eq!(
            scatter_everywhere(&params, 5, &points),
            scatter_everywhere(&params, 5, &points)
        );
    }

    #[test]
    fn test_model_matrix_places_base_on_ground() {
        let tree = TreeInstance {
            position: Vec3::new(3.0, 2.0, -1.0),
            scale: 0.8,
            rotation_y: 1.0,
        };
        let base = tree.model_matrix().transform_point3(Vec3::ZERO);
        assert!(base.abs_diff_eq(tree.position, 1e-6));
        let tip = tree.model_matrix().transform_point3(Vec3::new(0.0, 2.0, 0.0));
        assert!((tip.y - (2.0 + 1.6)).abs() < 1e-5);
    }
}
