//! Static snowy terrain: displaced grid, slope shading, and scattered trees.

mod mesh;
mod shading;
mod trees;

// Re-export public types
pub use mesh::TerrainMesh;
pub use shading::SurfaceShade;
pub use trees::{TreeInstance, TreeScatter};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::heightfield::Heightfield;
use crate::params::TerrainParams;

/// Terrain built once per session
pub struct Terrain {
    pub mesh: TerrainMesh,
    pub trees: Vec<TreeInstance>,
    params: TerrainParams,
}

impl Terrain {
    /// Generate mesh and trees; identical seeds give identical terrain
    pub fn generate(heightfield: &Heightfield, params: TerrainParams, scatter_seed: u64) -> Self {
        let mut scatter = TreeScatter::new(&params, StdRng::seed_from_u64(scatter_seed));
        let mesh = TerrainMesh::build(heightfield, &params, |p| scatter.consider(p));
        let trees = scatter.finish();

        log::info!(
            "Terrain: {} vertices, {} triangles, {} trees",
            mesh.vertices.len(),
            mesh.indices.len() / 3,
            trees.len()
        );

        Self {
            mesh,
            trees,
            params,
        }
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }
}
