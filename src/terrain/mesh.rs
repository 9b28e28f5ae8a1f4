//! Displaced terrain grid.

use glam::Vec3;

use crate::geometry::{compute_vertex_normals, MeshData, Vertex};
use crate::heightfield::Heightfield;
use crate::params::TerrainParams;

/// Static terrain grid, already laid flat in world space
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build the grid and displace every vertex by the heightfield
    ///
    /// The grid is generated in a vertical plane `(x, y)` with rows running
    /// from `+depth/2` down to `-depth/2`, displaced, and then laid flat: plane
    /// `y` becomes world `-z`. `visit` sees every vertex in generation order
    /// with its world position (used for prop scatter).
    pub fn build<F>(heightfield: &Heightfield, params: &TerrainParams, mut visit: F) -> Self
    where
        F: FnMut(Vec3),
    {
        let segments = params.segments.max(1);
        let row = segments + 1;
        let step_x = params.width_m / segments as f32;
        let step_y = params.depth_m / segments as f32;
        let half_w = params.width_m / 2.0;
        let half_d = params.depth_m / 2.0;

        let mut vertices = Vec::with_capacity(row * row);
        for iy in 0..=segments {
            let plane_y = half_d - iy as f32 * step_y;
            for ix in 0..=segments {
                let x = ix as f32 * step_x - half_w;
                let elevation = heightfield.mesh_elevation(x, plane_y);
                let world = Vec3::new(x, elevation, -plane_y);
                visit(world);

                vertices.push(Vertex {
                    position: world.to_array(),
                    normal: [0.0, 1.0, 0.0],
                    color: [1.0; 3],
                    roughness: 1.0,
                });
            }
        }

        // Two triangles per quad, counter-clockwise seen from above
        let mut indices = Vec::with_capacity(segments * segments * 6);
        for iy in 0..segments {
            for ix in 0..segments {
                let a = (iy * row + ix) as u32;
                let b = ((iy + 1) * row + ix) as u32;
                let c = ((iy + 1) * row + ix + 1) as u32;
                let d = (iy * row + ix + 1) as u32;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        compute_vertex_normals(&mut vertices, &indices);

        for vertex in &mut vertices {
            let shade = params.shading.shade(vertex.normal[1]);
            vertex.color = shade.color;
            vertex.roughness = shade.roughness;
        }

        Self { vertices, indices }
    }

    pub fn to_mesh_data(&self) -> MeshData {
        MeshData {
            vertices: self.vertices.clone(),
            indices: self.indices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseSource;
    use crate::params::HeightfieldParams;
    use std::sync::Arc;

    fn small_params() -> TerrainParams {
        TerrainParams {
            segments: 32,
            ..TerrainParams::default()
        }
    }

    fn seeded() -> Heightfield {
        Heightfield::new(
            Some(Arc::new(NoiseSource::new(42))),
            HeightfieldParams::default(),
        )
    }

    #[test]
    fn test_terrain_grid_creation() {
        let params = small_params();
        let mesh = TerrainMesh::build(&seeded(), &params, |_| {});

        // Check vertex count: (segments + 1)^2
        assert_eq!(mesh.vertices.len(), (params.segments + 1).pow(2));

        // Check triangle count: segments^2 * 2 triangles * 3 indices
        assert_eq!(mesh.indices.len(), params.segments.pow(2) * 6);
    }

    #[test]
    fn test_grid_spans_extent() {
        let params = small_params();
        let mesh = TerrainMesh::build(&seeded(), &params, |_| {});
        let first = Vec3::from_array(mesh.vertices[0].position);
        let last = Vec3::from_array(mesh.vertices[33 * 33 - 1].position);
        assert_eq!((first.x, first.z), (-60.0, -60.0));
        assert_eq!((last.x, last.z), (60.0, 60.0));
    }

    #[test]
    fn test_vertices_sit_on_agent_heightfield() {
        let heightfield = seeded();
        let mesh = TerrainMesh::build(&heightfield, &small_params(), |_| {});
        for v in mesh.vertices.iter().step_by(7) {
            let [x, y, z] = v.position;
            assert_eq!(
                y.to_bits(),
                heightfield.elevation(x, z).to_bits(),
                "mesh and agents disagree at ({}, {})",
                x,
                z
            );
        }
    }

    #[test]
    fn test_normals_face_up_and_drive_shading() {
        let params = small_params();
        let mesh = TerrainMesh::build(&seeded(), &params, |_| {});
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.y > 0.0);
            assert_eq!(v.color, params.shading.shade(n.y).color);
        }
    }

    #[test]
    fn test_flat_ground_is_all_snow() {
        let params = small_params();
        let flat = Heightfield::flat(HeightfieldParams::default());
        let mesh = TerrainMesh::build(&flat, &params, |_| {});
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 0.0);
            assert!(Vec3::from_array(v.normal).abs_diff_eq(Vec3::Y, 1e-6));
            assert_eq!(v.color, params.shading.snow_color);
        }
    }

    #[test]
    fn test_visit_sees_every_vertex_in_order() {
        let params = small_params();
        let mut seen = Vec::new();
        let mesh = TerrainMesh::build(&seeded(), &params, |p| seen.push(p));
        assert_eq!(seen.len(), mesh.vertices.len());
        assert_eq!(seen[5].to_array(), mesh.vertices[5].position);
    }
}
