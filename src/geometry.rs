//! Shared vertex format and the primitive meshes used for props.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Lit mesh vertex (position, normal, albedo, roughness)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub roughness: f32,
}

/// CPU-side indexed triangle mesh
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append a flat-shaded triangle (counter-clockwise seen from outside)
    fn push_facet(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 3], roughness: f32) {
        let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
        let base = self.vertices.len() as u32;
        for p in [a, b, c] {
            self.vertices.push(Vertex {
                position: p.to_array(),
                normal,
                color,
                roughness,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
}

/// Accumulate area-weighted face normals into per-vertex normals
pub fn compute_vertex_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut sums = vec![Vec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from_array(vertices[a].position);
        let pb = Vec3::from_array(vertices[b].position);
        let pc = Vec3::from_array(vertices[c].position);
        // Unnormalized: longer cross product = larger face = more weight
        let face = (pb - pa).cross(pc - pa);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }
    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = sum.try_normalize().unwrap_or(Vec3::Y).to_array();
    }
}

/// Conifer: cone standing on the origin, apex at `height`
pub fn cone(
    radius: f32,
    height: f32,
    radial_segments: usize,
    color: [f32; 3],
    roughness: f32,
) -> MeshData {
    let mut mesh = MeshData::default();
    let segments = radial_segments.max(3);
    let apex = Vec3::new(0.0, height, 0.0);
    let rim = |i: usize| {
        let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
        Vec3::new(theta.sin() * radius, 0.0, theta.cos() * radius)
    };

    for i in 0..segments {
        let a = rim(i);
        let b = rim(i + 1);
        mesh.push_facet(a, b, apex, color, roughness);
        mesh.push_facet(Vec3::ZERO, b, a, color, roughness);
    }
    mesh
}

/// Faceted rock: flat-shaded icosahedron of the given circumradius
pub fn rock(radius: f32, color: [f32; 3], roughness: f32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|c| c.normalize() * radius);

    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let mut mesh = MeshData::default();
    for [a, b, c] in FACES {
        mesh.push_facet(corners[a], corners[b], corners[c], color, roughness);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_facets_face_outward() {
        let mesh = rock(0.5, [1.0, 0.8, 0.0], 0.2);
        assert_eq!(mesh.indices.len(), 60);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            assert!((p.length() - 0.5).abs() < 1e-5);
            assert!(Vec3::from_array(v.normal).dot(p) > 0.0, "inward facet at {:?}", p);
        }
    }

    #[test]
    fn test_cone_shape() {
        let mesh = cone(0.5, 2.0, 8, [0.0, 0.1, 0.0], 0.9);
        assert_eq!(mesh.indices.len(), 8 * 2 * 3);
        let top = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(top, 2.0);
        // Side facets point outward and up
        let side = &mesh.vertices[0];
        assert!(side.normal[1] > 0.0);
    }

    #[test]
    fn test_vertex_normals_of_flat_quad_point_up() {
        let mut vertices: Vec<Vertex> = [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0]]
            .iter()
            .map(|&position| Vertex {
                position,
                normal: [0.0; 3],
                color: [1.0; 3],
                roughness: 1.0,
            })
            .collect();
        compute_vertex_normals(&mut vertices, &[0, 1, 2, 1, 3, 2]);
        for v in &vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }
}
