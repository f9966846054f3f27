//! Procedural meshes for atoms and bonds.
//!
//! Spheres are geodesic subdivisions of an icosahedron; bonds are lateral
//! cylinder tubes, laid out as parallel segments for double and triple
//! bonds. All generators are pure and deterministic: identical inputs give
//! bit-identical vertex and index buffers.

/// Parallel-segment layout for single, double and triple bonds.
pub mod bond;
/// Lateral cylinder tubes between two points.
pub mod cylinder;
/// Geodesic icosphere generation.
pub mod sphere;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use bond::{bond_segments, BondOrder};
pub use cylinder::{generate_cylinder, validate_cylinder, Circle};
pub use sphere::{generate_sphere, sphere_triangles, DEFAULT_SUBDIVISION_DEPTH};

/// Unit vector along `v`, or zero for a zero or non-finite input.
///
/// Divides by the largest component before normalizing so the squared
/// length neither overflows for huge vectors nor underflows for tiny ones.
pub(crate) fn unit(v: Vec3) -> Vec3 {
    let scale = v.abs().max_element();
    if scale > 0.0 && scale.is_finite() {
        (v / scale).normalize_or_zero()
    } else {
        Vec3::ZERO
    }
}

/// A single mesh vertex, laid out for direct GPU upload.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
pub struct Vertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color, each channel in `0..=1`.
    pub color: [f32; 3],
    /// Shading normal.
    pub normal: [f32; 3],
}

impl Vertex {
    /// Build a vertex from vector components.
    #[must_use]
    pub fn new(position: Vec3, color: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
            normal: normal.to_array(),
        }
    }

    /// Position as a [`Vec3`].
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Normal as a [`Vec3`].
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Three vertices plus an optional precomputed normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v1: Vec3,
    /// Second vertex.
    pub v2: Vec3,
    /// Third vertex.
    pub v3: Vec3,
    /// Face normal, when the producer computed one.
    pub normal: Option<Vec3>,
}

impl Triangle {
    /// Triangle without a precomputed normal.
    #[must_use]
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self {
            v1,
            v2,
            v3,
            normal: None,
        }
    }

    /// Triangle carrying a precomputed face normal.
    #[must_use]
    pub fn with_normal(v1: Vec3, v2: Vec3, v3: Vec3, normal: Vec3) -> Self {
        Self {
            v1,
            v2,
            v3,
            normal: Some(normal),
        }
    }

    /// Vertices in winding order.
    #[must_use]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Unnormalized geometric normal `(v2 - v1) x (v3 - v1)`.
    #[must_use]
    pub fn face_normal(&self) -> Vec3 {
        (self.v2 - self.v1).cross(self.v3 - self.v1)
    }

    /// Surface area.
    #[must_use]
    pub fn area(&self) -> f32 {
        0.5 * self.face_normal().length()
    }
}

/// Vertex buffer plus a triangle-list index buffer.
///
/// Every index is smaller than the vertex count and the index count is a
/// multiple of three.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh where each consecutive run of three vertices is its own
    /// triangle. The index buffer is simply `0, 1, 2, ...`.
    ///
    /// Trailing vertices that do not complete a triangle are dropped.
    #[must_use]
    pub fn from_unshared_vertices(mut vertices: Vec<Vertex>) -> Self {
        vertices.truncate(vertices.len() - vertices.len() % 3);
        let indices = (0..vertices.len() as u32).collect();
        Self { vertices, indices }
    }

    /// Vertex buffer contents.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index buffer contents.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles described by the index buffer.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Raw vertex bytes for GPU upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for GPU upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Iterate triangles as position triples, following the index buffer.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            Triangle::new(
                self.vertices[tri[0] as usize].position(),
                self.vertices[tri[1] as usize].position(),
                self.vertices[tri[2] as usize].position(),
            )
        })
    }

    /// Same geometry with every vertex recolored to `color`.
    #[must_use]
    pub fn with_flat_color(&self, color: Vec3) -> Self {
        let color = color.to_array();
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex { color, ..*v })
                .collect(),
            indices: self.indices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_survives_extreme_magnitudes() {
        for v in [
            Vec3::new(2e19, 0.0, 0.0),
            Vec3::new(3e38, -3e38, 1e38),
            Vec3::new(1e-23, 0.0, 0.0),
            Vec3::new(0.0, 1e-44, 1e-44),
        ] {
            let u = unit(v);
            assert!((u.length() - 1.0).abs() < 1e-6, "{v} -> {u}");
            assert!(u.dot(v.signum()) > 0.0);
        }
        assert_eq!(unit(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(unit(Vec3::splat(f32::NAN)), Vec3::ZERO);
    }

    #[test]
    fn unshared_indices_are_sequential() {
        let v = Vertex::new(Vec3::ZERO, Vec3::ONE, Vec3::Y);
        let mesh = Mesh::from_unshared_vertices(vec![v; 7]);
        assert_eq!(mesh.vertices().len(), 6);
        assert_eq!(mesh.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn vertex_bytes_match_layout() {
        let v = Vertex::new(Vec3::X, Vec3::Y, Vec3::Z);
        let mesh = Mesh::from_unshared_vertices(vec![v; 3]);
        assert_eq!(mesh.vertex_bytes().len(), 3 * 9 * 4);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
    }

    #[test]
    fn flat_color_keeps_geometry() {
        let v = Vertex::new(Vec3::X, Vec3::ONE, Vec3::Z);
        let mesh = Mesh::from_unshared_vertices(vec![v; 3]);
        let flat = mesh.with_flat_color(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(flat.indices(), mesh.indices());
        assert_eq!(flat.vertices()[0].position, [1.0, 0.0, 0.0]);
        assert_eq!(flat.vertices()[0].color, [0.5, 0.0, 0.0]);
    }

    #[test]
    fn triangle_area_of_right_triangle() {
        let t = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((t.area() - 0.5).abs() < 1e-6);
        assert_eq!(t.face_normal(), Vec3::Z);
    }
}
