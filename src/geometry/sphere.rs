//! Geodesic sphere ("icosphere") generation.
//!
//! A regular icosahedron is subdivided `depth` times: each triangle is split
//! into four through its edge midpoints, and the midpoints are pushed back
//! onto the sphere. Terminal triangles are scaled to the requested radius
//! and translated to the center.

use glam::Vec3;

use super::{Mesh, Triangle, Vertex};
use crate::error::MolscopeError;

/// Subdivision depth used for atom spheres (20 * 4^4 = 5120 triangles).
pub const DEFAULT_SUBDIVISION_DEPTH: u32 = 4;

/// Golden ratio.
const PHI: f32 = 1.618_034;

/// Half the golden ratio; the icosahedron's long coordinate.
const HALF_PHI: f32 = PHI / 2.0;

/// Icosahedron corners built from `(±1/2, 0, ±φ/2)` and its cyclic
/// permutations. Not unit length.
const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [0.5, 0.0, HALF_PHI],
    [0.5, 0.0, -HALF_PHI],
    [-0.5, 0.0, HALF_PHI],
    [-0.5, 0.0, -HALF_PHI],
    [HALF_PHI, 0.5, 0.0],
    [HALF_PHI, -0.5, 0.0],
    [-HALF_PHI, 0.5, 0.0],
    [-HALF_PHI, -0.5, 0.0],
    [0.0, HALF_PHI, 0.5],
    [0.0, HALF_PHI, -0.5],
    [0.0, -HALF_PHI, 0.5],
    [0.0, -HALF_PHI, -0.5],
];

/// The 20 faces, as indices into [`ICOSAHEDRON_VERTICES`].
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 2, 10],
    [0, 10, 5],
    [0, 5, 4],
    [0, 4, 8],
    [0, 8, 2],
    [3, 1, 11],
    [3, 11, 7],
    [3, 7, 6],
    [3, 6, 9],
    [3, 9, 1],
    [2, 6, 7],
    [2, 7, 10],
    [10, 7, 11],
    [10, 11, 5],
    [5, 11, 1],
    [5, 1, 4],
    [4, 1, 9],
    [4, 9, 8],
    [8, 9, 6],
    [8, 6, 2],
];

/// Pending subdivision work: a triangle and how many levels remain.
struct Pending {
    corners: [Vec3; 3],
    depth: u32,
}

/// Subdivide every icosahedron face and return the terminal triangles as
/// unit-length directions, in depth-first order.
fn subdivide_directions(depth: u32) -> Vec<[Vec3; 3]> {
    let capacity = 4usize
        .checked_pow(depth)
        .and_then(|n| n.checked_mul(ICOSAHEDRON_FACES.len()))
        .unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    let mut stack = Vec::new();

    for [a, b, c] in ICOSAHEDRON_FACES {
        stack.push(Pending {
            corners: [
                Vec3::from_array(ICOSAHEDRON_VERTICES[a]),
                Vec3::from_array(ICOSAHEDRON_VERTICES[b]),
                Vec3::from_array(ICOSAHEDRON_VERTICES[c]),
            ],
            depth,
        });

        while let Some(Pending { corners, depth }) = stack.pop() {
            let [v1, v2, v3] = corners;
            if depth == 0 {
                out.push([v1.normalize(), v2.normalize(), v3.normalize()]);
                continue;
            }

            let m12 = (v1 + v2).normalize();
            let m23 = (v2 + v3).normalize();
            let m31 = (v3 + v1).normalize();

            // Pushed in reverse so children pop in recursion order.
            let depth = depth - 1;
            for corners in [
                [m12, m23, m31],
                [v3, m31, m23],
                [v2, m23, m12],
                [v1, m12, m31],
            ] {
                stack.push(Pending { corners, depth });
            }
        }
    }

    out
}

fn validate(center: Vec3, radius: f32) -> Result<(), MolscopeError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MolscopeError::InvalidArgument(format!(
            "sphere radius must be positive and finite, got {radius}"
        )));
    }
    let extent = center.abs().max_element() + radius;
    if !extent.is_finite() {
        return Err(MolscopeError::InvalidArgument(format!(
            "sphere at {center} with radius {radius} exceeds the f32 range"
        )));
    }
    if radius <= extent * f32::EPSILON {
        return Err(MolscopeError::InvalidArgument(format!(
            "sphere radius {radius} is below the precision of center {center}"
        )));
    }
    Ok(())
}

/// Terminal triangles of a geodesic sphere.
///
/// Produces `20 * 4^depth` triangles whose vertices all lie at `radius`
/// from `center`.
///
/// # Errors
///
/// [`MolscopeError::InvalidArgument`] for a non-positive or non-finite
/// radius, a non-finite center, or a sphere that leaves the f32 range or
/// collapses onto its center.
pub fn sphere_triangles(
    center: Vec3,
    radius: f32,
    depth: u32,
) -> Result<Vec<Triangle>, MolscopeError> {
    validate(center, radius)?;
    Ok(subdivide_directions(depth)
        .into_iter()
        .map(|[a, b, c]| {
            Triangle::new(
                a * radius + center,
                b * radius + center,
                c * radius + center,
            )
        })
        .collect())
}

/// Generate a geodesic sphere mesh.
///
/// Every vertex carries `color` and the sphere's outward radial normal, so
/// shading stays smooth across the flat facets. Vertices are not shared
/// between triangles.
///
/// # Errors
///
/// Same as [`sphere_triangles`].
pub fn generate_sphere(
    center: Vec3,
    radius: f32,
    color: Vec3,
    depth: u32,
) -> Result<Mesh, MolscopeError> {
    validate(center, radius)?;

    let directions = subdivide_directions(depth);
    let mut vertices = Vec::with_capacity(directions.len() * 3);
    for tri in &directions {
        for &dir in tri {
            vertices.push(Vertex::new(dir * radius + center, color, dir));
        }
    }

    log::debug!(
        "generated sphere: depth {depth}, {} triangles",
        directions.len()
    );
    Ok(Mesh::from_unshared_vertices(vertices))
}
