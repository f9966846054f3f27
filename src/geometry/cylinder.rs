//! Lateral cylinder tubes used for bond segments.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

use super::{unit, Mesh, Triangle, Vertex};
use crate::error::MolscopeError;

/// Cross products shorter than this count as parallel.
const PARALLEL_EPSILON: f32 = 1e-5;

/// Smallest feature, relative to the largest coordinate magnitude, that
/// stays distinct after rounding to f32.
const RESOLUTION: f32 = 4.0 * f32::EPSILON;

/// Unit vector perpendicular to `axis`.
///
/// Projects the world up vector onto the plane normal to `axis`, falling
/// back to +Z when up and the axis are parallel.
pub(crate) fn perpendicular(axis: Vec3) -> Vec3 {
    let axis = unit(axis);
    let reference = if axis.cross(Vec3::Y).length() < PARALLEL_EPSILON {
        Vec3::Z
    } else {
        Vec3::Y
    };
    unit(reference - axis * reference.dot(axis))
}

/// Evenly spaced points on a circle lying in the plane normal to a facing
/// direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vec3,
    points: Vec<Vec3>,
}

impl Circle {
    /// Place `smoothness` points at `radius` from `center`, rotating around
    /// `normal` in steps of `2π / smoothness`.
    ///
    /// `normal` need not be normalized but must be non-zero.
    #[must_use]
    pub fn new(center: Vec3, radius: f32, normal: Vec3, smoothness: u32) -> Self {
        let axis = unit(normal);
        let basis = perpendicular(axis) * radius;
        let step = TAU / smoothness as f32;
        let points = (0..smoothness)
            .map(|i| {
                center + Quat::from_axis_angle(axis, step * i as f32) * basis
            })
            .collect();
        Self { center, points }
    }

    /// Circle center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Points in rotation order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Check that a tube from `p1` to `p2` can be tessellated.
///
/// The span and the spacing between neighboring circle points must both be
/// resolvable at the magnitude of the tube's coordinates, otherwise
/// triangles collapse once vertices round to f32.
///
/// # Errors
///
/// [`MolscopeError::InvalidArgument`] when an endpoint is not finite, the
/// endpoints are too close to tell apart, the radius is not positive or
/// too small for the coordinates, the tube leaves the f32 range, or
/// `smoothness < 3`.
pub fn validate_cylinder(
    p1: Vec3,
    p2: Vec3,
    radius: f32,
    smoothness: u32,
) -> Result<(), MolscopeError> {
    if !p1.is_finite() || !p2.is_finite() {
        return Err(MolscopeError::InvalidArgument(
            "cylinder endpoints must be finite".into(),
        ));
    }
    if !(radius.is_finite() && radius > 0.0) {
        return Err(MolscopeError::InvalidArgument(format!(
            "cylinder radius must be positive and finite, got {radius}"
        )));
    }
    if smoothness < 3 {
        return Err(MolscopeError::InvalidArgument(format!(
            "cylinder needs at least 3 segments, got {smoothness}"
        )));
    }

    let extent = p1.abs().max_element().max(p2.abs().max_element()) + radius;
    let span = p1 - p2;
    if !extent.is_finite() || !span.is_finite() {
        return Err(MolscopeError::InvalidArgument(format!(
            "cylinder from {p1} to {p2} exceeds the f32 range"
        )));
    }
    let resolution = extent * RESOLUTION;
    if span.abs().max_element() <= resolution {
        return Err(MolscopeError::InvalidArgument(format!(
            "cylinder endpoints {p1} and {p2} coincide at this scale"
        )));
    }
    let chord = 2.0 * radius * (PI / smoothness as f32).sin();
    if chord <= resolution {
        return Err(MolscopeError::InvalidArgument(format!(
            "cylinder radius {radius} is below the precision of its coordinates"
        )));
    }
    Ok(())
}

/// Orient `(a, b, c)` so its winding normal points away from the axis line
/// through `origin` along `axis`.
fn outward_triangle(a: Vec3, b: Vec3, c: Vec3, origin: Vec3, axis: Vec3) -> Triangle {
    let centroid = a / 3.0 + b / 3.0 + c / 3.0;
    let rel = centroid - origin;
    let outward = unit(rel - axis * rel.dot(axis));

    let normal = unit(unit(b - a).cross(unit(c - a)));
    if normal.dot(outward) >= 0.0 {
        Triangle::with_normal(a, b, c, normal)
    } else {
        Triangle::with_normal(a, c, b, -normal)
    }
}

/// Lateral triangles joining two circles, two per segment.
fn lateral_triangles(c1: &Circle, c2: &Circle, axis: Vec3) -> Vec<Triangle> {
    let (top, bottom) = (c1.points(), c2.points());
    let n = top.len();
    let origin = c2.center();
    let mut triangles = Vec::with_capacity(n * 2);
    for i in 0..n {
        let j = (i + 1) % n;
        triangles.push(outward_triangle(top[i], top[j], bottom[i], origin, axis));
        triangles.push(outward_triangle(bottom[i], top[j], bottom[j], origin, axis));
    }
    triangles
}

/// Generate an uncapped cylinder tube from `p1` to `p2`.
///
/// Produces `2 * smoothness` triangles. Each vertex carries `color` and the
/// outward unit face normal of its own triangle; vertices are not shared.
/// Works across the whole f32 range: directions are normalized without
/// squaring raw coordinates.
///
/// # Errors
///
/// Whatever [`validate_cylinder`] rejects.
pub fn generate_cylinder(
    p1: Vec3,
    p2: Vec3,
    color: Vec3,
    radius: f32,
    smoothness: u32,
) -> Result<Mesh, MolscopeError> {
    validate_cylinder(p1, p2, radius, smoothness)?;

    let axis = unit(p1 - p2);
    let c1 = Circle::new(p1, radius, axis, smoothness);
    let c2 = Circle::new(p2, radius, axis, smoothness);
    let triangles = lateral_triangles(&c1, &c2, axis);

    let mut vertices = Vec::with_capacity(triangles.len() * 3);
    for t in &triangles {
        let n = t.normal.unwrap_or_else(|| unit(t.face_normal()));
        vertices.extend(t.vertices().map(|v| Vertex::new(v, color, n)));
    }

    Ok(Mesh::from_unshared_vertices(vertices))
}
