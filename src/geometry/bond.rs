use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::unit;
use crate::options::GeometryOptions;

/// Cross products with every component below this count as zero.
const ZERO_CROSS_EPSILON: f32 = 1e-5;

/// Covalent bond multiplicity, drawn as one to three parallel tubes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BondOrder {
    /// One central tube.
    #[default]
    Single,
    /// Two tubes straddling the bond axis.
    Double,
    /// A central tube plus two outer tubes.
    Triple,
}

impl BondOrder {
    /// Map an electron-pair count to a bond order. Counts outside `1..=3`
    /// are drawn as single bonds.
    #[must_use]
    pub fn from_count(count: u8) -> Self {
        match count {
            1 => Self::Single,
            2 => Self::Double,
            3 => Self::Triple,
            other => {
                log::warn!("unsupported bond order {other}, drawing single");
                Self::Single
            }
        }
    }

    /// Number of electron pairs.
    #[must_use]
    pub fn count(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Direction along which parallel bond tubes are offset: perpendicular to
/// the bond and to world up (or world +Z for vertical bonds).
fn offset_direction(axis: Vec3) -> Vec3 {
    let axis = unit(axis);
    let cross = axis.cross(Vec3::Y);
    let cross = if cross.abs().max_element() < ZERO_CROSS_EPSILON {
        axis.cross(Vec3::Z)
    } else {
        cross
    };
    unit(cross)
}

/// Endpoints of each tube drawn for a bond between `p1` and `p2`.
///
/// Single and triple bonds include the central `p1 -> p2` segment first;
/// double bonds are offset by `double_bond_offset` on either side, triple
/// bonds add outer tubes at `triple_bond_offset`.
#[must_use]
pub fn bond_segments(
    p1: Vec3,
    p2: Vec3,
    order: BondOrder,
    geometry: &GeometryOptions,
) -> Vec<(Vec3, Vec3)> {
    let dir = offset_direction(p1 - p2);
    match order {
        BondOrder::Single => vec![(p1, p2)],
        BondOrder::Double => {
            let offset = dir * geometry.double_bond_offset;
            vec![(p1 + offset, p2 + offset), (p1 - offset, p2 - offset)]
        }
        BondOrder::Triple => {
            let offset = dir * geometry.triple_bond_offset;
            vec![
                (p1, p2),
                (p1 + offset, p2 + offset),
                (p1 - offset, p2 - offset),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_counts_match_order() {
        let geom = GeometryOptions::default();
        for (order, n) in [
            (BondOrder::Single, 1),
            (BondOrder::Double, 2),
            (BondOrder::Triple, 3),
        ] {
            let segs = bond_segments(Vec3::ZERO, Vec3::X, order, &geom);
            assert_eq!(segs.len(), n);
            assert_eq!(order.count() as usize, n);
        }
    }

    #[test]
    fn double_bond_straddles_axis() {
        let geom = GeometryOptions::default();
        let segs =
            bond_segments(Vec3::ZERO, Vec3::X * 2.0, BondOrder::Double, &geom);
        let (a, b) = (segs[0].0, segs[1].0);
        assert!((a + b).length() < 1e-6);
        assert!(((a - b).length() - 2.0 * geom.double_bond_offset).abs() < 1e-5);
        // Offsets are perpendicular to the bond.
        assert!(a.dot(Vec3::X).abs() < 1e-6);
    }

    #[test]
    fn vertical_bond_offsets_along_fallback() {
        let geom = GeometryOptions::default();
        let segs =
            bond_segments(Vec3::Y, Vec3::ZERO, BondOrder::Triple, &geom);
        let offset = segs[1].0 - segs[0].0;
        assert!(offset.is_finite());
        assert!((offset.length() - geom.triple_bond_offset).abs() < 1e-5);
        assert!(offset.dot(Vec3::Y).abs() < 1e-6);
    }

    #[test]
    fn offsets_survive_extreme_bond_lengths() {
        let geom = GeometryOptions::default();
        for p2 in [Vec3::new(2e19, 0.0, 0.0), Vec3::new(1e-23, 0.0, 0.0)] {
            let segs = bond_segments(Vec3::ZERO, p2, BondOrder::Double, &geom);
            let shift = segs[0].0;
            assert!(shift.is_finite());
            assert!((shift.length() - geom.double_bond_offset).abs() < 1e-6);
            assert!(shift.dot(Vec3::X).abs() < 1e-6);
        }
    }

    #[test]
    fn unknown_counts_fall_back_to_single() {
        assert_eq!(BondOrder::from_count(2), BondOrder::Double);
        assert_eq!(BondOrder::from_count(0), BondOrder::Single);
        assert_eq!(BondOrder::from_count(5), BondOrder::Single);
    }
}
