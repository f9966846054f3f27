use glam::Vec3;

use crate::error::MolscopeError;
use crate::geometry::{bond_segments, generate_cylinder, BondOrder, Mesh};
use crate::options::{ColorOptions, GeometryOptions};
use crate::picking::{picking_mesh, PickId, PickableObject};

/// One tube of a bond, pickable on its own.
#[derive(Debug, Clone)]
pub struct BondSegment {
    id: PickId,
    start: Vec3,
    end: Vec3,
    mesh: Mesh,
    selection_mesh: Mesh,
}

/// Segment endpoints with the tube and halo meshes built for them.
type Tube = ((Vec3, Vec3), (Mesh, Mesh));

/// Shaded tube and selection halo for one segment.
fn tubes(
    (start, end): (Vec3, Vec3),
    geometry: &GeometryOptions,
    colors: &ColorOptions,
) -> Result<(Mesh, Mesh), MolscopeError> {
    let smoothness = geometry.cylinder_smoothness;
    let mesh = generate_cylinder(
        start,
        end,
        Vec3::from(colors.bond),
        geometry.bond_radius,
        smoothness,
    )?;
    let selection_mesh = generate_cylinder(
        start,
        end,
        Vec3::from(colors.selection),
        geometry.bond_radius + geometry.bond_selection_padding,
        smoothness,
    )?;
    Ok((mesh, selection_mesh))
}

/// Tessellate every tube of a bond between `p1` and `p2`.
fn tessellate(
    (p1, p2): (Vec3, Vec3),
    order: BondOrder,
    geometry: &GeometryOptions,
    colors: &ColorOptions,
) -> Result<Vec<Tube>, MolscopeError> {
    bond_segments(p1, p2, order, geometry)
        .into_iter()
        .map(|ends| Ok((ends, tubes(ends, geometry, colors)?)))
        .collect()
}

impl BondSegment {
    fn new(
        id: PickId,
        (start, end): (Vec3, Vec3),
        (mesh, selection_mesh): (Mesh, Mesh),
    ) -> Self {
        Self {
            id,
            start,
            end,
            mesh,
            selection_mesh,
        }
    }

    /// Identifier in the bond picking space.
    #[must_use]
    pub fn id(&self) -> PickId {
        self.id
    }

    /// Tube start, at or beside the first atom.
    #[must_use]
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// Tube end, at or beside the second atom.
    #[must_use]
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Shaded tube mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Wider halo drawn while the bond is selected.
    #[must_use]
    pub fn selection_mesh(&self) -> &Mesh {
        &self.selection_mesh
    }

    /// Tube in this segment's flat picking color.
    #[must_use]
    pub fn picking_mesh(&self) -> Mesh {
        picking_mesh(&self.mesh, self.id)
    }
}

impl PickableObject for BondSegment {
    fn pick_id(&self) -> PickId {
        self.id
    }
}

/// A covalent bond between two atoms.
///
/// The bond is identified by its first segment's ID; selecting any segment
/// selects the bond.
#[derive(Debug, Clone)]
pub struct Bond {
    id: PickId,
    atoms: [PickId; 2],
    order: BondOrder,
    segments: Vec<BondSegment>,
}

impl Bond {
    /// Lay out and tessellate the tubes of a bond, then take one ID per
    /// tube from `next_id`. Nothing is allocated when a tube cannot be
    /// built.
    pub(crate) fn new(
        atoms: [PickId; 2],
        endpoints: (Vec3, Vec3),
        order: BondOrder,
        mut next_id: impl FnMut() -> Result<PickId, MolscopeError>,
        geometry: &GeometryOptions,
        colors: &ColorOptions,
    ) -> Result<Self, MolscopeError> {
        let segments = tessellate(endpoints, order, geometry, colors)?
            .into_iter()
            .map(|(ends, meshes)| Ok(BondSegment::new(next_id()?, ends, meshes)))
            .collect::<Result<Vec<_>, MolscopeError>>()?;
        let id = segments.first().map(BondSegment::id).ok_or_else(|| {
            MolscopeError::InvalidArgument("bond has no segments".into())
        })?;
        Ok(Self {
            id,
            atoms,
            order,
            segments,
        })
    }

    /// Tubes for new endpoints, keeping segment IDs. The bond itself is
    /// left untouched; install the result with [`Self::set_segments`].
    pub(crate) fn rebuilt(
        &self,
        endpoints: (Vec3, Vec3),
        geometry: &GeometryOptions,
        colors: &ColorOptions,
    ) -> Result<Vec<BondSegment>, MolscopeError> {
        Ok(tessellate(endpoints, self.order, geometry, colors)?
            .into_iter()
            .zip(&self.segments)
            .map(|((ends, meshes), old)| BondSegment::new(old.id, ends, meshes))
            .collect())
    }

    pub(crate) fn set_segments(&mut self, segments: Vec<BondSegment>) {
        self.segments = segments;
    }

    /// Canonical identifier: the first segment's ID.
    #[must_use]
    pub fn id(&self) -> PickId {
        self.id
    }

    /// The bonded atoms, in the order they were given.
    #[must_use]
    pub fn atoms(&self) -> [PickId; 2] {
        self.atoms
    }

    /// Whether `atom` is one of the bond's ends.
    #[must_use]
    pub fn connects(&self, atom: PickId) -> bool {
        self.atoms.contains(&atom)
    }

    /// The atom across the bond from `atom`.
    #[must_use]
    pub fn partner(&self, atom: PickId) -> Option<PickId> {
        match self.atoms {
            [a, b] if a == atom => Some(b),
            [a, b] if b == atom => Some(a),
            _ => None,
        }
    }

    /// Bond multiplicity.
    #[must_use]
    pub fn order(&self) -> BondOrder {
        self.order
    }

    /// Tubes making up the bond.
    #[must_use]
    pub fn segments(&self) -> &[BondSegment] {
        &self.segments
    }

    /// Whether `segment` belongs to this bond.
    #[must_use]
    pub fn has_segment(&self, segment: PickId) -> bool {
        self.segments.iter().any(|s| s.id == segment)
    }
}

impl PickableObject for Bond {
    fn pick_id(&self) -> PickId {
        self.id()
    }
}
