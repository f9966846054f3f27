use glam::Vec3;

use crate::error::MolscopeError;
use crate::geometry::{generate_sphere, Mesh};
use crate::options::{ColorOptions, GeometryOptions};
use crate::picking::{picking_mesh, PickId, PickableObject};

/// Per-element lookup tables supplied by the host.
pub trait AtomicData {
    /// Display radius for an element.
    fn atomic_radius(&self, atomic_number: u8) -> f32;
    /// CPK color for an element.
    fn cpk_color(&self, atomic_number: u8) -> Vec3;
    /// Element symbol, e.g. `"C"`.
    fn abbreviation(&self, atomic_number: u8) -> &str;
}

/// An atom drawn as a geodesic sphere.
#[derive(Debug, Clone)]
pub struct Atom {
    id: PickId,
    atomic_number: u8,
    abbreviation: String,
    charge: i8,
    position: Vec3,
    radius: f32,
    color: Vec3,
    mesh: Mesh,
    selection_mesh: Mesh,
}

impl Atom {
    /// Build the spheres for an atom, then take its ID from `next_id`.
    pub(crate) fn new(
        next_id: impl FnOnce() -> Result<PickId, MolscopeError>,
        atomic_number: u8,
        position: Vec3,
        data: &impl AtomicData,
        geometry: &GeometryOptions,
        colors: &ColorOptions,
    ) -> Result<Self, MolscopeError> {
        let radius = data.atomic_radius(atomic_number);
        let color = data.cpk_color(atomic_number);
        let (mesh, selection_mesh) =
            build_meshes(position, radius, color, geometry, colors)?;
        Ok(Self {
            id: next_id()?,
            atomic_number,
            abbreviation: data.abbreviation(atomic_number).to_owned(),
            charge: 0,
            position,
            radius,
            color,
            mesh,
            selection_mesh,
        })
    }

    /// Both spheres centered on `position`, without moving the atom.
    pub(crate) fn meshes_at(
        &self,
        position: Vec3,
        geometry: &GeometryOptions,
        colors: &ColorOptions,
    ) -> Result<(Mesh, Mesh), MolscopeError> {
        build_meshes(position, self.radius, self.color, geometry, colors)
    }

    /// Move to `position`, taking spheres from [`Self::meshes_at`].
    pub(crate) fn place(
        &mut self,
        position: Vec3,
        (mesh, selection_mesh): (Mesh, Mesh),
    ) {
        self.position = position;
        self.mesh = mesh;
        self.selection_mesh = selection_mesh;
    }

    pub(crate) fn set_charge(&mut self, charge: i8) {
        self.charge = charge;
    }

    /// Identifier in the atom picking space.
    #[must_use]
    pub fn id(&self) -> PickId {
        self.id
    }

    /// Atomic number.
    #[must_use]
    pub fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    /// Element symbol.
    #[must_use]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Formal charge. Neutral unless set.
    #[must_use]
    pub fn charge(&self) -> i8 {
        self.charge
    }

    /// Sphere center.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Sphere radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sphere color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Shaded sphere mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Slightly larger halo drawn while selected.
    #[must_use]
    pub fn selection_mesh(&self) -> &Mesh {
        &self.selection_mesh
    }

    /// Sphere in this atom's flat picking color.
    #[must_use]
    pub fn picking_mesh(&self) -> Mesh {
        picking_mesh(&self.mesh, self.id)
    }

    /// One-line summary, e.g. `Atom: C, charge: 0`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("Atom: {}, charge: {}", self.abbreviation, self.charge)
    }
}

impl PickableObject for Atom {
    fn pick_id(&self) -> PickId {
        self.id
    }
}

fn build_meshes(
    position: Vec3,
    radius: f32,
    color: Vec3,
    geometry: &GeometryOptions,
    colors: &ColorOptions,
) -> Result<(Mesh, Mesh), MolscopeError> {
    let depth = geometry.sphere_subdivision_depth;
    let mesh = generate_sphere(position, radius, color, depth)?;
    let halo = generate_sphere(
        position,
        radius + geometry.atom_selection_padding,
        Vec3::from(colors.selection),
        depth,
    )?;
    Ok((mesh, halo))
}
