//! Ball-and-stick molecule model.
//!
//! A [`Molecule`] owns its atoms and bonds together with the identifier
//! allocators that name them in the picking passes, so the pick map and
//! selection state always agree with what is drawn.

mod atom;
mod bond;

pub use atom::{Atom, AtomicData};
pub use bond::{Bond, BondSegment};
use glam::Vec3;

use crate::error::MolscopeError;
use crate::geometry::{BondOrder, Mesh};
use crate::options::{ColorOptions, GeometryOptions, Options};
use crate::picking::{
    resolve_selection, IdentifierAllocator, PickId, PickMap, PickReadback,
    PickSpace, PickTarget, Selection, MAX_PICK_ID,
};

/// Angle at `vertex` between the arms to `a` and `c`, in degrees truncated
/// to two decimal places.
///
/// # Errors
///
/// [`MolscopeError::InvalidArgument`] when either arm has zero length.
pub fn bond_angle(a: Vec3, vertex: Vec3, c: Vec3) -> Result<f32, MolscopeError> {
    let (u, v) = (a - vertex, c - vertex);
    if u.length_squared() == 0.0 || v.length_squared() == 0.0 {
        return Err(MolscopeError::InvalidArgument(
            "bond angle arm has zero length".into(),
        ));
    }
    let degrees = u.angle_between(v).to_degrees();
    Ok((degrees * 100.0).trunc() / 100.0)
}

/// Atoms, bonds, and their selection state.
#[derive(Debug)]
pub struct Molecule<D> {
    data: D,
    geometry: GeometryOptions,
    colors: ColorOptions,
    atom_ids: IdentifierAllocator,
    bond_ids: IdentifierAllocator,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    pick_map: PickMap,
    selected_atoms: Selection,
    selected_bonds: Selection,
}

impl<D: AtomicData> Molecule<D> {
    /// Empty molecule using `data` for element radii, colors and symbols.
    #[must_use]
    pub fn new(data: D, options: &Options) -> Self {
        Self {
            data,
            geometry: options.geometry.clone(),
            colors: options.colors.clone(),
            atom_ids: IdentifierAllocator::new(PickSpace::Atom),
            bond_ids: IdentifierAllocator::new(PickSpace::Bond),
            atoms: Vec::new(),
            bonds: Vec::new(),
            pick_map: PickMap::new(),
            selected_atoms: Selection::new(),
            selected_bonds: Selection::new(),
        }
    }

    /// Add a neutral atom of `atomic_number` at `position`.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::CapacityExceeded`] once 255 atoms have been added
    /// over the molecule's lifetime; [`MolscopeError::InvalidArgument`] if
    /// the element's radius is not positive or the sphere cannot be built
    /// at `position`. A rejected atom consumes no ID.
    pub fn add_atom(
        &mut self,
        atomic_number: u8,
        position: Vec3,
    ) -> Result<PickId, MolscopeError> {
        // Validate the geometry before an ID is consumed.
        let radius = self.data.atomic_radius(atomic_number);
        if !(radius.is_finite() && radius > 0.0) {
            return Err(MolscopeError::InvalidArgument(format!(
                "element {atomic_number} has radius {radius}"
            )));
        }

        let ids = &mut self.atom_ids;
        let atom = Atom::new(
            || ids.allocate(),
            atomic_number,
            position,
            &self.data,
            &self.geometry,
            &self.colors,
        )?;
        let id = atom.id();
        log::debug!("added atom {} ({})", id, atom.abbreviation());
        self.pick_map.insert_atom(id);
        self.atoms.push(atom);
        Ok(id)
    }

    /// Bond two atoms. Returns the bond's canonical ID.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::UnknownAtom`] if either atom is missing,
    /// [`MolscopeError::InvalidArgument`] if the atoms are the same, share a
    /// position, or are too close for a tube at their scale, and
    /// [`MolscopeError::CapacityExceeded`] if the bond space has fewer IDs
    /// left than the bond has tubes. A rejected bond consumes no IDs.
    pub fn add_bond(
        &mut self,
        a: PickId,
        b: PickId,
        order: BondOrder,
    ) -> Result<PickId, MolscopeError> {
        let p1 = self.require_atom(a)?.position();
        let p2 = self.require_atom(b)?.position();
        if a == b {
            return Err(MolscopeError::InvalidArgument(format!(
                "atom {a} cannot bond to itself"
            )));
        }
        if p1 == p2 {
            return Err(MolscopeError::InvalidArgument(format!(
                "atoms {a} and {b} share position {p1}"
            )));
        }
        if self.bond_ids.remaining() < usize::from(order.count()) {
            return Err(MolscopeError::CapacityExceeded {
                space: PickSpace::Bond,
                capacity: u32::from(MAX_PICK_ID),
            });
        }

        let ids = &mut self.bond_ids;
        let bond = Bond::new(
            [a, b],
            (p1, p2),
            order,
            || ids.allocate(),
            &self.geometry,
            &self.colors,
        )?;
        let id = bond.id();
        self.pick_map
            .insert_bond(id, bond.segments().iter().map(BondSegment::id));
        log::debug!("added {order:?} bond {id} between {a} and {b}");
        self.bonds.push(bond);
        Ok(id)
    }

    /// Remove an atom together with every bond touching it.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::UnknownAtom`] if no atom has that ID.
    pub fn remove_atom(&mut self, id: PickId) -> Result<Atom, MolscopeError> {
        let index = self
            .atoms
            .iter()
            .position(|atom| atom.id() == id)
            .ok_or(MolscopeError::UnknownAtom(id))?;

        let attached: Vec<PickId> = self
            .bonds
            .iter()
            .filter(|bond| bond.connects(id))
            .map(Bond::id)
            .collect();
        for bond in attached {
            let _ = self.remove_bond(bond);
        }

        let _ = self.selected_atoms.remove(id);
        self.pick_map.remove_atom(id);
        Ok(self.atoms.remove(index))
    }

    /// Remove a bond by its canonical ID.
    pub fn remove_bond(&mut self, id: PickId) -> Option<Bond> {
        let index = self.bonds.iter().position(|bond| bond.id() == id)?;
        let _ = self.selected_bonds.remove(id);
        self.pick_map.remove_bond(id);
        Some(self.bonds.remove(index))
    }

    /// Move an atom, regenerating its spheres and the tubes of its bonds.
    /// Pick IDs are unchanged.
    ///
    /// Every mesh is rebuilt before anything is replaced, so a failed move
    /// leaves the molecule as it was.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::UnknownAtom`] if no atom has that ID, and
    /// [`MolscopeError::InvalidArgument`] if the atom's spheres or a bond's
    /// tubes cannot be built at the new position, e.g. on top of a bonded
    /// partner.
    pub fn move_atom(
        &mut self,
        id: PickId,
        position: Vec3,
    ) -> Result<(), MolscopeError> {
        let (geometry, colors) = (&self.geometry, &self.colors);
        let index = self
            .atoms
            .iter()
            .position(|atom| atom.id() == id)
            .ok_or(MolscopeError::UnknownAtom(id))?;
        let meshes = self.atoms[index].meshes_at(position, geometry, colors)?;

        let position_of = |atom: PickId| {
            if atom == id {
                Ok(position)
            } else {
                self.require_atom(atom).map(Atom::position)
            }
        };
        let rebuilt = self
            .bonds
            .iter()
            .enumerate()
            .filter(|(_, bond)| bond.connects(id))
            .map(|(i, bond)| {
                let [a, b] = bond.atoms();
                let ends = (position_of(a)?, position_of(b)?);
                Ok((i, bond.rebuilt(ends, geometry, colors)?))
            })
            .collect::<Result<Vec<_>, MolscopeError>>()?;

        self.atoms[index].place(position, meshes);
        for (i, segments) in rebuilt {
            self.bonds[i].set_segments(segments);
        }
        log::debug!("moved atom {id} to {position}");
        Ok(())
    }

    /// Set an atom's formal charge.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::UnknownAtom`] if no atom has that ID.
    pub fn set_charge(&mut self, id: PickId, charge: i8) -> Result<(), MolscopeError> {
        self.atoms
            .iter_mut()
            .find(|atom| atom.id() == id)
            .ok_or(MolscopeError::UnknownAtom(id))?
            .set_charge(charge);
        Ok(())
    }

    /// Angle at `vertex` formed with atoms `a` and `c`, as [`bond_angle`].
    ///
    /// # Errors
    ///
    /// [`MolscopeError::UnknownAtom`] for a missing atom, or
    /// [`MolscopeError::InvalidArgument`] for coincident atoms.
    pub fn angle(
        &self,
        a: PickId,
        vertex: PickId,
        c: PickId,
    ) -> Result<f32, MolscopeError> {
        bond_angle(
            self.require_atom(a)?.position(),
            self.require_atom(vertex)?.position(),
            self.require_atom(c)?.position(),
        )
    }

    fn require_atom(&self, id: PickId) -> Result<&Atom, MolscopeError> {
        self.atom(id).ok_or(MolscopeError::UnknownAtom(id))
    }
}

impl<D> Molecule<D> {
    /// Atom with the given ID.
    #[must_use]
    pub fn atom(&self, id: PickId) -> Option<&Atom> {
        self.atoms.iter().find(|atom| atom.id() == id)
    }

    /// Bond with the given canonical ID.
    #[must_use]
    pub fn bond(&self, id: PickId) -> Option<&Bond> {
        self.bonds.iter().find(|bond| bond.id() == id)
    }

    /// Bond owning the tube with ID `segment`.
    #[must_use]
    pub fn bond_for_segment(&self, segment: PickId) -> Option<&Bond> {
        self.bonds.iter().find(|bond| bond.has_segment(segment))
    }

    /// All atoms in insertion order.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds in insertion order.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Bonds that end at `atom`.
    pub fn bonds_of(&self, atom: PickId) -> impl Iterator<Item = &Bond> + '_ {
        self.bonds.iter().filter(move |bond| bond.connects(atom))
    }

    /// Mean atom position, for centering the camera.
    #[must_use]
    pub fn centroid(&self) -> Option<Vec3> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum: Vec3 = self.atoms.iter().map(Atom::position).sum();
        Some(sum / self.atoms.len() as f32)
    }

    /// Selected atom IDs.
    #[must_use]
    pub fn selected_atoms(&self) -> &Selection {
        &self.selected_atoms
    }

    /// Selected bond IDs (canonical).
    #[must_use]
    pub fn selected_bonds(&self) -> &Selection {
        &self.selected_bonds
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selected_atoms.clear();
        self.selected_bonds.clear();
    }

    /// Resolve a click and update the selection.
    ///
    /// Atoms are sampled first; the bond pass is only read on an atom miss.
    /// In exclusive mode a hit in one space clears the selection in the
    /// other, and a background click clears both.
    pub fn pick(
        &mut self,
        readback: &mut impl PickReadback,
        exclusive: bool,
    ) -> PickTarget {
        let target = self.pick_map.pick(readback);
        let (atom_hit, bond_hit) = match target {
            PickTarget::Atom(id) => (id.get(), 0),
            PickTarget::Bond { bond, .. } => (0, bond.get()),
            PickTarget::None => (0, 0),
        };

        if atom_hit != 0 || exclusive {
            self.selected_atoms = resolve_selection(
                atom_hit,
                &self.atoms,
                &self.selected_atoms,
                exclusive,
            );
        }
        if bond_hit != 0 || exclusive {
            self.selected_bonds = resolve_selection(
                bond_hit,
                &self.bonds,
                &self.selected_bonds,
                exclusive,
            );
        }
        log::debug!("pick resolved to {target:?}");
        target
    }

    /// Shaded meshes for the main pass: atom spheres, then bond tubes.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        self.atoms.iter().map(Atom::mesh).chain(
            self.bonds
                .iter()
                .flat_map(|bond| bond.segments().iter().map(BondSegment::mesh)),
        )
    }

    /// Halo meshes for the current selection.
    pub fn selection_meshes(&self) -> impl Iterator<Item = &Mesh> + '_ {
        let atoms = self
            .atoms
            .iter()
            .filter(|atom| self.selected_atoms.contains(atom.id()))
            .map(Atom::selection_mesh);
        let bonds = self
            .bonds
            .iter()
            .filter(|bond| self.selected_bonds.contains(bond.id()))
            .flat_map(|bond| {
                bond.segments().iter().map(BondSegment::selection_mesh)
            });
        atoms.chain(bonds)
    }

    /// Flat-colored meshes for one picking pass.
    #[must_use]
    pub fn picking_meshes(&self, space: PickSpace) -> Vec<Mesh> {
        match space {
            PickSpace::Atom => self.atoms.iter().map(Atom::picking_mesh).collect(),
            PickSpace::Bond => self
                .bonds
                .iter()
                .flat_map(Bond::segments)
                .map(BondSegment::picking_mesh)
                .collect(),
        }
    }

    /// Resolved pick targets for sampled bytes.
    #[must_use]
    pub fn pick_map(&self) -> &PickMap {
        &self.pick_map
    }
}
