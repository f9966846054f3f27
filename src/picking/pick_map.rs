//! Typed pick-target resolution from sampled picking-pass bytes.

use rustc_hash::{FxHashMap, FxHashSet};

use super::identifier::{decode, PickId, PickSpace};

/// A typed pick target resolved from a sampled identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// Background click or an identifier nothing carries.
    None,
    /// An atom sphere.
    Atom(PickId),
    /// One tube of a bond. `bond` is the bond's canonical identifier.
    Bond {
        /// Canonical identifier of the whole bond.
        bond: PickId,
        /// Identifier of the segment that was hit.
        segment: PickId,
    },
}

impl PickTarget {
    /// Returns `true` if this target is `None`.
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Source of sampled picking-pass bytes under the cursor.
///
/// Implementors render the requested identifier space with flat identifier
/// colors and return the red-channel byte at the cursor.
pub trait PickReadback {
    /// Render `space` and sample the cursor pixel.
    fn read_pick_byte(&mut self, space: PickSpace) -> u8;
}

impl<F> PickReadback for F
where
    F: FnMut(PickSpace) -> u8,
{
    fn read_pick_byte(&mut self, space: PickSpace) -> u8 {
        self(space)
    }
}

/// Maps sampled identifiers to typed [`PickTarget`] values.
///
/// Atoms and bond segments live in separate identifier spaces, so the same
/// raw value means different things depending on which pass produced it.
/// Every segment of a multi-order bond maps back to its bond.
#[derive(Debug, Clone, Default)]
pub struct PickMap {
    atoms: FxHashSet<PickId>,
    segments: FxHashMap<PickId, PickId>,
}

impl PickMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an atom identifier.
    pub fn insert_atom(&mut self, id: PickId) {
        let _ = self.atoms.insert(id);
    }

    /// Register the segment identifiers of `bond`.
    pub fn insert_bond(
        &mut self,
        bond: PickId,
        segments: impl IntoIterator<Item = PickId>,
    ) {
        for segment in segments {
            let _ = self.segments.insert(segment, bond);
        }
    }

    /// Forget an atom identifier.
    pub fn remove_atom(&mut self, id: PickId) {
        let _ = self.atoms.remove(&id);
    }

    /// Forget every segment that belongs to `bond`.
    pub fn remove_bond(&mut self, bond: PickId) {
        self.segments.retain(|_, owner| *owner != bond);
    }

    /// Resolve a sampled byte from the `space` pass.
    #[must_use]
    pub fn resolve(&self, space: PickSpace, sampled: u8) -> PickTarget {
        let Some(id) = PickId::new(decode(sampled)) else {
            return PickTarget::None;
        };
        match space {
            PickSpace::Atom if self.atoms.contains(&id) => PickTarget::Atom(id),
            PickSpace::Bond => self
                .segments
                .get(&id)
                .map_or(PickTarget::None, |&bond| PickTarget::Bond {
                    bond,
                    segment: id,
                }),
            PickSpace::Atom => PickTarget::None,
        }
    }

    /// Two-pass pick: atoms first, bonds only when no atom was hit.
    ///
    /// Atoms are drawn over the bonds that end inside them, so an atom hit
    /// takes precedence.
    pub fn pick(&self, readback: &mut impl PickReadback) -> PickTarget {
        let atom = self
            .resolve(PickSpace::Atom, readback.read_pick_byte(PickSpace::Atom));
        if !atom.is_none() {
            return atom;
        }
        self.resolve(PickSpace::Bond, readback.read_pick_byte(PickSpace::Bond))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u8) -> PickId {
        PickId::new(raw).unwrap()
    }

    fn sample_map() -> PickMap {
        let mut map = PickMap::new();
        map.insert_atom(id(1));
        map.insert_atom(id(2));
        // Double bond: segments 1 and 2 both belong to bond 1.
        map.insert_bond(id(1), [id(1), id(2)]);
        map.insert_bond(id(3), [id(3)]);
        map
    }

    #[test]
    fn zero_resolves_to_none() {
        let map = sample_map();
        assert!(map.resolve(PickSpace::Atom, 0).is_none());
        assert!(map.resolve(PickSpace::Bond, 0).is_none());
    }

    #[test]
    fn spaces_are_independent() {
        let map = sample_map();
        assert_eq!(map.resolve(PickSpace::Atom, 1), PickTarget::Atom(id(1)));
        assert_eq!(
            map.resolve(PickSpace::Bond, 1),
            PickTarget::Bond {
                bond: id(1),
                segment: id(1)
            }
        );
        assert!(map.resolve(PickSpace::Atom, 3).is_none());
    }

    #[test]
    fn every_segment_maps_to_its_bond() {
        let map = sample_map();
        assert_eq!(
            map.resolve(PickSpace::Bond, 2),
            PickTarget::Bond {
                bond: id(1),
                segment: id(2)
            }
        );
    }

    #[test]
    fn atom_pass_wins() {
        let map = sample_map();
        let mut passes = Vec::new();
        let target = map.pick(&mut |space| {
            passes.push(space);
            2
        });
        assert_eq!(target, PickTarget::Atom(id(2)));
        assert_eq!(passes, vec![PickSpace::Atom]);
    }

    #[test]
    fn bond_pass_runs_on_atom_miss() {
        let map = sample_map();
        let target = map.pick(&mut |space| match space {
            PickSpace::Atom => 0,
            PickSpace::Bond => 3,
        });
        assert_eq!(
            target,
            PickTarget::Bond {
                bond: id(3),
                segment: id(3)
            }
        );
    }

    #[test]
    fn removed_entries_stop_resolving() {
        let mut map = sample_map();
        map.remove_atom(id(1));
        map.remove_bond(id(1));
        assert!(map.resolve(PickSpace::Atom, 1).is_none());
        assert!(map.resolve(PickSpace::Bond, 2).is_none());
        assert!(!map.resolve(PickSpace::Bond, 3).is_none());
    }
}
