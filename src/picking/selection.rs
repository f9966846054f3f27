//! Click-to-select resolution.

use rustc_hash::FxHashSet;

use super::identifier::PickId;
use crate::geometry::Mesh;

/// An object that can be hit in the picking pass.
pub trait PickableObject {
    /// Identifier the object is drawn with.
    fn pick_id(&self) -> PickId;
}

impl PickableObject for PickId {
    fn pick_id(&self) -> PickId {
        *self
    }
}

/// Set of selected objects within one identifier space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: FxHashSet<PickId>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: PickId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Add `id`; returns `true` if it was not already selected.
    pub fn insert(&mut self, id: PickId) -> bool {
        self.ids.insert(id)
    }

    /// Remove `id`; returns `true` if it was selected.
    pub fn remove(&mut self, id: PickId) -> bool {
        self.ids.remove(&id)
    }

    /// Flip the selection state of `id`.
    pub fn toggle(&mut self, id: PickId) {
        if !self.ids.remove(&id) {
            let _ = self.ids.insert(id);
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only the ids accepted by `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(PickId) -> bool) {
        self.ids.retain(|&id| keep(id));
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<PickId> {
        let mut ids: Vec<PickId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<PickId> for Selection {
    fn from_iter<I: IntoIterator<Item = PickId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Apply a click that decoded to `decoded` against `objects`.
///
/// The match is the object drawn with `decoded`; there is none for the
/// background (`0`) or an identifier no object carries. In exclusive mode
/// every other object is deselected first. The match, if any, then has its
/// state flipped, so clicking a selected object deselects it.
#[must_use]
pub fn resolve_selection<T: PickableObject>(
    decoded: u8,
    objects: &[T],
    selected: &Selection,
    exclusive: bool,
) -> Selection {
    let hit = PickId::new(decoded).and_then(|id| {
        objects
            .iter()
            .map(PickableObject::pick_id)
            .find(|&candidate| candidate == id)
    });

    let mut next = selected.clone();
    if exclusive {
        next.retain(|id| Some(id) == hit);
    }
    if let Some(id) = hit {
        next.toggle(id);
    }
    next
}

/// The picking-pass twin of `mesh`: same triangles, flat identifier color.
#[must_use]
pub fn picking_mesh(mesh: &Mesh, id: PickId) -> Mesh {
    mesh.with_flat_color(id.color())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::generate_sphere;

    fn ids(raw: &[u8]) -> Vec<PickId> {
        raw.iter().filter_map(|&r| PickId::new(r)).collect()
    }

    fn selection(raw: &[u8]) -> Selection {
        ids(raw).into_iter().collect()
    }

    #[test]
    fn background_click_clears_exclusive_selection() {
        let objects = ids(&[1, 2, 3]);
        let selected = selection(&[1, 3]);
        assert!(resolve_selection(0, &objects, &selected, true).is_empty());
        assert!(resolve_selection(0, &objects, &Selection::new(), true).is_empty());
    }

    #[test]
    fn background_click_keeps_non_exclusive_selection() {
        let objects = ids(&[1, 2, 3]);
        let selected = selection(&[1, 3]);
        assert_eq!(resolve_selection(0, &objects, &selected, false), selected);
    }

    #[test]
    fn unmatched_id_behaves_like_background() {
        let objects = ids(&[1, 2, 3]);
        let selected = selection(&[2]);
        assert!(resolve_selection(77, &objects, &selected, true).is_empty());
        assert_eq!(resolve_selection(77, &objects, &selected, false), selected);
    }

    #[test]
    fn exclusive_click_toggles_only_the_hit() {
        let objects = ids(&[1, 2, 3]);

        // Atoms 1 and 3 were selected; clicking 2 leaves only 2.
        let first = resolve_selection(2, &objects, &selection(&[1, 3]), true);
        assert_eq!(first.sorted(), ids(&[2]));

        // Clicking 2 again deselects it.
        let second = resolve_selection(2, &objects, &first, true);
        assert!(second.is_empty());
    }

    #[test]
    fn non_exclusive_click_accumulates() {
        let objects = ids(&[1, 2, 3]);
        let sel = resolve_selection(1, &objects, &Selection::new(), false);
        let sel = resolve_selection(3, &objects, &sel, false);
        assert_eq!(sel.sorted(), ids(&[1, 3]));
        let sel = resolve_selection(1, &objects, &sel, false);
        assert_eq!(sel.sorted(), ids(&[3]));
    }

    #[test]
    fn picking_mesh_is_flat_identifier_color() {
        let mesh = generate_sphere(Vec3::ZERO, 1.0, Vec3::ONE, 1).unwrap();
        let id = PickId::new(42).unwrap();
        let pick = picking_mesh(&mesh, id);
        assert_eq!(pick.indices(), mesh.indices());
        assert!(pick
            .vertices()
            .iter()
            .all(|v| v.color == [42.0 / 255.0, 0.0, 0.0]));
    }
}
