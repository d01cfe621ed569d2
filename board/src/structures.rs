//! Authoritative structure state management utilities.

use std::collections::BTreeMap;

use board_topology_core::{
    Footprint, GridCoord, PropertyGroup, SequentialId, Structure, StructureId,
};

/// Registry that stores structures and manages identifier allocation.
#[derive(Clone, Debug)]
pub(crate) struct StructureRegistry {
    entries: BTreeMap<StructureId, Structure>,
    next_structure_id: StructureId,
}

impl StructureRegistry {
    /// Creates an empty structure registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_structure_id: StructureId::new(0),
        }
    }

    /// Records a new structure under a freshly allocated identifier.
    pub(crate) fn allocate(&mut self, group: PropertyGroup, footprint: Footprint) -> StructureId {
        let id = self.next_structure_id;
        self.next_structure_id = StructureId::new(id.get().saturating_add(1));
        let _ = self
            .entries
            .insert(id, Structure::new(id, group, footprint));
        id
    }

    /// Restores a previously saved structure, keeping its identifier.
    ///
    /// Returns `false` when the identifier is already taken.
    pub(crate) fn restore(&mut self, structure: Structure) -> bool {
        let id = structure.id();
        if self.entries.contains_key(&id) {
            return false;
        }

        if id >= self.next_structure_id {
            self.next_structure_id = StructureId::new(id.get().saturating_add(1));
        }
        let _ = self.entries.insert(id, structure);
        true
    }

    pub(crate) fn remove(&mut self, id: StructureId) -> Option<Structure> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: StructureId) -> Option<&Structure> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: StructureId) -> Option<&mut Structure> {
        self.entries.get_mut(&id)
    }

    /// Structure whose footprint covers the provided cell.
    pub(crate) fn at(&self, coord: GridCoord) -> Option<&Structure> {
        self.entries
            .values()
            .find(|structure| structure.footprint().contains(coord))
    }

    /// Structures in ascending identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.entries.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn reset_sequential_ids(&mut self) {
        for structure in self.entries.values_mut() {
            structure.set_sequential_id(SequentialId::INVALID);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_topology_core::StructureSize;

    fn quad_at(x: i32, z: i32) -> Footprint {
        Footprint::new(GridCoord::new(x, z), StructureSize::Quad)
    }

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = StructureRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_structure_id.get(), 0);
    }

    #[test]
    fn allocate_hands_out_increasing_identifiers() {
        let mut registry = StructureRegistry::new();
        let first = registry.allocate(PropertyGroup::new(1), quad_at(0, 0));
        let second = registry.allocate(PropertyGroup::new(1), quad_at(4, 0));

        assert_eq!(first, StructureId::new(0));
        assert_eq!(second, StructureId::new(1));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn restore_advances_identifier_counter() {
        let mut registry = StructureRegistry::new();
        let restored = Structure::new(StructureId::new(7), PropertyGroup::new(0), quad_at(0, 0));

        assert!(registry.restore(restored));
        assert!(!registry.restore(restored));
        assert_eq!(
            registry.allocate(PropertyGroup::new(0), quad_at(5, 5)),
            StructureId::new(8)
        );
    }

    #[test]
    fn at_finds_structure_covering_cell() {
        let mut registry = StructureRegistry::new();
        let id = registry.allocate(PropertyGroup::new(3), quad_at(2, 2));

        assert_eq!(
            registry.at(GridCoord::new(3, 3)).map(Structure::id),
            Some(id)
        );
        assert!(registry.at(GridCoord::new(4, 2)).is_none());
    }
}
