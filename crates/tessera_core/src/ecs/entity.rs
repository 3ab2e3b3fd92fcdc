//! # Entity Identity
//!
//! Entities are lightweight generational identifiers:
//! - An index into the registry's slot table
//! - A generation counter that detects stale references after slot reuse

use std::fmt;

use super::component::KIND_COUNT;
use crate::memory::SlotIndex;

/// Unique identifier for an entity.
///
/// Two identifiers are equal only when both the index and the generation
/// match. An identifier whose generation no longer matches its slot refers
/// to an entity that has since been despawned; the registry rejects it
/// instead of dereferencing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    /// Creates an entity identifier from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index this identifier refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation this identifier was issued at.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Per-slot entity record: the slot's current generation, a liveness flag,
/// and one component-store slot per declared kind.
///
/// The generation survives free/reallocate cycles. It is bumped exactly once
/// per despawn, which is what invalidates every identifier issued for the
/// slot before that despawn. A freshly allocated slot keeps whatever
/// generation the last despawn left it at.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EntityRow {
    generation: u32,
    live: bool,
    /// One entry per declared component kind, in declaration order.
    /// `None` means no component of that kind is attached.
    slots: [Option<SlotIndex>; KIND_COUNT],
}

impl EntityRow {
    /// A never-occupied row: generation zero, not live, no components.
    #[inline]
    pub(crate) const fn vacant() -> Self {
        Self {
            generation: 0,
            live: false,
            slots: [None; KIND_COUNT],
        }
    }

    /// Returns the slot's current generation.
    #[inline]
    pub(crate) const fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns whether the slot currently holds a live entity.
    #[inline]
    pub(crate) const fn is_live(&self) -> bool {
        self.live
    }

    /// Marks the slot live. Called on spawn; the generation is untouched.
    #[inline]
    pub(crate) fn revive(&mut self) {
        self.live = true;
    }

    /// Marks the slot free and bumps the generation, invalidating every
    /// identifier issued for it so far.
    #[inline]
    pub(crate) fn retire(&mut self) {
        self.live = false;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns the component-store slot recorded for a kind position.
    #[inline]
    pub(crate) fn slot(&self, kind: usize) -> Option<SlotIndex> {
        self.slots[kind]
    }

    /// Records a component-store slot for a kind position.
    #[inline]
    pub(crate) fn set_slot(&mut self, kind: usize, slot: SlotIndex) {
        self.slots[kind] = Some(slot);
    }

    /// Clears and returns the entry for a kind position.
    ///
    /// Taking the entry is what makes a double free structurally impossible:
    /// the store slot can only be freed by whoever got `Some` out of here.
    #[inline]
    pub(crate) fn clear_slot(&mut self, kind: usize) -> Option<SlotIndex> {
        self.slots[kind].take()
    }

    /// Returns the full per-kind slot table, in declaration order.
    #[inline]
    pub(crate) fn slots(&self) -> &[Option<SlotIndex>] {
        &self.slots
    }
}

impl Default for EntityRow {
    fn default() -> Self {
        Self::vacant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_equality_needs_both_fields() {
        let a = EntityId::new(7, 1);
        assert_eq!(a, EntityId::new(7, 1));
        assert_ne!(a, EntityId::new(7, 2));
        assert_ne!(a, EntityId::new(8, 1));
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId::new(3, 11).to_string(), "3v11");
    }

    #[test]
    fn test_row_retire_bumps_generation() {
        let mut row = EntityRow::vacant();
        assert_eq!(row.generation(), 0);
        assert!(!row.is_live());

        row.revive();
        assert!(row.is_live());
        assert_eq!(row.generation(), 0);

        row.retire();
        assert!(!row.is_live());
        assert_eq!(row.generation(), 1);

        // Reallocation inherits the bumped generation.
        row.revive();
        assert_eq!(row.generation(), 1);
    }

    #[test]
    fn test_row_slot_entries_take_once() {
        let mut row = EntityRow::vacant();
        assert_eq!(row.slot(0), None);

        row.set_slot(0, SlotIndex::new(5));
        assert_eq!(row.slot(0), Some(SlotIndex::new(5)));

        assert_eq!(row.clear_slot(0), Some(SlotIndex::new(5)));
        assert_eq!(row.clear_slot(0), None);
    }
}
