//! # Component Stores
//!
//! One fixed-capacity store per declared component kind. A store is a slot
//! pool of records, each pairing the component value with a back-reference
//! to the owning entity.
//!
//! Stores never validate entity liveness themselves. The registry only hands
//! them slot indices it obtained from an entity row, which is the liveness
//! check; see `ecs::registry`.

use super::component::Component;
use super::entity::EntityId;
use crate::memory::{SlotIndex, SlotPool};

/// One record in a component store: the payload plus the entity that
/// currently holds the slot.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ComponentSlot<C: Component> {
    /// The entity this slot is attached to, or `None` while the slot is
    /// free.
    pub(crate) owner: Option<EntityId>,
    /// The component payload.
    pub(crate) value: C,
}

/// Fixed-capacity storage for a single component kind.
///
/// Capacity is `C::MAX_INSTANCES`, fixed at construction. Insert and remove
/// are O(1) through the underlying free list.
pub struct ComponentStore<C: Component> {
    slots: SlotPool<ComponentSlot<C>>,
}

impl<C: Component> ComponentStore<C> {
    /// Creates the store, pre-allocating `C::MAX_INSTANCES` slots.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotPool::new(C::MAX_INSTANCES),
        }
    }

    /// Returns the store's fixed capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of records currently attached.
    #[inline]
    #[must_use]
    pub const fn allocated_count(&self) -> usize {
        self.slots.allocated_count()
    }

    /// Returns the number of slots still available.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.slots.free_count()
    }

    /// Returns the entity a slot is attached to, if the index is in bounds
    /// and the slot is in use.
    #[inline]
    #[must_use]
    pub fn owner(&self, slot: SlotIndex) -> Option<EntityId> {
        self.slots.get(slot).and_then(|record| record.owner)
    }

    /// Allocates a slot and writes a record into it.
    ///
    /// Returns `None` when the store is at capacity.
    pub(crate) fn insert(&mut self, owner: EntityId, value: C) -> Option<SlotIndex> {
        let slot = self.slots.allocate()?;
        self.slots[slot] = ComponentSlot {
            owner: Some(owner),
            value,
        };
        Some(slot)
    }

    /// Clears a record and returns its slot to the free list.
    ///
    /// The caller must hold the slot's index taken from an entity row; see
    /// the module docs.
    pub(crate) fn remove(&mut self, slot: SlotIndex) -> C {
        let record = &mut self.slots[slot];
        let value = record.value;
        record.owner = None;
        record.value = C::default();
        self.slots.free(slot);
        value
    }

    /// Direct access to a record's payload.
    #[inline]
    pub(crate) fn value(&self, slot: SlotIndex) -> &C {
        &self.slots[slot].value
    }

    /// Direct mutable access to a record's payload.
    #[inline]
    pub(crate) fn value_mut(&mut self, slot: SlotIndex) -> &mut C {
        &mut self.slots[slot].value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::Position;

    #[test]
    fn test_store_insert_read_remove() {
        let mut store: ComponentStore<Position> = ComponentStore::new();
        let owner = EntityId::new(4, 2);

        let slot = store.insert(owner, Position::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(store.owner(slot), Some(owner));
        assert_eq!(*store.value(slot), Position::new(1.0, 2.0, 3.0));
        assert_eq!(store.allocated_count(), 1);

        let removed = store.remove(slot);
        assert_eq!(removed, Position::new(1.0, 2.0, 3.0));
        assert_eq!(store.owner(slot), None);
        assert_eq!(store.allocated_count(), 0);
    }

    #[test]
    fn test_store_capacity_matches_declaration() {
        let store: ComponentStore<Position> = ComponentStore::new();
        assert_eq!(store.capacity(), Position::MAX_INSTANCES);
        assert_eq!(store.free_count(), Position::MAX_INSTANCES);
    }

    #[test]
    fn test_store_slot_reusable_after_remove() {
        let mut store: ComponentStore<Position> = ComponentStore::new();
        let owner = EntityId::new(0, 0);

        let slot = store.insert(owner, Position::default()).unwrap();
        store.remove(slot);

        let reused = store.insert(owner, Position::default()).unwrap();
        assert_eq!(reused, slot);
    }
}
