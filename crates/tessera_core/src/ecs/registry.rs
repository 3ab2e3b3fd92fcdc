//! # Entity Registry
//!
//! The central container: a fixed-capacity pool of entity rows plus one
//! component store per declared kind, and the lifecycle operations that keep
//! them consistent.
//!
//! ## Design Philosophy
//!
//! - All storage is sized at construction; no allocation afterwards
//! - Spawn, despawn, attach, detach and lookup are O(1)
//!   (despawn is O(declared kinds))
//! - Stale identifiers are rejected, never dereferenced
//!
//! Lookup works by multiplexing: the entity row holds one store-slot entry
//! per declared kind, so resolving `(entity, kind)` is a generation check
//! followed by two array indexings.

use std::any::type_name;
use std::fmt;

use super::component::{Component, Health, Position, Velocity};
use super::entity::{EntityId, EntityRow};
use super::error::{RegistryError, RegistryResult};
use super::store::ComponentStore;
use crate::memory::{SlotIndex, SlotPool};

/// Maps a declared component kind to its store inside the registry.
///
/// Implemented once per declared kind, this is the wiring that fixes the
/// kind set at build time. Generic registry operations take
/// `where Self: KindStore<C>`, so attaching an undeclared kind is a compile
/// error rather than a runtime lookup failure.
pub trait KindStore<C: Component> {
    /// Returns the store holding records of kind `C`.
    fn store(&self) -> &ComponentStore<C>;

    /// Returns the store holding records of kind `C`, mutably.
    fn store_mut(&mut self) -> &mut ComponentStore<C>;
}

/// A set of component kinds attached together at spawn.
///
/// Implemented for tuples of up to four components. Each kind in the bundle
/// is attached with its default value; the caller fills in real values
/// through [`Registry::get_mut`] afterwards.
pub trait Bundle {
    /// Attaches a default-valued record of every kind in the bundle.
    fn attach_all(registry: &mut Registry, entity: EntityId) -> RegistryResult<()>;
}

impl Bundle for () {
    fn attach_all(_registry: &mut Registry, _entity: EntityId) -> RegistryResult<()> {
        Ok(())
    }
}

macro_rules! impl_bundle {
    ($($kind:ident),+) => {
        impl<$($kind: Component),+> Bundle for ($($kind,)+)
        where
            $(Registry: KindStore<$kind>),+
        {
            fn attach_all(registry: &mut Registry, entity: EntityId) -> RegistryResult<()> {
                $(registry.attach::<$kind>(entity, $kind::default())?;)+
                Ok(())
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);

/// Fixed-capacity entity/component registry.
///
/// Entity capacity is chosen at construction; each kind's store capacity is
/// its `MAX_INSTANCES` declaration. Both are fixed for the registry's
/// lifetime.
///
/// # Thread Safety
///
/// The registry has no internal synchronization. Serialize access
/// externally if it must be shared across threads.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = Registry::new(2000);
///
/// let entity = registry.spawn_with::<(Position, Velocity)>()?;
/// *registry.get_mut::<Velocity>(entity).unwrap() = Velocity::new(0.0, 9.8, 0.0);
/// ```
pub struct Registry {
    /// Entity rows. Generations persist in place across slot reuse.
    entities: SlotPool<EntityRow>,
    /// Number of currently live entities.
    alive_count: usize,

    // =========================================================================
    // Component Stores - one per declared kind, wired below. Adding a kind
    // means a field here, a KindStore impl, and a release_kind line in
    // despawn.
    // =========================================================================
    positions: ComponentStore<Position>,
    velocities: ComponentStore<Velocity>,
    healths: ComponentStore<Health>,
}

impl KindStore<Position> for Registry {
    fn store(&self) -> &ComponentStore<Position> {
        &self.positions
    }

    fn store_mut(&mut self) -> &mut ComponentStore<Position> {
        &mut self.positions
    }
}

impl KindStore<Velocity> for Registry {
    fn store(&self) -> &ComponentStore<Velocity> {
        &self.velocities
    }

    fn store_mut(&mut self) -> &mut ComponentStore<Velocity> {
        &mut self.velocities
    }
}

impl KindStore<Health> for Registry {
    fn store(&self) -> &ComponentStore<Health> {
        &self.healths
    }

    fn store_mut(&mut self) -> &mut ComponentStore<Health> {
        &mut self.healths
    }
}

impl Registry {
    /// Creates a registry with room for `entity_capacity` live entities.
    ///
    /// Pre-allocates the entity-row pool and every declared kind's store.
    ///
    /// # Panics
    ///
    /// Panics if `entity_capacity` is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(entity_capacity: usize) -> Self {
        tracing::debug!("creating registry with capacity {}", entity_capacity);
        Self {
            entities: SlotPool::new(entity_capacity),
            alive_count: 0,
            positions: ComponentStore::new(),
            velocities: ComponentStore::new(),
            healths: ComponentStore::new(),
        }
    }

    /// Returns the maximum number of simultaneously live entities.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    /// Returns the number of currently live entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Spawns a new entity with no components.
    ///
    /// The returned identifier carries the slot's current generation, which
    /// persisted from the slot's previous occupant; generations only move
    /// forward on despawn.
    ///
    /// # Errors
    ///
    /// [`RegistryError::CapacityExhausted`] when every entity slot is live.
    pub fn spawn(&mut self) -> RegistryResult<EntityId> {
        let Some(slot) = self.entities.allocate() else {
            return Err(RegistryError::CapacityExhausted {
                resource: "entity registry",
                capacity: self.entities.capacity(),
            });
        };

        let row = &mut self.entities[slot];
        row.revive();
        let entity = EntityId::new(slot.raw(), row.generation());
        self.alive_count += 1;

        tracing::trace!("spawned {}", entity);
        Ok(entity)
    }

    /// Spawns a new entity with a default-valued record of every kind in
    /// the bundle.
    ///
    /// # Errors
    ///
    /// [`RegistryError::CapacityExhausted`] when the entity pool or any
    /// bundle kind's store is full. On a mid-bundle failure the entity is
    /// rolled back: it is despawned, the kinds already attached are freed,
    /// and the error is returned.
    pub fn spawn_with<B: Bundle>(&mut self) -> RegistryResult<EntityId> {
        let entity = self.spawn()?;
        if let Err(err) = B::attach_all(self, entity) {
            self.despawn(entity)?;
            return Err(err);
        }
        Ok(entity)
    }

    /// Despawns an entity, detaching all of its components and freeing its
    /// slot for reuse.
    ///
    /// The slot's generation is bumped first, so every identifier issued
    /// for this entity is invalid from here on, even after the slot is
    /// reallocated.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] if `entity` was already despawned.
    pub fn despawn(&mut self, entity: EntityId) -> RegistryResult<()> {
        self.live_row(entity)?;

        let slot = SlotIndex::new(entity.index());
        self.entities[slot].retire();

        // Every declared kind, unconditionally; not just the ones requested
        // at spawn.
        self.release_kind::<Position>(slot);
        self.release_kind::<Velocity>(slot);
        self.release_kind::<Health>(slot);

        self.entities.free(slot);
        self.alive_count -= 1;

        tracing::trace!("despawned {}", entity);
        Ok(())
    }

    /// Returns whether `entity` still refers to a live entity.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.live_row(entity).is_ok()
    }

    /// Attaches a component of kind `C` to an entity, returning a mutable
    /// reference to the stored record.
    ///
    /// An entity holds at most one record per kind: attaching a kind that is
    /// already present overwrites the existing record in place, without
    /// touching its store slot.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] if `entity` was despawned;
    /// [`RegistryError::CapacityExhausted`] when the kind's store is full.
    pub fn attach<C: Component>(&mut self, entity: EntityId, value: C) -> RegistryResult<&mut C>
    where
        Self: KindStore<C>,
    {
        let existing = self.live_row(entity)?.slot(C::KIND);

        if let Some(slot) = existing {
            let record = self.store_mut().value_mut(slot);
            *record = value;
            return Ok(record);
        }

        let Some(slot) = self.store_mut().insert(entity, value) else {
            return Err(RegistryError::CapacityExhausted {
                resource: type_name::<C>(),
                capacity: C::MAX_INSTANCES,
            });
        };
        self.entities[SlotIndex::new(entity.index())].set_slot(C::KIND, slot);

        tracing::trace!("attached {} to {}", type_name::<C>(), entity);
        Ok(self.store_mut().value_mut(slot))
    }

    /// Detaches the kind-`C` component from an entity, returning the removed
    /// record.
    ///
    /// Returns `Ok(None)` if no record of the kind was attached; absence is
    /// an ordinary outcome, not an error.
    ///
    /// # Errors
    ///
    /// [`RegistryError::StaleEntity`] if `entity` was despawned.
    pub fn detach<C: Component>(&mut self, entity: EntityId) -> RegistryResult<Option<C>>
    where
        Self: KindStore<C>,
    {
        self.live_row(entity)?;

        let row = &mut self.entities[SlotIndex::new(entity.index())];
        let Some(slot) = row.clear_slot(C::KIND) else {
            return Ok(None);
        };

        debug_assert_eq!(<Self as KindStore<C>>::store(self).owner(slot), Some(entity));
        let value = <Self as KindStore<C>>::store_mut(self).remove(slot);

        tracing::trace!("detached {} from {}", type_name::<C>(), entity);
        Ok(Some(value))
    }

    /// Looks up the kind-`C` component attached to an entity.
    ///
    /// Returns `None` when the kind is not attached, and also when `entity`
    /// is stale; a reused slot must never leak another entity's record.
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C>
    where
        Self: KindStore<C>,
    {
        let slot = self.live_row(entity).ok()?.slot(C::KIND)?;
        Some(self.store().value(slot))
    }

    /// Looks up the kind-`C` component attached to an entity, mutably.
    ///
    /// Same staleness and absence behavior as [`Registry::get`].
    pub fn get_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C>
    where
        Self: KindStore<C>,
    {
        let slot = self.live_row(entity).ok()?.slot(C::KIND)?;
        Some(self.store_mut().value_mut(slot))
    }

    /// Resolves an identifier to its row, rejecting stale or out-of-range
    /// identifiers.
    fn live_row(&self, entity: EntityId) -> RegistryResult<&EntityRow> {
        match self.entities.get(SlotIndex::new(entity.index())) {
            Some(row) if row.is_live() && row.generation() == entity.generation() => Ok(row),
            Some(row) => Err(RegistryError::StaleEntity {
                index: entity.index(),
                presented: entity.generation(),
                current: row.generation(),
            }),
            None => Err(RegistryError::StaleEntity {
                index: entity.index(),
                presented: entity.generation(),
                current: 0,
            }),
        }
    }

    /// Frees an entity row's store slot for one kind, if present.
    fn release_kind<C: Component>(&mut self, slot: SlotIndex)
    where
        Self: KindStore<C>,
    {
        if let Some(store_slot) = self.entities[slot].clear_slot(C::KIND) {
            <Self as KindStore<C>>::store_mut(self).remove(store_slot);
        }
    }
}

/// Diagnostic table dump: one line per live entity with its per-kind store
/// slots in declaration order (`-` marks an unattached kind).
impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Registry {{ alive: {}/{} }}",
            self.alive_count,
            self.capacity()
        )?;
        for (slot, row) in self.entities.iter() {
            if !row.is_live() {
                continue;
            }
            write!(f, "entity[{}v{}]", slot.raw(), row.generation())?;
            for entry in row.slots() {
                match entry {
                    Some(store_slot) => write!(f, " {}", store_slot.raw())?,
                    None => write!(f, " -")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
