//! # Tessera Core
//!
//! Fixed-capacity entity/component registry with generational identities:
//! - Constant-time entity and component creation/deletion
//! - Zero heap allocation after registry construction
//! - Stale-handle detection through generation counters
//!
//! ## Architecture Rules
//!
//! 1. **No allocation past construction** - every pool is sized up front
//! 2. **Statically bounded capacity** - per-kind ceilings are build-time
//!    declarations, exhaustion is a recoverable error
//! 3. **Single-threaded** - no internal synchronization; serialize access
//!    externally if shared
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{Position, Registry, Velocity};
//!
//! let mut registry = Registry::new(2000);
//! let entity = registry.spawn_with::<(Position, Velocity)>()?;
//! *registry.get_mut::<Velocity>(entity).unwrap() = Velocity::new(1.0, 0.0, 0.0);
//! registry.despawn(entity)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod memory;

pub use ecs::{
    Bundle, Component, ComponentStore, EntityId, Health, KindStore, Position, Registry,
    RegistryError, RegistryResult, Velocity, KIND_COUNT,
};
pub use memory::{SlotIndex, SlotPool};
