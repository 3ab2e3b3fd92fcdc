//! # Registry Error Types
//!
//! All recoverable failures the registry reports to its caller.
//!
//! Absence of a component is not an error: lookups return `Option`. A double
//! free cannot be expressed through the public API at all, so it has no
//! variant either.

use thiserror::Error;

/// Errors that can occur in registry operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The operation presented an entity identifier whose generation no
    /// longer matches its slot. The slot was despawned (and possibly reused)
    /// since the identifier was issued.
    #[error("stale entity {index}v{presented}: slot is at generation {current}")]
    StaleEntity {
        /// The slot index the identifier refers to.
        index: u32,
        /// The generation the identifier carries.
        presented: u32,
        /// The slot's current generation.
        current: u32,
    },

    /// A slot pool had no free slot left for an allocation.
    #[error("{resource} exhausted: all {capacity} slots in use")]
    CapacityExhausted {
        /// The pool that ran out.
        resource: &'static str,
        /// That pool's fixed capacity.
        capacity: usize,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
