//! # Memory Management
//!
//! Pre-allocated slot pools backing the registry.
//!
//! All storage is sized once at construction. After that point allocate and
//! free only move indices between a free list and its owner; no heap traffic,
//! no fragmentation, a hard capacity ceiling per pool.

mod pool;

pub use pool::{SlotIndex, SlotPool};
