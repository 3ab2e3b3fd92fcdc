//! # Component Contract
//!
//! Components are pure data records attached to at most one entity each.
//! They must be `Copy` plain-old-data with a fixed size so every store can
//! be pre-allocated up front.
//!
//! The set of kinds is closed and declared here at build time. Each kind is
//! assigned a position (`KIND`), numbered 0..[`KIND_COUNT`] in declaration
//! order, and a store capacity (`MAX_INSTANCES`). There is no runtime
//! registration: adding a kind means declaring it in this module and wiring
//! its store into the registry.

use bytemuck::{Pod, Zeroable};

/// Number of declared component kinds.
///
/// Sizes every entity row's per-kind slot table.
pub const KIND_COUNT: usize = 3;

/// Marker trait for component records.
///
/// Components must be:
/// - `Copy` + `Pod` + `Zeroable`: fixed-size plain old data, no heap
/// - `Default`: stores pre-initialize and reset slots with the default value
pub trait Component: Copy + Pod + Zeroable + Default + Send + Sync + 'static {
    /// This kind's position in declaration order (0..[`KIND_COUNT`]).
    ///
    /// Indexes the entity row's slot table and must be unique per kind.
    const KIND: usize;

    /// Maximum simultaneous instances of this kind.
    ///
    /// Sizes the kind's store at registry construction.
    const MAX_INSTANCES: usize;
}

/// Position of an entity in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Component for Position {
    const KIND: usize = 0;
    const MAX_INSTANCES: usize = 4096;
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Velocity of an entity in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X velocity.
    pub x: f32,
    /// Y velocity.
    pub y: f32,
    /// Z velocity.
    pub z: f32,
}

impl Component for Velocity {
    const KIND: usize = 1;
    const MAX_INSTANCES: usize = 4096;
}

impl Velocity {
    /// Creates a new velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Hit points of a damageable entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Health {
    /// Current hit points.
    pub current: u32,
    /// Maximum hit points.
    pub maximum: u32,
}

impl Component for Health {
    const KIND: usize = 2;
    const MAX_INSTANCES: usize = 1024;
}

impl Health {
    /// Creates a health record at full hit points.
    #[inline]
    #[must_use]
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }
}

// Declaration-order positions must stay inside the row's slot table.
const _: () = assert!(Position::KIND < KIND_COUNT);
const _: () = assert!(Velocity::KIND < KIND_COUNT);
const _: () = assert!(Health::KIND < KIND_COUNT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_positions_are_distinct() {
        let mut seen = [false; KIND_COUNT];
        for kind in [Position::KIND, Velocity::KIND, Health::KIND] {
            assert!(!seen[kind], "kind position {kind} declared twice");
            seen[kind] = true;
        }
        assert!(seen.iter().all(|&taken| taken));
    }

    #[test]
    fn test_components_are_fixed_size() {
        assert_eq!(std::mem::size_of::<Position>(), 12);
        assert_eq!(std::mem::size_of::<Velocity>(), 12);
        assert_eq!(std::mem::size_of::<Health>(), 8);
    }

    #[test]
    fn test_health_full() {
        let health = Health::full(250);
        assert_eq!(health.current, 250);
        assert_eq!(health.maximum, 250);
    }
}
