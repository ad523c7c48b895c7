//! Shared primitive types used across the entire simulation.

/// A building slot identifier. Fixed at layout time, stable for the session.
pub type SlotId = u32;

/// The canonical key of a building type in the catalog.
pub type BuildingId = String;

/// A building level. 0 means the slot is unoccupied.
pub type Level = u32;

/// Milliseconds on the engine's monotonic timeline.
/// Only deltas are meaningful; the epoch is whatever the driver chose.
pub type Millis = u64;
