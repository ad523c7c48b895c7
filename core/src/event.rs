//! Events returned from commands and ticks.
//!
//! Observers may inspect these for logging or display, but state is always
//! read back through snapshots — the core never pushes notifications.

use crate::types::{BuildingId, Level, Millis, SlotId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A slot was reserved for construction.
    ConstructionStarted {
        slot_id: SlotId,
        building_id: BuildingId,
        completes_at: Millis,
    },

    /// A sweep found a construction past its deadline and installed it.
    ConstructionCompleted {
        slot_id: SlotId,
        building_id: BuildingId,
        level: Level,
    },

    /// One pass of the tick loop finished.
    TickCompleted { now: Millis, elapsed_ms: u64 },
}
