use crate::types::{BuildingId, SlotId};
use serde::{Deserialize, Serialize};

/// All commands the presentation layer may issue into the core.
/// Variants are added over time — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum GameCommand {
    /// Begin a fresh construction on an empty slot.
    StartConstruction {
        slot_id: SlotId,
        building_id: BuildingId,
    },
    // ── Future ────────────────────────────────────
    // StartUpgrade { slot_id: SlotId },
}
