//! Construction scheduler — the only component that finalizes slots.
//!
//! RULES:
//!   - All validation happens before any mutation (validate-then-commit).
//!   - Finalization of one slot has no side effect on another; the order
//!     in which simultaneously-due slots finalize does not matter.
//!   - A sweep is idempotent for a fixed `now`.

use crate::{
    catalog::Catalog,
    error::{GameError, GameResult},
    event::GameEvent,
    ledger::ResourceLedger,
    slots::{BuildingSlot, SlotRegistry},
    types::{Millis, SlotId},
};
use serde::{Deserialize, Serialize};

/// How `start_construction` treats the catalog cost of a building.
///
/// The original game skipped the cost check entirely; `Waive` reproduces
/// that but logs the bypass on every command so it cannot pass silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicy {
    /// Reject unaffordable commands and deduct the cost on success.
    Enforce,
    /// Build for free, warning about the bypass.
    Waive,
}

pub struct ConstructionScheduler {
    cost_policy: CostPolicy,
}

impl ConstructionScheduler {
    pub fn new(cost_policy: CostPolicy) -> Self {
        Self { cost_policy }
    }

    pub fn cost_policy(&self) -> CostPolicy {
        self.cost_policy
    }

    /// Begin construction of `building_id` on slot `slot_id`.
    ///
    /// Looks up the building in the catalog, checks affordability per the
    /// cost policy, then delegates to the registry's `reserve`. Registry
    /// errors propagate unchanged; nothing mutates on any failure.
    pub fn start_construction(
        &self,
        catalog: &Catalog,
        ledger: &mut ResourceLedger,
        registry: &mut SlotRegistry,
        slot_id: SlotId,
        building_id: &str,
        now: Millis,
    ) -> GameResult<GameEvent> {
        let building =
            catalog
                .get(building_id)
                .ok_or_else(|| GameError::UnknownBuildingType {
                    building_id: building_id.to_string(),
                })?;

        match self.cost_policy {
            CostPolicy::Enforce => {
                if let Some((kind, required, available)) = ledger.shortfall(&building.cost) {
                    return Err(GameError::InsufficientResources {
                        building_id: building_id.to_string(),
                        kind,
                        required,
                        available,
                    });
                }
            }
            CostPolicy::Waive => {
                log::warn!(
                    "cost check waived: '{building_id}' on slot {slot_id} builds for free"
                );
            }
        }

        let completes_at = registry.reserve(slot_id, building_id, building.build_time_secs, now)?;
        if self.cost_policy == CostPolicy::Enforce {
            ledger.debit(&building.cost);
        }

        log::info!(
            "construction started: '{building_id}' on slot {slot_id}, due at {completes_at}ms"
        );
        Ok(GameEvent::ConstructionStarted {
            slot_id,
            building_id: building_id.to_string(),
            completes_at,
        })
    }

    /// Finalize every slot whose pending deadline has passed.
    pub fn sweep(&self, registry: &mut SlotRegistry, now: Millis) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for slot_id in registry.pending_slot_ids() {
            if let Some((building_id, level)) = registry.finalize(slot_id, now) {
                log::info!("construction completed: '{building_id}' on slot {slot_id} (level {level})");
                events.push(GameEvent::ConstructionCompleted {
                    slot_id,
                    building_id,
                    level,
                });
            }
        }
        events
    }

    /// Countdown for observers. Derived, never stored.
    pub fn remaining_seconds(slot: &BuildingSlot, now: Millis) -> u64 {
        slot.remaining_seconds(now).unwrap_or(0)
    }
}
