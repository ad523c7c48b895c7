//! Read-only snapshots for the presentation layer.
//!
//! A snapshot is an owned copy taken atomically with respect to the
//! engine's lock. Observers render from it and poll again when they want
//! fresher state; nothing here aliases live engine data.

use crate::{
    ledger::{ResourceKind, ResourceLedger},
    slots::{MapPosition, SlotRegistry},
    types::{BuildingId, Level, Millis, SlotId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
    pub kind: ResourceKind,
    pub amount: f64,
    pub production_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: SlotId,
    pub position: MapPosition,
    pub occupant: Option<BuildingId>,
    pub level: Level,
    pub under_construction: bool,
    /// Countdown for display, rounded up to whole seconds. `None` when the
    /// slot has no pending construction.
    pub remaining_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub resources: Vec<ResourceView>,
    pub slots: Vec<SlotView>,
}

impl GameSnapshot {
    pub fn capture(ledger: &ResourceLedger, registry: &SlotRegistry, now: Millis) -> Self {
        let resources = ledger
            .iter()
            .map(|r| ResourceView {
                kind: r.kind,
                amount: r.amount,
                production_per_hour: r.production_per_hour,
            })
            .collect();
        let slots = registry
            .iter()
            .map(|s| SlotView {
                id: s.id,
                position: s.position,
                occupant: s.occupant.clone(),
                level: s.level,
                under_construction: s.is_pending(),
                remaining_seconds: s.remaining_seconds(now),
            })
            .collect();
        Self { resources, slots }
    }

    pub fn slot(&self, id: SlotId) -> Option<&SlotView> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn resource(&self, kind: ResourceKind) -> Option<&ResourceView> {
        self.resources.iter().find(|r| r.kind == kind)
    }
}
