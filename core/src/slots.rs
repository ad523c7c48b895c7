//! Slot registry — the fixed set of building slots and their mutations.
//!
//! RULE: slots are created once at initialization and never destroyed.
//! `reserve` is the only public mutator; `finalize` is crate-private so
//! that only the construction scheduler's sweep can install a building.

use crate::{
    error::{GameError, GameResult},
    types::{BuildingId, Level, Millis, SlotId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a slot sits on the village map, as percentages of the map image.
/// Carried for observers; the core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub top_pct: f32,
    pub left_pct: f32,
}

/// An in-flight construction on a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConstruction {
    pub building_id: BuildingId,
    pub completes_at: Millis,
    /// Level the slot will hold once the sweep finalizes: 1 for a fresh
    /// build, current level + 1 for an upgrade.
    pub target_level: Level,
}

/// A fixed map position that may hold at most one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSlot {
    pub id: SlotId,
    pub position: MapPosition,
    pub occupant: Option<BuildingId>,
    pub level: Level,
    pub pending: Option<PendingConstruction>,
}

impl BuildingSlot {
    fn empty(id: SlotId, top_pct: f32, left_pct: f32) -> Self {
        Self {
            id,
            position: MapPosition { top_pct, left_pct },
            occupant: None,
            level: 0,
            pending: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whole seconds until the pending construction completes, rounded up
    /// and clamped at zero. `None` when nothing is pending.
    pub fn remaining_seconds(&self, now: Millis) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|p| p.completes_at.saturating_sub(now).div_ceil(1000))
    }
}

/// The fixed collection of slots, keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRegistry {
    slots: BTreeMap<SlotId, BuildingSlot>,
}

impl SlotRegistry {
    /// Build a registry from a static layout, validating the slot invariants:
    /// unique ids, and `level == 0` exactly when the slot has no occupant.
    pub fn new(layout: Vec<BuildingSlot>) -> GameResult<Self> {
        let mut slots = BTreeMap::new();
        for slot in layout {
            if (slot.level == 0) != slot.occupant.is_none() {
                return Err(GameError::InvalidLayout {
                    reason: format!(
                        "slot {} has level {} with occupant {:?}",
                        slot.id, slot.level, slot.occupant
                    ),
                });
            }
            if slots.insert(slot.id, slot.clone()).is_some() {
                return Err(GameError::InvalidLayout {
                    reason: format!("duplicate slot id {}", slot.id),
                });
            }
        }
        Ok(Self { slots })
    }

    /// The original village layout: 19 slots, slot 7 holding the level-1
    /// main building.
    pub fn standard() -> Self {
        let mut layout = vec![
            BuildingSlot::empty(1, 18.0, 52.0),
            BuildingSlot::empty(2, 23.0, 42.0),
            BuildingSlot::empty(3, 36.0, 22.0),
            BuildingSlot::empty(4, 41.0, 40.0),
            BuildingSlot::empty(5, 45.0, 73.0),
            BuildingSlot::empty(6, 47.0, 30.0),
            BuildingSlot::empty(7, 33.0, 54.0),
            BuildingSlot::empty(8, 49.0, 51.0),
            BuildingSlot::empty(9, 40.0, 88.0),
            BuildingSlot::empty(10, 53.0, 15.0),
            BuildingSlot::empty(11, 54.0, 42.0),
            BuildingSlot::empty(12, 59.0, 51.0),
            BuildingSlot::empty(13, 54.0, 60.0),
            BuildingSlot::empty(14, 60.0, 28.0),
            BuildingSlot::empty(15, 65.0, 65.0),
            BuildingSlot::empty(16, 53.0, 87.0),
            BuildingSlot::empty(17, 66.0, 38.0),
            BuildingSlot::empty(18, 71.0, 51.0),
            BuildingSlot::empty(19, 24.0, 64.0),
        ];
        layout[6].occupant = Some("main_building".into());
        layout[6].level = 1;
        Self::new(layout).unwrap_or_else(|e| unreachable!("standard layout invalid: {e}"))
    }

    pub fn get(&self, slot_id: SlotId) -> GameResult<&BuildingSlot> {
        self.slots
            .get(&slot_id)
            .ok_or(GameError::SlotNotFound { slot_id })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in id order. Observers must not read meaning into the order;
    /// visual stacking is computed downstream of the snapshot.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingSlot> {
        self.slots.values()
    }

    /// Reserve a slot for a fresh construction finishing `duration_secs`
    /// from `now`. Occupant and level stay untouched until finalization.
    ///
    /// Fails with `SlotNotFound` for an unknown id, `SlotBusy` if any
    /// construction is already pending (checked regardless of occupancy),
    /// and `SlotOccupied` if a finished building is present. Returns the
    /// completion timestamp on success.
    pub fn reserve(
        &mut self,
        slot_id: SlotId,
        building_id: &str,
        duration_secs: u64,
        now: Millis,
    ) -> GameResult<Millis> {
        let slot = self
            .slots
            .get_mut(&slot_id)
            .ok_or(GameError::SlotNotFound { slot_id })?;
        if slot.pending.is_some() {
            return Err(GameError::SlotBusy { slot_id });
        }
        if let Some(occupant) = &slot.occupant {
            return Err(GameError::SlotOccupied {
                slot_id,
                occupant: occupant.clone(),
            });
        }
        let completes_at = now + duration_secs * 1000;
        slot.pending = Some(PendingConstruction {
            building_id: building_id.to_string(),
            completes_at,
            target_level: slot.level + 1,
        });
        Ok(completes_at)
    }

    /// Install the pending building if its deadline has passed.
    ///
    /// Scheduler-only. No-ops (returns `None`) when nothing is pending or
    /// the deadline is still in the future; otherwise sets the occupant,
    /// moves the level to the pending target, clears the marker, and
    /// returns what was built.
    pub(crate) fn finalize(&mut self, slot_id: SlotId, now: Millis) -> Option<(BuildingId, Level)> {
        let slot = self.slots.get_mut(&slot_id)?;
        let due = matches!(&slot.pending, Some(p) if p.completes_at <= now);
        if !due {
            return None;
        }
        let pending = slot.pending.take()?;
        slot.occupant = Some(pending.building_id.clone());
        slot.level = pending.target_level;
        Some((pending.building_id, pending.target_level))
    }

    /// Ids of slots with a pending construction. Used by the sweep.
    pub(crate) fn pending_slot_ids(&self) -> Vec<SlotId> {
        self.slots
            .values()
            .filter(|s| s.pending.is_some())
            .map(|s| s.id)
            .collect()
    }
}
