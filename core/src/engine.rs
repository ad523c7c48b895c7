//! The simulation engine — one settlement's complete state.
//!
//! TICK ORDER (fixed, documented, never reordered):
//!   1. Accrue resources for the actual elapsed time.
//!   2. Sweep for due constructions.
//!
//! RULES:
//!   - The engine owns all mutable state; observers get owned snapshots.
//!   - Every operation takes `now` explicitly and completes synchronously.
//!   - Commands validate fully before mutating, so a rejected command
//!     leaves state byte-for-byte unchanged.

use crate::{
    catalog::Catalog,
    command::GameCommand,
    error::GameResult,
    event::GameEvent,
    ledger::ResourceLedger,
    scheduler::{ConstructionScheduler, CostPolicy},
    slots::{BuildingSlot, SlotRegistry},
    snapshot::GameSnapshot,
    types::{Millis, SlotId},
};

pub struct GameEngine {
    catalog: Catalog,
    ledger: ResourceLedger,
    registry: SlotRegistry,
    scheduler: ConstructionScheduler,
    /// Timestamp of the previous tick; `None` until the first tick has
    /// established the accrual baseline.
    last_tick: Option<Millis>,
}

impl GameEngine {
    pub fn new(
        catalog: Catalog,
        ledger: ResourceLedger,
        registry: SlotRegistry,
        cost_policy: CostPolicy,
    ) -> Self {
        Self {
            catalog,
            ledger,
            registry,
            scheduler: ConstructionScheduler::new(cost_policy),
            last_tick: None,
        }
    }

    /// A session with the original game's catalog, economy, and village
    /// layout, with cost enforcement on.
    pub fn standard() -> Self {
        Self::new(
            Catalog::standard(),
            ResourceLedger::standard(),
            SlotRegistry::standard(),
            CostPolicy::Enforce,
        )
    }

    /// Advance the simulation to `now`: accrue resources for the time that
    /// actually passed since the previous tick, then finalize any due
    /// constructions.
    ///
    /// The first tick only records the baseline — accruing from an
    /// arbitrary epoch would double-count. A stalled host that misses
    /// ticks catches up here in one pass, because accrual uses the real
    /// wall-clock delta rather than assuming one period per call.
    pub fn tick(&mut self, now: Millis) -> Vec<GameEvent> {
        let elapsed_ms = match self.last_tick {
            Some(last) => now.saturating_sub(last),
            None => 0,
        };
        self.ledger.accrue(elapsed_ms);
        let mut events = self.scheduler.sweep(&mut self.registry, now);
        self.last_tick = Some(now);

        log::debug!(
            "tick: now={now}ms elapsed={elapsed_ms}ms completions={}",
            events.len()
        );
        events.push(GameEvent::TickCompleted { now, elapsed_ms });
        events
    }

    /// Dispatch an inbound command.
    pub fn apply(&mut self, command: GameCommand, now: Millis) -> GameResult<GameEvent> {
        match command {
            GameCommand::StartConstruction {
                slot_id,
                building_id,
            } => self.start_construction(slot_id, &building_id, now),
        }
    }

    /// Begin construction of `building_id` in slot `slot_id`.
    pub fn start_construction(
        &mut self,
        slot_id: SlotId,
        building_id: &str,
        now: Millis,
    ) -> GameResult<GameEvent> {
        self.scheduler.start_construction(
            &self.catalog,
            &mut self.ledger,
            &mut self.registry,
            slot_id,
            building_id,
            now,
        )
    }

    /// An owned, consistent copy of the full state for observers.
    pub fn snapshot(&self, now: Millis) -> GameSnapshot {
        GameSnapshot::capture(&self.ledger, &self.registry, now)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn slot(&self, slot_id: SlotId) -> GameResult<&BuildingSlot> {
        self.registry.get(slot_id)
    }

    pub fn slots(&self) -> impl Iterator<Item = &BuildingSlot> {
        self.registry.iter()
    }
}
