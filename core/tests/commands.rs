//! Command dispatch, cost policy, and snapshot view tests.

use village_core::catalog::Catalog;
use village_core::command::GameCommand;
use village_core::engine::GameEngine;
use village_core::error::GameError;
use village_core::event::GameEvent;
use village_core::ledger::{Resource, ResourceKind, ResourceLedger};
use village_core::scheduler::CostPolicy;
use village_core::slots::SlotRegistry;

const T0: u64 = 50_000;

fn broke_ledger() -> ResourceLedger {
    let resources = ResourceKind::ALL
        .into_iter()
        .map(|kind| Resource {
            kind,
            amount: 10.0,
            production_per_hour: 60.0,
        })
        .collect();
    ResourceLedger::new(resources).unwrap()
}

#[test]
fn start_construction_command_reserves_the_slot() {
    let mut engine = GameEngine::standard();

    let event = engine
        .apply(
            GameCommand::StartConstruction {
                slot_id: 3,
                building_id: "granary".into(),
            },
            T0,
        )
        .unwrap();

    assert_eq!(
        event,
        GameEvent::ConstructionStarted {
            slot_id: 3,
            building_id: "granary".into(),
            completes_at: T0 + 15_000,
        }
    );
    assert!(engine.slot(3).unwrap().is_pending());
}

/// With enforcement on, an unaffordable build is rejected before any
/// mutation: no reservation, no partial deduction.
#[test]
fn unaffordable_build_is_rejected_with_zero_mutation() {
    let mut engine = GameEngine::new(
        Catalog::standard(),
        broke_ledger(),
        SlotRegistry::standard(),
        CostPolicy::Enforce,
    );
    let before = engine.snapshot(T0);

    let err = engine.start_construction(3, "granary", T0).unwrap_err();

    assert!(matches!(err, GameError::InsufficientResources { .. }));
    assert_eq!(engine.snapshot(T0), before);
}

/// The waive policy reproduces the original game's free builds.
#[test]
fn waived_cost_policy_builds_for_free() {
    let mut engine = GameEngine::new(
        Catalog::standard(),
        broke_ledger(),
        SlotRegistry::standard(),
        CostPolicy::Waive,
    );

    engine.start_construction(3, "granary", T0).unwrap();

    assert!(engine.slot(3).unwrap().is_pending());
    assert!(
        (engine.ledger().amount(ResourceKind::Wood) - 10.0).abs() < 1e-9,
        "waive policy must not deduct"
    );
}

#[test]
fn snapshot_reflects_pending_construction() {
    let mut engine = GameEngine::standard();
    engine.start_construction(3, "granary", T0).unwrap();

    let snapshot = engine.snapshot(T0 + 5_000);
    let slot = snapshot.slot(3).expect("slot 3 in snapshot");

    assert!(slot.under_construction);
    assert_eq!(slot.remaining_seconds, Some(10));
    assert_eq!(slot.occupant, None);

    let wood = snapshot.resource(ResourceKind::Wood).unwrap();
    assert!(wood.amount < 750.0, "snapshot should show the deducted cost");
    assert!((wood.production_per_hour - 60.0).abs() < 1e-9);
}

#[test]
fn snapshot_lists_every_slot_and_resource() {
    let engine = GameEngine::standard();

    let snapshot = engine.snapshot(T0);

    assert_eq!(snapshot.slots.len(), 19);
    assert_eq!(snapshot.resources.len(), 4);
    let main = snapshot.slot(7).unwrap();
    assert_eq!(main.occupant.as_deref(), Some("main_building"));
    assert_eq!(main.level, 1);
    assert!(!main.under_construction);
    assert_eq!(main.remaining_seconds, None);
}

/// Commands round-trip through the serde wire shape the runner speaks.
#[test]
fn commands_round_trip_as_tagged_json() {
    let json = r#"{"cmd":"start_construction","slot_id":3,"building_id":"granary"}"#;

    let command: GameCommand = serde_json::from_str(json).unwrap();

    let GameCommand::StartConstruction {
        slot_id,
        building_id,
    } = command;
    assert_eq!(slot_id, 3);
    assert_eq!(building_id, "granary");
}

#[test]
fn catalog_load_matches_builtin_standard() {
    let loaded = Catalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/buildings.json"))
        .expect("data/buildings.json should parse");

    assert_eq!(loaded.len(), Catalog::standard().len());
    for (a, b) in loaded.iter().zip(Catalog::standard().iter()) {
        assert_eq!(a, b, "catalog file drifted from the built-in default");
    }
}

#[test]
fn catalog_rejects_duplicate_ids_and_zero_durations() {
    let mut entries: Vec<_> = Catalog::standard().iter().cloned().collect();
    entries.push(entries[0].clone());
    assert!(matches!(
        Catalog::new(entries),
        Err(GameError::InvalidCatalog { .. })
    ));

    let mut entries: Vec<_> = Catalog::standard().iter().cloned().collect();
    entries[0].build_time_secs = 0;
    assert!(matches!(
        Catalog::new(entries),
        Err(GameError::InvalidCatalog { .. })
    ));
}
