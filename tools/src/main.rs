//! village-runner: headless driver for the settlement engine.
//!
//! Usage:
//!   village-runner --seconds 30
//!   village-runner --seconds 60 --build 3:granary --catalog data/buildings.json

use anyhow::Result;
use std::env;
use std::thread;
use std::time::Duration;
use village_core::{
    catalog::Catalog,
    clock::{GameClock, TICK_INTERVAL_MS},
    command::GameCommand,
    engine::GameEngine,
    event::GameEvent,
    handle::GameHandle,
    ledger::ResourceLedger,
    scheduler::CostPolicy,
    slots::SlotRegistry,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seconds = parse_arg(&args, "--seconds", 30u64);
    let interval_ms = parse_arg(&args, "--interval-ms", TICK_INTERVAL_MS);
    let catalog_path = args
        .windows(2)
        .find(|w| w[0] == "--catalog")
        .map(|w| w[1].as_str());
    let build = args
        .windows(2)
        .find(|w| w[0] == "--build")
        .map(|w| w[1].as_str());

    println!("village-runner");
    println!("  seconds:  {seconds}");
    println!("  interval: {interval_ms}ms");
    println!("  catalog:  {}", catalog_path.unwrap_or("(built-in)"));
    println!();

    let catalog = match catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::standard(),
    };
    let engine = GameEngine::new(
        catalog,
        ResourceLedger::standard(),
        SlotRegistry::standard(),
        CostPolicy::Enforce,
    );
    let handle = GameHandle::new(engine);
    let clock = GameClock::new();

    // Establish the accrual baseline before any waiting happens.
    handle.tick(clock.now_ms());

    if let Some(target) = build {
        let (slot_id, building_id) = parse_build(target)?;
        let event = handle.apply(
            GameCommand::StartConstruction {
                slot_id,
                building_id: building_id.to_string(),
            },
            clock.now_ms(),
        )?;
        if let GameEvent::ConstructionStarted { completes_at, .. } = event {
            println!("building '{building_id}' on slot {slot_id}, due at {completes_at}ms");
        }
    }

    let mut completions = 0usize;
    let deadline_ms = seconds * 1000;
    while clock.now_ms() < deadline_ms {
        thread::sleep(Duration::from_millis(interval_ms));
        let events = handle.tick(clock.now_ms());
        for event in &events {
            if let GameEvent::ConstructionCompleted {
                slot_id,
                building_id,
                level,
            } = event
            {
                completions += 1;
                println!("completed: '{building_id}' on slot {slot_id} (level {level})");
            }
        }
    }

    print_summary(&handle, clock.now_ms(), completions)?;
    Ok(())
}

fn print_summary(handle: &GameHandle, now: u64, completions: usize) -> Result<()> {
    let snapshot = handle.snapshot(now);

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  ran for:      {now}ms");
    println!("  completions:  {completions}");
    for r in &snapshot.resources {
        println!(
            "  {:<5} {:>10.2}  (+{}/h)",
            r.kind, r.amount, r.production_per_hour
        );
    }
    for s in snapshot.slots.iter().filter(|s| s.occupant.is_some()) {
        println!(
            "  slot {:>2}: {} (level {})",
            s.id,
            s.occupant.as_deref().unwrap_or("-"),
            s.level
        );
    }
    log::debug!("final snapshot: {}", serde_json::to_string(&snapshot)?);
    Ok(())
}

fn parse_build(target: &str) -> Result<(u32, &str)> {
    let (slot, building) = target
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("--build expects SLOT:BUILDING, got '{target}'"))?;
    Ok((slot.parse()?, building))
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
