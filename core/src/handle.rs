//! Shared engine handle for hosts with real parallelism.
//!
//! One mutex guards the whole engine. It is held for the full duration of
//! each tick, each command, and each snapshot, so a command and a sweep
//! can never observe a half-updated slot and readers always see a fully
//! consistent state. Single-threaded hosts can use [`GameEngine`]
//! directly and skip the lock.

use crate::{
    command::GameCommand,
    engine::GameEngine,
    error::GameResult,
    event::GameEvent,
    snapshot::GameSnapshot,
    types::Millis,
};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct GameHandle {
    inner: Arc<Mutex<GameEngine>>,
}

impl GameHandle {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn tick(&self, now: Millis) -> Vec<GameEvent> {
        self.lock().tick(now)
    }

    pub fn apply(&self, command: GameCommand, now: Millis) -> GameResult<GameEvent> {
        self.lock().apply(command, now)
    }

    pub fn snapshot(&self, now: Millis) -> GameSnapshot {
        self.lock().snapshot(now)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GameEngine> {
        // A poisoned lock means a panic mid-mutation; state may be torn,
        // so propagating the panic is the only sound option.
        self.inner.lock().unwrap_or_else(|e| {
            panic!("engine lock poisoned: {e}");
        })
    }
}
