//! village-core — the time-driven state engine of a single settlement.
//!
//! The core is a library: a resource ledger that accrues over wall-clock
//! time, a fixed registry of building slots, a construction scheduler
//! that reserves slots and finalizes them once their deadline passes, and
//! a tick entry point that drivers call on a fixed cadence. Presentation
//! layers issue [`command::GameCommand`]s in and poll
//! [`snapshot::GameSnapshot`]s out; they never touch live state.

pub mod catalog;
pub mod clock;
pub mod command;
pub mod engine;
pub mod error;
pub mod event;
pub mod handle;
pub mod ledger;
pub mod scheduler;
pub mod slots;
pub mod snapshot;
pub mod types;
