use crate::{
    ledger::ResourceKind,
    types::{BuildingId, SlotId},
};
use thiserror::Error;

/// All command and initialization failures.
///
/// Command errors are detected before any mutation occurs, so a rejected
/// command always leaves the game state unchanged. None of them is retried
/// automatically.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Slot {slot_id} not found")]
    SlotNotFound { slot_id: SlotId },

    #[error("Slot {slot_id} is already occupied by '{occupant}'")]
    SlotOccupied {
        slot_id: SlotId,
        occupant: BuildingId,
    },

    #[error("Slot {slot_id} already has a construction in progress")]
    SlotBusy { slot_id: SlotId },

    #[error("Unknown building type '{building_id}'")]
    UnknownBuildingType { building_id: BuildingId },

    #[error("Not enough {kind} for '{building_id}': need {required}, have {available:.1}")]
    InsufficientResources {
        building_id: BuildingId,
        kind: ResourceKind,
        required: u32,
        available: f64,
    },

    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("Invalid resource configuration: {reason}")]
    InvalidLedger { reason: String },

    #[error("Invalid slot layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
