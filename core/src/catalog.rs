//! Static building catalog.
//!
//! Loaded once at initialization and treated as read-only for the session.
//! The scheduler consults it for build durations; nothing here has behavior.

use crate::{
    error::{GameError, GameResult},
    ledger::ResourceKind,
    types::BuildingId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingType {
    pub id: BuildingId,
    pub name: String,
    pub description: String,
    pub cost: HashMap<ResourceKind, u32>,
    pub build_time_secs: u64,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    buildings: Vec<BuildingType>,
}

/// The ordered, read-only table of building type definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<BuildingType>,
}

impl Catalog {
    /// Build a catalog from an ordered list of entries, validating that
    /// ids are unique and build durations are positive.
    pub fn new(entries: Vec<BuildingType>) -> GameResult<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(GameError::InvalidCatalog {
                    reason: format!("entry {i} has an empty id"),
                });
            }
            if entry.build_time_secs == 0 {
                return Err(GameError::InvalidCatalog {
                    reason: format!("'{}' has a zero build duration", entry.id),
                });
            }
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(GameError::InvalidCatalog {
                    reason: format!("duplicate building id '{}'", entry.id),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: CatalogFile = serde_json::from_str(&content)?;
        Catalog::new(file.buildings).map_err(Into::into)
    }

    /// The original game's six buildings.
    pub fn standard() -> Self {
        let entries = vec![
            BuildingType {
                id: "main_building".into(),
                name: "Main Building".into(),
                description: "The home of the village architects. The higher the level, \
                              the faster other buildings are constructed."
                    .into(),
                cost: cost(70, 40, 60, 20),
                build_time_secs: 10,
            },
            BuildingType {
                id: "warehouse".into(),
                name: "Warehouse".into(),
                description: "The resources wood, clay and iron are stored in your warehouse."
                    .into(),
                cost: cost(130, 160, 90, 40),
                build_time_secs: 15,
            },
            BuildingType {
                id: "granary".into(),
                name: "Granary".into(),
                description: "The crop produced by your farms is stored in the granary.".into(),
                cost: cost(80, 100, 70, 20),
                build_time_secs: 15,
            },
            BuildingType {
                id: "barracks".into(),
                name: "Barracks".into(),
                description: "All foot soldiers are trained in the barracks.".into(),
                cost: cost(210, 140, 260, 120),
                build_time_secs: 30,
            },
            BuildingType {
                id: "marketplace".into(),
                name: "Marketplace".into(),
                description: "At the marketplace you can trade resources with other players."
                    .into(),
                cost: cost(80, 70, 120, 70),
                build_time_secs: 20,
            },
            BuildingType {
                id: "smithy".into(),
                name: "Smithy".into(),
                description: "The weapons and armor of your warriors are improved in the smithy."
                    .into(),
                cost: cost(170, 200, 380, 130),
                build_time_secs: 40,
            },
        ];
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&BuildingType> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cost(wood: u32, clay: u32, iron: u32, crop: u32) -> HashMap<ResourceKind, u32> {
    [
        (ResourceKind::Wood, wood),
        (ResourceKind::Clay, clay),
        (ResourceKind::Iron, iron),
        (ResourceKind::Crop, crop),
    ]
    .into()
}
