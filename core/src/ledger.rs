//! Resource ledger — amounts and per-hour production rates.
//!
//! RULE: amounts are stored as exact fractional values. Truncation for
//! display is a presentation concern and never happens here.

use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// The closed set of resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Clay,
    Iron,
    Crop,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Wood,
        ResourceKind::Clay,
        ResourceKind::Iron,
        ResourceKind::Crop,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Clay => "clay",
            ResourceKind::Iron => "iron",
            ResourceKind::Crop => "crop",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One resource: its current stock and production rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub amount: f64,
    pub production_per_hour: f64,
}

/// Holds one [`Resource`] per kind and advances amounts over elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    // Fixed order, one entry per ResourceKind::ALL member.
    resources: Vec<Resource>,
}

impl ResourceLedger {
    /// Build a ledger from explicit starting stocks and rates.
    ///
    /// NaN, infinite, or negative values are a configuration defect and
    /// are rejected here rather than handled at steady state.
    pub fn new(initial: Vec<Resource>) -> GameResult<Self> {
        for kind in ResourceKind::ALL {
            let count = initial.iter().filter(|r| r.kind == kind).count();
            if count != 1 {
                return Err(GameError::InvalidLedger {
                    reason: format!("expected exactly one '{kind}' entry, found {count}"),
                });
            }
        }
        for r in &initial {
            if !r.amount.is_finite() || r.amount < 0.0 {
                return Err(GameError::InvalidLedger {
                    reason: format!("'{}' has invalid amount {}", r.kind, r.amount),
                });
            }
            if !r.production_per_hour.is_finite() || r.production_per_hour < 0.0 {
                return Err(GameError::InvalidLedger {
                    reason: format!(
                        "'{}' has invalid production rate {}",
                        r.kind, r.production_per_hour
                    ),
                });
            }
        }
        Ok(Self { resources: initial })
    }

    /// The original game's starting economy: 750 of everything, 60/hour.
    pub fn standard() -> Self {
        let resources = ResourceKind::ALL
            .into_iter()
            .map(|kind| Resource {
                kind,
                amount: 750.0,
                production_per_hour: 60.0,
            })
            .collect();
        Self { resources }
    }

    pub fn get(&self, kind: ResourceKind) -> &Resource {
        // Constructors guarantee one entry per kind.
        self.resources
            .iter()
            .find(|r| r.kind == kind)
            .unwrap_or_else(|| unreachable!("ledger missing '{kind}'"))
    }

    pub fn amount(&self, kind: ResourceKind) -> f64 {
        self.get(kind).amount
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Advance every resource by `production_per_hour * elapsed_ms / 3_600_000`.
    ///
    /// `elapsed_ms` must be the time since the previous accrual call, not
    /// since an arbitrary epoch. Zero elapsed time is a no-op.
    pub fn accrue(&mut self, elapsed_ms: u64) {
        if elapsed_ms == 0 {
            return;
        }
        let hours = elapsed_ms as f64 / MS_PER_HOUR;
        for r in &mut self.resources {
            r.amount += r.production_per_hour * hours;
        }
    }

    /// Check a cost table against current stocks. Returns the first shortfall.
    pub fn shortfall(&self, cost: &HashMap<ResourceKind, u32>) -> Option<(ResourceKind, u32, f64)> {
        for kind in ResourceKind::ALL {
            let required = cost.get(&kind).copied().unwrap_or(0);
            let available = self.amount(kind);
            if available < required as f64 {
                return Some((kind, required, available));
            }
        }
        None
    }

    /// Deduct a cost table from current stocks.
    ///
    /// Callers must have checked [`shortfall`](Self::shortfall) under the
    /// same lock; amounts are clamped at zero regardless.
    pub fn debit(&mut self, cost: &HashMap<ResourceKind, u32>) {
        for r in &mut self.resources {
            if let Some(required) = cost.get(&r.kind) {
                r.amount = (r.amount - *required as f64).max(0.0);
            }
        }
    }
}
