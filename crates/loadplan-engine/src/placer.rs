//! Placement engine: commits units to slots one at a time.
//!
//! For every unit, in input order, the engine:
//! 1. Resolves its slot width from the catalog (width)
//! 2. Picks the best-scoring contiguous window (scorer)
//! 3. Occupies that window and books the unit in the ledger
//!
//! Nothing is ever moved once placed. A unit with no feasible window is
//! recorded as unassigned and leaves the pool untouched.

use serde::Serialize;
use tracing::{debug, info, warn};

use loadplan_core::config::{PlannerConfig, TargetArm};
use loadplan_core::{AircraftProfile, CatalogEntry, UnitRequest};

use crate::ledger::{AssignmentRecord, Ledger};
use crate::pool::SlotPool;
use crate::scorer::{LoadTotals, best_span};
use crate::width::resolve_width;

/// The finished result of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadPlan {
    pub model: String,
    pub target_arm: f64,
    pub pool: SlotPool,
    pub ledger: Ledger,
}

impl LoadPlan {
    /// Record for `unit_id`, the first one if the id repeats.
    pub fn record(&self, unit_id: &str) -> Option<&AssignmentRecord> {
        self.ledger.records().iter().find(|r| r.unit_id == unit_id)
    }
}

pub struct PlacementEngine<'a> {
    catalog: &'a [CatalogEntry],
    pool: SlotPool,
    ledger: Ledger,
    target_arm: f64,
}

impl<'a> PlacementEngine<'a> {
    /// Wrap a freshly built pool. The target arm is fixed here for the
    /// whole run.
    pub fn new(pool: SlotPool, catalog: &'a [CatalogEntry], target: TargetArm) -> Self {
        let target_arm = match target {
            TargetArm::SlotMean => pool.mean_arm().unwrap_or(0.0),
            TargetArm::Fixed(arm) => arm,
        };
        Self {
            catalog,
            pool,
            ledger: Ledger::new(),
            target_arm,
        }
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn target_arm(&self) -> f64 {
        self.target_arm
    }

    /// Place a single unit and return its record.
    pub fn place(&mut self, unit: &UnitRequest) -> &AssignmentRecord {
        let width = resolve_width(self.catalog, &unit.id);
        let totals = LoadTotals {
            weight: self.ledger.total_weight(),
            moment: self.ledger.total_moment(),
        };

        match best_span(&self.pool, unit, width, totals, self.target_arm) {
            Some(span) => {
                let share = unit.weight / width as f64;
                let first_arm = self.pool.deck(span.deck)[span.start].arm();
                self.pool.occupy(span.deck, span.start, width, &unit.id, share);
                debug!(
                    unit = %unit.id,
                    deck = %span.deck,
                    start = span.start,
                    width,
                    score = span.score,
                    "placed unit"
                );
                self.ledger
                    .record_placed(&unit.id, unit.weight, width, span.deck, span.start, first_arm)
            }
            None => {
                warn!(
                    unit = %unit.id,
                    width,
                    affinity = ?unit.affinity,
                    allow_restricted = unit.allow_restricted,
                    "no feasible span, unit left unassigned"
                );
                self.ledger.record_unassigned(&unit.id, unit.weight, width)
            }
        }
    }

    pub fn finish(self, model: &str) -> LoadPlan {
        info!(
            model,
            placed = self.ledger.placed_count(),
            unassigned = self.ledger.unassigned_count(),
            total_weight = self.ledger.total_weight(),
            cg = ?self.ledger.centre_of_gravity(),
            "load plan complete"
        );
        LoadPlan {
            model: model.to_string(),
            target_arm: self.target_arm,
            pool: self.pool,
            ledger: self.ledger,
        }
    }
}

/// Build the slot pool for `aircraft` and place `units` in order.
pub fn compute_load_plan(
    aircraft: &AircraftProfile,
    catalog: &[CatalogEntry],
    units: &[UnitRequest],
    config: &PlannerConfig,
) -> LoadPlan {
    let pool = SlotPool::build(aircraft, config);
    let mut engine = PlacementEngine::new(pool, catalog, config.balance.target);
    for unit in units {
        engine.place(unit);
    }
    engine.finish(&aircraft.model)
}
