//! Assignment ledger: per-unit outcomes and running weight/moment.

use std::fmt;

use serde::Serialize;

use loadplan_core::DeckId;

/// Where a unit ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Placed { deck: DeckId, start: usize },
    Unassigned,
}

impl Outcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Outcome::Placed { .. })
    }
}

impl fmt::Display for Outcome {
    /// `main[3]` with a 1-based slot number, or `UNASSIGNED`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Placed { deck, start } => write!(f, "{}[{}]", deck, start + 1),
            Outcome::Unassigned => f.write_str("UNASSIGNED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRecord {
    pub unit_id: String,
    pub weight: f64,
    /// Resolved slot width.
    pub width: usize,
    pub outcome: Outcome,
}

/// Append-only record of a planning run, in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Ledger {
    total_weight: f64,
    total_moment: f64,
    records: Vec<AssignmentRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placement. The unit's whole weight is booked at the arm of
    /// the first slot of its span.
    pub(crate) fn record_placed(
        &mut self,
        unit_id: &str,
        weight: f64,
        width: usize,
        deck: DeckId,
        start: usize,
        first_arm: f64,
    ) -> &AssignmentRecord {
        self.total_weight += weight;
        self.total_moment += weight * first_arm;
        self.push(AssignmentRecord {
            unit_id: unit_id.to_string(),
            weight,
            width,
            outcome: Outcome::Placed { deck, start },
        })
    }

    pub(crate) fn record_unassigned(
        &mut self,
        unit_id: &str,
        weight: f64,
        width: usize,
    ) -> &AssignmentRecord {
        self.push(AssignmentRecord {
            unit_id: unit_id.to_string(),
            weight,
            width,
            outcome: Outcome::Unassigned,
        })
    }

    fn push(&mut self, record: AssignmentRecord) -> &AssignmentRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn total_moment(&self) -> f64 {
        self.total_moment
    }

    pub fn records(&self) -> &[AssignmentRecord] {
        &self.records
    }

    /// `moment / weight`, or `None` while nothing with weight is loaded.
    pub fn centre_of_gravity(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.total_moment / self.total_weight)
    }

    pub fn placed_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_placed()).count()
    }

    pub fn unassigned_count(&self) -> usize {
        self.records.len() - self.placed_count()
    }
}
