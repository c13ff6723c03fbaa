//! Loadplan placement engine: ULD-to-slot assignment with balance scoring.
//!
//! This crate turns an aircraft profile, a ULD catalog and an ordered list
//! of units into a load plan. It performs no I/O; reading reference data
//! lives in `loadplan-core` and rendering lives in `loadplan-cli`.
//!
//! Placement is greedy and single-pass: each unit is committed to the best
//! span available at the time it is considered and is never moved again.
//!
//! # Components
//!
//! - **`width`** — Catalog prefix lookup for the number of slots a unit spans
//! - **`pool`** — Per-deck slots with balance arms and restriction classes
//! - **`scorer`** — Contiguous span enumeration and balance scoring
//! - **`placer`** — Placement engine (commits spans, drives the ledger)
//! - **`ledger`** — Per-unit outcomes and running weight/moment

pub mod ledger;
pub mod placer;
pub mod pool;
pub mod scorer;
pub mod width;

pub use ledger::{AssignmentRecord, Ledger, Outcome};
pub use placer::{LoadPlan, PlacementEngine, compute_load_plan};
pub use pool::{Occupant, Slot, SlotPool, interpolate_arms};
pub use scorer::{LoadTotals, SpanCandidate, best_span, score_spans};
pub use width::{DEFAULT_WIDTH, resolve_width};
