//! Span scoring for placement decisions.
//!
//! A unit of width `w` can go on any window of `w` index-contiguous slots
//! within one deck where every slot is:
//! - **Free**: not held by an earlier unit
//! - **On an admitted deck**: allowed by the unit's deck affinity
//! - **Permitted**: not restricted, unless the unit allows restricted slots
//!
//! Each window is scored by how far the load's mean arm would sit from the
//! target arm if the unit were placed there. Lower is better.

use serde::Serialize;

use loadplan_core::{DeckId, UnitRequest};

use crate::pool::{Slot, SlotPool};

/// A scored window of contiguous slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanCandidate {
    pub deck: DeckId,
    /// Index of the first slot of the window.
    pub start: usize,
    pub width: usize,
    /// Absolute distance between the resulting mean arm and the target.
    pub score: f64,
    /// Mean arm of the load if the unit were placed here.
    pub resulting_arm: f64,
}

/// Running totals of the load placed so far.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoadTotals {
    pub weight: f64,
    pub moment: f64,
}

fn is_eligible(slot: &Slot, unit: &UnitRequest) -> bool {
    slot.is_free()
        && unit.affinity.admits(slot.deck())
        && (unit.allow_restricted || !slot.class().is_restricted())
}

/// Start indices of every window of `width` eligible, index-contiguous
/// slots on `slots`, ascending.
fn window_starts(slots: &[Slot], unit: &UnitRequest, width: usize) -> Vec<usize> {
    let mut starts = Vec::new();
    if width == 0 {
        return starts;
    }
    let mut run = 0usize;
    for (i, slot) in slots.iter().enumerate() {
        if is_eligible(slot, unit) {
            run += 1;
            if run >= width {
                starts.push(i + 1 - width);
            }
        } else {
            run = 0;
        }
    }
    starts
}

/// Mean arm of the load after spreading `unit_weight` evenly over `span`.
///
/// With nothing to weigh, the window's own mean arm is used.
fn resulting_arm(span: &[Slot], unit_weight: f64, totals: LoadTotals) -> f64 {
    let arm_sum: f64 = span.iter().map(Slot::arm).sum();
    let total_weight = totals.weight + unit_weight;
    if total_weight > 0.0 {
        let share = unit_weight / span.len() as f64;
        (totals.moment + share * arm_sum) / total_weight
    } else {
        arm_sum / span.len() as f64
    }
}

/// Score every feasible window for `unit`, main deck first, each deck in
/// ascending start order.
pub fn score_spans(
    pool: &SlotPool,
    unit: &UnitRequest,
    width: usize,
    totals: LoadTotals,
    target_arm: f64,
) -> Vec<SpanCandidate> {
    let mut candidates = Vec::new();
    for deck in DeckId::ALL {
        if !unit.affinity.admits(deck) {
            continue;
        }
        let slots = pool.deck(deck);
        for start in window_starts(slots, unit, width) {
            let arm = resulting_arm(&slots[start..start + width], unit.weight, totals);
            candidates.push(SpanCandidate {
                deck,
                start,
                width,
                score: (arm - target_arm).abs(),
                resulting_arm: arm,
            });
        }
    }
    candidates
}

/// The lowest-scoring window. Ties keep the first one enumerated.
pub fn best_span(
    pool: &SlotPool,
    unit: &UnitRequest,
    width: usize,
    totals: LoadTotals,
    target_arm: f64,
) -> Option<SpanCandidate> {
    let mut best: Option<SpanCandidate> = None;
    for candidate in score_spans(pool, unit, width, totals, target_arm) {
        if best.as_ref().is_none_or(|b| candidate.score < b.score) {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadplan_core::config::PlannerConfig;
    use loadplan_core::{AircraftProfile, DeckAffinity, DeckProfile};

    fn deck(arms: &[f64]) -> DeckProfile {
        DeckProfile {
            slots: arms.len(),
            slot_arms: arms.to_vec(),
            fore_restricted: Some(0),
            aft_restricted: Some(0),
            ..DeckProfile::default()
        }
    }

    fn pool(main: &[f64], lower: &[f64]) -> SlotPool {
        let aircraft = AircraftProfile {
            model: "TEST".to_string(),
            mtw: 0,
            main_deck: deck(main),
            lower_deck: deck(lower),
        };
        SlotPool::build(&aircraft, &PlannerConfig::default())
    }

    #[test]
    fn windows_only_over_contiguous_eligible_slots() {
        let mut p = pool(&[1.0, 2.0, 3.0, 4.0, 5.0], &[]);
        p.occupy(DeckId::Main, 2, 1, "X", 1.0);
        let unit = UnitRequest::new("U", 10.0);

        let spans = score_spans(&p, &unit, 2, LoadTotals::default(), 3.0);
        let starts: Vec<usize> = spans.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 3]);
    }

    #[test]
    fn windows_never_cross_decks() {
        let p = pool(&[1.0], &[2.0]);
        let unit = UnitRequest::new("U", 10.0);
        assert!(score_spans(&p, &unit, 2, LoadTotals::default(), 1.5).is_empty());
    }

    #[test]
    fn affinity_filters_decks() {
        let p = pool(&[1.0, 2.0], &[3.0, 4.0]);
        let unit = UnitRequest::new("U", 10.0).on(DeckAffinity::Lower);
        let spans = score_spans(&p, &unit, 1, LoadTotals::default(), 0.0);
        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|c| c.deck == DeckId::Lower));
    }

    #[test]
    fn scores_against_target_with_existing_load() {
        let p = pool(&[10.0, 20.0, 30.0], &[]);
        let unit = UnitRequest::new("U", 100.0);
        // 100 kg already at arm 10: moment 1000.
        let totals = LoadTotals {
            weight: 100.0,
            moment: 1000.0,
        };
        let spans = score_spans(&p, &unit, 1, totals, 20.0);
        let arms: Vec<f64> = spans.iter().map(|c| c.resulting_arm).collect();
        assert_eq!(arms, vec![10.0, 15.0, 20.0]);

        let best = best_span(&p, &unit, 1, totals, 20.0).unwrap();
        assert_eq!(best.start, 2);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn wide_unit_spreads_weight_over_window() {
        let p = pool(&[10.0, 20.0, 30.0, 40.0], &[]);
        let unit = UnitRequest::new("U", 100.0);
        let spans = score_spans(&p, &unit, 2, LoadTotals::default(), 25.0);
        let arms: Vec<f64> = spans.iter().map(|c| c.resulting_arm).collect();
        assert_eq!(arms, vec![15.0, 25.0, 35.0]);
    }

    #[test]
    fn ties_keep_earliest_window() {
        let p = pool(&[10.0, 30.0], &[]);
        let unit = UnitRequest::new("U", 100.0);
        // Both windows are 10 away from 20.
        let best = best_span(&p, &unit, 1, LoadTotals::default(), 20.0).unwrap();
        assert_eq!(best.start, 0);
    }

    #[test]
    fn ties_across_decks_prefer_main() {
        let p = pool(&[20.0], &[20.0]);
        let unit = UnitRequest::new("U", 100.0);
        let best = best_span(&p, &unit, 1, LoadTotals::default(), 20.0).unwrap();
        assert_eq!(best.deck, DeckId::Main);
    }

    #[test]
    fn weightless_unit_on_empty_load_uses_window_arm() {
        let p = pool(&[10.0, 20.0, 30.0], &[]);
        let unit = UnitRequest::new("U", 0.0);
        let best = best_span(&p, &unit, 1, LoadTotals::default(), 20.0).unwrap();
        assert_eq!(best.start, 1);
        assert!(best.resulting_arm.is_finite());
    }

    #[test]
    fn no_window_when_too_wide() {
        let p = pool(&[10.0, 20.0, 30.0], &[]);
        let unit = UnitRequest::new("U", 100.0);
        assert!(best_span(&p, &unit, 4, LoadTotals::default(), 20.0).is_none());
    }
}
