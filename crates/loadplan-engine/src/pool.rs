//! Slot pool: the addressable positions of both decks.
//!
//! Slots are stored per deck in index order, so a slot's position in its
//! deck vector is its index. Arms and restriction classes are fixed when
//! the pool is built; only occupancy changes afterwards, and only through
//! the placement engine.

use serde::Serialize;
use tracing::info;

use loadplan_core::config::PlannerConfig;
use loadplan_core::{AircraftProfile, DeckId, DeckProfile, SlotClass};

/// The unit occupying a slot and its share of the unit's weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Occupant {
    pub unit_id: String,
    pub weight_share: f64,
}

/// A single position on a deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    deck: DeckId,
    index: usize,
    arm: f64,
    class: SlotClass,
    occupant: Option<Occupant>,
}

impl Slot {
    pub fn deck(&self) -> DeckId {
        self.deck
    }

    /// Zero-based index within the deck.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn arm(&self) -> f64 {
        self.arm
    }

    pub fn class(&self) -> SlotClass {
        self.class
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Linearly interpolated arms from `fore` to `aft` over `n` slots.
///
/// A single slot sits at the midpoint.
pub fn interpolate_arms(n: usize, fore: f64, aft: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![(fore + aft) / 2.0],
        _ => (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                fore * (1.0 - t) + aft * t
            })
            .collect(),
    }
}

/// Slots of both decks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotPool {
    main: Vec<Slot>,
    lower: Vec<Slot>,
}

impl SlotPool {
    /// Build the pool for `aircraft`, regenerating arm lists whose length
    /// disagrees with the slot count and applying restriction defaults.
    pub fn build(aircraft: &AircraftProfile, config: &PlannerConfig) -> Self {
        let arms = &config.arms;
        let auto_restrict = config.restrictions.auto_restrict;
        Self {
            main: build_deck(
                DeckId::Main,
                &aircraft.main_deck,
                (arms.main_fore, arms.main_aft),
                auto_restrict,
            ),
            lower: build_deck(
                DeckId::Lower,
                &aircraft.lower_deck,
                (arms.lower_fore, arms.lower_aft),
                auto_restrict,
            ),
        }
    }

    pub fn deck(&self, deck: DeckId) -> &[Slot] {
        match deck {
            DeckId::Main => &self.main,
            DeckId::Lower => &self.lower,
        }
    }

    fn deck_mut(&mut self, deck: DeckId) -> &mut [Slot] {
        match deck {
            DeckId::Main => &mut self.main,
            DeckId::Lower => &mut self.lower,
        }
    }

    /// All slots, main deck first, each deck in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.main.iter().chain(self.lower.iter())
    }

    pub fn len(&self) -> usize {
        self.main.len() + self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Free slots of one deck, in index order.
    pub fn free_slots(&self, deck: DeckId) -> impl Iterator<Item = &Slot> {
        self.deck(deck).iter().filter(|s| s.is_free())
    }

    /// Unweighted mean arm of every slot on both decks.
    pub fn mean_arm(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().map(Slot::arm).sum::<f64>() / self.len() as f64)
    }

    /// Mark `width` slots starting at `start` as held by `unit_id`, each
    /// carrying `weight_share`.
    pub(crate) fn occupy(
        &mut self,
        deck: DeckId,
        start: usize,
        width: usize,
        unit_id: &str,
        weight_share: f64,
    ) {
        for slot in &mut self.deck_mut(deck)[start..start + width] {
            debug_assert!(slot.is_free(), "slot {}[{}] already occupied", deck, slot.index);
            slot.occupant = Some(Occupant {
                unit_id: unit_id.to_string(),
                weight_share,
            });
        }
    }
}

fn build_deck(
    deck: DeckId,
    profile: &DeckProfile,
    (fore, aft): (f64, f64),
    auto_restrict: bool,
) -> Vec<Slot> {
    let n = profile.slots;
    let arms = if profile.slot_arms.len() == n {
        profile.slot_arms.clone()
    } else {
        info!(
            deck = %deck,
            slots = n,
            supplied = profile.slot_arms.len(),
            fore,
            aft,
            "arm list does not match slot count, interpolating"
        );
        interpolate_arms(n, fore, aft)
    };

    let default_count = usize::from(auto_restrict && n > 0);
    let fore_count = profile.fore_restricted.unwrap_or(default_count);
    let aft_count = profile.aft_restricted.unwrap_or(default_count);

    arms.into_iter()
        .enumerate()
        .map(|(index, arm)| {
            let class = if index < fore_count {
                SlotClass::ForeRestricted
            } else if index >= n.saturating_sub(aft_count) {
                SlotClass::AftRestricted
            } else {
                SlotClass::Normal
            };
            Slot {
                deck,
                index,
                arm,
                class,
                occupant: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aircraft(main: DeckProfile, lower: DeckProfile) -> AircraftProfile {
        AircraftProfile {
            model: "TEST".to_string(),
            mtw: 0,
            main_deck: main,
            lower_deck: lower,
        }
    }

    fn classes(slots: &[Slot]) -> Vec<SlotClass> {
        slots.iter().map(Slot::class).collect()
    }

    #[test]
    fn interpolation_endpoints_and_midpoint() {
        assert!(interpolate_arms(0, 10.0, 40.0).is_empty());
        assert_eq!(interpolate_arms(1, 10.0, 40.0), vec![25.0]);
        assert_eq!(interpolate_arms(4, 10.0, 40.0), vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn explicit_arms_kept_when_lengths_match() {
        let mut main = DeckProfile::with_slots(3);
        main.slot_arms = vec![1.0, 2.0, 4.0];
        let pool = SlotPool::build(
            &aircraft(main, DeckProfile::default()),
            &PlannerConfig::default(),
        );
        let arms: Vec<f64> = pool.deck(DeckId::Main).iter().map(Slot::arm).collect();
        assert_eq!(arms, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn mismatched_arms_regenerated_per_deck() {
        let mut main = DeckProfile::with_slots(3);
        main.slot_arms = vec![1.0, 2.0];
        let lower = DeckProfile::with_slots(2);
        let pool = SlotPool::build(&aircraft(main, lower), &PlannerConfig::default());

        let main_arms: Vec<f64> = pool.deck(DeckId::Main).iter().map(Slot::arm).collect();
        let lower_arms: Vec<f64> = pool.deck(DeckId::Lower).iter().map(Slot::arm).collect();
        assert_eq!(main_arms, vec![18.0, 27.0, 36.0]);
        assert_eq!(lower_arms, vec![12.0, 28.0]);
    }

    #[test]
    fn default_restrictions_mark_first_and_last() {
        let pool = SlotPool::build(
            &aircraft(DeckProfile::with_slots(4), DeckProfile::with_slots(1)),
            &PlannerConfig::default(),
        );
        assert_eq!(
            classes(pool.deck(DeckId::Main)),
            vec![
                SlotClass::ForeRestricted,
                SlotClass::Normal,
                SlotClass::Normal,
                SlotClass::AftRestricted
            ]
        );
        // A single slot is fore before it is aft.
        assert_eq!(classes(pool.deck(DeckId::Lower)), vec![SlotClass::ForeRestricted]);
    }

    #[test]
    fn explicit_counts_override_default() {
        let mut main = DeckProfile::with_slots(5);
        main.fore_restricted = Some(2);
        main.aft_restricted = Some(0);
        let pool = SlotPool::build(
            &aircraft(main, DeckProfile::default()),
            &PlannerConfig::default(),
        );
        assert_eq!(
            classes(pool.deck(DeckId::Main)),
            vec![
                SlotClass::ForeRestricted,
                SlotClass::ForeRestricted,
                SlotClass::Normal,
                SlotClass::Normal,
                SlotClass::Normal
            ]
        );
    }

    #[test]
    fn oversized_restriction_counts_cover_whole_deck() {
        let main: DeckProfile =
            serde_json::from_str(r#"{"slots": 4, "tailSlots": 18446744073709551615}"#).unwrap();
        let mut lower = DeckProfile::with_slots(2);
        lower.fore_restricted = Some(usize::MAX);
        lower.aft_restricted = Some(usize::MAX);
        let pool = SlotPool::build(&aircraft(main, lower), &PlannerConfig::default());

        assert_eq!(
            classes(pool.deck(DeckId::Main)),
            vec![
                SlotClass::ForeRestricted,
                SlotClass::AftRestricted,
                SlotClass::AftRestricted,
                SlotClass::AftRestricted
            ]
        );
        assert!(pool.deck(DeckId::Lower).iter().all(|s| s.class() == SlotClass::ForeRestricted));
    }

    #[test]
    fn auto_restrict_can_be_disabled() {
        let mut config = PlannerConfig::default();
        config.restrictions.auto_restrict = false;
        let pool = SlotPool::build(
            &aircraft(DeckProfile::with_slots(3), DeckProfile::default()),
            &config,
        );
        assert!(pool.iter().all(|s| s.class() == SlotClass::Normal));
    }

    #[test]
    fn pool_starts_empty_and_indexed() {
        let pool = SlotPool::build(
            &aircraft(DeckProfile::with_slots(3), DeckProfile::with_slots(2)),
            &PlannerConfig::default(),
        );
        assert_eq!(pool.len(), 5);
        assert!(pool.iter().all(Slot::is_free));
        for deck in DeckId::ALL {
            for (i, slot) in pool.deck(deck).iter().enumerate() {
                assert_eq!(slot.index(), i);
                assert_eq!(slot.deck(), deck);
            }
        }
    }

    #[test]
    fn mean_arm_spans_both_decks() {
        let mut main = DeckProfile::with_slots(2);
        main.slot_arms = vec![10.0, 20.0];
        let mut lower = DeckProfile::with_slots(2);
        lower.slot_arms = vec![30.0, 40.0];
        let pool = SlotPool::build(&aircraft(main, lower), &PlannerConfig::default());
        assert_eq!(pool.mean_arm(), Some(25.0));

        let empty = SlotPool::build(&AircraftProfile::default(), &PlannerConfig::default());
        assert_eq!(empty.mean_arm(), None);
    }

    #[test]
    fn occupy_marks_span_and_free_view_follows() {
        let mut pool = SlotPool::build(
            &aircraft(DeckProfile::with_slots(4), DeckProfile::default()),
            &PlannerConfig::default(),
        );
        pool.occupy(DeckId::Main, 1, 2, "PMC1", 50.0);

        let free: Vec<usize> = pool.free_slots(DeckId::Main).map(Slot::index).collect();
        assert_eq!(free, vec![0, 3]);
        let occupant = pool.deck(DeckId::Main)[2].occupant().unwrap();
        assert_eq!(occupant.unit_id, "PMC1");
        assert_eq!(occupant.weight_share, 50.0);
    }
}
