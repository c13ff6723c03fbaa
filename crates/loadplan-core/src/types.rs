//! Shared types used across Loadplan crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two cargo decks of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckId {
    Main,
    Lower,
}

impl DeckId {
    /// Both decks, in enumeration order.
    pub const ALL: [DeckId; 2] = [DeckId::Main, DeckId::Lower];

    pub fn name(&self) -> &'static str {
        match self {
            DeckId::Main => "main",
            DeckId::Lower => "lower",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DeckId::Main => "Main",
            DeckId::Lower => "Lower",
        }
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which deck(s) a unit may be loaded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckAffinity {
    #[serde(alias = "MAIN", alias = "Main")]
    Main,
    #[serde(alias = "LOWER", alias = "Lower")]
    Lower,
    #[default]
    #[serde(alias = "ANY", alias = "Any")]
    Any,
}

impl DeckAffinity {
    /// Interpret a free-text catalog deck hint. Anything unrecognised is `Any`.
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_ascii_lowercase().as_str() {
            "main" => DeckAffinity::Main,
            "lower" => DeckAffinity::Lower,
            _ => DeckAffinity::Any,
        }
    }

    pub fn admits(&self, deck: DeckId) -> bool {
        match self {
            DeckAffinity::Main => deck == DeckId::Main,
            DeckAffinity::Lower => deck == DeckId::Lower,
            DeckAffinity::Any => true,
        }
    }
}

/// Restriction class of a slot, fixed at pool construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotClass {
    #[default]
    Normal,
    ForeRestricted,
    AftRestricted,
}

impl SlotClass {
    pub fn is_restricted(&self) -> bool {
        !matches!(self, SlotClass::Normal)
    }

    /// Single-letter marker used in layouts for free restricted slots.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            SlotClass::Normal => None,
            SlotClass::ForeRestricted => Some("N"),
            SlotClass::AftRestricted => Some("T"),
        }
    }
}

/// Geometry of a single deck as described by an aircraft profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProfile {
    #[serde(default)]
    pub slots: usize,
    /// Presentation hint for layout rendering; not used by placement.
    #[serde(default = "default_row_length")]
    pub row_length: usize,
    /// Balance arm per slot. Regenerated when the length disagrees with `slots`.
    #[serde(default)]
    pub slot_arms: Vec<f64>,
    /// Number of fore-restricted slots. `None` falls back to the pool default.
    #[serde(default, rename = "noseSlots")]
    pub fore_restricted: Option<usize>,
    /// Number of aft-restricted slots. `None` falls back to the pool default.
    #[serde(default, rename = "tailSlots")]
    pub aft_restricted: Option<usize>,
}

fn default_row_length() -> usize {
    8
}

impl Default for DeckProfile {
    fn default() -> Self {
        Self {
            slots: 0,
            row_length: default_row_length(),
            slot_arms: Vec::new(),
            fore_restricted: None,
            aft_restricted: None,
        }
    }
}

impl DeckProfile {
    /// A deck with `slots` positions and nothing else specified.
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots,
            ..Self::default()
        }
    }
}

/// Aircraft geometry consumed by the slot pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftProfile {
    #[serde(default)]
    pub model: String,
    /// Maximum take-off weight in kg. Informational only; a value that is
    /// not a non-negative number reads as 0 and fractions are truncated.
    #[serde(default, deserialize_with = "lenient_mtw")]
    pub mtw: u64,
    #[serde(default)]
    pub main_deck: DeckProfile,
    #[serde(default)]
    pub lower_deck: DeckProfile,
}

fn lenient_mtw<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map_or(0, |v| v as u64))
}

impl AircraftProfile {
    /// A custom aircraft described only by its slot counts.
    pub fn custom(model: &str, main_slots: usize, lower_slots: usize) -> Self {
        Self {
            model: if model.is_empty() {
                "CUSTOM".to_string()
            } else {
                model.to_string()
            },
            mtw: 0,
            main_deck: DeckProfile::with_slots(main_slots),
            lower_deck: DeckProfile::with_slots(lower_slots),
        }
    }

    pub fn deck(&self, deck: DeckId) -> &DeckProfile {
        match deck {
            DeckId::Main => &self.main_deck,
            DeckId::Lower => &self.lower_deck,
        }
    }
}

/// A ULD catalog entry. Catalog order is significant: the first matching
/// prefix wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Prefix", default)]
    pub prefix: String,
    #[serde(rename = "ULD Type", default)]
    pub uld_type: String,
    #[serde(rename = "Width (slots)", default = "default_width")]
    pub width_slots: usize,
    #[serde(rename = "Deck", default = "default_deck_hint")]
    pub deck_hint: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}

fn default_width() -> usize {
    1
}

fn default_deck_hint() -> String {
    "Any".to_string()
}

impl CatalogEntry {
    pub fn new(prefix: &str, uld_type: &str, width_slots: usize) -> Self {
        Self {
            prefix: prefix.to_string(),
            uld_type: uld_type.to_string(),
            width_slots,
            deck_hint: default_deck_hint(),
            notes: String::new(),
        }
    }
}

/// A unit to be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRequest {
    pub id: String,
    /// Total weight in kg.
    pub weight: f64,
    #[serde(default)]
    pub affinity: DeckAffinity,
    #[serde(default = "default_allow_restricted")]
    pub allow_restricted: bool,
}

fn default_allow_restricted() -> bool {
    true
}

impl UnitRequest {
    pub fn new(id: &str, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            weight,
            affinity: DeckAffinity::Any,
            allow_restricted: true,
        }
    }

    pub fn on(self, affinity: DeckAffinity) -> Self {
        Self { affinity, ..self }
    }

    pub fn restricted(self, allow_restricted: bool) -> Self {
        Self {
            allow_restricted,
            ..self
        }
    }
}
