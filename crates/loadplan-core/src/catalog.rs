//! Reference-data readers: aircraft database, ULD catalog, unit manifest.
//!
//! The aircraft database and the ULD catalog are JSON arrays. Malformed
//! entries inside an otherwise valid array are skipped with a warning so a
//! single bad record never hides the rest of the catalog. The unit manifest
//! is TOML (`[[units]]`) or JSON, chosen by file extension, and is strict.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{CatalogError, CatalogResult};
use crate::types::{AircraftProfile, CatalogEntry, DeckAffinity, UnitRequest};

/// Aircraft profiles indexed by model name.
pub type AircraftDb = BTreeMap<String, AircraftProfile>;

/// First catalog entry whose prefix is a literal prefix of `unit_id`.
pub fn match_entry<'a>(catalog: &'a [CatalogEntry], unit_id: &str) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|e| unit_id.starts_with(e.prefix.as_str()))
}

pub fn load_aircraft_db(path: &Path) -> CatalogResult<AircraftDb> {
    let entries: Vec<AircraftProfile> = read_json_array(path)?;
    let mut db = AircraftDb::new();
    for aircraft in entries {
        if aircraft.model.is_empty() {
            tracing::warn!(path = %path.display(), "skipping aircraft entry without a model");
            continue;
        }
        db.insert(aircraft.model.clone(), aircraft);
    }
    tracing::debug!(path = %path.display(), count = db.len(), "loaded aircraft database");
    Ok(db)
}

pub fn load_catalog(path: &Path) -> CatalogResult<Vec<CatalogEntry>> {
    let catalog: Vec<CatalogEntry> = read_json_array(path)?;
    tracing::debug!(path = %path.display(), count = catalog.len(), "loaded ULD catalog");
    Ok(catalog)
}

/// Read a JSON array, deserializing each element on its own and skipping
/// the ones that don't fit `T`.
fn read_json_array<T: DeserializeOwned>(path: &Path) -> CatalogResult<Vec<T>> {
    let content = read_file(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let serde_json::Value::Array(items) = value else {
        return Err(CatalogError::NotAnArray(path.to_path_buf()));
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(entry) => out.push(entry),
            Err(e) => tracing::warn!(
                path = %path.display(),
                index,
                error = %e,
                "skipping malformed entry"
            ),
        }
    }
    Ok(out)
}

fn read_file(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// One unit as written in a manifest. Affinity may be left to the catalog.
#[derive(Debug, Deserialize)]
struct UnitEntry {
    id: String,
    weight: f64,
    affinity: Option<DeckAffinity>,
    allow_restricted: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct TomlManifest {
    #[serde(default)]
    units: Vec<UnitEntry>,
}

/// Load a unit manifest, filling in missing affinities from the catalog's
/// deck hints.
pub fn load_units(path: &Path, catalog: &[CatalogEntry]) -> CatalogResult<Vec<UnitRequest>> {
    let content = read_file(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let entries: Vec<UnitEntry> = if is_json {
        serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        let manifest: TomlManifest = toml::from_str(&content).map_err(|source| CatalogError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        manifest.units
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| resolve_unit(index + 1, entry, catalog))
        .collect()
}

fn resolve_unit(
    index: usize,
    entry: UnitEntry,
    catalog: &[CatalogEntry],
) -> CatalogResult<UnitRequest> {
    let id = entry.id.trim().to_string();
    if id.is_empty() {
        return Err(CatalogError::InvalidUnit {
            index,
            reason: "empty id".to_string(),
        });
    }
    if !entry.weight.is_finite() || entry.weight < 0.0 {
        return Err(CatalogError::InvalidUnit {
            index,
            reason: format!("{id}: weight must be a non-negative number, got {}", entry.weight),
        });
    }

    let affinity = entry.affinity.unwrap_or_else(|| {
        match_entry(catalog, &id)
            .map(|e| DeckAffinity::from_hint(&e.deck_hint))
            .unwrap_or_default()
    });

    Ok(UnitRequest {
        id,
        weight: entry.weight,
        affinity,
        allow_restricted: entry.allow_restricted.unwrap_or(true),
    })
}
