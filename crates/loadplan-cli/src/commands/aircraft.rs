use std::path::Path;

use loadplan_core::AircraftDb;

/// Aircraft database, or an empty one if it can't be read.
pub fn load_db_or_empty(path: &Path) -> AircraftDb {
    loadplan_core::load_aircraft_db(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "aircraft database unavailable, continuing without it");
        AircraftDb::new()
    })
}

pub fn list(path: &Path) -> anyhow::Result<()> {
    let db = load_db_or_empty(path);
    if db.is_empty() {
        println!("No aircraft in {}", path.display());
        return Ok(());
    }

    println!("Aircraft in DB:");
    for (model, ac) in &db {
        println!(
            " - {model:<12} main {:>2} slots, lower {:>2} slots, MTW {} kg",
            ac.main_deck.slots, ac.lower_deck.slots, ac.mtw
        );
    }
    Ok(())
}
