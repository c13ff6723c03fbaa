use std::path::PathBuf;

use anyhow::Context;

use loadplan_core::{AircraftProfile, CatalogEntry, PlannerConfig};
use loadplan_engine::{LoadPlan, compute_load_plan};

use crate::OutputFormat;
use crate::commands::aircraft::load_db_or_empty;
use crate::render;

pub struct PlanRequest {
    pub units: PathBuf,
    pub aircraft: Option<String>,
    pub main_slots: Option<usize>,
    pub lower_slots: Option<usize>,
    pub save: bool,
    pub format: OutputFormat,
    pub color: bool,
}

/// Everything a report needs after a planning run.
pub struct PlanRun {
    pub aircraft: AircraftProfile,
    pub catalog: Vec<CatalogEntry>,
    pub plan: LoadPlan,
}

pub fn plan(request: &PlanRequest, config: &PlannerConfig) -> anyhow::Result<()> {
    let run = run(request, config)?;

    match request.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&run.plan)?);
        }
        OutputFormat::Text => {
            let report =
                render::format_report(&run.plan, &run.aircraft, &run.catalog, request.color);
            print!("{report}");
        }
    }

    if request.save {
        let path = &config.paths.report;
        let report = render::format_report(&run.plan, &run.aircraft, &run.catalog, false);
        std::fs::write(path, report)
            .with_context(|| format!("failed to save load plan to {}", path.display()))?;
        eprintln!("Load plan saved to {}", path.display());
    }

    Ok(())
}

/// Load reference data and units, then place every unit.
pub fn run(request: &PlanRequest, config: &PlannerConfig) -> anyhow::Result<PlanRun> {
    let catalog = loadplan_core::load_catalog(&config.paths.catalog).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ULD catalog unavailable, every unit is one slot wide");
        Vec::new()
    });
    let aircraft = resolve_aircraft(request, config)?;
    let units = loadplan_core::load_units(&request.units, &catalog)
        .with_context(|| format!("failed to load units from {}", request.units.display()))?;

    tracing::info!(
        model = %aircraft.model,
        main_slots = aircraft.main_deck.slots,
        lower_slots = aircraft.lower_deck.slots,
        units = units.len(),
        "planning load"
    );

    let plan = compute_load_plan(&aircraft, &catalog, &units, config);
    Ok(PlanRun {
        aircraft,
        catalog,
        plan,
    })
}

fn resolve_aircraft(
    request: &PlanRequest,
    config: &PlannerConfig,
) -> anyhow::Result<AircraftProfile> {
    let model = request.aircraft.as_deref().unwrap_or_default();
    if !model.is_empty() {
        let mut db = load_db_or_empty(&config.paths.aircraft_db);
        if let Some(ac) = db.remove(model) {
            tracing::info!(model, "using aircraft database entry");
            return Ok(ac);
        }
    }

    if request.main_slots.is_none() && request.lower_slots.is_none() {
        if model.is_empty() {
            anyhow::bail!("no aircraft given: pass --aircraft MODEL or --main-slots/--lower-slots");
        }
        anyhow::bail!(
            "aircraft {model} not found in {}; \
             pass --main-slots/--lower-slots for a custom aircraft",
            config.paths.aircraft_db.display()
        );
    }

    tracing::info!(model, "using custom aircraft");
    Ok(AircraftProfile::custom(
        model,
        request.main_slots.unwrap_or(0),
        request.lower_slots.unwrap_or(0),
    ))
}
