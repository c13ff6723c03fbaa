//! Human-readable load plan: assignment table, deck layouts, summary.

use std::fmt::Write as _;
use std::ops::Range;

use loadplan_core::catalog::match_entry;
use loadplan_core::{AircraftProfile, CatalogEntry, DeckId, DeckProfile};
use loadplan_engine::{LoadPlan, Slot};

/// Characters between two box borders.
const CELL_WIDTH: usize = 10;
/// Longest occupant label that fits in a cell.
const LABEL_WIDTH: usize = CELL_WIDTH - 1;

const RESET: &str = "\x1b[0m";

/// ANSI colour for a ULD type label.
fn type_color(uld_type: &str) -> Option<&'static str> {
    let color = match uld_type {
        "LD1" | "M1H" => "\x1b[34m",
        "LD2" | "M1" => "\x1b[36m",
        "LD3" | "LD3-45" => "\x1b[32m",
        "LD4" | "M6" => "\x1b[35m",
        "LD6" => "\x1b[33m",
        "LD7" => "\x1b[31m",
        "LD8" => "\x1b[1m\x1b[36m",
        "LD9" => "\x1b[1m\x1b[32m",
        "LD11" => "\x1b[1m\x1b[31m",
        "LD26" => "\x1b[1m\x1b[35m",
        "LD39" => "\x1b[1m\x1b[33m",
        _ => return None,
    };
    Some(color)
}

pub fn format_report(
    plan: &LoadPlan,
    aircraft: &AircraftProfile,
    catalog: &[CatalogEntry],
    color: bool,
) -> String {
    let mut out = String::new();
    out.push_str(&format_assignments(plan));
    for deck in DeckId::ALL {
        out.push('\n');
        out.push_str(&format_deck(
            deck,
            aircraft.deck(deck),
            plan.pool.deck(deck),
            catalog,
            color,
        ));
    }
    out.push('\n');
    out.push_str(&format_summary(plan, aircraft));
    out
}

pub fn format_assignments(plan: &LoadPlan) -> String {
    let mut out = String::new();
    out.push_str("=== Assignment Results ===\n");
    let _ = writeln!(out, "{:<12}{:<22}{:<10}", "ULD ID", "Assigned Slot", "Weight(kg)");
    let _ = writeln!(out, "{}", "-".repeat(46));
    for record in plan.ledger.records() {
        let _ = writeln!(
            out,
            "{:<12}{:<22}{:<10}",
            record.unit_id,
            record.outcome.to_string(),
            record.weight
        );
    }
    out
}

/// Rows of the deck drawing: the fore slot alone, rows of up to three, the
/// aft slot alone.
fn layout_rows(n: usize) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    if n == 0 {
        return rows;
    }
    rows.push(0..1);
    let mut idx = 1;
    while idx + 1 < n {
        let size = (n - 1 - idx).min(3);
        rows.push(idx..idx + size);
        idx += size;
    }
    if idx < n {
        rows.push(idx..n);
    }
    rows
}

/// Occupant label (`id[type]`) or restriction marker, padded to the cell.
fn slot_label(slot: &Slot, catalog: &[CatalogEntry], color: bool) -> String {
    let Some(occupant) = slot.occupant() else {
        let text = slot.class().marker().map(|m| format!("  {m}")).unwrap_or_default();
        return format!("{text:<CELL_WIDTH$}");
    };

    let entry = match_entry(catalog, &occupant.unit_id);
    let mut text = occupant.unit_id.clone();
    if let Some(e) = entry.filter(|e| !e.uld_type.is_empty()) {
        let _ = write!(text, "[{}]", e.uld_type);
    }
    let text: String = text.chars().take(LABEL_WIDTH).collect();
    let padding = " ".repeat(CELL_WIDTH - text.chars().count());

    match entry.and_then(|e| type_color(&e.uld_type)).filter(|_| color) {
        Some(code) => format!("{code}{text}{RESET}{padding}"),
        None => format!("{text}{padding}"),
    }
}

fn row_line(pad: &str, cells: impl Iterator<Item = String>, sep: char) -> String {
    let mut line = pad.to_string();
    for cell in cells {
        line.push(sep);
        line.push_str(&cell);
    }
    line.push(sep);
    line.push('\n');
    line
}

pub fn format_deck(
    deck: DeckId,
    profile: &DeckProfile,
    slots: &[Slot],
    catalog: &[CatalogEntry],
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} Deck Load Plan (slots={}) ===", deck.title(), slots.len());

    let box_width = CELL_WIDTH + 1;
    for range in layout_rows(slots.len()) {
        let row = &slots[range];
        let spare = (profile.row_length * box_width).saturating_sub(row.len() * box_width);
        let pad = " ".repeat(spare / 2);
        let border = || row.iter().map(|_| "-".repeat(CELL_WIDTH));

        out.push_str(&row_line(&pad, border(), '+'));
        out.push_str(&row_line(&pad, row.iter().map(|s| slot_label(s, catalog, color)), '|'));
        out.push_str(&row_line(
            &pad,
            row.iter().map(|s| format!("{:<CELL_WIDTH$}", format!("#{}", s.index() + 1))),
            '|',
        ));
        out.push_str(&row_line(
            &pad,
            row.iter().map(|s| {
                let weight = s
                    .occupant()
                    .map(|o| (o.weight_share as i64).to_string())
                    .unwrap_or_default();
                format!("{weight:<CELL_WIDTH$}")
            }),
            '|',
        ));
        out.push_str(&row_line(&pad, border(), '+'));
    }
    out
}

pub fn format_summary(plan: &LoadPlan, aircraft: &AircraftProfile) -> String {
    let ledger = &plan.ledger;
    let mut out = String::new();
    out.push_str("=== Load Summary ===\n");
    let _ = writeln!(out, "Aircraft:      {} (MTW {} kg)", aircraft.model, aircraft.mtw);
    let _ = writeln!(
        out,
        "Placed:        {} / {} units ({} unassigned)",
        ledger.placed_count(),
        ledger.records().len(),
        ledger.unassigned_count()
    );
    let _ = writeln!(out, "Total weight:  {:.1} kg", ledger.total_weight());
    let _ = writeln!(out, "Total moment:  {:.1}", ledger.total_moment());
    match ledger.centre_of_gravity() {
        Some(cg) => {
            let _ = writeln!(out, "CG arm:        {cg:.2}");
        }
        None => out.push_str("CG arm:        n/a\n"),
    }
    let _ = writeln!(out, "Target arm:    {:.2}", plan.target_arm);
    out
}
