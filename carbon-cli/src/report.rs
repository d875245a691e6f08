//! Text and JSON rendering of estimate results.

use std::fmt::Write;

use carbon_core::tables::all_species;
use carbon_core::{GrowthCurve, ResultBundle, SequestrationError};
use serde::Serialize;

#[derive(Serialize)]
struct NamedResult<'a> {
    name: &'a str,
    result: &'a ResultBundle,
}

#[derive(Serialize)]
struct NamedError<'a> {
    name: &'a str,
    error: &'a SequestrationError,
}

/// Renders the schedule table followed by the totals, green-cover and credit
/// panels.
pub fn render_table(
    name: &str,
    bundle: &ResultBundle,
) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "== {name} ==");
    let _ = writeln!(
        out,
        "{:>4} {:>9} {:>9} {:>9} {:>9} {:>9} {:>10} {:>12} {:>13} {:>7}",
        "Age", "Stems/ha", "AGB t/ha", "BGB t/ha", "Tot t/ha", "tC/ha", "tCO2e/ha", "Incr tCO2e", "Cumul tCO2e", "Cover%"
    );
    for row in &bundle.schedule {
        let _ = writeln!(
            out,
            "{:>4} {:>9.0} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>10.2} {:>12.2} {:>13.2} {:>7.1}",
            row.age,
            row.surviving_stems_per_ha,
            row.above_ground_biomass_per_ha,
            row.below_ground_biomass_per_ha,
            row.total_biomass_per_ha,
            row.carbon_stock_per_ha,
            row.co2e_per_ha,
            row.incremental_co2e,
            row.cumulative_co2e,
            row.green_cover_percentage,
        );
    }

    let totals = &bundle.totals;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Total sequestration:     {:.2} tCO2e",
        totals.final_cumulative_co2e
    );
    let _ = writeln!(
        out,
        "Mean annual:             {:.2} tCO2e/yr",
        totals.mean_annual_sequestration
    );

    let cover = &bundle.green_cover;
    let _ = writeln!(
        out,
        "Green cover:             {:.1}% -> {:.1}% ({:+.1} points)",
        cover.initial_percentage, cover.final_percentage, cover.absolute_increase
    );

    let credits = &bundle.credits;
    let _ = writeln!(out, "Total VERs:              {}", credits.total_vers);
    let _ = writeln!(out, "  Buffer deducted:       {}", credits.buffer_deducted);
    let _ = writeln!(
        out,
        "  Non-additionality:     {}",
        credits.non_additionality_deducted
    );
    let _ = writeln!(out, "Issuable VERs:           {}", credits.issuable_vers);
    let _ = writeln!(out, "Estimated revenue:       {}", credits.estimated_revenue);

    out
}

pub fn render_json(
    name: &str,
    bundle: &ResultBundle,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&NamedResult {
        name,
        result: bundle,
    })
}

/// Renders a structured error for a project that could not be estimated.
pub fn render_error(
    name: &str,
    error: &SequestrationError,
) -> String {
    match error {
        SequestrationError::InvalidInput { field, reason } => {
            format!("== {name} ==\nerror: field '{field}' {reason}\n")
        }
        SequestrationError::UnknownCategory { field, value } => {
            format!("== {name} ==\nerror: field '{field}' has unknown value '{value}'\n")
        }
        SequestrationError::InternalConsistency { .. } => {
            format!("== {name} ==\nerror: {error}\n")
        }
    }
}

pub fn render_error_json(
    name: &str,
    error: &SequestrationError,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&NamedError { name, error })
}

/// Lists the built-in species table.
pub fn render_species_table() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:<36} {:>8} {:>9} {:>10} {:<20}",
        "Id", "Name", "MAI", "Maturity", "Stems/ha", "Curve"
    );
    for record in all_species() {
        let curve = match record.growth_curve {
            GrowthCurve::Linear => "linear".to_string(),
            GrowthCurve::ChapmanRichards { k, p } => format!("chapman-richards k={k} p={p}"),
        };
        let _ = writeln!(
            out,
            "{:<18} {:<36} {:>8.1} {:>9} {:>10.0} {:<20}",
            record.id.as_str(),
            record.display_name,
            record.mean_annual_increment,
            record.maturity_year,
            record.reference_density,
            curve
        );
    }
    out
}
