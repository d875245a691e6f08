//! Year-by-year sequestration schedule.
//!
//! For every age `y` in `1..=duration` the engine derives:
//!
//! | Column | Formula |
//! |--------|---------|
//! | AGB | growth model at age `y` |
//! | BGB | RSR × AGB |
//! | Total biomass | AGB + BGB |
//! | Carbon stock | carbon fraction × total biomass |
//! | CO₂e/ha | carbon stock × 44/12 |
//! | Incremental CO₂e | (CO₂e/ha[y] - CO₂e/ha[y-1]) × area, with CO₂e/ha[0] = 0 |
//! | Cumulative CO₂e | CO₂e/ha[y] × area |
//!
//! Rows are produced in ascending age and no row depends on a later one.

use tracing::debug;

use crate::SequestrationError;
use crate::models::{AnnualRow, ProjectInputs};

use super::common::CO2_PER_CARBON;
use super::{GreenCoverProjection, GrowthModel};

/// Computes the annual schedule for a project.
///
/// # Errors
///
/// Returns [`SequestrationError::InvalidInput`] when the inputs fail
/// validation; no partial schedule is produced.
pub fn compute_schedule(inputs: &ProjectInputs) -> Result<Vec<AnnualRow>, SequestrationError> {
    inputs.validate()?;

    let growth = GrowthModel::for_project(inputs);
    let green_cover = GreenCoverProjection::for_project(inputs, &growth);

    Ok(build_schedule(inputs, &growth, &green_cover))
}

/// Builds the schedule from already-validated inputs and resolved models.
pub(crate) fn build_schedule(
    inputs: &ProjectInputs,
    growth: &GrowthModel<'_>,
    green_cover: &GreenCoverProjection,
) -> Vec<AnnualRow> {
    debug!(
        species = growth.species().id.as_str(),
        effective_mai = growth.effective_mai(),
        stocking = growth.stocking(),
        duration = inputs.project_duration,
        "computing sequestration schedule"
    );

    let mut schedule = Vec::with_capacity(inputs.project_duration as usize);
    let mut previous_co2e_per_ha = 0.0;

    for age in 1..=inputs.project_duration {
        let above_ground = growth.above_ground_biomass_per_ha(age);
        let below_ground = inputs.rsr * above_ground;
        let total_biomass = above_ground + below_ground;
        let carbon_stock = inputs.carbon_fraction * total_biomass;
        let co2e_per_ha = carbon_stock * CO2_PER_CARBON;

        schedule.push(AnnualRow {
            age,
            surviving_stems_per_ha: growth.surviving_stems_per_ha(age),
            above_ground_biomass_per_ha: above_ground,
            below_ground_biomass_per_ha: below_ground,
            total_biomass_per_ha: total_biomass,
            carbon_stock_per_ha: carbon_stock,
            co2e_per_ha,
            incremental_co2e: (co2e_per_ha - previous_co2e_per_ha) * inputs.project_area,
            cumulative_co2e: co2e_per_ha * inputs.project_area,
            green_cover_percentage: green_cover.percentage_at(age),
        });

        previous_co2e_per_ha = co2e_per_ha;
    }

    schedule
}
