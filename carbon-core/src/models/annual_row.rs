use serde::{Deserialize, Serialize};

/// One year of the sequestration schedule.
///
/// Per-hectare columns describe the stand; `incremental_co2e` and
/// `cumulative_co2e` cover the whole project area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualRow {
    /// Stand age in years, starting at 1.
    pub age: u32,

    pub surviving_stems_per_ha: f64,

    /// Aboveground dry biomass, t d.m./ha.
    pub above_ground_biomass_per_ha: f64,

    /// Belowground dry biomass, t d.m./ha.
    pub below_ground_biomass_per_ha: f64,

    pub total_biomass_per_ha: f64,

    /// tC/ha.
    pub carbon_stock_per_ha: f64,

    /// tCO₂e/ha.
    #[serde(rename = "co2ePerHa")]
    pub co2e_per_ha: f64,

    /// Stock change since the previous year, tCO₂e over the project area.
    #[serde(rename = "incrementalCO2e")]
    pub incremental_co2e: f64,

    /// Stock at this age, tCO₂e over the project area.
    #[serde(rename = "cumulativeCO2e")]
    pub cumulative_co2e: f64,

    /// Share of the area under canopy, 0-100.
    pub green_cover_percentage: f64,
}
