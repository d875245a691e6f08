use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AnnualRow;

/// Everything the presentation layer needs to render one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    pub schedule: Vec<AnnualRow>,
    pub totals: Totals,
    pub green_cover: GreenCoverSummary,
    pub credits: CreditSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Stock at the end of the project, tCO₂e.
    #[serde(rename = "finalCumulativeCO2e")]
    pub final_cumulative_co2e: f64,

    /// `final_cumulative_co2e / project_duration`, tCO₂e/yr.
    pub mean_annual_sequestration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenCoverSummary {
    #[serde(rename = "initial")]
    pub initial_percentage: f64,
    #[serde(rename = "final")]
    pub final_percentage: f64,
    pub absolute_increase: f64,
}

/// Verified Emission Reduction accounting, in tCO₂e and currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummary {
    #[serde(rename = "totalVERs")]
    pub total_vers: Decimal,
    pub buffer_deducted: Decimal,
    pub non_additionality_deducted: Decimal,
    #[serde(rename = "issuableVERs")]
    pub issuable_vers: Decimal,
    pub estimated_revenue: Decimal,
}
