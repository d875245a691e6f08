use serde::Serialize;

use super::SpeciesId;

/// Shape of the stand volume curve over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GrowthCurve {
    /// Volume accumulates at the mean annual increment until maturity, then
    /// stays flat.
    Linear,

    /// Chapman–Richards curve `V(y) = A(1 - e^(-k·y))^p`.
    ChapmanRichards { k: f64, p: f64 },
}

/// Reference growth parameters for one species category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesRecord {
    pub id: SpeciesId,
    pub display_name: &'static str,

    /// Mean annual increment at a reference site, m³/ha/yr.
    pub mean_annual_increment: f64,

    pub growth_curve: GrowthCurve,

    /// Age in years at which the stand is considered mature.
    pub maturity_year: u32,

    /// Stocking (stems/ha) the reference increment assumes.
    pub reference_density: f64,

    /// Crown projection area of a single mature tree, m².
    pub crown_area_m2: f64,
}
