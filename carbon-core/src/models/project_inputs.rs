use serde::{Deserialize, Serialize};

use super::{Rainfall, SiteQuality, SoilType, SpeciesId};
use crate::SequestrationError;

/// Longest project the engine accepts, in years.
pub const MAX_PROJECT_DURATION: u32 = 200;

/// Largest planted area accepted, in hectares.
pub const MAX_PROJECT_AREA: f64 = 1_000_000.0;

/// Densest planting accepted, in stems per hectare.
pub const MAX_PLANTING_DENSITY: f64 = 100_000.0;

/// Heaviest basic wood density accepted, in t/m³.
pub const MAX_WOOD_DENSITY: f64 = 2.0;

/// Upper limit for the biomass expansion factor.
pub const MAX_BEF: f64 = 10.0;

/// Upper limit for the root-to-shoot ratio.
pub const MAX_RSR: f64 = 10.0;

/// Highest carbon price accepted, per tCO₂e.
pub const MAX_CARBON_PRICE_PER_TONNE: f64 = 1_000_000.0;

/// Highest baseline removal rate accepted, in tCO₂e/ha/yr.
pub const MAX_BASELINE_REMOVALS: f64 = 1_000.0;

/// Validated description of an afforestation/reforestation project.
///
/// All percentage-like values are fractions in `[0, 1]`. Conversion from the
/// whole-number percents a form collects happens once, in
/// [`ProjectForm::into_inputs`](super::ProjectForm::into_inputs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInputs {
    /// Planted area in hectares.
    pub project_area: f64,

    /// Stems planted per hectare.
    pub planting_density: f64,

    pub species: SpeciesId,

    /// Duration in years.
    pub project_duration: u32,

    /// Basic wood density, t/m³.
    pub wood_density: f64,

    /// Biomass expansion factor.
    pub bef: f64,

    /// Root-to-shoot ratio.
    pub rsr: f64,

    pub carbon_fraction: f64,
    pub site_quality: SiteQuality,
    pub avg_rainfall: Rainfall,
    pub soil_type: SoilType,

    /// Fraction of planted stems alive at maturity.
    pub survival_rate: f64,

    /// Green cover before planting, 0-100.
    pub initial_green_cover_percentage: Option<f64>,

    /// Green cover expected at the end of the project, 0-100.
    pub target_green_cover_percentage: Option<f64>,

    pub carbon_price_per_tonne: Option<f64>,

    /// Share of credits withheld for reversal risk, as a fraction.
    pub buffer_percentage: Option<f64>,

    /// Share of credits attributed to the baseline, as a fraction.
    pub non_additionality_percentage: Option<f64>,

    /// Removals the land would achieve without the project, tCO₂e/ha/yr.
    pub baseline_removals_per_hectare_year: Option<f64>,
}

impl Default for ProjectInputs {
    fn default() -> Self {
        Self {
            project_area: 1.0,
            planting_density: 1600.0,
            species: SpeciesId::TeakModerate,
            project_duration: 20,
            wood_density: 0.5,
            bef: 1.5,
            rsr: 0.25,
            carbon_fraction: 0.47,
            site_quality: SiteQuality::Medium,
            avg_rainfall: Rainfall::Medium,
            soil_type: SoilType::Loam,
            survival_rate: 0.85,
            initial_green_cover_percentage: None,
            target_green_cover_percentage: None,
            carbon_price_per_tonne: None,
            buffer_percentage: None,
            non_additionality_percentage: None,
            baseline_removals_per_hectare_year: None,
        }
    }
}

impl ProjectInputs {
    /// Validates every field, failing on the first violation.
    ///
    /// Fields are checked in form order so the first error reported is the
    /// first offending input the user sees. The upper limits keep every
    /// schedule and credit amount within `Decimal` range.
    ///
    /// # Errors
    ///
    /// Returns [`SequestrationError::InvalidInput`] naming the field.
    pub fn validate(&self) -> Result<(), SequestrationError> {
        positive("projectArea", self.project_area)?;
        at_most("projectArea", self.project_area, MAX_PROJECT_AREA)?;
        positive("plantingDensity", self.planting_density)?;
        at_most("plantingDensity", self.planting_density, MAX_PLANTING_DENSITY)?;

        if self.project_duration == 0 {
            return Err(SequestrationError::invalid(
                "projectDuration",
                "must be positive",
            ));
        }
        if self.project_duration > MAX_PROJECT_DURATION {
            return Err(SequestrationError::invalid(
                "projectDuration",
                "must not exceed 200 years",
            ));
        }

        positive("woodDensity", self.wood_density)?;
        at_most("woodDensity", self.wood_density, MAX_WOOD_DENSITY)?;

        if !(self.bef.is_finite() && self.bef >= 1.0) {
            return Err(SequestrationError::invalid("bef", "must be at least 1"));
        }
        at_most("bef", self.bef, MAX_BEF)?;

        non_negative("rsr", self.rsr)?;
        at_most("rsr", self.rsr, MAX_RSR)?;
        fraction("carbonFraction", self.carbon_fraction)?;

        if !(self.survival_rate > 0.0 && self.survival_rate <= 1.0) {
            return Err(SequestrationError::invalid(
                "survivalRate",
                "must be greater than 0 and at most 1",
            ));
        }

        if let Some(value) = self.initial_green_cover_percentage {
            percent("initialGreenCoverPercentage", value)?;
        }
        if let Some(value) = self.target_green_cover_percentage {
            percent("targetGreenCoverPercentage", value)?;
        }
        if let Some(value) = self.carbon_price_per_tonne {
            non_negative("carbonPricePerTonne", value)?;
            at_most("carbonPricePerTonne", value, MAX_CARBON_PRICE_PER_TONNE)?;
        }
        if let Some(value) = self.buffer_percentage {
            fraction("bufferPercentage", value)?;
        }
        if let Some(value) = self.non_additionality_percentage {
            fraction("nonAdditionalityPercentage", value)?;
        }
        if let Some(value) = self.baseline_removals_per_hectare_year {
            non_negative("baselineRemovalsPerHectareYear", value)?;
            at_most(
                "baselineRemovalsPerHectareYear",
                value,
                MAX_BASELINE_REMOVALS,
            )?;
        }

        Ok(())
    }
}

fn positive(
    field: &str,
    value: f64,
) -> Result<(), SequestrationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SequestrationError::invalid(field, "must be positive"))
    }
}

fn non_negative(
    field: &str,
    value: f64,
) -> Result<(), SequestrationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SequestrationError::invalid(field, "must be non-negative"))
    }
}

/// Callers check finiteness first.
fn at_most(
    field: &str,
    value: f64,
    limit: f64,
) -> Result<(), SequestrationError> {
    if value <= limit {
        Ok(())
    } else {
        Err(SequestrationError::invalid(
            field,
            &format!("must not exceed {limit}"),
        ))
    }
}

fn fraction(
    field: &str,
    value: f64,
) -> Result<(), SequestrationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SequestrationError::invalid(field, "must be between 0 and 1"))
    }
}

fn percent(
    field: &str,
    value: f64,
) -> Result<(), SequestrationError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(SequestrationError::invalid(
            field,
            "must be between 0 and 100",
        ))
    }
}
