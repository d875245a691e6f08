//! Inbound boundary between a form collector and the engine.
//!
//! A [`ProjectForm`] holds exactly what a form (or a CSV row) supplies:
//! categorical values as free strings, every field optional, and
//! percentage-like fields as whole-number percents. [`ProjectForm::into_inputs`]
//! is the only place percents become fractions.

use serde::{Deserialize, Serialize};

use super::categories::parse_category;
use super::{ProjectInputs, Rainfall, SiteQuality, SoilType, SpeciesId};
use crate::SequestrationError;

/// Raw, unvalidated project description as collected from a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    /// Free-text label used by reports; ignored by the engine.
    pub name: Option<String>,

    pub project_area: Option<f64>,
    pub planting_density: Option<f64>,
    pub species: Option<String>,
    pub project_duration: Option<f64>,
    pub wood_density: Option<f64>,
    pub bef: Option<f64>,
    pub rsr: Option<f64>,
    pub carbon_fraction: Option<f64>,
    pub site_quality: Option<String>,
    pub avg_rainfall: Option<String>,
    pub soil_type: Option<String>,

    /// Whole-number percent, e.g. `85`.
    pub survival_rate: Option<f64>,

    pub initial_green_cover_percentage: Option<f64>,
    pub target_green_cover_percentage: Option<f64>,
    pub carbon_price_per_tonne: Option<f64>,

    /// Whole-number percent, e.g. `20`.
    pub buffer_percentage: Option<f64>,

    /// Whole-number percent, e.g. `10`.
    pub non_additionality_percentage: Option<f64>,

    pub baseline_removals_per_hectare_year: Option<f64>,
}

impl ProjectForm {
    /// Converts the form into validated [`ProjectInputs`].
    ///
    /// # Errors
    ///
    /// - [`SequestrationError::InvalidInput`] with reason `is required` when a
    ///   required field is absent, or any validation failure of the result.
    /// - [`SequestrationError::UnknownCategory`] when species, site quality,
    ///   rainfall or soil type is not recognised.
    pub fn into_inputs(self) -> Result<ProjectInputs, SequestrationError> {
        let project_area = required("projectArea", self.project_area)?;
        let planting_density = required("plantingDensity", self.planting_density)?;

        let species = required("species", self.species)?;
        let species = parse_category("species", &species, SpeciesId::parse)?;

        let project_duration =
            whole_years(required("projectDuration", self.project_duration)?)?;
        let wood_density = required("woodDensity", self.wood_density)?;
        let bef = required("bef", self.bef)?;
        let rsr = required("rsr", self.rsr)?;
        let carbon_fraction = required("carbonFraction", self.carbon_fraction)?;

        let site_quality = required("siteQuality", self.site_quality)?;
        let site_quality = parse_category("siteQuality", &site_quality, SiteQuality::parse)?;
        let avg_rainfall = required("avgRainfall", self.avg_rainfall)?;
        let avg_rainfall = parse_category("avgRainfall", &avg_rainfall, Rainfall::parse)?;
        let soil_type = required("soilType", self.soil_type)?;
        let soil_type = parse_category("soilType", &soil_type, SoilType::parse)?;

        let survival_rate = percent_to_fraction(required("survivalRate", self.survival_rate)?);

        let inputs = ProjectInputs {
            project_area,
            planting_density,
            species,
            project_duration,
            wood_density,
            bef,
            rsr,
            carbon_fraction,
            site_quality,
            avg_rainfall,
            soil_type,
            survival_rate,
            initial_green_cover_percentage: self.initial_green_cover_percentage,
            target_green_cover_percentage: self.target_green_cover_percentage,
            carbon_price_per_tonne: self.carbon_price_per_tonne,
            buffer_percentage: self.buffer_percentage.map(percent_to_fraction),
            non_additionality_percentage: self.non_additionality_percentage.map(percent_to_fraction),
            baseline_removals_per_hectare_year: self.baseline_removals_per_hectare_year,
        };

        inputs.validate()?;
        Ok(inputs)
    }
}

/// Converts a whole-number percent (`20`) into a fraction (`0.2`).
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

fn required<T>(
    field: &str,
    value: Option<T>,
) -> Result<T, SequestrationError> {
    value.ok_or_else(|| SequestrationError::invalid(field, "is required"))
}

fn whole_years(value: f64) -> Result<u32, SequestrationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SequestrationError::invalid(
            "projectDuration",
            "must be positive",
        ));
    }
    if value.fract() != 0.0 {
        return Err(SequestrationError::invalid(
            "projectDuration",
            "must be a whole number of years",
        ));
    }
    if value > f64::from(u32::MAX) {
        return Err(SequestrationError::invalid(
            "projectDuration",
            "must not exceed 200 years",
        ));
    }
    Ok(value as u32)
}
