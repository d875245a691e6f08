//! Parametric stand growth model.
//!
//! Aboveground biomass per hectare at age `y` is built from four pieces:
//!
//! | Step | Quantity |
//! |------|----------|
//! | 1 | Effective MAI = species MAI × site × rainfall × soil modifiers |
//! | 2 | Stand volume `V(y)` from the species growth curve |
//! | 3 | Stocking = min(planting density / reference density, 1) |
//! | 4 | Biomass = Σ yearly volume increments × survival × wood density × BEF × stocking |
//!
//! # Growth curves
//!
//! - **Linear**: `V(y) = MAI × min(y, maturity)`. Volume stops growing at
//!   maturity.
//! - **Chapman–Richards**: `V(y) = A(1 - e^(-k·y))^p`, with the asymptote
//!   `A = MAI × maturity / (1 - e^(-k·maturity))^p` so that the mean annual
//!   increment at maturity equals the effective MAI.
//!
//! # Mortality
//!
//! Survival declines linearly from 100 % at planting to `survival_rate` at
//! maturity and stays there:
//!
//! `effective_survival(t) = 1 - (1 - survival_rate) × min(t / maturity, 1)`
//!
//! Each year's volume increment only accrues on the stems alive in that year,
//! so `AGB(y) = Σ_{t=1..y} (V(t) - V(t-1)) × effective_survival(t) × wood × BEF × stocking`.
//! Because every increment is non-negative the result is non-decreasing in `y`
//! for any survival rate in `(0, 1]`, and with `survival_rate = 1` the
//! mortality term is the identity.

use crate::models::{GrowthCurve, ProjectInputs, SpeciesRecord};
use crate::tables::{ModifierSet, species_record};

/// Growth model bound to one species, site and silvicultural setup.
#[derive(Debug, Clone)]
pub struct GrowthModel<'a> {
    species: &'a SpeciesRecord,
    modifiers: ModifierSet,
    planting_density: f64,
    survival_rate: f64,
    wood_density: f64,
    bef: f64,
}

impl<'a> GrowthModel<'a> {
    pub fn new(
        species: &'a SpeciesRecord,
        modifiers: ModifierSet,
        planting_density: f64,
        survival_rate: f64,
        wood_density: f64,
        bef: f64,
    ) -> Self {
        Self {
            species,
            modifiers,
            planting_density,
            survival_rate,
            wood_density,
            bef,
        }
    }

    /// Builds the model for validated project inputs.
    pub fn for_project(inputs: &ProjectInputs) -> GrowthModel<'static> {
        GrowthModel::new(
            species_record(inputs.species),
            ModifierSet::resolve(inputs.site_quality, inputs.avg_rainfall, inputs.soil_type),
            inputs.planting_density,
            inputs.survival_rate,
            inputs.wood_density,
            inputs.bef,
        )
    }

    pub fn species(&self) -> &SpeciesRecord {
        self.species
    }

    /// Species MAI scaled by the site modifiers, m³/ha/yr.
    pub fn effective_mai(&self) -> f64 {
        self.species.mean_annual_increment * self.modifiers.product()
    }

    /// Fraction of the reference stocking actually planted, capped at 1.
    pub fn stocking(&self) -> f64 {
        (self.planting_density / self.species.reference_density).min(1.0)
    }

    /// Stand volume at age `y` before stocking and mortality, m³/ha.
    pub fn volume_per_ha(
        &self,
        y: u32,
    ) -> f64 {
        let mai = self.effective_mai();
        let maturity = f64::from(self.species.maturity_year);
        let age = f64::from(y);

        match self.species.growth_curve {
            GrowthCurve::Linear => mai * age.min(maturity),
            GrowthCurve::ChapmanRichards { k, p } => {
                let asymptote = mai * maturity / (1.0 - (-k * maturity).exp()).powf(p);
                asymptote * (1.0 - (-k * age).exp()).powf(p)
            }
        }
    }

    /// Fraction of planted stems alive at age `y`.
    pub fn effective_survival(
        &self,
        y: u32,
    ) -> f64 {
        let progress = (f64::from(y) / f64::from(self.species.maturity_year)).min(1.0);
        1.0 - (1.0 - self.survival_rate) * progress
    }

    pub fn surviving_stems_per_ha(
        &self,
        y: u32,
    ) -> f64 {
        self.planting_density * self.effective_survival(y)
    }

    /// Aboveground dry biomass at age `y`, t d.m./ha. Zero at `y = 0`.
    pub fn above_ground_biomass_per_ha(
        &self,
        y: u32,
    ) -> f64 {
        let surviving_volume: f64 = (1..=y)
            .map(|t| {
                let increment = (self.volume_per_ha(t) - self.volume_per_ha(t - 1)).max(0.0);
                increment * self.effective_survival(t)
            })
            .sum();

        surviving_volume * self.wood_density * self.bef * self.stocking()
    }
}

/// Aboveground dry biomass per hectare at age `y`, t d.m./ha.
///
/// Convenience wrapper around [`GrowthModel`]; see the module docs for the
/// curve and mortality discipline.
pub fn above_ground_biomass_per_ha(
    y: u32,
    species: &SpeciesRecord,
    modifiers: ModifierSet,
    planting_density: f64,
    survival_rate: f64,
    wood_density: f64,
    bef: f64,
) -> f64 {
    GrowthModel::new(
        species,
        modifiers,
        planting_density,
        survival_rate,
        wood_density,
        bef,
    )
    .above_ground_biomass_per_ha(y)
}
