mod annual_row;
mod categories;
mod project_form;
mod project_inputs;
mod result_bundle;
mod species;

pub use annual_row::AnnualRow;
pub use categories::{Rainfall, SiteQuality, SoilType, SpeciesId};
pub use project_form::{ProjectForm, percent_to_fraction};
pub use project_inputs::{
    MAX_BASELINE_REMOVALS, MAX_BEF, MAX_CARBON_PRICE_PER_TONNE, MAX_PLANTING_DENSITY,
    MAX_PROJECT_AREA, MAX_PROJECT_DURATION, MAX_RSR, MAX_WOOD_DENSITY, ProjectInputs,
};
pub use result_bundle::{CreditSummary, GreenCoverSummary, ResultBundle, Totals};
pub use species::{GrowthCurve, SpeciesRecord};
