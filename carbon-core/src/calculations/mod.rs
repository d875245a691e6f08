//! Sequestration calculations.
//!
//! Growth model, schedule engine and the green-cover and credit
//! post-processors, tied together by [`estimate`].

pub mod common;
pub mod credits;
pub mod estimator;
pub mod green_cover;
pub mod growth;
pub mod schedule;

pub use credits::{CreditParameters, CreditWorksheet};
pub use estimator::{check_invariants, estimate, estimate_form};
pub use green_cover::GreenCoverProjection;
pub use growth::{GrowthModel, above_ground_biomass_per_ha};
pub use schedule::compute_schedule;
