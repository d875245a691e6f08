//! Green-cover projection.
//!
//! Cover moves linearly from the initial percentage at planting to the final
//! percentage at the end of the project. When no target is given, the final
//! value comes from a canopy-closure estimate: surviving stems per hectare at
//! the end of the project times the species crown area, expressed as a share
//! of one hectare and added to the initial cover. All values are clamped to
//! `[0, 100]`.

use serde::Serialize;

use crate::models::{GreenCoverSummary, ProjectInputs};

use super::GrowthModel;

const SQUARE_METRES_PER_HECTARE: f64 = 10_000.0;

/// Linear green-cover trajectory for one project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GreenCoverProjection {
    initial: f64,
    final_percentage: f64,
    duration: u32,
}

impl GreenCoverProjection {
    pub fn new(
        initial: f64,
        final_percentage: f64,
        duration: u32,
    ) -> Self {
        Self {
            initial: clamp_percent(initial),
            final_percentage: clamp_percent(final_percentage),
            duration,
        }
    }

    /// Builds the projection for validated inputs, deriving the final cover
    /// from canopy closure when no target is supplied.
    pub fn for_project(
        inputs: &ProjectInputs,
        growth: &GrowthModel<'_>,
    ) -> Self {
        let initial = inputs.initial_green_cover_percentage.unwrap_or(0.0);
        let final_percentage = match inputs.target_green_cover_percentage {
            Some(target) => target,
            None => initial + canopy_contribution(growth, inputs.project_duration),
        };

        Self::new(initial, final_percentage, inputs.project_duration)
    }

    /// Cover at `age`, interpolated between initial and final.
    pub fn percentage_at(
        &self,
        age: u32,
    ) -> f64 {
        if self.duration == 0 {
            return self.final_percentage;
        }
        let progress = (f64::from(age) / f64::from(self.duration)).min(1.0);
        clamp_percent(self.initial + (self.final_percentage - self.initial) * progress)
    }

    pub fn summary(&self) -> GreenCoverSummary {
        GreenCoverSummary {
            initial_percentage: self.initial,
            final_percentage: self.final_percentage,
            absolute_increase: self.final_percentage - self.initial,
        }
    }
}

/// Canopy cover added by the planting at `age`, in percent of the area.
pub fn canopy_contribution(
    growth: &GrowthModel<'_>,
    age: u32,
) -> f64 {
    let crown_cover_m2 = growth.surviving_stems_per_ha(age) * growth.species().crown_area_m2;
    clamp_percent(crown_cover_m2 / SQUARE_METRES_PER_HECTARE * 100.0)
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::SpeciesId;

    #[test]
    fn interpolates_linearly_over_duration() {
        let projection = GreenCoverProjection::new(10.0, 60.0, 10);

        assert_relative_eq!(projection.percentage_at(0), 10.0);
        assert_relative_eq!(projection.percentage_at(5), 35.0);
        assert_relative_eq!(projection.percentage_at(10), 60.0);
    }

    #[test]
    fn target_is_used_when_present() {
        let inputs = ProjectInputs {
            initial_green_cover_percentage: Some(20.0),
            target_green_cover_percentage: Some(70.0),
            ..ProjectInputs::default()
        };
        let growth = GrowthModel::for_project(&inputs);

        let summary = GreenCoverProjection::for_project(&inputs, &growth).summary();

        assert_eq!(
            summary,
            GreenCoverSummary {
                initial_percentage: 20.0,
                final_percentage: 70.0,
                absolute_increase: 50.0,
            }
        );
    }

    #[test]
    fn missing_initial_defaults_to_zero() {
        let inputs = ProjectInputs {
            target_green_cover_percentage: Some(40.0),
            ..ProjectInputs::default()
        };
        let growth = GrowthModel::for_project(&inputs);

        let summary = GreenCoverProjection::for_project(&inputs, &growth).summary();

        assert_eq!(summary.initial_percentage, 0.0);
        assert_eq!(summary.absolute_increase, 40.0);
    }

    #[test]
    fn canopy_heuristic_derives_final_cover() {
        let inputs = ProjectInputs {
            species: SpeciesId::TeakModerate,
            planting_density: 1000.0,
            survival_rate: 1.0,
            initial_green_cover_percentage: Some(5.0),
            ..ProjectInputs::default()
        };
        let growth = GrowthModel::for_project(&inputs);

        let summary = GreenCoverProjection::for_project(&inputs, &growth).summary();

        // 1000 stems × 6 m² = 6000 m² of a 10 000 m² hectare
        assert_relative_eq!(summary.final_percentage, 65.0);
        assert_relative_eq!(summary.absolute_increase, 60.0);
    }

    #[test]
    fn canopy_heuristic_is_capped_at_hundred() {
        let inputs = ProjectInputs {
            species: SpeciesId::NativeMixedSlow,
            planting_density: 5000.0,
            survival_rate: 1.0,
            initial_green_cover_percentage: Some(30.0),
            ..ProjectInputs::default()
        };
        let growth = GrowthModel::for_project(&inputs);

        let projection = GreenCoverProjection::for_project(&inputs, &growth);

        assert_eq!(projection.summary().final_percentage, 100.0);
        for age in 0..=inputs.project_duration {
            assert!(projection.percentage_at(age) <= 100.0);
        }
    }

    #[test]
    fn declining_target_is_allowed() {
        let projection = GreenCoverProjection::new(50.0, 30.0, 4);

        assert_relative_eq!(projection.percentage_at(2), 40.0);
        assert_relative_eq!(projection.summary().absolute_increase, -20.0);
    }
}
