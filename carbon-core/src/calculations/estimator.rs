//! End-to-end estimate: validation, schedule, post-processors and the
//! post-computation invariant check.

use tracing::{debug, info};

use crate::SequestrationError;
use crate::models::{ProjectForm, ProjectInputs, ResultBundle, Totals};

use super::common::{CO2_PER_CARBON, to_decimal};
use super::schedule::build_schedule;
use super::{CreditParameters, CreditWorksheet, GreenCoverProjection, GrowthModel};

const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Produces the full result bundle for validated-or-not project inputs.
///
/// # Errors
///
/// - [`SequestrationError::InvalidInput`] if the inputs fail validation.
/// - [`SequestrationError::InternalConsistency`] if a result invariant does
///   not hold, which indicates a bug.
pub fn estimate(inputs: &ProjectInputs) -> Result<ResultBundle, SequestrationError> {
    inputs.validate()?;

    let growth = GrowthModel::for_project(inputs);
    let green_cover = GreenCoverProjection::for_project(inputs, &growth);
    let schedule = build_schedule(inputs, &growth, &green_cover);

    let final_cumulative_co2e = schedule.last().map_or(0.0, |row| row.cumulative_co2e);
    let totals = Totals {
        final_cumulative_co2e,
        mean_annual_sequestration: final_cumulative_co2e / f64::from(inputs.project_duration),
    };

    let parameters = CreditParameters::for_project(inputs, final_cumulative_co2e)?;
    debug!(?parameters, "resolved credit parameters");
    let credits = CreditWorksheet::new(parameters)
        .calculate(to_decimal("finalCumulativeCO2e", final_cumulative_co2e)?)?;

    let bundle = ResultBundle {
        schedule,
        totals,
        green_cover: green_cover.summary(),
        credits,
    };

    check_invariants(inputs, &bundle)?;

    info!(
        species = inputs.species.as_str(),
        years = inputs.project_duration,
        final_co2e = bundle.totals.final_cumulative_co2e,
        issuable_vers = %bundle.credits.issuable_vers,
        "estimate complete"
    );

    Ok(bundle)
}

/// Converts a raw form and estimates it.
pub fn estimate_form(form: ProjectForm) -> Result<ResultBundle, SequestrationError> {
    let inputs = form.into_inputs()?;
    estimate(&inputs)
}

/// Verifies the result invariants the presentation layer relies on.
pub fn check_invariants(
    inputs: &ProjectInputs,
    bundle: &ResultBundle,
) -> Result<(), SequestrationError> {
    if bundle.schedule.len() != inputs.project_duration as usize {
        return Err(SequestrationError::inconsistent(format!(
            "schedule has {} rows for a {}-year project",
            bundle.schedule.len(),
            inputs.project_duration
        )));
    }

    let mut previous_cumulative = 0.0;
    for row in &bundle.schedule {
        if row.cumulative_co2e < previous_cumulative {
            return Err(SequestrationError::inconsistent(format!(
                "cumulative CO2e decreased at age {}",
                row.age
            )));
        }
        previous_cumulative = row.cumulative_co2e;

        if row.carbon_stock_per_ha.is_nan() || row.carbon_stock_per_ha < 0.0 {
            return Err(SequestrationError::inconsistent(format!(
                "negative carbon stock at age {}",
                row.age
            )));
        }
        if !close(row.below_ground_biomass_per_ha, inputs.rsr * row.above_ground_biomass_per_ha) {
            return Err(SequestrationError::inconsistent(format!(
                "belowground biomass is not rsr × aboveground at age {}",
                row.age
            )));
        }
        let expected_co2e = inputs.carbon_fraction
            * (row.above_ground_biomass_per_ha + row.below_ground_biomass_per_ha)
            * CO2_PER_CARBON;
        if !close(row.co2e_per_ha, expected_co2e) {
            return Err(SequestrationError::inconsistent(format!(
                "CO2e per hectare does not follow from biomass at age {}",
                row.age
            )));
        }
    }

    let credits = &bundle.credits;
    if credits.issuable_vers > credits.total_vers
        || credits.issuable_vers + credits.buffer_deducted + credits.non_additionality_deducted
            > credits.total_vers
    {
        return Err(SequestrationError::inconsistent(
            "credit deductions exceed total VERs",
        ));
    }

    Ok(())
}

fn close(
    actual: f64,
    expected: f64,
) -> bool {
    (actual - expected).abs() <= RELATIVE_TOLERANCE * expected.abs().max(actual.abs())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{
        AnnualRow, MAX_BEF, MAX_CARBON_PRICE_PER_TONNE, MAX_PLANTING_DENSITY, MAX_PROJECT_AREA,
        MAX_PROJECT_DURATION, MAX_RSR, MAX_WOOD_DENSITY, Rainfall, SiteQuality, SoilType,
        SpeciesId,
    };

    fn bundle() -> (ProjectInputs, ResultBundle) {
        let inputs = ProjectInputs {
            project_area: 10.0,
            project_duration: 10,
            ..ProjectInputs::default()
        };
        let bundle = estimate(&inputs).expect("valid inputs");
        (inputs, bundle)
    }

    #[test]
    fn totals_are_derived_from_last_row() {
        let (_, bundle) = bundle();
        let last: &AnnualRow = bundle.schedule.last().expect("non-empty schedule");

        assert_eq!(bundle.totals.final_cumulative_co2e, last.cumulative_co2e);
        assert_eq!(
            bundle.totals.mean_annual_sequestration,
            last.cumulative_co2e / 10.0
        );
    }

    #[test]
    fn green_cover_column_ends_at_summary_final() {
        let (_, bundle) = bundle();
        let last = bundle.schedule.last().expect("non-empty schedule");

        assert_eq!(last.green_cover_percentage, bundle.green_cover.final_percentage);
    }

    #[test]
    fn largest_accepted_project_is_estimated() {
        let inputs = ProjectInputs {
            project_area: MAX_PROJECT_AREA,
            planting_density: MAX_PLANTING_DENSITY,
            species: SpeciesId::EucalyptusFast,
            project_duration: MAX_PROJECT_DURATION,
            wood_density: MAX_WOOD_DENSITY,
            bef: MAX_BEF,
            rsr: MAX_RSR,
            carbon_fraction: 1.0,
            site_quality: SiteQuality::High,
            avg_rainfall: Rainfall::High,
            soil_type: SoilType::Alluvial,
            survival_rate: 1.0,
            carbon_price_per_tonne: Some(MAX_CARBON_PRICE_PER_TONNE),
            ..ProjectInputs::default()
        };

        let bundle = estimate(&inputs).expect("largest inputs are estimable");

        assert!(bundle.credits.estimated_revenue > rust_decimal::Decimal::ZERO);
        assert_eq!(bundle.schedule.len(), MAX_PROJECT_DURATION as usize);
    }

    #[test]
    fn consistent_bundle_passes_checks() {
        let (inputs, bundle) = bundle();

        assert_eq!(check_invariants(&inputs, &bundle), Ok(()));
    }

    #[test]
    fn truncated_schedule_is_flagged() {
        let (inputs, mut bundle) = bundle();
        bundle.schedule.pop();

        assert!(matches!(
            check_invariants(&inputs, &bundle),
            Err(SequestrationError::InternalConsistency { .. })
        ));
    }

    #[test]
    fn decreasing_cumulative_is_flagged() {
        let (inputs, mut bundle) = bundle();
        bundle.schedule[5].cumulative_co2e = 0.0;

        assert!(matches!(
            check_invariants(&inputs, &bundle),
            Err(SequestrationError::InternalConsistency { .. })
        ));
    }

    #[test]
    fn tampered_belowground_is_flagged() {
        let (inputs, mut bundle) = bundle();
        bundle.schedule[3].below_ground_biomass_per_ha *= 2.0;

        assert!(matches!(
            check_invariants(&inputs, &bundle),
            Err(SequestrationError::InternalConsistency { .. })
        ));
    }

    #[test]
    fn over_issued_credits_are_flagged() {
        let (inputs, mut bundle) = bundle();
        bundle.credits.issuable_vers = bundle.credits.total_vers;

        assert!(matches!(
            check_invariants(&inputs, &bundle),
            Err(SequestrationError::InternalConsistency { .. })
        ));
    }

    #[test]
    fn invalid_form_surfaces_validation_error() {
        let form = ProjectForm::default();

        assert_eq!(
            estimate_form(form).map(|_| ()),
            Err(SequestrationError::invalid("projectArea", "is required"))
        );
    }
}
