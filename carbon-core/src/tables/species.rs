use crate::SequestrationError;
use crate::models::{GrowthCurve, SpeciesId, SpeciesRecord};

static TEAK_MODERATE: SpeciesRecord = SpeciesRecord {
    id: SpeciesId::TeakModerate,
    display_name: "Teak (moderate growth)",
    mean_annual_increment: 6.0,
    growth_curve: GrowthCurve::ChapmanRichards { k: 0.08, p: 2.0 },
    maturity_year: 25,
    reference_density: 1600.0,
    crown_area_m2: 6.0,
};

static EUCALYPTUS_FAST: SpeciesRecord = SpeciesRecord {
    id: SpeciesId::EucalyptusFast,
    display_name: "Eucalyptus (fast growth)",
    mean_annual_increment: 25.0,
    growth_curve: GrowthCurve::ChapmanRichards { k: 0.25, p: 1.5 },
    maturity_year: 8,
    reference_density: 1600.0,
    crown_area_m2: 4.0,
};

static NATIVE_MIXED_SLOW: SpeciesRecord = SpeciesRecord {
    id: SpeciesId::NativeMixedSlow,
    display_name: "Native mixed species (slow growth)",
    mean_annual_increment: 5.0,
    growth_curve: GrowthCurve::Linear,
    maturity_year: 30,
    reference_density: 1100.0,
    crown_area_m2: 9.0,
};

static PINE_MODERATE: SpeciesRecord = SpeciesRecord {
    id: SpeciesId::PineModerate,
    display_name: "Pine (moderate growth)",
    mean_annual_increment: 12.0,
    growth_curve: GrowthCurve::ChapmanRichards { k: 0.12, p: 2.0 },
    maturity_year: 20,
    reference_density: 1600.0,
    crown_area_m2: 5.0,
};

static ACACIA_FAST: SpeciesRecord = SpeciesRecord {
    id: SpeciesId::AcaciaFast,
    display_name: "Acacia (fast growth)",
    mean_annual_increment: 18.0,
    growth_curve: GrowthCurve::ChapmanRichards { k: 0.2, p: 1.6 },
    maturity_year: 10,
    reference_density: 1100.0,
    crown_area_m2: 7.0,
};

static MANGROVE_SLOW: SpeciesRecord = SpeciesRecord {
    id: SpeciesId::MangroveSlow,
    display_name: "Mangrove (slow growth)",
    mean_annual_increment: 4.0,
    growth_curve: GrowthCurve::Linear,
    maturity_year: 20,
    reference_density: 2500.0,
    crown_area_m2: 3.0,
};

/// Returns the reference record for a species.
pub fn species_record(id: SpeciesId) -> &'static SpeciesRecord {
    match id {
        SpeciesId::TeakModerate => &TEAK_MODERATE,
        SpeciesId::EucalyptusFast => &EUCALYPTUS_FAST,
        SpeciesId::NativeMixedSlow => &NATIVE_MIXED_SLOW,
        SpeciesId::PineModerate => &PINE_MODERATE,
        SpeciesId::AcaciaFast => &ACACIA_FAST,
        SpeciesId::MangroveSlow => &MANGROVE_SLOW,
    }
}

/// Looks up a species record by its identifier, e.g. `teak_moderate`.
///
/// # Errors
///
/// Returns [`SequestrationError::UnknownCategory`] for unknown identifiers.
pub fn lookup_species(name: &str) -> Result<&'static SpeciesRecord, SequestrationError> {
    SpeciesId::parse(name)
        .map(species_record)
        .ok_or_else(|| SequestrationError::unknown("species", name))
}

/// Iterates over every species record in table order.
pub fn all_species() -> impl Iterator<Item = &'static SpeciesRecord> {
    SpeciesId::ALL.into_iter().map(species_record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_identifier_maps_to_its_own_record() {
        for id in SpeciesId::ALL {
            assert_eq!(species_record(id).id, id);
        }
    }

    #[test]
    fn lookup_by_name_finds_known_species() {
        let record = lookup_species("eucalyptus_fast").expect("known species");

        assert_eq!(record.id, SpeciesId::EucalyptusFast);
        assert_eq!(record.maturity_year, 8);
    }

    #[test]
    fn lookup_by_name_rejects_unknown_species() {
        let result = lookup_species("unobtanium");

        assert_eq!(
            result,
            Err(SequestrationError::unknown("species", "unobtanium"))
        );
    }

    #[test]
    fn table_parameters_are_physically_plausible() {
        for record in all_species() {
            assert!(record.mean_annual_increment > 0.0, "{:?}", record.id);
            assert!(record.maturity_year > 0, "{:?}", record.id);
            assert!(record.reference_density > 0.0, "{:?}", record.id);
            assert!(record.crown_area_m2 > 0.0, "{:?}", record.id);
            if let GrowthCurve::ChapmanRichards { k, p } = record.growth_curve {
                assert!(k > 0.0 && p > 0.0, "{:?}", record.id);
            }
        }
    }

    #[test]
    fn table_covers_every_species() {
        assert_eq!(all_species().count(), SpeciesId::ALL.len());
    }
}
