//! CSV loader for project forms.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter. Header
//! names are case-sensitive and use the form's camelCase field names. Empty
//! cells are treated as absent.
//!
//! | Column | Required | Type | Notes |
//! |------------------------------------|----------|---------|--------------------------------------------|
//! | `name` | no | string | Label used in reports |
//! | `projectArea` | yes | decimal | Hectares |
//! | `plantingDensity` | yes | decimal | Stems per hectare |
//! | `species` | yes | string | e.g. `teak_moderate`, `eucalyptus_fast` |
//! | `projectDuration` | yes | integer | Years |
//! | `woodDensity` | yes | decimal | t/m³ |
//! | `bef` | yes | decimal | ≥ 1 |
//! | `rsr` | yes | decimal | ≥ 0 |
//! | `carbonFraction` | yes | decimal | Fraction, e.g. `0.47` |
//! | `siteQuality` | yes | string | `Low`, `Medium`, `High` |
//! | `avgRainfall` | yes | string | `Low`, `Medium`, `High` |
//! | `soilType` | yes | string | `Sandy`, `Loam`, `Clay`, `Alluvial`, `Laterite`, `Degraded` |
//! | `survivalRate` | yes | decimal | Whole percent, e.g. `85` |
//! | `initialGreenCoverPercentage` | no | decimal | 0-100 |
//! | `targetGreenCoverPercentage` | no | decimal | 0-100 |
//! | `carbonPricePerTonne` | no | decimal | Currency per tCO₂e |
//! | `bufferPercentage` | no | decimal | Whole percent |
//! | `nonAdditionalityPercentage` | no | decimal | Whole percent |
//! | `baselineRemovalsPerHectareYear` | no | decimal | tCO₂e/ha/yr |
//!
//! Required columns are only required by the engine: a row that leaves one
//! empty still loads and is reported as an `InvalidInput` when estimated.
//!
//! ### Minimal example
//!
//! ```csv
//! projectArea,plantingDensity,species,projectDuration,woodDensity,bef,rsr,carbonFraction,siteQuality,avgRainfall,soilType,survivalRate
//! 10,1600,teak_moderate,10,0.5,1.5,0.25,0.47,Medium,Medium,Loam,85
//! ```
use std::path::Path;

use carbon_core::ProjectForm;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, a number
    /// that does not parse, wrong column count, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The file has a header but no project rows.
    #[error("no projects found in CSV input")]
    NoProjects,
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Parse CSV text and return one [`ProjectForm`] per row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a value
///   cannot be deserialised.
/// * [CsvLoadError::NoProjects] – if there are no data rows.
pub fn load_from_str(input: &str) -> Result<Vec<ProjectForm>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    let forms = reader
        .deserialize::<ProjectForm>()
        .collect::<Result<Vec<_>, _>>()?;

    if forms.is_empty() {
        return Err(CsvLoadError::NoProjects);
    }
    Ok(forms)
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<ProjectForm>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -----------------------------------------------------------------------
    // Helper: the required columns only
    // -----------------------------------------------------------------------
    const MINIMAL_CSV: &str = "\
projectArea,plantingDensity,species,projectDuration,woodDensity,bef,rsr,carbonFraction,siteQuality,avgRainfall,soilType,survivalRate
10,1600,teak_moderate,10,0.5,1.5,0.25,0.47,Medium,Medium,Loam,85
";

    // -----------------------------------------------------------------------
    // Helper: every column populated
    // -----------------------------------------------------------------------
    const FULL_CSV: &str = "\
name,projectArea,plantingDensity,species,projectDuration,woodDensity,bef,rsr,carbonFraction,siteQuality,avgRainfall,soilType,survivalRate,initialGreenCoverPercentage,targetGreenCoverPercentage,carbonPricePerTonne,bufferPercentage,nonAdditionalityPercentage,baselineRemovalsPerHectareYear
Hill block,25,1100,native_mixed_slow,30,0.6,1.4,0.3,0.47,Low,High,Degraded,70,10,60,12.5,15,5,0.2
";

    // -----------------------------------------------------------------------
    // 1. Minimal CSV – required columns, optionals absent
    // -----------------------------------------------------------------------
    #[test]
    fn test_minimal_csv_parses_required_fields() {
        let forms = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(forms.len(), 1);

        let f = &forms[0];
        assert_eq!(f.project_area, Some(10.0));
        assert_eq!(f.planting_density, Some(1600.0));
        assert_eq!(f.species.as_deref(), Some("teak_moderate"));
        assert_eq!(f.project_duration, Some(10.0));
        assert_eq!(f.soil_type.as_deref(), Some("Loam"));
        assert_eq!(f.survival_rate, Some(85.0));
    }

    #[test]
    fn test_minimal_csv_optional_fields_are_none() {
        let forms = load_from_str(MINIMAL_CSV).expect("should parse");
        let f = &forms[0];

        assert!(f.name.is_none());
        assert!(f.initial_green_cover_percentage.is_none());
        assert!(f.target_green_cover_percentage.is_none());
        assert!(f.carbon_price_per_tonne.is_none());
        assert!(f.buffer_percentage.is_none());
        assert!(f.non_additionality_percentage.is_none());
        assert!(f.baseline_removals_per_hectare_year.is_none());
    }

    // -----------------------------------------------------------------------
    // 2. Full CSV – every column populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_full_csv_all_fields_populated() {
        let forms = load_from_str(FULL_CSV).expect("should parse full CSV");
        let f = &forms[0];

        assert_eq!(f.name.as_deref(), Some("Hill block"));
        assert_eq!(f.site_quality.as_deref(), Some("Low"));
        assert_eq!(f.avg_rainfall.as_deref(), Some("High"));
        assert_eq!(f.initial_green_cover_percentage, Some(10.0));
        assert_eq!(f.target_green_cover_percentage, Some(60.0));
        assert_eq!(f.carbon_price_per_tonne, Some(12.5));
        assert_eq!(f.buffer_percentage, Some(15.0));
        assert_eq!(f.non_additionality_percentage, Some(5.0));
        assert_eq!(f.baseline_removals_per_hectare_year, Some(0.2));
    }

    // -----------------------------------------------------------------------
    // 3. Empty cells become None and are left for the engine to report
    // -----------------------------------------------------------------------
    #[test]
    fn test_empty_required_cell_loads_as_none() {
        let csv = "\
projectArea,plantingDensity,species,projectDuration,woodDensity,bef,rsr,carbonFraction,siteQuality,avgRainfall,soilType,survivalRate
,1600,teak_moderate,10,0.5,1.5,0.25,0.47,Medium,Medium,Loam,85
";

        let forms = load_from_str(csv).expect("should parse");

        assert!(forms[0].project_area.is_none());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let csv = "\
projectArea , species , survivalRate
 4.5 , eucalyptus_fast , 90
";

        let forms = load_from_str(csv).expect("should parse");

        assert_eq!(forms[0].project_area, Some(4.5));
        assert_eq!(forms[0].species.as_deref(), Some("eucalyptus_fast"));
    }

    // -----------------------------------------------------------------------
    // 4. Error cases
    // -----------------------------------------------------------------------
    #[test]
    fn test_non_numeric_area_is_parse_error() {
        let csv = "projectArea,species\nten,teak_moderate\n";

        let err = load_from_str(csv).expect_err("should fail for non-numeric area");

        assert!(matches!(err, CsvLoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "projectArea,species\n10,teak_moderate,extra\n";

        let err = load_from_str(csv).expect_err("should fail for extra column");

        assert!(matches!(err, CsvLoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_header_only_has_no_projects() {
        let err = load_from_str("projectArea,species\n").expect_err("no rows");

        assert!(matches!(err, CsvLoadError::NoProjects));
    }
}
