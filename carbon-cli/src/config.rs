//! TOML configuration for the estimator binary.
//!
//! ```toml
//! [defaults]
//! buffer_percentage = 20
//! non_additionality_percentage = 10
//! carbon_price_per_tonne = 5.0
//!
//! [logging]
//! level = "info"
//! file = "carbon.log"
//! ```
//!
//! Every key is optional. Defaults only fill form fields a CSV row leaves
//! empty; percentages are whole-number percents, like the CSV columns.

use std::path::{Path, PathBuf};

use carbon_core::ProjectForm;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    pub defaults: FormDefaults,
    pub logging: LoggingConfig,
}

/// Values applied to optional form fields left empty in the input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormDefaults {
    pub buffer_percentage: Option<f64>,
    pub non_additionality_percentage: Option<f64>,
    pub carbon_price_per_tonne: Option<f64>,
    pub initial_green_cover_percentage: Option<f64>,
    pub baseline_removals_per_hectare_year: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level or full `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,

    /// Append log records to this file in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl CalculatorConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}

impl FormDefaults {
    /// Fills the form's empty optional fields from these defaults.
    ///
    /// A row that gives its own baseline removal rate keeps the
    /// baseline-derived non-additionality deduction; the default percentage
    /// would otherwise take precedence over it.
    pub fn apply(
        &self,
        form: &mut ProjectForm,
    ) {
        fill(&mut form.buffer_percentage, self.buffer_percentage);
        if form.baseline_removals_per_hectare_year.is_none() {
            fill(
                &mut form.non_additionality_percentage,
                self.non_additionality_percentage,
            );
        }
        fill(&mut form.carbon_price_per_tonne, self.carbon_price_per_tonne);
        fill(
            &mut form.initial_green_cover_percentage,
            self.initial_green_cover_percentage,
        );
        fill(
            &mut form.baseline_removals_per_hectare_year,
            self.baseline_removals_per_hectare_year,
        );
    }
}

fn fill(
    slot: &mut Option<f64>,
    default: Option<f64>,
) {
    if slot.is_none() {
        *slot = default;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CalculatorConfig::from_toml("").expect("empty config is valid");

        assert_eq!(config, CalculatorConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn full_config_parses() {
        let config = CalculatorConfig::from_toml(
            r#"
            [defaults]
            buffer_percentage = 15
            non_additionality_percentage = 5
            carbon_price_per_tonne = 8.5

            [logging]
            level = "debug"
            file = "carbon.log"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.defaults.buffer_percentage, Some(15.0));
        assert_eq!(config.defaults.non_additionality_percentage, Some(5.0));
        assert_eq!(config.defaults.carbon_price_per_tonne, Some(8.5));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("carbon.log")));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = CalculatorConfig::from_toml("[defaults]\nbufer_percentage = 20\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = CalculatorConfig::load(Path::new("/this/path/does/not/exist.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn defaults_fill_only_empty_fields() {
        let defaults = FormDefaults {
            buffer_percentage: Some(20.0),
            carbon_price_per_tonne: Some(5.0),
            ..FormDefaults::default()
        };
        let mut form = ProjectForm {
            carbon_price_per_tonne: Some(12.0),
            ..ProjectForm::default()
        };

        defaults.apply(&mut form);

        assert_eq!(form.buffer_percentage, Some(20.0));
        assert_eq!(form.carbon_price_per_tonne, Some(12.0));
        assert_eq!(form.non_additionality_percentage, None);
    }

    #[test]
    fn row_baseline_keeps_non_additionality_empty() {
        let defaults = FormDefaults {
            non_additionality_percentage: Some(10.0),
            ..FormDefaults::default()
        };
        let mut form = ProjectForm {
            baseline_removals_per_hectare_year: Some(0.5),
            ..ProjectForm::default()
        };

        defaults.apply(&mut form);

        assert_eq!(form.non_additionality_percentage, None);
        assert_eq!(form.baseline_removals_per_hectare_year, Some(0.5));
    }

    #[test]
    fn row_percentage_is_kept_alongside_baseline() {
        let defaults = FormDefaults {
            non_additionality_percentage: Some(10.0),
            ..FormDefaults::default()
        };
        let mut form = ProjectForm {
            non_additionality_percentage: Some(3.0),
            baseline_removals_per_hectare_year: Some(0.5),
            ..ProjectForm::default()
        };

        defaults.apply(&mut form);

        assert_eq!(form.non_additionality_percentage, Some(3.0));
    }
}
