use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

use carbon_cli::config::CalculatorConfig;
use carbon_cli::{csv_loader, logging, report};
use carbon_core::estimate_form;

// --- CLI definition ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Carbon sequestration estimator for afforestation/reforestation projects.
///
/// Reads project descriptions from a CSV file, computes the year-by-year
/// sequestration schedule, green cover and issuable credits for each row,
/// and prints the results.
#[derive(Debug, Parser)]
#[command(name = "carbon-estimator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file with one project per row.
    #[arg(short, long, required_unless_present = "list_species")]
    input: Option<PathBuf>,

    /// TOML file with defaults and logging settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Only estimate this 1-based data row.
    #[arg(long)]
    row: Option<usize>,

    /// Log level or filter directive; overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Print the built-in species table and exit.
    #[arg(long, default_value_t = false)]
    list_species: bool,
}

// --- Entry point ---

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CalculatorConfig::default(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init_logging(level, config.logging.file.as_deref())?;

    if cli.list_species {
        print!("{}", report::render_species_table());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(input) = &cli.input else {
        anyhow::bail!("--input is required");
    };

    debug!("loading projects from {}", input.display());
    let forms = csv_loader::load_from_file(input)
        .with_context(|| format!("Failed to load projects: {}", input.display()))?;
    info!(rows = forms.len(), "loaded projects");

    if let Some(row) = cli.row {
        if row == 0 || row > forms.len() {
            anyhow::bail!("row {row} is out of range (1..={})", forms.len());
        }
    }

    let mut failures = 0;
    for (idx, mut form) in forms.into_iter().enumerate() {
        let row_number = idx + 1; // 1-based for user-facing messages
        if cli.row.is_some_and(|wanted| wanted != row_number) {
            continue;
        }

        config.defaults.apply(&mut form);
        let name = form
            .name
            .clone()
            .unwrap_or_else(|| format!("row {row_number}"));

        let rendered = match estimate_form(form) {
            Ok(bundle) => match cli.format {
                OutputFormat::Table => report::render_table(&name, &bundle),
                OutputFormat::Json => report::render_json(&name, &bundle)?,
            },
            Err(error) => {
                warn!(row = row_number, %error, "project could not be estimated");
                failures += 1;
                match cli.format {
                    OutputFormat::Table => report::render_error(&name, &error),
                    OutputFormat::Json => report::render_error_json(&name, &error)?,
                }
            }
        };
        println!("{rendered}");
    }

    if failures > 0 {
        warn!(failures, "some projects failed validation");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
