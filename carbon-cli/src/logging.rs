use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

// --- Formatter ---

const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Event format: local wall-clock time, colored level, the emitting module
/// (`carbon_core::calculations::credits`), then the event fields.
struct EstimatorFmt;

impl<S, N> FormatEvent<S, N> for EstimatorFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let (dim, color, reset) = if writer.has_ansi_escapes() {
            (DIM, level_color(meta.level()), RESET)
        } else {
            ("", "", "")
        };

        write!(
            writer,
            "{dim}{}{reset} {color}{:>5}{reset} {dim}{}:{reset} ",
            Local::now().format("%H:%M:%S%.3f"),
            meta.level(),
            meta.target(),
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

// --- Public API ---

/// Builds the level filter. `RUST_LOG` wins over the configured level.
pub fn make_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}")),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Reports
///   go to stdout, so log records never mix into JSON output.
/// - File: when `file` is given, records are appended to it without color.
/// - Level: `level` (a bare level or full directive) unless `RUST_LOG` is set.
pub fn init_logging(
    level: &str,
    file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let file_layer = match file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(EstimatorFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(EstimatorFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_accepted() {
        assert!(EnvFilter::try_new("debug").is_ok());
        assert!(make_filter("warn").is_ok());
    }

    #[test]
    fn warnings_and_errors_have_distinct_colors() {
        assert_ne!(level_color(&Level::WARN), level_color(&Level::ERROR));
        assert!(level_color(&Level::INFO).starts_with("\x1b["));
    }

    #[test]
    fn directive_is_accepted() {
        assert!(make_filter("info,carbon_core=debug").is_ok());
    }
}
