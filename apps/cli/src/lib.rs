//! Command-line front end for the Chairside phone normalization core.
//!
//! Every subcommand writes to the supplied writer so the binary and the tests share one path.

use chairside::domain::config::ClientConfig;
use chairside::prelude::{
    PhoneInputController, canonical_to_display, extract_digits, format_display,
    is_valid_canonical, to_canonical,
};
use chairside_logger::{Logger, LoggerError};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "chairside", version = chairside::VERSION, about = "Phone number normalization")]
pub struct Cli {
    /// Configuration file (TOML/JSON/YAML); defaults are used when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, overriding `RUST_LOG` and `logging.level` (e.g. `chairside=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the extracted digit sequence.
    Digits { input: String },
    /// Print the progressive display mask.
    Display { input: String },
    /// Print the canonical `+1XXXXXXXXXX` form; exits 1 when the number is incomplete.
    Canonical { input: String },
    /// Print whether the value is strictly canonical; exits 1 when it is not.
    Validate { input: String },
    /// Print the display form of a stored value.
    Pretty { input: String },
    /// Replay successive field values through the input controller.
    Type {
        #[arg(required = true)]
        keystrokes: Vec<String>,
    },
}

/// Installs the global logger from the loaded configuration.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then `logging.level`.
///
/// # Errors
/// Propagates [`LoggerError`] from the logger builder.
pub fn init_logger(level: Option<&str>, config: &ClientConfig) -> Result<Logger, LoggerError> {
    let logging = &config.logging;
    let mut builder = Logger::builder(env!("CARGO_PKG_NAME")).default_filter(&logging.level);
    if let Some(level) = level {
        builder = builder.env_filter(level);
    }

    if let Some(directory) = &logging.directory {
        builder = builder.path(directory).max_files(logging.max_files).json(logging.json);
    }

    builder.init()
}

/// Executes one subcommand.
///
/// # Errors
/// Returns an error only if writing to `out` fails.
pub fn run(command: &Command, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    debug!(?command, "running command");

    match command {
        Command::Digits { input } => writeln!(out, "{}", extract_digits(input.as_str()))?,
        Command::Display { input } => writeln!(out, "{}", format_display(input))?,
        Command::Pretty { input } => writeln!(out, "{}", canonical_to_display(input.as_str()))?,
        Command::Canonical { input } => {
            let canonical = to_canonical(input.as_str());
            if canonical.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
            writeln!(out, "{canonical}")?;
        },
        Command::Validate { input } => {
            let valid = is_valid_canonical(input.as_str());
            writeln!(out, "{valid}")?;
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Type { keystrokes } => {
            let mut field = PhoneInputController::new(None);
            for raw in keystrokes {
                let emission = field.on_keystroke(raw);
                // The form stores what it was sent and echoes it back.
                field.sync_external(emission.value.as_str(), Some(emission.generation));
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    emission.generation,
                    emission.form.as_str(),
                    emission.value,
                    field.display()
                )?;
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
