//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// PriceAvg - average price calculator for itemized purchase entries
///
/// Reads rows of (description, quantity, price) from a CSV/TSV file or
/// stdin, groups them by description, and prints total quantity and
/// weighted average unit price per category plus a grand total.
///
/// Examples:
///   priceavg groceries.csv
///   priceavg groceries.tsv --delimiter '\t' --format markdown -o report.md
///   cat entries.csv | priceavg
///   priceavg --interactive
///   priceavg --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Entry file to read (CSV/TSV)
    ///
    /// Each row is `description,quantity,price`. When omitted, entries
    /// are read from stdin unless --interactive is set.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output format for the report
    #[arg(short, long, default_value = "table", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Field delimiter for entry input
    ///
    /// A single ASCII character. Can also be set via PRICEAVG_DELIMITER
    /// env var or .priceavg.toml config.
    #[arg(short, long, value_name = "CHAR", env = "PRICEAVG_DELIMITER")]
    pub delimiter: Option<char>,

    /// Treat the first row of the input as data, not a header
    #[arg(long)]
    pub no_headers: bool,

    /// Include the entry rows in the report, not just the summary
    #[arg(long)]
    pub entries: bool,

    /// Decimal places for quantities in the report
    #[arg(long, value_name = "DIGITS")]
    pub quantity_precision: Option<usize>,

    /// Decimal places for prices in the report
    #[arg(long, value_name = "DIGITS")]
    pub price_precision: Option<usize>,

    /// Start an interactive editing session
    ///
    /// Entries are typed one per line; the summary is recomputed and
    /// reprinted after every change. An entry FILE, if given, seeds the
    /// session.
    #[arg(short, long)]
    pub interactive: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .priceavg.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .priceavg.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table (default)
    #[default]
    Table,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

/// Highest precision the report formatter accepts.
const MAX_PRECISION: usize = 12;

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate delimiter
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    delimiter
                ));
            }
        }

        // Validate precision bounds
        for precision in [self.quantity_precision, self.price_precision]
            .into_iter()
            .flatten()
        {
            if precision > MAX_PRECISION {
                return Err(format!(
                    "Precision must be at most {}, got {}",
                    MAX_PRECISION, precision
                ));
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate input file if provided
        if let Some(ref input_path) = self.input {
            if !input_path.exists() {
                return Err(format!("Input file does not exist: {}", input_path.display()));
            }
            if !input_path.is_file() {
                return Err(format!("Input path is not a file: {}", input_path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
