//! PriceAvg - Average Price Calculator
//!
//! A CLI tool that reads itemized purchase entries, groups them by
//! description, and reports total quantity and weighted average unit
//! price per category plus a grand total.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input file, malformed row, config failure)

mod calc;
mod cli;
mod config;
mod input;
mod models;
mod report;
mod session;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use input::ReadOptions;
use models::{EntryTable, SummaryReport};
use report::FormatOptions;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    debug!("PriceAvg v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Calculation failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .priceavg.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".priceavg.toml");

    if path.exists() {
        eprintln!("⚠️  .priceavg.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .priceavg.toml")?;

    println!("✅ Created .priceavg.toml with default settings.");
    println!("   Edit it to customize delimiter, headers, and report precision.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    // Logs go to stderr; stdout is reserved for the report itself.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete calculation workflow.
fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let read_options = ReadOptions {
        delimiter: config.input.delimiter_byte()?,
        has_headers: config.input.has_headers,
    };
    let format_options = FormatOptions {
        quantity_precision: config.report.quantity_precision,
        price_precision: config.report.price_precision,
        include_entries: config.report.include_entries,
    };

    // Step 1: Collect the entries
    let (entries, source) = collect_entries(&args, &read_options, &format_options)?;
    info!("Read {} entries from {}", entries.len(), source);

    // Step 2: Aggregate into the per-category summary
    let summary = calc::aggregate(&entries);
    debug!("Computed {} summary rows", summary.len());

    // Step 3: Build and render the report
    let report = SummaryReport::new(source, entries, summary);

    let mut output = match args.format {
        OutputFormat::Table => report::generate_text_report(&report, &format_options),
        OutputFormat::Markdown => report::generate_markdown_report(&report, &format_options),
        OutputFormat::Json => report::generate_json_report(&report)?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }

    // Step 4: Write the report
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Report saved to: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Collect entries from the session, the input file, or stdin.
fn collect_entries(
    args: &Args,
    read_options: &ReadOptions,
    format_options: &FormatOptions,
) -> Result<(EntryTable, String)> {
    if args.interactive {
        let seed = match args.input {
            Some(ref path) => input::read_entries_from_path(path, read_options)?,
            None => Vec::new(),
        };

        let session = session::Session::new(seed, read_options.delimiter);
        let entries = session.run(format_options)?;
        return Ok((entries, "session".to_string()));
    }

    match args.input {
        Some(ref path) => {
            let entries = input::read_entries_from_path(path, read_options)?;
            Ok((entries, path.display().to_string()))
        }
        None => {
            debug!("No input file given, reading entries from stdin");
            let stdin = std::io::stdin();
            let entries = input::read_entries(stdin.lock(), read_options)?;
            Ok((entries, "stdin".to_string()))
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            debug!("Loaded default config from .priceavg.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
