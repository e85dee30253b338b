//! CLI entry point for the movie dataset cleaner.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use movie_cleaner::config::{DEFAULT_CLEANED_FOLDER, DEFAULT_UNCLEANED_FOLDER};
use movie_cleaner::{BatchConfig, BatchSummary, CleaningConfig, run_batch};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Batch cleaner for movie listing CSV files",
    long_about = "Cleans every CSV file in a folder and writes the results to another folder.\n\n\
                  EXAMPLES:\n  \
                  # Clean uncleaned_files/ into cleaned_files/\n  \
                  movie-cleaner\n\n  \
                  # Custom folders, no diagnostics\n  \
                  movie-cleaner --uncleaned_folder raw --cleaned_folder out --no-plot\n\n  \
                  # Keep raw magnitudes\n  \
                  movie-cleaner --no-scale"
)]
struct Args {
    /// Folder containing the CSV files to clean
    #[arg(long = "uncleaned_folder", default_value = DEFAULT_UNCLEANED_FOLDER)]
    uncleaned_folder: PathBuf,

    /// Folder receiving the cleaned CSV files (created if missing)
    #[arg(long = "cleaned_folder", default_value = DEFAULT_CLEANED_FOLDER)]
    cleaned_folder: PathBuf,

    /// Do not write diagnostics next to the cleaned files
    #[arg(long)]
    no_plot: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Keep numeric columns in their original units
    #[arg(long)]
    no_scale: bool,

    /// Do not clip RunTime outliers
    #[arg(long)]
    no_clip: bool,

    /// Quantile used as the RunTime ceiling (0.0 - 1.0]
    #[arg(long, default_value = "0.99")]
    clip_percentile: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the batch summary as JSON to stdout instead of logging
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, verbose: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if verbose { "debug" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // .env may set RUST_LOG, so load it before the subscriber reads it
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.verbose, args.json);

    let config = CleaningConfig::builder()
        .scale_numeric(!args.no_scale)
        .clip_outliers(!args.no_clip)
        .clip_percentile(args.clip_percentile)
        .build()?;

    let batch = BatchConfig::new(&args.uncleaned_folder, &args.cleaned_folder)
        .with_plot(!args.no_plot);

    info!(
        "Cleaning {} -> {}",
        batch.input_dir.display(),
        batch.output_dir.display()
    );

    let summary = match run_batch(&batch, &config) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Batch failed: {}", e);
            return Err(anyhow!("Batch failed: {}", e));
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_human_readable_summary(&summary);
    }

    Ok(())
}

/// Print a per-file summary of the batch.
///
/// Uses `println!` so the summary shows regardless of log level.
fn print_human_readable_summary(summary: &BatchSummary) {
    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));

    for file in &summary.files {
        println!();
        println!("Input:  {}", file.input.display());

        if let Some(ref error) = file.error {
            println!("  ! Skipped: {}", error);
            continue;
        }
        if let Some(ref output) = file.output {
            println!("Output: {}", output.display());
        }
        if let Some(ref diagnostics) = file.diagnostics {
            println!("Diagnostics: {}", diagnostics.display());
        }

        let Some(ref s) = file.summary else { continue };
        println!(
            "  Rows: {} -> {} ({} duplicates removed)",
            s.rows_before, s.rows_after, s.duplicates_removed
        );
        println!(
            "  Missing cells: {} -> {}",
            s.missing_cells_before, s.missing_cells_after
        );
        for column in &s.column_summaries {
            let mut notes = Vec::new();
            if let Some(ref fill) = column.fill_value {
                notes.push(format!("filled {} with {}", column.missing_before, fill));
            }
            if column.parse_failures > 0 {
                notes.push(format!("{} unparsable", column.parse_failures));
            }
            if column.values_clipped > 0 {
                notes.push(format!("{} clipped", column.values_clipped));
            }
            if column.scaled {
                notes.push("scaled".to_string());
            }
            if !notes.is_empty() {
                println!("  {}: {}", column.name, notes.join(", "));
            }
        }
        for warning in &s.warnings {
            println!("  ! {}", warning);
        }
    }

    println!();
    println!(
        "{} processed, {} failed",
        summary.processed, summary.failed
    );
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}
