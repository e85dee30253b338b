//! Folder-to-folder batch cleaning.
//!
//! Every `*.csv` directly inside the input folder is read, cleaned and written
//! to the output folder in name order. A file that cannot be read, cleaned or
//! written is logged and counted as failed; the run moves on to the next one.

use crate::config::{BatchConfig, CleaningConfig};
use crate::error::{CleaningError, Result, ResultExt};
use crate::pipeline::Pipeline;
use crate::reporting::{OutputWriter, emit_diagnostics};
use crate::types::CleaningSummary;
use polars::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Outcome of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    /// Files cleaned and written.
    pub processed: usize,
    /// Files skipped because of a read, clean or write failure.
    pub failed: usize,
    /// Cleaned CSV paths, in processing order.
    pub outputs: Vec<PathBuf>,
    /// One entry per input file.
    pub files: Vec<FileReport>,
}

/// What happened to one input file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub diagnostics: Option<PathBuf>,
    pub summary: Option<CleaningSummary>,
    pub error: Option<CleaningError>,
}

/// Read a headed CSV with every column as text.
///
/// Typing is left to the pipeline so that malformed numbers never fail the read.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| CleaningError::FileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// `*.csv` files (any extension case) directly inside `dir`, sorted by name.
pub fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Clean every CSV in `batch.input_dir` into `batch.output_dir`.
///
/// Fails only when the configuration is invalid, the input folder is missing
/// or not a directory, or the output folder cannot be created.
pub fn run_batch(batch: &BatchConfig, config: &CleaningConfig) -> Result<BatchSummary> {
    let input_dir = &batch.input_dir;
    if !input_dir.exists() {
        return Err(CleaningError::InputFolderNotFound(input_dir.clone()));
    }
    if !input_dir.is_dir() {
        return Err(CleaningError::NotADirectory(input_dir.clone()));
    }

    if batch.output_dir.exists() && !batch.output_dir.is_dir() {
        return Err(CleaningError::NotADirectory(batch.output_dir.clone()));
    }
    if !batch.output_dir.exists() {
        fs::create_dir_all(&batch.output_dir)?;
        info!("Created output directory: {}", batch.output_dir.display());
    }

    let pipeline = Pipeline::builder()
        .config(config.clone())
        .on_progress(|update| {
            debug!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        })
        .build()?;
    let writer = OutputWriter::new(&batch.output_dir);

    let files = find_csv_files(input_dir)?;
    info!(
        "Found {} CSV files in {}",
        files.len(),
        input_dir.display()
    );

    let mut summary = BatchSummary::default();
    for path in files {
        info!("Processing {}", path.display());
        match process_file(&pipeline, &writer, batch.plot, &path) {
            Ok(report) => {
                summary.processed += 1;
                if let Some(output) = &report.output {
                    summary.outputs.push(output.clone());
                }
                summary.files.push(report);
            }
            Err(e) if !e.is_file_level() => return Err(e),
            Err(e) => {
                error!("Skipping {}: {}", path.display(), e);
                summary.failed += 1;
                summary.files.push(FileReport {
                    input: path,
                    output: None,
                    diagnostics: None,
                    summary: None,
                    error: Some(e),
                });
            }
        }
    }

    info!(
        "Batch complete: {} processed, {} failed",
        summary.processed, summary.failed
    );
    Ok(summary)
}

fn process_file(
    pipeline: &Pipeline,
    writer: &OutputWriter,
    plot: bool,
    path: &Path,
) -> Result<FileReport> {
    let df = load_csv(path)?;
    debug!("Loaded {:?} from {}", df.shape(), path.display());

    let cleaned = pipeline
        .clean(df)
        .context(format!("Cleaning {}", path.display()))?;
    let mut data = cleaned.data;
    let output = writer.write_cleaned(path, &mut data)?;

    let diagnostics = if plot {
        emit_diagnostics(&data, &output)
    } else {
        None
    };

    Ok(FileReport {
        input: path.to_path_buf(),
        output: Some(output),
        diagnostics,
        summary: Some(cleaned.summary),
        error: None,
    })
}
