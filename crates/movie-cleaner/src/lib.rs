//! Movie Dataset Cleaning Library
//!
//! A batch cleaner for scraped movie listings, built with Rust and Polars.
//!
//! # Overview
//!
//! Each CSV table goes through a fixed sequence of stages:
//!
//! - **Deduplication**: exact duplicate rows dropped, first occurrence kept
//! - **Text Normalization**: MOVIES, GENRE, ONE-LINE and STARS trimmed, line breaks removed
//! - **Numeric Parsing**: YEAR, VOTES, Gross, RATING and RunTime read from text
//! - **Imputation**: medians for numeric columns, mode for GENRE
//! - **Feature Engineering**: `num_stars` and `num_genres` list counts
//! - **Outlier Clipping**: RunTime capped at a percentile (99th by default)
//! - **Scaling**: per-file min-max scaling of RATING, VOTES, RunTime and Gross
//!
//! Recognized columns that are absent are skipped; other columns pass through
//! untouched.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use movie_cleaner::{CleaningConfig, Pipeline, load_csv};
//!
//! let df = load_csv(Path::new("uncleaned_files/movies.csv"))?;
//!
//! let cleaned = Pipeline::builder()
//!     .config(CleaningConfig::builder().scale_numeric(false).build()?)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .clean(df)?;
//!
//! println!("{} duplicates removed", cleaned.summary.duplicates_removed);
//! ```
//!
//! # Batch Mode
//!
//! [`run_batch`] cleans every CSV of a folder into another folder, naming
//! outputs `<stem>_cleaned_<YYYYmmdd_HHMMSS>.csv`:
//!
//! ```rust,ignore
//! use movie_cleaner::{BatchConfig, CleaningConfig, run_batch};
//!
//! let batch = BatchConfig::new("uncleaned_files", "cleaned_files").with_plot(false);
//! let summary = run_batch(&batch, &CleaningConfig::default())?;
//! println!("{} processed, {} failed", summary.processed, summary.failed);
//! ```

pub mod batch;
pub mod cleaner;
pub mod columns;
pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use batch::{BatchSummary, FileReport, load_csv, run_batch};
pub use cleaner::DataCleaner;
pub use config::{BatchConfig, CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate, clean,
};
pub use reporting::{Diagnostics, OutputWriter, emit_diagnostics};
pub use types::{ActionType, CleanedDataset, CleaningAction, CleaningSummary, ColumnSummary};
pub use utils::{count_list_entries, extract_year, parse_gross, parse_votes};
