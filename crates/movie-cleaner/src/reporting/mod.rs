//! Report generation module.
//!
//! This module writes cleaned datasets and their diagnostics.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_cleaner::reporting::{OutputWriter, emit_diagnostics};
//!
//! let writer = OutputWriter::new("cleaned_files");
//! let csv_path = writer.write_cleaned(Path::new("uncleaned_files/movies.csv"), &mut df)?;
//!
//! // Missing values, rating histogram and runtime boxplot as JSON
//! emit_diagnostics(&df, &csv_path);
//! ```

mod diagnostics;
mod output;

pub use diagnostics::{
    BoxplotStats, Diagnostics, HISTOGRAM_BINS, Histogram, MissingCount, boxplot,
    diagnostics_path, emit_diagnostics, histogram,
};
pub use output::{OutputWriter, TIMESTAMP_FORMAT, cleaned_file_name};
