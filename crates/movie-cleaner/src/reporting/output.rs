//! Cleaned CSV naming and writing.

use crate::error::{CleaningError, Result};
use chrono::{DateTime, Local};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

/// Timestamp layout appended to every cleaned file name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `<stem>_cleaned_<YYYYmmdd_HHMMSS>.csv`
pub fn cleaned_file_name(stem: &str, at: &DateTime<Local>) -> String {
    format!("{}_cleaned_{}.csv", stem, at.format(TIMESTAMP_FORMAT))
}

/// Writes cleaned tables into one output folder.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output path for `input`, stamped with the current local time.
    ///
    /// Inputs sharing a stem (`a.csv`, `a.CSV`) cleaned within the same
    /// second get a `_<n>` suffix instead of overwriting each other.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        let name = cleaned_file_name(&stem, &Local::now());
        first_free_path(self.output_dir.join(name))
    }

    /// Write `df` as a headed, comma-separated CSV next to its siblings.
    pub fn write_cleaned(&self, input: &Path, df: &mut DataFrame) -> Result<PathBuf> {
        let output_path = self.output_path_for(input);
        let to_write_error = |reason: String| CleaningError::FileWrite {
            path: output_path.clone(),
            reason,
        };

        fs::create_dir_all(&self.output_dir).map_err(|e| to_write_error(e.to_string()))?;
        let mut file = File::create(&output_path).map_err(|e| to_write_error(e.to_string()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .map_err(|e| to_write_error(e.to_string()))?;

        info!("Cleaned dataset saved: {}", output_path.display());
        Ok(output_path)
    }
}

/// `path` itself when nothing exists there, else `<stem>_<n>.csv` with the
/// smallest free `n`.
fn first_free_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut n = 1;
    loop {
        let candidate = path.with_file_name(format!("{}_{}.csv", stem, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
