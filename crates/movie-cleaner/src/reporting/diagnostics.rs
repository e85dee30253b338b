//! Post-cleaning diagnostics.
//!
//! Missing-value counts, a RATING histogram and RunTime boxplot statistics,
//! computed as data and written as pretty JSON beside the cleaned CSV.
//! Nothing here may stop the CSV from being produced: [`emit_diagnostics`]
//! logs and swallows every failure.

use crate::columns::{RATING, RUNTIME};
use crate::error::{CleaningError, Result};
use crate::utils::{float_values, has_column, min_max, quantile};
use chrono::Local;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Number of equal-width bins in the rating histogram.
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub generated_at: String,
    pub rows: usize,
    pub missing_values: Vec<MissingCount>,
    pub rating_histogram: Option<Histogram>,
    pub runtime_boxplot: Option<BoxplotStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within 1.5 IQR below q1.
    pub lower_whisker: f64,
    /// Largest value within 1.5 IQR above q3.
    pub upper_whisker: f64,
    pub outliers: usize,
}

impl Diagnostics {
    /// Compute diagnostics for a cleaned table.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let missing_values = df
            .get_columns()
            .iter()
            .map(|col| MissingCount {
                column: col.name().to_string(),
                missing: col.null_count(),
            })
            .collect();

        let rating_histogram = match column_floats(df, RATING)? {
            Some(values) => histogram(&values, HISTOGRAM_BINS),
            None => None,
        };
        let runtime_boxplot = match column_floats(df, RUNTIME)? {
            Some(values) => boxplot(&values),
            None => None,
        };

        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            rows: df.height(),
            missing_values,
            rating_histogram,
            runtime_boxplot,
        })
    }

    /// Write as pretty JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)
            .map_err(|e| CleaningError::Diagnostics(format!("{}: {}", path.display(), e)))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// `<output_stem>_diagnostics.json` beside `csv_path`.
pub fn diagnostics_path(csv_path: &Path) -> PathBuf {
    let stem = csv_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    csv_path.with_file_name(format!("{}_diagnostics.json", stem))
}

/// Compute and write diagnostics for `df`, never failing the caller.
pub fn emit_diagnostics(df: &DataFrame, csv_path: &Path) -> Option<PathBuf> {
    let path = diagnostics_path(csv_path);
    match Diagnostics::from_frame(df).and_then(|d| d.write_to(&path)) {
        Ok(()) => {
            info!("Diagnostics saved: {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Diagnostics skipped for {}: {}", csv_path.display(), e);
            None
        }
    }
}

fn column_floats(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<f64>>>> {
    if !has_column(df, name) {
        return Ok(None);
    }
    Ok(Some(float_values(df.column(name)?.as_materialized_series())?))
}

/// Equal-width histogram over the present values.
///
/// The last bin is closed on the right. A constant column gets a unit-wide
/// range centred on its value.
pub fn histogram(values: &[Option<f64>], bins: usize) -> Option<Histogram> {
    let (mut lo, mut hi) = min_max(values)?;
    if bins == 0 {
        return None;
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0; bins];
    for &v in values.iter().flatten() {
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Some(Histogram { edges, counts })
}

/// Five-number summary with 1.5 IQR whiskers.
pub fn boxplot(values: &[Option<f64>]) -> Option<BoxplotStats> {
    let (min, max) = min_max(values)?;
    let q1 = quantile(values, 0.25)?;
    let median = quantile(values, 0.5)?;
    let q3 = quantile(values, 0.75)?;

    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let inside = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| (low_fence..=high_fence).contains(v));
    let (lower_whisker, upper_whisker) = inside.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let outliers = values
        .iter()
        .flatten()
        .filter(|v| !(low_fence..=high_fence).contains(*v))
        .count();

    Some(BoxplotStats {
        min,
        q1,
        median,
        q3,
        max,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_histogram_counts() {
        let values: Vec<Option<f64>> = vec![Some(0.0), Some(0.5), Some(1.0), None, Some(1.0)];
        let hist = histogram(&values, 2).unwrap();

        assert_eq!(hist.edges, vec![0.0, 0.5, 1.0]);
        assert_eq!(hist.counts, vec![1, 3]);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let hist = histogram(&[Some(7.0), Some(7.0)], HISTOGRAM_BINS).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 2);
        assert_eq!(hist.edges.len(), HISTOGRAM_BINS + 1);

        assert_eq!(histogram(&[None, None], HISTOGRAM_BINS), None);
    }

    #[test]
    fn test_boxplot() {
        let mut values: Vec<Option<f64>> = (1..=9).map(|x| Some(x as f64)).collect();
        values.push(Some(100.0));

        let stats = boxplot(&values).unwrap();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.median, 5.5);
        assert_eq!(stats.q1, 3.25);
        assert_eq!(stats.q3, 7.75);
        assert_eq!(stats.upper_whisker, 9.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.outliers, 1);
    }

    #[test]
    fn test_diagnostics_path() {
        assert_eq!(
            diagnostics_path(Path::new("out/movies_cleaned_20240101_000000.csv")),
            PathBuf::from("out/movies_cleaned_20240101_000000_diagnostics.json")
        );
    }

    #[test]
    fn test_from_frame_without_rating_or_runtime() {
        let df = df!["MOVIES" => [Some("A"), None]].unwrap();
        let diagnostics = Diagnostics::from_frame(&df).unwrap();

        assert_eq!(
            diagnostics.missing_values,
            vec![MissingCount {
                column: "MOVIES".to_string(),
                missing: 1
            }]
        );
        assert!(diagnostics.rating_histogram.is_none());
        assert!(diagnostics.runtime_boxplot.is_none());
    }

    #[test]
    fn test_emit_diagnostics_writes_json() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("movies_cleaned.csv");
        let df = df![
            "RATING" => [0.0, 0.5, 1.0],
            "RunTime" => [90.0, 100.0, 110.0],
        ]
        .unwrap();

        let path = emit_diagnostics(&df, &csv_path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["rows"], 3);
        assert_eq!(json["rating_histogram"]["counts"].as_array().unwrap().len(), 20);
        assert_eq!(json["runtime_boxplot"]["median"], 100.0);
    }

    #[test]
    fn test_emit_diagnostics_swallows_write_failure() {
        let dir = TempDir::new().unwrap();
        let csv_path = dir.path().join("missing_folder/movies.csv");
        let df = df!["RATING" => [1.0]].unwrap();

        assert_eq!(emit_diagnostics(&df, &csv_path), None);
    }
}
