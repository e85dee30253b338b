//! Shared utilities for the cleaning pipeline.
//!
//! The parsing and statistics helpers are pure functions over plain values so
//! every stage can be tested without building a DataFrame. The Series helpers
//! at the bottom move values in and out of polars.

use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashMap;

use crate::columns::LIST_SEPARATOR;
use crate::error::{CleaningError, Result};

// =============================================================================
// Text Utilities
// =============================================================================

static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").unwrap());

/// Trim a text cell and replace embedded line breaks with a single space.
pub fn normalize_text(value: &str) -> String {
    value
        .trim()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Count the non-empty entries of a comma-delimited list cell.
///
/// Entries are trimmed before the emptiness check, so `"A, ,B,"` counts 2.
pub fn count_list_entries(value: &str) -> usize {
    value
        .split(LIST_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .count()
}

// =============================================================================
// Numeric Parsing Utilities
// =============================================================================

/// Parse a plain float cell. Non-finite results count as missing.
pub fn parse_float(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract the first run of four consecutive digits as a year.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(extract_year("Released in 1999!"), Some(1999));
/// assert_eq!(extract_year("No year here"), None);
/// ```
pub fn extract_year(value: &str) -> Option<i64> {
    FOUR_DIGITS
        .find(value)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Parse a vote count written with thousands separators (`"12,345"`).
pub fn parse_votes(value: &str) -> Option<f64> {
    parse_float(&value.replace(',', ""))
}

/// Parse a gross figure by dropping everything except digits and dots.
///
/// Suffix multipliers are not interpreted: `"1.2M"` parses to `1.2`.
pub fn parse_gross(value: &str) -> Option<f64> {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_float(&kept)
}

// =============================================================================
// Statistics Utilities
// =============================================================================

fn sorted_present(values: &[Option<f64>]) -> Vec<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(|a, b| a.total_cmp(b));
    present
}

/// Quantile of the non-missing values, interpolating linearly between the
/// closest ranks (position `(n - 1) * q`). `None` when nothing is present.
pub fn quantile(values: &[Option<f64>], q: f64) -> Option<f64> {
    let sorted = sorted_present(values);
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Minimum and maximum of the non-missing values.
pub fn min_max(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Rescale the non-missing values into [0, 1] using their own min and max.
///
/// A constant column maps every present value to 0.0. Returns `None` when the
/// column has no present value, leaving the caller to keep it untouched.
///
/// Differences are taken on halved values so `hi - lo` stays finite for
/// columns spanning most of the `f64` range.
pub fn min_max_scale(values: &[Option<f64>]) -> Option<Vec<Option<f64>>> {
    let (lo, hi) = min_max(values)?;
    let half_range = hi / 2.0 - lo / 2.0;

    Some(
        values
            .iter()
            .map(|v| {
                v.map(|x| {
                    if half_range == 0.0 {
                        0.0
                    } else {
                        ((x / 2.0 - lo / 2.0) / half_range).clamp(0.0, 1.0)
                    }
                })
            })
            .collect(),
    )
}

/// Most frequent non-missing value. Ties go to the value seen first.
pub fn mode<S: AsRef<str>>(values: &[Option<S>]) -> Option<String> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for value in values.iter().flatten() {
        let value = value.as_ref();
        match index.get(value) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(value, order.len());
                order.push((value, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(value, count) in &order {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value.to_string())
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Collect a Series as optional strings, casting non-string dtypes.
pub fn string_values(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let as_str = series.cast(&DataType::String)?;
    Ok(as_str
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Collect a Series as optional floats, casting numeric dtypes.
pub fn float_values(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let as_f64 = series.cast(&DataType::Float64)?;
    Ok(as_f64.f64()?.into_iter().collect())
}

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let filled: Vec<Option<f64>> = float_values(series)?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let filled: Vec<Option<String>> = string_values(series)?
        .into_iter()
        .map(|v| Some(v.unwrap_or_else(|| fill_value.to_string())))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}

/// Total number of null cells across every column.
pub fn missing_cells(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

/// Whether the frame has a column with this exact name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Materialized Series for `name`, or [`CleaningError::ColumnNotFound`].
pub fn require_series(df: &DataFrame, name: &str) -> Result<Series> {
    if !has_column(df, name) {
        return Err(CleaningError::ColumnNotFound(name.to_string()));
    }
    Ok(df.column(name)?.as_materialized_series().clone())
}

// =============================================================================
// Tests
// =============================================================================
