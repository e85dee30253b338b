//! Row- and text-level cleaning.
//!
//! This module provides functionality for:
//! - Removing exact duplicate rows (first occurrence kept, order preserved)
//! - Normalizing free-text columns
//! - Parsing text columns into numbers (see [`converters`])

pub mod converters;

use crate::columns::TEXT_COLUMNS;
use crate::error::Result;
use crate::types::{ActionType, CleaningAction, CleaningSummary};
use crate::utils::{has_column, normalize_text, string_values};
use polars::prelude::*;
use tracing::{debug, warn};

/// Data cleaner for deduplication and text normalization.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleaner {
    /// Drop rows equal to an earlier row across every column.
    ///
    /// Two missing cells compare equal. Survivors keep their relative order.
    pub fn remove_duplicates(
        &self,
        df: DataFrame,
        summary: &mut CleaningSummary,
    ) -> Result<DataFrame> {
        let before = df.height();
        if before == 0 || df.width() == 0 {
            return Ok(df);
        }

        let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;

        let removed = before - df.height();
        summary.duplicates_removed = removed;

        if removed > 0 {
            let pct = (removed as f64 / before as f64) * 100.0;
            summary.add_action(CleaningAction::new(
                ActionType::DuplicatesRemoved,
                "dataset",
                format!("Removed {} duplicate rows ({:.1}%)", removed, pct),
            ));
            debug!("Removed {} duplicate rows", removed);
        } else {
            debug!("No duplicate rows found");
        }

        Ok(df)
    }

    /// Trim and strip line breaks from every recognized text column present.
    pub fn normalize_text_columns(
        &self,
        df: &mut DataFrame,
        summary: &mut CleaningSummary,
    ) -> Result<()> {
        for name in TEXT_COLUMNS {
            if !has_column(df, name) {
                debug!("Column '{}' absent, skipping text normalization", name);
                continue;
            }
            let changed = match Self::normalize_text_column(df, name) {
                Ok(changed) => changed,
                Err(e) => {
                    warn!("Failed to normalize '{}': {}", name, e);
                    summary.add_warning(format!("Text normalization skipped for {}: {}", name, e));
                    continue;
                }
            };
            if changed > 0 {
                summary.add_action(CleaningAction::new(
                    ActionType::TextNormalized,
                    name,
                    format!("Normalized whitespace in {} cells", changed),
                ));
            }
            debug!("Normalized '{}' ({} cells changed)", name, changed);
        }
        Ok(())
    }

    /// Normalize one text column in place, returning the number of cells changed.
    pub fn normalize_text_column(df: &mut DataFrame, name: &str) -> Result<usize> {
        let values = string_values(df.column(name)?.as_materialized_series())?;

        let mut changed = 0;
        let cleaned: Vec<Option<String>> = values
            .into_iter()
            .map(|value| {
                value.map(|text| {
                    let normalized = normalize_text(&text);
                    if normalized != text {
                        changed += 1;
                    }
                    normalized
                })
            })
            .collect();

        df.replace(name, Series::new(name.into(), cleaned))?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{GENRE, MOVIES};

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        string_values(df.column(name).unwrap().as_materialized_series()).unwrap()
    }

    #[test]
    fn test_remove_duplicates_keeps_first_in_order() {
        let df = df![
            "MOVIES" => ["A", "B", "A", "C", "B"],
            "YEAR" => ["2001", "2002", "2001", "2003", "2009"],
        ]
        .unwrap();
        let mut summary = CleaningSummary::new();

        let out = DataCleaner.remove_duplicates(df, &mut summary).unwrap();

        assert_eq!(out.height(), 4);
        assert_eq!(summary.duplicates_removed, 1);
        assert_eq!(
            strings(&out, "MOVIES"),
            vec![
                Some("A".to_string()),
                Some("B".to_string()),
                Some("C".to_string()),
                Some("B".to_string())
            ]
        );
        assert_eq!(summary.actions_of(ActionType::DuplicatesRemoved).count(), 1);
    }

    #[test]
    fn test_remove_duplicates_treats_missing_as_equal() {
        let df = df![
            "MOVIES" => [Some("A"), Some("A"), Some("A")],
            "Gross" => [None::<&str>, None, Some("$1M")],
        ]
        .unwrap();
        let mut summary = CleaningSummary::new();

        let out = DataCleaner.remove_duplicates(df, &mut summary).unwrap();
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn test_remove_duplicates_repeated_null_rows() {
        let df = df![
            "MOVIES" => [Some("A"), Some("B"), Some("A"), None, Some("B"), None, Some("C")],
            "GENRE" => [Some("Drama"), None, Some("Drama"), None, None, None, Some("Comedy")],
        ]
        .unwrap();
        let mut summary = CleaningSummary::new();

        let out = DataCleaner.remove_duplicates(df, &mut summary).unwrap();

        assert_eq!(
            strings(&out, "MOVIES"),
            vec![
                Some("A".to_string()),
                Some("B".to_string()),
                None,
                Some("C".to_string())
            ]
        );
        assert_eq!(summary.duplicates_removed, 3);
    }

    #[test]
    fn test_remove_duplicates_empty_frame() {
        let mut summary = CleaningSummary::new();
        let out = DataCleaner
            .remove_duplicates(DataFrame::empty(), &mut summary)
            .unwrap();
        assert_eq!(out.height(), 0);
        assert_eq!(summary.duplicates_removed, 0);
    }

    #[test]
    fn test_normalize_text_columns() {
        let mut df = df![
            "MOVIES" => [Some("\nBlood Red Sky\n"), Some("Masters"), None],
            "GENRE" => [Some("\nAction, Horror, Thriller            "), Some("Drama"), Some(" ")],
            "other" => ["  untouched  ", "x", "y"],
        ]
        .unwrap();
        let mut summary = CleaningSummary::new();

        DataCleaner
            .normalize_text_columns(&mut df, &mut summary)
            .unwrap();

        assert_eq!(
            strings(&df, MOVIES),
            vec![
                Some("Blood Red Sky".to_string()),
                Some("Masters".to_string()),
                None
            ]
        );
        assert_eq!(
            strings(&df, GENRE),
            vec![
                Some("Action, Horror, Thriller".to_string()),
                Some("Drama".to_string()),
                Some("".to_string())
            ]
        );
        assert_eq!(strings(&df, "other")[0], Some("  untouched  ".to_string()));
        assert_eq!(summary.actions_of(ActionType::TextNormalized).count(), 2);
    }

    #[test]
    fn test_normalize_text_columns_skips_absent() {
        let mut df = df!["YEAR" => ["2020"]].unwrap();
        let mut summary = CleaningSummary::new();
        DataCleaner
            .normalize_text_columns(&mut df, &mut summary)
            .unwrap();
        assert!(summary.actions.is_empty());
        assert_eq!(df.width(), 1);
    }
}
