//! Statistical imputation methods.
//!
//! Median for numeric columns, mode for GENRE.

use crate::error::Result;
use crate::types::{ActionType, CleaningAction, CleaningSummary};
use crate::utils::{fill_numeric_nulls, fill_string_nulls, mode, require_series, string_values};
use polars::prelude::*;
use tracing::debug;

/// Median of the present values, or `None` when there are none.
pub fn median_fill_value(series: &Series) -> PolarsResult<Option<f64>> {
    Ok(series.cast(&DataType::Float64)?.median())
}

/// Mode of the present values, or `None` when there are none.
///
/// An empty-string mode is degenerate and is replaced by `placeholder`.
pub fn mode_fill_value<S: AsRef<str>>(values: &[Option<S>], placeholder: &str) -> Option<String> {
    mode(values).map(|m| {
        if m.trim().is_empty() {
            placeholder.to_string()
        } else {
            m
        }
    })
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill the nulls of a numeric column with its median.
    ///
    /// Returns the median used, or `None` when the column had nothing to
    /// compute it from (the column is then left untouched).
    pub fn apply_numeric_median(
        df: &mut DataFrame,
        col_name: &str,
        summary: &mut CleaningSummary,
    ) -> Result<Option<f64>> {
        let series = require_series(df, col_name)?;
        let missing = series.null_count();
        summary.column_mut(col_name).missing_before = missing;

        let Some(median_val) = median_fill_value(&series)? else {
            debug!("'{}' has no values, median imputation skipped", col_name);
            summary.add_action(CleaningAction::new(
                ActionType::StageSkipped,
                col_name,
                "Imputation skipped: column is entirely missing",
            ));
            summary.column_mut(col_name).missing_after = missing;
            return Ok(None);
        };

        if missing > 0 {
            let filled = fill_numeric_nulls(&series, median_val)?;
            df.replace(col_name, filled)?;
        }

        let column = summary.column_mut(col_name);
        column.missing_after = 0;
        column.fill_value = Some(format!("{}", median_val));

        summary.add_action(
            CleaningAction::new(
                ActionType::ValueImputed,
                col_name,
                format!("Filled {} missing values with median", missing),
            )
            .with_details(format!("median = {:.2}", median_val)),
        );
        debug!("Filled missing '{}' with median = {}", col_name, median_val);

        Ok(Some(median_val))
    }

    /// Fill the nulls of a categorical column with its mode.
    ///
    /// Returns the value used, or `None` for a wholly-missing column.
    pub fn apply_mode_imputation(
        df: &mut DataFrame,
        col_name: &str,
        placeholder: &str,
        summary: &mut CleaningSummary,
    ) -> Result<Option<String>> {
        let series = require_series(df, col_name)?;
        let missing = series.null_count();
        summary.column_mut(col_name).missing_before = missing;

        let values = string_values(&series)?;
        let Some(mode_val) = mode_fill_value(&values, placeholder) else {
            debug!("'{}' has no values, mode imputation skipped", col_name);
            summary.add_action(CleaningAction::new(
                ActionType::StageSkipped,
                col_name,
                "Imputation skipped: column is entirely missing",
            ));
            summary.column_mut(col_name).missing_after = missing;
            return Ok(None);
        };

        if missing > 0 {
            let filled = fill_string_nulls(&series, &mode_val)?;
            df.replace(col_name, filled)?;
        }

        let column = summary.column_mut(col_name);
        column.missing_after = 0;
        column.fill_value = Some(mode_val.clone());

        summary.add_action(
            CleaningAction::new(
                ActionType::ValueImputed,
                col_name,
                format!("Filled {} missing values with mode", missing),
            )
            .with_details(format!("mode = '{}'", mode_val)),
        );
        debug!("Filled missing '{}' with mode: {}", col_name, mode_val);

        Ok(Some(mode_val))
    }
}
