//! Per-file min-max scaling.

use crate::error::Result;
use crate::types::{ActionType, CleaningAction, CleaningSummary};
use crate::utils::{float_values, min_max, min_max_scale, require_series};
use polars::prelude::*;
use tracing::debug;

pub struct Scaler;

impl Scaler {
    /// Rescale one column into [0, 1] using its own min and max.
    ///
    /// Returns `false` when the column is wholly missing and was left alone.
    pub fn min_max_column(
        df: &mut DataFrame,
        col_name: &str,
        summary: &mut CleaningSummary,
    ) -> Result<bool> {
        let values = float_values(&require_series(df, col_name)?)?;

        let (Some((lo, hi)), Some(scaled)) = (min_max(&values), min_max_scale(&values)) else {
            debug!("'{}' has no values, scaling skipped", col_name);
            return Ok(false);
        };

        df.replace(col_name, Series::new(col_name.into(), scaled))?;

        summary.column_mut(col_name).scaled = true;
        summary.add_action(
            CleaningAction::new(
                ActionType::DataNormalized,
                col_name,
                format!("Min-max scaled {} into [0, 1]", col_name),
            )
            .with_details(format!("min = {}, max = {}", lo, hi)),
        );
        debug!("Scaled '{}' (min = {}, max = {})", col_name, lo, hi);

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        float_values(df.column(name).unwrap().as_materialized_series()).unwrap()
    }

    #[test]
    fn test_min_max_column() {
        let mut df = df!["VOTES" => [Some(0.0), Some(50.0), None, Some(100.0)]].unwrap();
        let mut summary = CleaningSummary::new();

        assert!(Scaler::min_max_column(&mut df, "VOTES", &mut summary).unwrap());
        assert_eq!(
            floats(&df, "VOTES"),
            vec![Some(0.0), Some(0.5), None, Some(1.0)]
        );
        assert!(summary.column("VOTES").unwrap().scaled);
        assert_eq!(summary.actions_of(ActionType::DataNormalized).count(), 1);
    }

    #[test]
    fn test_min_max_column_constant() {
        let mut df = df!["RATING" => [5.0, 5.0, 5.0]].unwrap();
        let mut summary = CleaningSummary::new();

        Scaler::min_max_column(&mut df, "RATING", &mut summary).unwrap();
        assert_eq!(
            floats(&df, "RATING"),
            vec![Some(0.0), Some(0.0), Some(0.0)]
        );
    }

    #[test]
    fn test_min_max_column_all_missing() {
        let mut df = df!["Gross" => [Option::<f64>::None, None]].unwrap();
        let mut summary = CleaningSummary::new();

        assert!(!Scaler::min_max_column(&mut df, "Gross", &mut summary).unwrap());
        assert_eq!(df.column("Gross").unwrap().null_count(), 2);
        assert!(summary.column("Gross").is_none());
    }
}
