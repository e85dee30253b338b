//! Outlier handling module.
//!
//! Upper-tail clipping of a numeric column at a percentile of its own values.

use crate::error::Result;
use crate::types::{ActionType, CleaningAction, CleaningSummary};
use crate::utils::{float_values, quantile, require_series};
use polars::prelude::*;
use tracing::debug;

/// Handles outlier treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Cap a column at its `percentile` quantile.
    ///
    /// Values above the threshold become exactly the threshold; missing cells
    /// stay missing. Returns the threshold, or `None` for a wholly-missing
    /// column (left untouched).
    pub fn clip_upper(
        df: &mut DataFrame,
        col_name: &str,
        percentile: f64,
        summary: &mut CleaningSummary,
    ) -> Result<Option<f64>> {
        let values = float_values(&require_series(df, col_name)?)?;

        let Some(threshold) = quantile(&values, percentile) else {
            debug!("'{}' has no values, clipping skipped", col_name);
            return Ok(None);
        };

        let (clipped, capped) = clip_values(&values, threshold);
        df.replace(col_name, Series::new(col_name.into(), clipped))?;

        summary.column_mut(col_name).values_clipped = capped;
        summary.add_action(
            CleaningAction::new(
                ActionType::OutlierClipped,
                col_name,
                format!(
                    "Capped {} values in {} at the {} percentile",
                    capped,
                    col_name,
                    percentile_label(percentile)
                ),
            )
            .with_details(format!("threshold = {:.2}", threshold)),
        );
        debug!(
            "Capped {} values in '{}' at {} (q = {})",
            capped, col_name, threshold, percentile
        );

        Ok(Some(threshold))
    }
}

/// Replace every value above `threshold` with it, returning how many changed.
pub fn clip_values(values: &[Option<f64>], threshold: f64) -> (Vec<Option<f64>>, usize) {
    let mut capped = 0;
    let clipped = values
        .iter()
        .map(|v| {
            v.map(|x| {
                if x > threshold {
                    capped += 1;
                    threshold
                } else {
                    x
                }
            })
        })
        .collect();
    (clipped, capped)
}

fn percentile_label(percentile: f64) -> String {
    let pct = (percentile * 100.0).round() as i64;
    let suffix = match (pct % 10, pct % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", pct, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        float_values(df.column(name).unwrap().as_materialized_series()).unwrap()
    }

    #[test]
    fn test_clip_upper_caps_at_threshold() {
        let values: Vec<f64> = (1..=101).map(|x| x as f64).collect();
        let mut df = df!["RunTime" => values].unwrap();
        let mut summary = CleaningSummary::new();

        let threshold = OutlierHandler::clip_upper(&mut df, "RunTime", 0.99, &mut summary)
            .unwrap()
            .unwrap();

        assert_eq!(threshold, 100.0);
        let out = floats(&df, "RunTime");
        assert_eq!(out[100], Some(100.0));
        assert_eq!(out[99], Some(100.0));
        assert_eq!(out[0], Some(1.0));
        assert_eq!(df.height(), 101);
        assert_eq!(summary.column("RunTime").unwrap().values_clipped, 1);
        assert_eq!(summary.actions_of(ActionType::OutlierClipped).count(), 1);
    }

    #[test]
    fn test_clip_upper_interpolates_between_ranks() {
        let mut df = df!["RunTime" => [0.0, 10.0]].unwrap();
        let mut summary = CleaningSummary::new();

        let threshold = OutlierHandler::clip_upper(&mut df, "RunTime", 0.99, &mut summary)
            .unwrap()
            .unwrap();

        assert!((threshold - 9.9).abs() < 1e-9);
        let out = floats(&df, "RunTime");
        assert_eq!(out[0], Some(0.0));
        assert_eq!(out[1], Some(threshold));
    }

    #[test]
    fn test_clip_upper_keeps_missing_cells() {
        let mut df = df!["RunTime" => [Some(90.0), None, Some(500.0)]].unwrap();
        let mut summary = CleaningSummary::new();

        OutlierHandler::clip_upper(&mut df, "RunTime", 0.5, &mut summary).unwrap();

        let out = floats(&df, "RunTime");
        assert_eq!(out[1], None);
        assert!(out[2].unwrap() < 500.0);
    }

    #[test]
    fn test_clip_upper_all_missing_untouched() {
        let mut df = df!["RunTime" => [Option::<f64>::None, None]].unwrap();
        let mut summary = CleaningSummary::new();

        let threshold =
            OutlierHandler::clip_upper(&mut df, "RunTime", 0.99, &mut summary).unwrap();

        assert_eq!(threshold, None);
        assert_eq!(df.column("RunTime").unwrap().null_count(), 2);
        assert!(summary.actions.is_empty());
    }

    #[test]
    fn test_clip_upper_column_not_in_df() {
        let mut df = df!["other" => [1.0, 2.0, 3.0]].unwrap();
        let mut summary = CleaningSummary::new();
        assert!(OutlierHandler::clip_upper(&mut df, "RunTime", 0.99, &mut summary).is_err());
    }

    #[test]
    fn test_clip_values() {
        let (out, capped) = clip_values(&[Some(1.0), Some(5.0), None, Some(9.0)], 4.0);
        assert_eq!(out, vec![Some(1.0), Some(4.0), None, Some(4.0)]);
        assert_eq!(capped, 2);
    }

    #[test]
    fn test_percentile_label() {
        assert_eq!(percentile_label(0.99), "99th");
        assert_eq!(percentile_label(0.95), "95th");
        assert_eq!(percentile_label(0.01), "1st");
        assert_eq!(percentile_label(0.11), "11th");
    }
}
