//! Derived list-count features.

use crate::columns::{GENRE, NUM_GENRES, NUM_STARS, STARS};
use crate::error::Result;
use crate::types::{ActionType, CleaningAction, CleaningSummary};
use crate::utils::{count_list_entries, has_column, string_values};
use polars::prelude::*;
use tracing::{debug, warn};

/// Source column and derived column for each list-count feature.
pub const LIST_FEATURES: [(&str, &str); 2] = [(STARS, NUM_STARS), (GENRE, NUM_GENRES)];

/// Adds the `num_stars` and `num_genres` columns.
pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Append every list-count feature. Always adds both columns.
    pub fn add_list_counts(df: &mut DataFrame, summary: &mut CleaningSummary) -> Result<()> {
        for (source, target) in LIST_FEATURES {
            let counts = match Self::list_counts(df, source) {
                Ok(counts) => counts,
                Err(e) => {
                    warn!("Failed to count entries in '{}': {}", source, e);
                    summary.add_warning(format!("{} set to 0: {}", target, e));
                    vec![0; df.height()]
                }
            };

            let total: i64 = counts.iter().sum();
            df.with_column(Series::new(target.into(), counts))?;

            summary.add_action(CleaningAction::new(
                ActionType::FeatureAdded,
                target,
                format!("Added {} from {} ({} entries in total)", target, source, total),
            ));
            debug!("Added '{}' from '{}'", target, source);
        }
        Ok(())
    }

    /// Per-row entry counts of a list column; zeros when the column is absent.
    pub fn list_counts(df: &DataFrame, source: &str) -> Result<Vec<i64>> {
        if !has_column(df, source) {
            debug!("Column '{}' absent, counts default to 0", source);
            return Ok(vec![0; df.height()]);
        }

        let values = string_values(df.column(source)?.as_materialized_series())?;
        Ok(values
            .iter()
            .map(|v| v.as_deref().map_or(0, |text| count_list_entries(text) as i64))
            .collect())
    }
}
