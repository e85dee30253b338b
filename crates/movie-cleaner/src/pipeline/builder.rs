//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! running one movie table through every cleaning stage.

use crate::cleaner::DataCleaner;
use crate::cleaner::converters::convert_numeric_columns;
use crate::columns::{GENRE, NUMERIC_COLUMNS, RUNTIME};
use crate::config::CleaningConfig;
use crate::error::{CleaningError, Result};
use crate::imputers::StatisticalImputer;
use crate::pipeline::features::FeatureEngineer;
use crate::pipeline::outliers::OutlierHandler;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::pipeline::scaling::Scaler;
use crate::types::{ActionType, CleanedDataset, CleaningAction, CleaningSummary};
use crate::utils::{has_column, missing_cells};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use movie_cleaner::{CleaningConfig, Pipeline};
///
/// let cleaned = Pipeline::builder()
///     .config(CleaningConfig::builder().scale_numeric(false).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .clean(dataframe)?;
/// ```
pub struct Pipeline {
    config: CleaningConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
}

// Pipeline can be moved to another thread.
static_assertions::assert_impl_all!(Pipeline: Send);

/// Clean one table with the given configuration.
///
/// Shorthand for building a [`Pipeline`] without a progress reporter.
pub fn clean(df: DataFrame, config: &CleaningConfig) -> Result<CleanedDataset> {
    Pipeline::builder().config(config.clone()).build()?.clean(df)
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Run every stage over `df` and return the cleaned table with its summary.
    ///
    /// Stages whose column is absent are skipped. A failure confined to one
    /// column is logged, noted in the summary warnings, and that column keeps
    /// its previous state. Only a table-wide failure returns `Err`.
    pub fn clean(&self, df: DataFrame) -> Result<CleanedDataset> {
        let start_time = Instant::now();

        let mut summary = CleaningSummary::new();
        summary.rows_before = df.height();
        summary.columns_before = df.width();
        info!(
            "Cleaning {} rows x {} columns...",
            summary.rows_before, summary.columns_before
        );

        // Step 1: Deduplication
        self.start_stage(CleaningStage::Deduplication, "Removing duplicate rows...");
        let mut df = if self.config.remove_duplicates {
            self.cleaner.remove_duplicates(df, &mut summary)?
        } else {
            summary.add_action(CleaningAction::new(
                ActionType::StageSkipped,
                "dataset",
                "Duplicate removal disabled",
            ));
            df
        };

        // Step 2: Text normalization
        self.start_stage(CleaningStage::TextNormalization, "Normalizing text columns...");
        self.cleaner.normalize_text_columns(&mut df, &mut summary)?;

        // Step 3: Year, votes, gross, rating and runtime parsing
        self.start_stage(CleaningStage::NumericParsing, "Parsing numeric columns...");
        convert_numeric_columns(&mut df, &mut summary);
        summary.missing_cells_before = missing_cells(&df);

        // Step 4: Imputation
        self.start_stage(CleaningStage::Imputation, "Imputing missing values...");
        self.impute(&mut df, &mut summary);

        // Step 5: Derived features
        self.start_stage(CleaningStage::FeatureEngineering, "Adding list counts...");
        FeatureEngineer::add_list_counts(&mut df, &mut summary)?;

        // Step 6: Runtime clipping
        self.start_stage(CleaningStage::OutlierClipping, "Clipping runtime outliers...");
        if self.config.clip_outliers {
            self.clip_runtime(&mut df, &mut summary);
        } else {
            debug!("Outlier clipping disabled");
        }

        // Step 7: Scaling
        self.start_stage(CleaningStage::Scaling, "Scaling numeric columns...");
        if self.config.scale_numeric {
            self.scale(&mut df, &mut summary);
        } else {
            debug!("Scaling disabled");
        }

        summary.rows_after = df.height();
        summary.columns_after = df.width();
        summary.missing_cells_after = missing_cells(&df);
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Cleaned to {} rows x {} columns in {}ms ({} duplicates, {} missing cells left)",
            summary.rows_after,
            summary.columns_after,
            summary.duration_ms,
            summary.duplicates_removed,
            summary.missing_cells_after
        );
        self.report_progress(ProgressUpdate::complete("Cleaning completed"));

        Ok(CleanedDataset { data: df, summary })
    }

    fn impute(&self, df: &mut DataFrame, summary: &mut CleaningSummary) {
        for name in NUMERIC_COLUMNS {
            if !has_column(df, name) {
                debug!("Column '{}' absent, skipping median imputation", name);
                continue;
            }
            let result = StatisticalImputer::apply_numeric_median(df, name, summary);
            recover(summary, "Median imputation", name, result);
        }

        if has_column(df, GENRE) {
            let result = StatisticalImputer::apply_mode_imputation(
                df,
                GENRE,
                &self.config.categorical_placeholder,
                summary,
            );
            recover(summary, "Mode imputation", GENRE, result);
        } else {
            debug!("Column '{}' absent, skipping mode imputation", GENRE);
        }
    }

    fn clip_runtime(&self, df: &mut DataFrame, summary: &mut CleaningSummary) {
        if !has_column(df, RUNTIME) {
            debug!("Column '{}' absent, skipping outlier clipping", RUNTIME);
            return;
        }
        let result =
            OutlierHandler::clip_upper(df, RUNTIME, self.config.clip_percentile, summary);
        if let Some(Some(threshold)) = recover(summary, "Outlier clipping", RUNTIME, result) {
            info!(
                "{} percentile of {}: {:.2}",
                self.config.clip_percentile, RUNTIME, threshold
            );
        }
    }

    fn scale(&self, df: &mut DataFrame, summary: &mut CleaningSummary) {
        let mut scaled = Vec::new();
        for name in NUMERIC_COLUMNS {
            if !has_column(df, name) {
                debug!("Column '{}' absent, skipping scaling", name);
                continue;
            }
            let result = Scaler::min_max_column(df, name, summary);
            if let Some(true) = recover(summary, "Scaling", name, result) {
                scaled.push(name);
            }
        }
        if !scaled.is_empty() {
            info!("Scaled columns: {}", scaled.join(", "));
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn start_stage(&self, stage: CleaningStage, message: &str) {
        debug!("{}", stage.display_name());
        self.report_progress(ProgressUpdate::new(stage, message));
    }
}

/// Turn a column-level failure into a summary warning.
fn recover<T>(
    summary: &mut CleaningSummary,
    stage: &str,
    column: &str,
    result: Result<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{} failed for '{}': {}", stage, column, e);
            summary.add_warning(format!("{} skipped for {}: {}", stage, column, e));
            None
        }
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during cleaning.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use movie_cleaner::{ProgressReporter, ProgressUpdate};
    /// use std::sync::Arc;
    ///
    /// struct MyReporter;
    ///
    /// impl ProgressReporter for MyReporter {
    ///     fn report(&self, update: ProgressUpdate) {
    ///         println!("{}: {}", update.stage.display_name(), update.message);
    ///     }
    /// }
    ///
    /// let pipeline = Pipeline::builder()
    ///     .progress_reporter(Arc::new(MyReporter))
    ///     .build()?;
    /// ```
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// Convenience over [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns [`CleaningError::InvalidConfig`] if the configuration is invalid.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: DataCleaner,
        })
    }
}
