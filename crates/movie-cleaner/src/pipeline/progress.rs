//! Progress reporting for the cleaning pipeline.
//!
//! The pipeline runs to completion on the calling thread; progress updates
//! exist so a caller (the CLI, a test) can observe which stage is running.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_cleaner::Pipeline;
//!
//! let cleaned = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .clean(df)?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Dropping exact duplicate rows
    Deduplication,
    /// Trimming text and removing line breaks
    TextNormalization,
    /// Parsing YEAR, VOTES, Gross, RATING and RunTime
    NumericParsing,
    /// Median and mode imputation
    Imputation,
    /// Adding num_stars and num_genres
    FeatureEngineering,
    /// Clipping RunTime at the configured percentile
    OutlierClipping,
    /// Min-max scaling of the numeric columns
    Scaling,
    /// Pipeline completed
    Complete,
}

impl CleaningStage {
    /// Every working stage, in order.
    pub const ORDER: [CleaningStage; 7] = [
        Self::Deduplication,
        Self::TextNormalization,
        Self::NumericParsing,
        Self::Imputation,
        Self::FeatureEngineering,
        Self::OutlierClipping,
        Self::Scaling,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Deduplication => "Removing Duplicates",
            Self::TextNormalization => "Normalizing Text",
            Self::NumericParsing => "Parsing Numbers",
            Self::Imputation => "Imputing Values",
            Self::FeatureEngineering => "Engineering Features",
            Self::OutlierClipping => "Clipping Outliers",
            Self::Scaling => "Scaling Columns",
            Self::Complete => "Complete",
        }
    }

    /// Fraction of the pipeline finished when this stage starts.
    pub fn base_progress(&self) -> f32 {
        match Self::ORDER.iter().position(|s| s == self) {
            Some(i) => i as f32 / Self::ORDER.len() as f32,
            None => 1.0,
        }
    }
}

/// A single progress update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    /// Update marking the start of a stage.
    pub fn new(stage: CleaningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress(),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: CleaningStage::Complete,
            progress: 1.0,
            message: message.into(),
        }
    }
}

/// Receives progress updates during cleaning.
///
/// `Send + Sync` so a [`Pipeline`](crate::Pipeline) holding one stays `Send`.
pub trait ProgressReporter: Send + Sync {
    /// Called once at the start of each stage and once on completion.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_base_progress_is_monotonic() {
        let progress: Vec<f32> = CleaningStage::ORDER
            .iter()
            .map(|s| s.base_progress())
            .collect();
        assert_eq!(progress[0], 0.0);
        assert!(progress.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(CleaningStage::Complete.base_progress(), 1.0);
    }

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(CleaningStage::Imputation, "Imputing...");
        assert_eq!(update.stage, CleaningStage::Imputation);
        assert_eq!(update.message, "Imputing...");
        assert!(update.progress > 0.0 && update.progress < 1.0);
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(CleaningStage::Scaling, "Test"));
        reporter.report(ProgressUpdate::complete("Done"));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stage_json_values() {
        let expectations = [
            (CleaningStage::Deduplication, "\"deduplication\""),
            (CleaningStage::TextNormalization, "\"text_normalization\""),
            (CleaningStage::OutlierClipping, "\"outlier_clipping\""),
            (CleaningStage::Complete, "\"complete\""),
        ];

        for (stage, expected) in expectations {
            assert_eq!(serde_json::to_string(&stage).unwrap(), expected);
        }
    }
}
