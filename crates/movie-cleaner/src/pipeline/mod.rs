//! Pipeline module.
//!
//! This module provides the cleaning pipeline and its later stages.

mod builder;
pub mod features;
pub mod outliers;
pub mod progress;
pub mod scaling;

pub use builder::{Pipeline, PipelineBuilder, clean};
pub use features::FeatureEngineer;
pub use outliers::OutlierHandler;
pub use progress::{ClosureProgressReporter, CleaningStage, ProgressReporter, ProgressUpdate};
pub use scaling::Scaler;
