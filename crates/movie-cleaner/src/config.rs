//! Configuration types for the cleaning pipeline and the batch runner.
//!
//! [`CleaningConfig`] holds the per-file toggles and is built through
//! [`CleaningConfig::builder()`]. [`BatchConfig`] holds the folder layout the
//! CLI hands to [`run_batch`](crate::batch::run_batch).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default folder scanned for raw CSV files.
pub const DEFAULT_UNCLEANED_FOLDER: &str = "uncleaned_files";

/// Default folder receiving cleaned CSV files.
pub const DEFAULT_CLEANED_FOLDER: &str = "cleaned_files";

/// Configuration for the cleaning pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use movie_cleaner::CleaningConfig;
///
/// let config = CleaningConfig::builder()
///     .scale_numeric(false)
///     .clip_percentile(0.95)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Whether to drop rows that exactly duplicate an earlier row.
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether to min-max scale RATING, VOTES, RunTime and Gross into [0, 1].
    /// Default: true
    pub scale_numeric: bool,

    /// Whether to clip RunTime at `clip_percentile`.
    /// Default: true
    pub clip_outliers: bool,

    /// Quantile used as the RunTime ceiling, in (0.0, 1.0].
    /// Default: 0.99
    pub clip_percentile: f64,

    /// Value used for GENRE when a mode exists but is degenerate (empty).
    /// Default: "Unknown"
    pub categorical_placeholder: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            scale_numeric: true,
            clip_outliers: true,
            clip_percentile: 0.99,
            categorical_placeholder: "Unknown".to_string(),
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.clip_percentile > 0.0 && self.clip_percentile <= 1.0) {
            return Err(ConfigValidationError::InvalidPercentile(
                self.clip_percentile,
            ));
        }

        if self.categorical_placeholder.trim().is_empty() {
            return Err(ConfigValidationError::EmptyPlaceholder);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid clip percentile: {0} (must be greater than 0.0 and at most 1.0)")]
    InvalidPercentile(f64),

    #[error("Categorical placeholder must not be empty")]
    EmptyPlaceholder,
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    remove_duplicates: Option<bool>,
    scale_numeric: Option<bool>,
    clip_outliers: Option<bool>,
    clip_percentile: Option<f64>,
    categorical_placeholder: Option<String>,
}

impl CleaningConfigBuilder {
    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Enable or disable min-max scaling of the numeric columns.
    pub fn scale_numeric(mut self, scale: bool) -> Self {
        self.scale_numeric = Some(scale);
        self
    }

    /// Enable or disable RunTime clipping.
    pub fn clip_outliers(mut self, clip: bool) -> Self {
        self.clip_outliers = Some(clip);
        self
    }

    /// Set the quantile used as the RunTime ceiling.
    ///
    /// # Arguments
    /// * `percentile` - Value in (0.0, 1.0] (e.g., 0.99 = 99th percentile)
    pub fn clip_percentile(mut self, percentile: f64) -> Self {
        self.clip_percentile = Some(percentile);
        self
    }

    /// Set the GENRE placeholder used when the mode is degenerate.
    pub fn categorical_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.categorical_placeholder = Some(placeholder.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let defaults = CleaningConfig::default();
        let config = CleaningConfig {
            remove_duplicates: self.remove_duplicates.unwrap_or(defaults.remove_duplicates),
            scale_numeric: self.scale_numeric.unwrap_or(defaults.scale_numeric),
            clip_outliers: self.clip_outliers.unwrap_or(defaults.clip_outliers),
            clip_percentile: self.clip_percentile.unwrap_or(defaults.clip_percentile),
            categorical_placeholder: self
                .categorical_placeholder
                .unwrap_or(defaults.categorical_placeholder),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Folder layout and side-channel switches for a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Folder scanned (non-recursively) for `*.csv` files.
    pub input_dir: PathBuf,
    /// Folder receiving cleaned files; created when missing.
    pub output_dir: PathBuf,
    /// Whether to write diagnostics next to each cleaned file.
    pub plot: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_UNCLEANED_FOLDER),
            output_dir: PathBuf::from(DEFAULT_CLEANED_FOLDER),
            plot: true,
        }
    }
}

impl BatchConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            plot: true,
        }
    }

    /// Enable or disable diagnostics output.
    pub fn with_plot(mut self, plot: bool) -> Self {
        self.plot = plot;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleaningConfig::default();
        assert!(config.remove_duplicates);
        assert!(config.scale_numeric);
        assert!(config.clip_outliers);
        assert_eq!(config.clip_percentile, 0.99);
        assert_eq!(config.categorical_placeholder, "Unknown");
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = CleaningConfig::builder().build().unwrap();
        assert_eq!(config, CleaningConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleaningConfig::builder()
            .remove_duplicates(false)
            .scale_numeric(false)
            .clip_outliers(false)
            .clip_percentile(0.95)
            .categorical_placeholder("Other")
            .build()
            .unwrap();

        assert!(!config.remove_duplicates);
        assert!(!config.scale_numeric);
        assert!(!config.clip_outliers);
        assert_eq!(config.clip_percentile, 0.95);
        assert_eq!(config.categorical_placeholder, "Other");
    }

    #[test]
    fn test_validation_invalid_percentile() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let result = CleaningConfig::builder().clip_percentile(bad).build();
            assert!(matches!(
                result.unwrap_err(),
                ConfigValidationError::InvalidPercentile(_)
            ));
        }
        assert!(CleaningConfig::builder().clip_percentile(1.0).build().is_ok());
    }

    #[test]
    fn test_validation_empty_placeholder() {
        let result = CleaningConfig::builder()
            .categorical_placeholder("   ")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPlaceholder
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "remove_duplicates": true,
            "scale_numeric": false,
            "clip_outliers": true,
            "clip_percentile": 0.9,
            "categorical_placeholder": "Unknown"
        }"#;

        let config: CleaningConfig = serde_json::from_str(json).unwrap();
        assert!(!config.scale_numeric);
        assert_eq!(config.clip_percentile, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_batch_config_defaults() {
        let batch = BatchConfig::default();
        assert_eq!(batch.input_dir, PathBuf::from("uncleaned_files"));
        assert_eq!(batch.output_dir, PathBuf::from("cleaned_files"));
        assert!(batch.plot);
        assert!(!BatchConfig::new("a", "b").with_plot(false).plot);
    }
}
