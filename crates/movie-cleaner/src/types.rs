use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Result of running the pipeline over one dataset.
#[derive(Debug, Clone)]
pub struct CleanedDataset {
    /// The cleaned table; original column order, derived columns appended.
    pub data: DataFrame,
    /// What the pipeline did to produce it.
    pub summary: CleaningSummary,
}

// ============================================================================
// Cleaning Summary Types
// ============================================================================

/// Human-readable summary of what the pipeline did to one file.
///
/// # Example
///
/// ```rust,ignore
/// let cleaned = pipeline.clean(df)?;
/// println!(
///     "{} -> {} rows ({} duplicates) in {}ms",
///     cleaned.summary.rows_before,
///     cleaned.summary.rows_after,
///     cleaned.summary.duplicates_removed,
///     cleaned.summary.duration_ms,
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    pub rows_before: usize,
    pub rows_after: usize,
    /// Exact duplicate rows dropped by the first stage.
    pub duplicates_removed: usize,

    pub columns_before: usize,
    pub columns_after: usize,

    /// Null cells across the whole table once numeric parsing is done.
    pub missing_cells_before: usize,
    /// Null cells across the whole table at the end.
    pub missing_cells_after: usize,

    /// List of actions taken, in stage order.
    pub actions: Vec<CleaningAction>,

    /// Per-column summaries for the recognized columns that were present.
    pub column_summaries: Vec<ColumnSummary>,

    /// Recovered failures and notable skips.
    pub warnings: Vec<String>,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an action to the summary.
    pub fn add_action(&mut self, action: CleaningAction) {
        self.actions.push(action);
    }

    /// Add a warning to the summary.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get or create the summary entry for a column.
    pub fn column_mut(&mut self, name: &str) -> &mut ColumnSummary {
        if let Some(i) = self.column_summaries.iter().position(|c| c.name == name) {
            &mut self.column_summaries[i]
        } else {
            self.column_summaries.push(ColumnSummary::new(name));
            let last = self.column_summaries.len() - 1;
            &mut self.column_summaries[last]
        }
    }

    /// Look up the summary entry for a column.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.column_summaries.iter().find(|c| c.name == name)
    }

    /// Actions of one type, in order.
    pub fn actions_of(&self, action_type: ActionType) -> impl Iterator<Item = &CleaningAction> {
        self.actions
            .iter()
            .filter(move |a| a.action_type == action_type)
    }
}

/// A single action taken during cleaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningAction {
    /// Type of action performed.
    pub action_type: ActionType,
    /// Target of the action (column name or "dataset").
    pub target: String,
    /// Human-readable description of the action.
    pub description: String,
    /// Additional details (e.g., the fill value used).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CleaningAction {
    /// Create a new cleaning action.
    pub fn new(
        action_type: ActionType,
        target: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action_type,
            target: target.into(),
            description: description.into(),
            details: None,
        }
    }

    /// Add details to the action.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Types of actions the pipeline records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Duplicate rows were removed.
    DuplicatesRemoved,
    /// Text cells were trimmed and had line breaks removed.
    TextNormalized,
    /// A text column was parsed into a numeric type.
    TypeConverted,
    /// Missing values were imputed.
    ValueImputed,
    /// A derived column was added.
    FeatureAdded,
    /// Values above a percentile were clipped.
    OutlierClipped,
    /// A column was min-max scaled.
    DataNormalized,
    /// A stage was skipped (absent or wholly-missing column).
    StageSkipped,
}

/// Summary of changes made to a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Name of the column.
    pub name: String,
    /// Missing values right after parsing (before imputation).
    pub missing_before: usize,
    /// Missing values at the end.
    pub missing_after: usize,
    /// Cells that held text but could not be parsed into a number.
    pub parse_failures: usize,
    /// Value written into missing cells, if imputation ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_value: Option<String>,
    /// Number of values clipped down to the percentile ceiling.
    pub values_clipped: usize,
    /// Whether the column was min-max scaled.
    pub scaled: bool,
}

impl ColumnSummary {
    /// Create a new column summary with default values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            missing_before: 0,
            missing_after: 0,
            parse_failures: 0,
            fill_value: None,
            values_clipped: 0,
            scaled: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
