//! Imputation module for handling missing values.
//!
//! Fill values are computed by pure functions over a column's present values
//! and come back as `Option`: `None` means the column is wholly missing and
//! must be left alone.

mod statistical;

pub use statistical::{StatisticalImputer, median_fill_value, mode_fill_value};
