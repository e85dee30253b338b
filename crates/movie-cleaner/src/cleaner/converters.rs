//! Type conversion of text columns into numbers.
//!
//! A cell that holds text the parser rejects becomes null; it is counted as a
//! parse failure, never raised as an error.

use crate::columns::{GROSS, RATING, RUNTIME, VOTES, YEAR};
use crate::error::Result;
use crate::types::{ActionType, CleaningAction, CleaningSummary};
use crate::utils::{extract_year, has_column, parse_float, parse_gross, parse_votes, string_values};
use polars::prelude::*;
use tracing::{debug, warn};

/// How a recognized numeric column is read from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericParse {
    /// First four-digit run, stored as Int64.
    Year,
    /// Thousands separators removed, stored as Float64.
    Votes,
    /// Everything but digits and dots removed, stored as Float64.
    Gross,
    /// Plain float, stored as Float64.
    Float,
}

impl NumericParse {
    fn describe(&self) -> &'static str {
        match self {
            Self::Year => "extracted 4-digit year",
            Self::Votes => "removed thousands separators",
            Self::Gross => "stripped non-numeric characters",
            Self::Float => "parsed as float",
        }
    }
}

/// Columns converted by [`convert_numeric_columns`], in processing order.
pub const NUMERIC_PARSES: [(&str, NumericParse); 5] = [
    (YEAR, NumericParse::Year),
    (VOTES, NumericParse::Votes),
    (GROSS, NumericParse::Gross),
    (RATING, NumericParse::Float),
    (RUNTIME, NumericParse::Float),
];

/// Convert every recognized numeric column present in the frame.
///
/// A column whose conversion errors out is left as it was and noted as a
/// warning; the remaining columns are still converted.
pub fn convert_numeric_columns(df: &mut DataFrame, summary: &mut CleaningSummary) {
    for (name, parse) in NUMERIC_PARSES {
        if !has_column(df, name) {
            debug!("Column '{}' absent, skipping numeric parsing", name);
            continue;
        }

        match convert_column(df, name, parse) {
            Ok(failures) => {
                summary.column_mut(name).parse_failures = failures;
                summary.add_action(
                    CleaningAction::new(
                        ActionType::TypeConverted,
                        name,
                        format!("Converted {} to numeric ({})", name, parse.describe()),
                    )
                    .with_details(format!("{} unparsable cells set to missing", failures)),
                );
                debug!("Converted '{}' ({} unparsable cells)", name, failures);
            }
            Err(e) => {
                warn!("Failed to convert '{}': {}", name, e);
                summary.add_warning(format!("Numeric parsing skipped for {}: {}", name, e));
            }
        }
    }
}

/// Convert one column in place, returning how many present cells failed to parse.
pub fn convert_column(df: &mut DataFrame, name: &str, parse: NumericParse) -> Result<usize> {
    let values = string_values(df.column(name)?.as_materialized_series())?;
    let present = values.iter().filter(|v| v.is_some()).count();

    let series = match parse {
        NumericParse::Year => {
            let parsed: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.as_deref().and_then(extract_year))
                .collect();
            Series::new(name.into(), parsed)
        }
        NumericParse::Votes | NumericParse::Gross | NumericParse::Float => {
            let parser: fn(&str) -> Option<f64> = match parse {
                NumericParse::Votes => parse_votes,
                NumericParse::Gross => parse_gross,
                _ => parse_float,
            };
            let parsed: Vec<Option<f64>> = values
                .iter()
                .map(|v| v.as_deref().and_then(parser))
                .collect();
            Series::new(name.into(), parsed)
        }
    };

    let failures = present.saturating_sub(series.len() - series.null_count());
    df.replace(name, series)?;
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::float_values;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        float_values(df.column(name).unwrap().as_materialized_series()).unwrap()
    }

    #[test]
    fn test_convert_year_column() {
        let mut df = df![
            "YEAR" => [Some("(2021)"), Some("Released in 1999!"), Some("No year here"), None],
        ]
        .unwrap();

        let failures = convert_column(&mut df, "YEAR", NumericParse::Year).unwrap();

        let year = df.column("YEAR").unwrap();
        assert_eq!(year.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = year.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(2021), Some(1999), None, None]);
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_convert_votes_column() {
        let mut df = df!["VOTES" => ["12,345", "abc", "1,000"]].unwrap();
        let failures = convert_column(&mut df, "VOTES", NumericParse::Votes).unwrap();

        assert_eq!(
            floats(&df, "VOTES"),
            vec![Some(12345.0), None, Some(1000.0)]
        );
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_convert_gross_column_keeps_suffix_limitation() {
        let mut df = df!["Gross" => ["$1,234.50", "1.2M", "$75.47M"]].unwrap();
        convert_column(&mut df, "Gross", NumericParse::Gross).unwrap();

        assert_eq!(
            floats(&df, "Gross"),
            vec![Some(1234.50), Some(1.2), Some(75.47)]
        );
    }

    #[test]
    fn test_convert_numeric_columns_skips_absent_and_records() {
        let mut df = df![
            "RATING" => [Some("8.5"), Some(" 7.0 "), None],
            "MOVIES" => ["a", "b", "c"],
        ]
        .unwrap();
        let mut summary = CleaningSummary::new();

        convert_numeric_columns(&mut df, &mut summary);

        assert_eq!(df.column("RATING").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("MOVIES").unwrap().dtype(), &DataType::String);
        assert_eq!(summary.actions_of(ActionType::TypeConverted).count(), 1);
        assert_eq!(summary.column("RATING").unwrap().parse_failures, 0);
        assert!(summary.column("VOTES").is_none());
    }

    #[test]
    fn test_convert_already_numeric_column() {
        let mut df = df!["RunTime" => [Some(120.0), None]].unwrap();
        let failures = convert_column(&mut df, "RunTime", NumericParse::Float).unwrap();
        assert_eq!(floats(&df, "RunTime"), vec![Some(120.0), None]);
        assert_eq!(failures, 0);
    }
}
