//! Column names recognized by the cleaner.
//!
//! Every other column in an input file passes through untouched.

pub const MOVIES: &str = "MOVIES";
pub const GENRE: &str = "GENRE";
pub const ONE_LINE: &str = "ONE-LINE";
pub const STARS: &str = "STARS";
pub const YEAR: &str = "YEAR";
pub const RATING: &str = "RATING";
pub const VOTES: &str = "VOTES";
pub const RUNTIME: &str = "RunTime";
pub const GROSS: &str = "Gross";

/// Derived: number of entries in STARS.
pub const NUM_STARS: &str = "num_stars";
/// Derived: number of entries in GENRE.
pub const NUM_GENRES: &str = "num_genres";

/// Free-text columns that get trimmed and have newlines removed.
pub const TEXT_COLUMNS: [&str; 4] = [MOVIES, GENRE, ONE_LINE, STARS];

/// Numeric columns that are median-imputed and optionally scaled.
pub const NUMERIC_COLUMNS: [&str; 4] = [RATING, VOTES, RUNTIME, GROSS];

/// Separator used by the list-valued columns (STARS, GENRE).
pub const LIST_SEPARATOR: char = ',';
