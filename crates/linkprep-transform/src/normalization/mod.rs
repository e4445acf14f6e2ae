//! Field-level normalization.
//!
//! - **text**: canonical lowercase ASCII form for name fields
//! - **numeric**: month and year of birth validation

pub mod numeric;
pub mod text;

pub use numeric::{DEFAULT_MIN_YEAR, YearRange, clean_month, clean_year, parse_i64};
pub use text::{normalize_optional, normalize_text};
