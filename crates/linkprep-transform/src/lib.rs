//! Name normalization and nickname grouping for record linkage.
//!
//! This crate is the pure core of linkprep:
//!
//! - **normalization**: canonical text form and month/year validation
//! - **nickname**: read-only nickname table with self-fallback resolution
//! - **segment**: front/back splits of compound given names
//! - **transformer**: per-record assembly and parallel batch mapping
//!
//! Nothing here performs I/O.

pub mod nickname;
pub mod normalization;
pub mod options;
pub mod segment;
pub mod transformer;

pub use nickname::NicknameTable;
pub use normalization::{YearRange, clean_month, clean_year, normalize_optional, normalize_text};
pub use options::TransformOptions;
pub use segment::segment_given_name;
pub use transformer::{RecordTransformer, Transformed, transform};
