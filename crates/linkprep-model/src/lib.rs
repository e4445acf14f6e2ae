//! Shared types for preparing name and birth-date fields for record linkage.

pub mod error;
pub mod fields;
pub mod record;

pub use error::{RecordIssue, Result, TransformError};
pub use fields::{InputFields, OUTPUT_FIELDS, is_output_field};
pub use record::{GivenNameSegmentation, OutputRecord, PreparedFields, RawRecord};
