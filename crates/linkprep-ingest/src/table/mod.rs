//! CSV table reading for source records and reference tables.

mod header;
mod reader;

pub use header::normalize_header;
pub(crate) use reader::open_reader;
pub use reader::{SourceTable, read_headers, read_source_records, validate_encoding};
