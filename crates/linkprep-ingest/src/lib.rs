//! Data ingestion for linkprep.
//!
//! Loads the source CSV and the nickname lookup CSV and checks source columns
//! before any record is prepared.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use linkprep_ingest::{read_source_records, read_nickname_rows, validate_required_fields};
//! use linkprep_model::InputFields;
//!
//! let table = read_source_records(Path::new("source_names.csv"))?;
//! validate_required_fields(&table.headers, &InputFields::default().required(), &table.path)?;
//! let nicknames = read_nickname_rows(Path::new("nickname_lookup.csv"))?;
//! ```

mod error;
mod nicknames;
mod table;
mod validate;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{
    SourceTable, normalize_header, read_headers, read_source_records, validate_encoding,
};

// === Nickname Lookup ===
pub use nicknames::{NAME_GROUP_COLUMN, RAW_NAME_COLUMN, read_nickname_rows};

// === Column Validation ===
pub use validate::{validate_no_collisions, validate_required_fields};
