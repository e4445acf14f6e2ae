//! Header row handling.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Cleans a raw header cell: strips a BOM and surrounding whitespace and
/// collapses internal whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validates a header row: it must have at least one named column and no
/// duplicate names.
pub(crate) fn check_headers(headers: &[String], path: &Path) -> Result<()> {
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: header.clone(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
