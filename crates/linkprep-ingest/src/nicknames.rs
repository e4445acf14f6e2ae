//! Nickname lookup table loading.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::open_reader;

/// Header of the variant column in lookup files.
pub const RAW_NAME_COLUMN: &str = "raw_name";
/// Header of the group column in lookup files.
pub const NAME_GROUP_COLUMN: &str = "name_group";

/// Reads `(variant, group)` rows from a nickname lookup CSV.
///
/// Uses the `raw_name` and `name_group` columns when present (matched
/// case-insensitively), otherwise the first two columns. Row order is kept,
/// since later rows override earlier ones when the table is built.
pub fn read_nickname_rows(path: &Path) -> Result<Vec<(String, String)>> {
    let (mut reader, headers) = open_reader(path)?;
    let (variant_idx, group_idx) = lookup_columns(&headers, path)?;
    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::csv(path, &e))?;
        let variant = row.get(variant_idx).unwrap_or("");
        let group = row.get(group_idx).unwrap_or("");
        if variant.trim().is_empty() && group.trim().is_empty() {
            continue;
        }
        rows.push((variant.to_string(), group.to_string()));
    }
    debug!(path = %path.display(), rows = rows.len(), "read nickname rows");
    Ok(rows)
}

fn lookup_columns(headers: &[String], path: &Path) -> Result<(usize, usize)> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    };
    match (find(RAW_NAME_COLUMN), find(NAME_GROUP_COLUMN)) {
        (Some(variant), Some(group)) => Ok((variant, group)),
        _ if headers.len() >= 2 => Ok((0, 1)),
        _ => Err(IngestError::MissingColumn {
            column: NAME_GROUP_COLUMN.to_string(),
            path: path.to_path_buf(),
        }),
    }
}
