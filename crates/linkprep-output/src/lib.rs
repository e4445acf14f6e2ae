//! CSV writers for prepared records.
//!
//! The prepared file feeds the hashing step, so its column order is fixed:
//! the twelve canonical columns followed by passthrough columns in source
//! order.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use linkprep_model::{OUTPUT_FIELDS, OutputRecord};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// QC report header, in `QcRow` field order.
pub const QC_HEADERS: [&str; 9] = [
    "row",
    "given_raw",
    "given",
    "given_nickname",
    "given_middle_initial",
    "family",
    "month",
    "year",
    "alias_impact_flag",
];

/// One row of the QC report comparing raw and prepared given names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QcRow {
    pub row: usize,
    pub given_raw: String,
    pub given: String,
    pub given_nickname: String,
    pub given_middle_initial: String,
    pub family: String,
    pub month: String,
    pub year: String,
    /// 1 when the nickname table mapped the first given token to a different
    /// group. A token listed in the table under its own name counts as 0.
    pub alias_impact_flag: u8,
}

/// Output header: canonical columns, then `passthrough` columns.
pub fn output_headers(passthrough: &[String]) -> Vec<String> {
    OUTPUT_FIELDS
        .iter()
        .map(|name| (*name).to_string())
        .chain(passthrough.iter().cloned())
        .collect()
}

/// Writes prepared records as CSV to any writer.
///
/// Values are written in `headers` order; a column a record lacks is
/// written empty. Returns the number of data rows.
pub fn write_records<W: Write>(
    writer: W,
    headers: &[String],
    records: &[OutputRecord],
) -> std::result::Result<usize, csv::Error> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(headers)?;
    for record in records {
        out.write_record(headers.iter().map(|name| record.get(name).unwrap_or("")))?;
    }
    out.flush()?;
    Ok(records.len())
}

/// Writes prepared records to `path`.
pub fn write_output_records(
    path: &Path,
    passthrough: &[String],
    records: &[OutputRecord],
) -> Result<usize> {
    let file = create(path)?;
    let headers = output_headers(passthrough);
    let written = write_records(file, &headers, records).map_err(|e| csv_error(path, &e))?;
    debug!(path = %path.display(), rows = written, "wrote prepared records");
    Ok(written)
}

/// Writes the QC report to `path`. The header is written even when `rows`
/// is empty.
pub fn write_qc_report(path: &Path, rows: &[QcRow]) -> Result<usize> {
    let file = create(path)?;
    let mut out = WriterBuilder::new().has_headers(false).from_writer(file);
    out.write_record(QC_HEADERS).map_err(|e| csv_error(path, &e))?;
    for row in rows {
        out.serialize(row).map_err(|e| csv_error(path, &e))?;
    }
    out.flush().map_err(|e| OutputError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), rows = rows.len(), "wrote QC report");
    Ok(rows.len())
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::Create {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    File::create(path).map_err(|e| OutputError::Create {
        path: path.to_path_buf(),
        source: e,
    })
}

fn csv_error(path: &Path, error: &csv::Error) -> OutputError {
    OutputError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_start_with_canonical_fields() {
        let headers = output_headers(&["record_id".to_string()]);
        assert_eq!(headers.len(), 13);
        assert_eq!(headers[0], "given");
        assert_eq!(headers[11], "given_final_word");
        assert_eq!(headers[12], "record_id");
    }

    #[test]
    fn empty_output_still_has_header() {
        let mut buffer = Vec::new();
        let written = write_records(&mut buffer, &output_headers(&[]), &[]).unwrap();
        assert_eq!(written, 0);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "given,family,month,year,complete,given_nickname,given_first_word,\
             given_middle_initial,given_all_but_first,given_all_but_final,\
             given_final_initial,given_final_word\n"
        );
    }
}
