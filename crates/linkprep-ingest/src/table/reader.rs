//! CSV file reading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder};
use tracing::{debug, warn};

use linkprep_model::RawRecord;

use super::header::{check_headers, normalize_header};
use crate::error::{IngestError, Result};

/// A loaded source file: its header row and one record per data row.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// Rejects files that start with a UTF-16 byte-order mark.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

pub(crate) fn open_reader(path: &Path) -> Result<(Reader<File>, Vec<String>)> {
    validate_encoding(path)?;
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::csv(path, &e))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    check_headers(&headers, path)?;
    Ok((reader, headers))
}

/// Reads the header row of a CSV file.
pub fn read_headers(path: &Path) -> Result<Vec<String>> {
    open_reader(path).map(|(_, headers)| headers)
}

/// Reads a source CSV into raw records.
///
/// Cell values are kept exactly as written. Short rows are padded with empty
/// values so every header is present in every record; cells beyond the
/// header width are dropped with a warning. Rows where every cell is blank
/// are skipped.
pub fn read_source_records(path: &Path) -> Result<SourceTable> {
    let (mut reader, headers) = open_reader(path)?;
    let mut records = Vec::new();
    let mut blank_rows = 0usize;
    let mut overlong_rows = 0usize;
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::csv(path, &e))?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            blank_rows += 1;
            continue;
        }
        if row.len() > headers.len() {
            overlong_rows += 1;
        }
        let cells: Vec<String> = row.iter().map(str::to_string).collect();
        records.push(RawRecord::from_row(&headers, cells));
    }
    if blank_rows > 0 {
        debug!(path = %path.display(), blank_rows, "skipped blank rows");
    }
    if overlong_rows > 0 {
        warn!(
            path = %path.display(),
            overlong_rows,
            columns = headers.len(),
            "rows with more cells than header columns were truncated"
        );
    }
    Ok(SourceTable {
        path: path.to_path_buf(),
        headers,
        records,
    })
}
