use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::builder::LookupEntry;
use crate::error::{NicknameError, Result};
use crate::hash::sha256_hex;

/// Renders the lookup as `raw_name,name_group` CSV.
pub fn lookup_csv(entries: &[LookupEntry]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut out = WriterBuilder::new().from_writer(Vec::new());
    out.write_record(["raw_name", "name_group"])?;
    for entry in entries {
        out.write_record([entry.raw_name.as_str(), entry.name_group.as_str()])?;
    }
    out.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Writes the lookup to `path` and returns the SHA-256 of the written bytes.
pub fn write_lookup(path: &Path, entries: &[LookupEntry]) -> Result<String> {
    let bytes = lookup_csv(entries).map_err(|e| NicknameError::csv(path, &e))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| NicknameError::io(parent, e))?;
    }
    fs::write(path, &bytes).map_err(|e| NicknameError::io(path, e))?;
    let sha256 = sha256_hex(&bytes);
    info!(path = %path.display(), entries = entries.len(), sha256 = %sha256, "wrote nickname lookup");
    Ok(sha256)
}
