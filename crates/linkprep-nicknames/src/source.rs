//! Reading the American English Nickname Collection.

use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::{NicknameError, Result};

/// One name/alias pairing from the collection.
///
/// `cond_prob` is the probability that `alias` denotes `name`, i.e.
/// `count(alias ∧ name) / count(name)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AliasRow {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "ALIAS")]
    pub alias: String,
    #[serde(rename = "CAP")]
    pub cond_prob: f64,
}

impl AliasRow {
    pub fn new(name: &str, alias: &str, cond_prob: f64) -> Self {
        Self {
            name: name.to_string(),
            alias: alias.to_string(),
            cond_prob,
        }
    }
}

/// Reads `NAME`, `ALIAS` and `CAP` columns; other columns are ignored.
pub fn read_alias_rows(path: &Path) -> Result<Vec<AliasRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| NicknameError::csv(path, &e))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: AliasRow = row.map_err(|e| NicknameError::csv(path, &e))?;
        rows.push(row);
    }
    Ok(rows)
}
