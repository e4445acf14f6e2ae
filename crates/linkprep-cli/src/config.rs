//! Optional TOML run configuration.
//!
//! ```toml
//! [columns]
//! given = "first_names"
//! family = "surname"
//!
//! [dates]
//! min_year = 1910
//!
//! [validation]
//! required = ["record_id"]
//! ```
//!
//! Every section and key is optional. Command-line flags win over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use linkprep_model::InputFields;
use linkprep_transform::YearRange;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepConfig {
    /// Source column names for the four required roles.
    pub columns: InputFields,
    pub dates: DateConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateConfig {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Passthrough columns the source must also carry.
    pub required: Vec<String>,
}

impl PrepConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Year range from the config, with `min`/`max` taking precedence.
    pub fn year_range(&self, min: Option<i32>, max: Option<i32>) -> Result<YearRange> {
        let default = YearRange::default();
        let range = YearRange::new(
            min.or(self.dates.min_year).unwrap_or(default.min),
            max.or(self.dates.max_year).unwrap_or(default.max),
        );
        if range.min > range.max {
            bail!(
                "minimum year {} is after maximum year {}",
                range.min,
                range.max
            );
        }
        Ok(range)
    }

    /// The four role columns followed by extra required columns.
    pub fn required_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self
            .columns
            .required()
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        for extra in &self.validation.required {
            if !columns.contains(extra) {
                columns.push(extra.clone());
            }
        }
        columns
    }
}
