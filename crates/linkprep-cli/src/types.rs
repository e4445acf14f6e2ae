use std::path::PathBuf;

use serde::Serialize;

use linkprep_nicknames::LookupReport;

/// Outcome of a `clean` run.
#[derive(Debug, Default, Serialize)]
pub struct CleanResult {
    pub input: PathBuf,
    /// None on a dry run.
    pub output: Option<PathBuf>,
    pub qc_output: Option<PathBuf>,
    pub records_read: usize,
    pub records_written: usize,
    pub records_failed: usize,
    pub invalid_months: usize,
    pub invalid_years: usize,
    pub nickname_hits: usize,
    pub nickname_entries: usize,
    pub errors: Vec<String>,
    pub dry_run: bool,
    pub has_errors: bool,
}

/// Outcome of a `lookup` run.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sha256: String,
    pub report: LookupReport,
}
