//! Per-record assembly of prepared output records.

use std::thread;

use tracing::debug;

use linkprep_model::{
    OutputRecord, PreparedFields, RawRecord, RecordIssue, Result, TransformError,
};

use crate::nickname::NicknameTable;
use crate::normalization::{clean_month, clean_year, normalize_text};
use crate::options::TransformOptions;
use crate::segment::segment_given_name;

/// A prepared record plus the non-fatal issues noticed while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub record: OutputRecord,
    pub issues: Vec<RecordIssue>,
    /// True when the nickname table mapped the first given token to a
    /// different group. A token listed under its own name is not a change.
    pub nickname_applied: bool,
}

/// Turns raw source records into prepared records.
///
/// Holds no mutable state; one transformer can serve any number of threads.
#[derive(Debug, Clone)]
pub struct RecordTransformer<'a> {
    nicknames: &'a NicknameTable,
    options: TransformOptions,
}

impl<'a> RecordTransformer<'a> {
    pub fn new(nicknames: &'a NicknameTable, options: TransformOptions) -> Self {
        Self { nicknames, options }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Prepares one record.
    ///
    /// Every column not consumed by a required role is passed through. The
    /// caller must ensure no such column is named like a canonical output
    /// field (ingest rejects those); otherwise the output carries the name
    /// twice and lookups by name return the canonical value.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingField`] naming the first required
    /// column that is absent from `raw`.
    pub fn transform(&self, raw: &RawRecord) -> Result<Transformed> {
        let columns = &self.options.fields;
        let raw_given = required(raw, &columns.given)?;
        let raw_family = required(raw, &columns.family)?;
        let raw_month = required(raw, &columns.month)?;
        let raw_year = required(raw, &columns.year)?;

        let mut issues = Vec::new();
        let given = normalize_text(raw_given);
        let family = normalize_text(raw_family);
        let month = clean_month(raw_month).unwrap_or_else(|| {
            invalid_unless_blank(&mut issues, &columns.month, raw_month);
            String::new()
        });
        let year = clean_year(raw_year, &self.options.years).unwrap_or_else(|| {
            invalid_unless_blank(&mut issues, &columns.year, raw_year);
            String::new()
        });

        let complete = format!("{given} {family}").trim().to_string();
        let (given_nickname, nickname_applied) = match given.split(' ').next() {
            Some(first) if !first.is_empty() => {
                let group = self.nicknames.resolve(first);
                let applied = group != first;
                (group, applied)
            }
            _ => (String::new(), false),
        };
        let segmentation = segment_given_name(&given);

        let passthrough = raw
            .iter()
            .filter(|(name, _)| !columns.is_required(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let prepared = PreparedFields {
            given,
            family,
            month,
            year,
            complete,
            given_nickname,
            segmentation,
        };
        Ok(Transformed {
            record: OutputRecord::assemble(prepared, passthrough),
            issues,
            nickname_applied,
        })
    }

    /// Prepares a batch of records, spreading contiguous chunks over worker
    /// threads. Results keep input order; a failed record does not affect
    /// its neighbours.
    pub fn transform_batch(&self, records: &[RawRecord]) -> Vec<Result<Transformed>> {
        let workers = self.options.worker_count().min(records.len());
        if workers <= 1 {
            return records.iter().map(|record| self.transform(record)).collect();
        }
        let chunk_size = records.len().div_ceil(workers);
        debug!(records = records.len(), workers, chunk_size, "transforming batch");

        thread::scope(|scope| {
            let handles: Vec<_> = records
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|record| self.transform(record))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }
}

/// Prepares one record with default options.
pub fn transform(raw: &RawRecord, nicknames: &NicknameTable) -> Result<Transformed> {
    RecordTransformer::new(nicknames, TransformOptions::default()).transform(raw)
}

fn required<'r>(raw: &'r RawRecord, field: &str) -> Result<&'r str> {
    raw.get(field).ok_or_else(|| TransformError::MissingField {
        field: field.to_string(),
    })
}

/// A blank month or year is simply unknown, not malformed.
fn invalid_unless_blank(issues: &mut Vec<RecordIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        return;
    }
    issues.push(RecordIssue::InvalidNumericField {
        field: field.to_string(),
        value: value.to_string(),
    });
}
