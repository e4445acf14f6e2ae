use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{error, info, info_span, warn};

use linkprep_ingest::{
    SourceTable, read_headers, read_nickname_rows, read_source_records, validate_no_collisions,
    validate_required_fields,
};
use linkprep_model::fields::{FAMILY, GIVEN, GIVEN_MIDDLE_INITIAL, GIVEN_NICKNAME, MONTH, YEAR};
use linkprep_model::{InputFields, OutputRecord, RawRecord};
use linkprep_nicknames::{LookupOptions, build_lookup, read_alias_rows, write_lookup};
use linkprep_output::{QcRow, write_output_records, write_qc_report};
use linkprep_transform::{NicknameTable, RecordTransformer, TransformOptions, Transformed};

use crate::cli::{CleanArgs, HeadersArgs, LookupArgs};
use crate::config::PrepConfig;
use crate::logging::redact_value;
use crate::summary::apply_table_style;
use crate::types::{CleanResult, LookupResult};

/// File name used when `--output` is not given.
pub const DEFAULT_OUTPUT_NAME: &str = "clean_names.csv";

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    let headers =
        read_headers(&args.path).with_context(|| format!("read {}", args.path.display()))?;
    let mut table = Table::new();
    table.set_header(vec!["#", "Column"]);
    apply_table_style(&mut table);
    for (index, name) in headers.iter().enumerate() {
        table.add_row(vec![index.to_string(), name.clone()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_lookup(args: &LookupArgs) -> Result<LookupResult> {
    let span = info_span!("lookup", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let rows = read_alias_rows(&args.input)
        .with_context(|| format!("read nickname collection {}", args.input.display()))?;
    let options = LookupOptions {
        min_cond_prob: args.min_cond_prob,
        min_group_count: args.min_group_count,
        ..LookupOptions::default()
    };
    let table = build_lookup(rows, &options).context("build nickname lookup")?;
    let sha256 = write_lookup(&args.output, &table.entries)
        .with_context(|| format!("write lookup {}", args.output.display()))?;
    info!(
        entries = table.report.entries,
        duration_ms = start.elapsed().as_millis(),
        "lookup complete"
    );
    Ok(LookupResult {
        input: args.input.clone(),
        output: args.output.clone(),
        sha256,
        report: table.report,
    })
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", input = %args.input.display());
    let _guard = span.enter();

    let config = match &args.config {
        Some(path) => PrepConfig::load(path)?,
        None => PrepConfig::default(),
    };
    let years = config.year_range(args.min_year, args.max_year)?;

    // Ingest
    let ingest_span = info_span!("ingest");
    let ingest_start = Instant::now();
    let (source, nicknames) = ingest_span.in_scope(|| ingest(args, &config))?;
    info!(
        records = source.records.len(),
        columns = source.headers.len(),
        nickname_entries = nicknames.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // Transform
    let options = TransformOptions::new()
        .with_fields(config.columns.clone())
        .with_year_range(years)
        .with_workers(args.workers);
    let transformer = RecordTransformer::new(&nicknames, options);
    let transform_span = info_span!("transform", workers = transformer.options().worker_count());
    let transform_start = Instant::now();
    let results = transform_span.in_scope(|| transformer.transform_batch(&source.records));

    let mut result = CleanResult {
        input: args.input.clone(),
        records_read: source.records.len(),
        nickname_entries: nicknames.len(),
        dry_run: args.dry_run,
        ..CleanResult::default()
    };
    let Collected { records, qc_rows } = collect_outcomes(
        &source.records,
        results,
        &config.columns,
        args.qc_output.is_some(),
        &mut result,
    );
    info!(
        prepared = records.len(),
        failed = result.records_failed,
        invalid_months = result.invalid_months,
        invalid_years = result.invalid_years,
        nickname_hits = result.nickname_hits,
        duration_ms = transform_start.elapsed().as_millis(),
        "transform complete"
    );

    if !may_write(&mut result, args.skip_invalid) {
        return Ok(result);
    }
    if args.dry_run {
        info!("dry run; skipping output");
        return Ok(result);
    }

    // Output
    let output_span = info_span!("output");
    let output_start = Instant::now();
    output_span.in_scope(|| -> Result<()> {
        let output = output_path(args);
        let passthrough = passthrough_headers(&source, &config.columns);
        result.records_written = write_output_records(&output, &passthrough, &records)
            .with_context(|| format!("write {}", output.display()))?;
        result.output = Some(output);
        if let Some(qc_path) = &args.qc_output {
            write_qc_report(qc_path, &qc_rows)
                .with_context(|| format!("write QC report {}", qc_path.display()))?;
            result.qc_output = Some(qc_path.clone());
        }
        Ok(())
    })?;
    info!(
        records = result.records_written,
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );
    Ok(result)
}

fn ingest(args: &CleanArgs, config: &PrepConfig) -> Result<(SourceTable, NicknameTable)> {
    let source = read_source_records(&args.input)
        .with_context(|| format!("read source {}", args.input.display()))?;
    validate_required_fields(&source.headers, &config.required_columns(), &source.path)?;
    validate_no_collisions(&source.headers, &config.columns, &source.path)?;
    let rows = read_nickname_rows(&args.nicknames)
        .with_context(|| format!("read nickname lookup {}", args.nicknames.display()))?;
    let nicknames = NicknameTable::build(rows);
    if nicknames.overridden() > 0 {
        warn!(
            overridden = nicknames.overridden(),
            "nickname lookup repeats variants; later rows win"
        );
    }
    Ok((source, nicknames))
}

/// Prepared records and QC rows kept from a batch.
struct Collected {
    records: Vec<OutputRecord>,
    qc_rows: Vec<QcRow>,
}

/// Splits batch outcomes into prepared records and failures, updating the
/// run counters. `raw` and `outcomes` are in the same order.
fn collect_outcomes(
    raw: &[RawRecord],
    outcomes: Vec<linkprep_model::Result<Transformed>>,
    columns: &InputFields,
    with_qc: bool,
    result: &mut CleanResult,
) -> Collected {
    let mut records = Vec::with_capacity(outcomes.len());
    let mut qc_rows = Vec::new();
    for (index, (raw, outcome)) in raw.iter().zip(outcomes).enumerate() {
        let row = index + 1;
        match outcome {
            Ok(transformed) => {
                tally(result, columns, row, &transformed);
                if with_qc {
                    qc_rows.push(qc_row(row, raw, columns, &transformed));
                }
                records.push(transformed.record);
            }
            Err(err) => {
                error!(row, error = %err, "record failed");
                result.records_failed += 1;
                result.errors.push(format!("record {row}: {err}"));
            }
        }
    }
    Collected { records, qc_rows }
}

/// Failed records block all output unless they are skipped.
fn may_write(result: &mut CleanResult, skip_invalid: bool) -> bool {
    if result.records_failed == 0 {
        return true;
    }
    if skip_invalid {
        warn!(failed = result.records_failed, "failed records left out of the output");
        return true;
    }
    result.has_errors = true;
    warn!(
        failed = result.records_failed,
        "records failed; nothing written (use --skip-invalid to leave them out)"
    );
    false
}

fn tally(result: &mut CleanResult, columns: &InputFields, row: usize, transformed: &Transformed) {
    if transformed.nickname_applied {
        result.nickname_hits += 1;
    }
    for issue in &transformed.issues {
        if issue.field() == columns.month {
            result.invalid_months += 1;
        } else {
            result.invalid_years += 1;
        }
        warn!(
            row,
            field = issue.field(),
            value = redact_value(issue.value()),
            "invalid value left empty"
        );
    }
}

fn qc_row(row: usize, raw: &RawRecord, columns: &InputFields, transformed: &Transformed) -> QcRow {
    let record: &OutputRecord = &transformed.record;
    let field = |name: &str| record.get(name).unwrap_or_default().to_string();
    QcRow {
        row,
        given_raw: raw.get(&columns.given).unwrap_or_default().to_string(),
        given: field(GIVEN),
        given_nickname: field(GIVEN_NICKNAME),
        given_middle_initial: field(GIVEN_MIDDLE_INITIAL),
        family: field(FAMILY),
        month: field(MONTH),
        year: field(YEAR),
        alias_impact_flag: u8::from(transformed.nickname_applied),
    }
}

/// Source columns carried through unchanged, in source order.
fn passthrough_headers(source: &SourceTable, columns: &InputFields) -> Vec<String> {
    source
        .headers
        .iter()
        .filter(|name| !columns.is_required(name))
        .cloned()
        .collect()
}

fn output_path(args: &CleanArgs) -> PathBuf {
    args.output.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_OUTPUT_NAME)
    })
}
