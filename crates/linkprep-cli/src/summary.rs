use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{CleanResult, LookupResult};

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None if result.dry_run => println!("Output: (dry run)"),
        None => println!("Output: (not written)"),
    }
    if let Some(path) = &result.qc_output {
        println!("QC report: {}", path.display());
    }
    println!("{}", clean_table(result));
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_lookup_summary(result: &LookupResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    println!("SHA-256: {}", result.sha256);
    println!("{}", lookup_table(result));
}

/// Counter table for a `clean` run.
pub fn clean_table(result: &CleanResult) -> Table {
    let mut table = counter_table();
    table.add_row(vec![label_cell("Records read"), Cell::new(result.records_read)]);
    table.add_row(vec![
        label_cell("Records written"),
        Cell::new(result.records_written),
    ]);
    table.add_row(vec![
        label_cell("Records failed"),
        count_cell(result.records_failed, Color::Red),
    ]);
    table.add_row(vec![
        label_cell("Invalid months"),
        count_cell(result.invalid_months, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Invalid years"),
        count_cell(result.invalid_years, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Nickname hits"),
        Cell::new(result.nickname_hits),
    ]);
    table.add_row(vec![
        label_cell("Nickname entries"),
        Cell::new(result.nickname_entries),
    ]);
    table
}

/// Stage counters for a `lookup` run.
pub fn lookup_table(result: &LookupResult) -> Table {
    let report = &result.report;
    let mut table = counter_table();
    let rows = [
        ("Input rows", report.input_rows),
        ("Multi-word names", report.multi_word_names),
        ("Short groups", report.short_groups),
        ("Rare groups", report.rare_groups),
        ("Improbable pairs", report.improbable_pairs),
        ("Not top ranked", report.not_top_ranked),
        ("Loops resolved", report.loops_resolved),
        ("Identities dropped", report.identities_dropped),
        ("Chain passes", report.chain_passes),
        ("Entries", report.entries),
    ];
    for (label, value) in rows {
        table.add_row(vec![label_cell(label), Cell::new(value)]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn counter_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
