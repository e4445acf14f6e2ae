//! CLI argument definitions.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "linkprep",
    version,
    about = "Prepare name records for probabilistic record linkage",
    long_about = "Normalize given and family names, validate month and year of birth,\n\
                  map first names to nickname groups and split compound given names\n\
                  into comparison fields."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include raw name and date values in log messages.
    ///
    /// Source rows carry personal data; by default those values are
    /// replaced with a placeholder.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepare a source CSV for linkage.
    Clean(CleanArgs),

    /// List the columns of a CSV file.
    Headers(HeadersArgs),

    /// Build a nickname lookup from the American English Nickname Collection.
    Lookup(LookupArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Source CSV with one record per row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Nickname lookup CSV (`raw_name,name_group`).
    #[arg(long = "nicknames", value_name = "CSV")]
    pub nicknames: PathBuf,

    /// Prepared output CSV (default: clean_names.csv next to INPUT).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write a QC report comparing raw and prepared given names.
    #[arg(long = "qc-output", value_name = "PATH")]
    pub qc_output: Option<PathBuf>,

    /// TOML file with column names, year range and extra required columns.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Earliest accepted year of birth (overrides the config file).
    #[arg(long = "min-year", value_name = "YEAR")]
    pub min_year: Option<i32>,

    /// Latest accepted year of birth (overrides the config file).
    #[arg(long = "max-year", value_name = "YEAR")]
    pub max_year: Option<i32>,

    /// Worker threads (default: available parallelism).
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<NonZeroUsize>,

    /// Leave failed records out of the output instead of aborting.
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    /// Run every stage but do not write any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// How to print the run summary.
    #[arg(long = "summary-format", value_enum, default_value = "table")]
    pub summary_format: SummaryFormatArg,
}

#[derive(Parser)]
pub struct HeadersArgs {
    /// CSV file to inspect.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Nickname collection CSV with NAME, ALIAS and CAP columns.
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Lookup CSV to write.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Minimum probability that a group denotes the name.
    #[arg(long = "min-prob", value_name = "P", default_value_t = 0.3)]
    pub min_cond_prob: f64,

    /// Minimum number of pairings a group needs.
    #[arg(long = "min-group-count", value_name = "N", default_value_t = 5)]
    pub min_group_count: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
