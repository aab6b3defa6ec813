// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::diagnostic::Severity;

#[derive(Debug, Parser)]
#[command(
    author,
    name = "mocat",
    about = "Inspect and check gettext MO catalogs.",
    after_help = "For help with a specific command, see: `mocat help <command>`."
)]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose mode: display debug messages on standard error
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check files
    Check(CheckArgs),

    /// Display the content of a file
    Dump(DumpArgs),

    /// Translate a message with a file
    Lookup(LookupArgs),

    /// Evaluate a plural formula
    Eval(EvalArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// List of files or directories
    #[clap(help = "List of files or directories [default: .]")]
    pub files: Vec<PathBuf>,

    /// Report only diagnostics with this severity (can be given multiple times); by default all diagnostics are reported
    #[arg(short = 'e', long, value_enum)]
    pub severity: Vec<Severity>,

    /// Do not display errors found
    #[arg(short, long)]
    pub no_errors: bool,

    /// Sort of errors displayed
    #[arg(long, value_enum, default_value_t)]
    pub sort: CheckSort,

    /// Display status for each file checked (used only with `human` output format)
    #[arg(short, long)]
    pub file_status: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Quiet mode: do not report any error, only set the exit code
    #[arg(short, long)]
    pub quiet: bool,
}

/// Sort of errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CheckSort {
    #[default]
    /// Sort by path, then by rule
    Path,

    /// Sort by rule, then by path
    Rule,

    /// Sort by severity (errors first), then by path
    Severity,
}

/// Arguments for the `dump` command.
#[derive(Debug, Args)]
pub struct DumpArgs {
    /// MO file
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// Arguments for the `lookup` command.
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// MO file
    pub file: PathBuf,

    /// Message to translate
    pub msgid: String,

    /// Locale used to select the plural rule (default: "Language" header of the file, then environment)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Context of the message
    #[arg(long)]
    pub context: Option<String>,

    /// Plural form of the message (requires --count)
    #[arg(short, long, requires = "count")]
    pub plural: Option<String>,

    /// Count used to select the plural form
    #[arg(short = 'n', long, requires = "plural", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Arguments replacing the placeholders {0}, {1}, ... (can be given multiple times)
    #[arg(short, long = "arg")]
    pub args: Vec<String>,
}

/// Arguments for the `eval` command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Plural expression (`n != 1`) or full header value (`nplurals=2; plural=n != 1;`)
    pub formula: String,

    /// First value of n
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub from: i64,

    /// Last value of n (included)
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub to: i64,

    /// Evaluate with the compiled backend
    #[arg(long)]
    pub compiled: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// Output format.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    /// Human readable text format
    Human,

    /// JSON
    Json,
}
