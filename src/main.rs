// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mocat inspects and checks gettext MO catalogs.
//!
//! The following sub-commands are available:
//!
//! - [`check`](#check-files): check files
//! - [`dump`](#dump): display the content of a file
//! - [`lookup`](#lookup): translate a message
//! - [`eval`](#eval): evaluate a plural formula
//!
//! # Check files
//!
//! The `check` command loads all compiled gettext files (*.mo) given on
//! command-line or found in the provided directories, and reports files that
//! can not be loaded, duplicate keys, missing or invalid plural forms and
//! invalid byte sequences.
//!
//! The .gitignore rules are respected: ignored files are skipped.
//!
//! # Dump
//!
//! The `dump` command displays the revision, byte order, encoding, headers and
//! translations of a file.
//!
//! # Lookup
//!
//! The `lookup` command translates a message (with optional context and
//! plural form) as a program using the catalog would do.
//!
//! # Eval
//!
//! The `eval` command displays the plural form index selected by a formula for
//! a range of numbers.

mod args;
mod checker;
mod diagnostic;
mod dir;
mod dump;
mod eval;
mod lookup;
mod result;

use clap::Parser;
use colored::Colorize;
use mocat::config::Config;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};
use crate::checker::run_check;
use crate::dump::run_dump;
use crate::eval::run_eval;
use crate::lookup::run_lookup;

/// Log to standard error; `RUST_LOG` overrides the default filter.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("mocat=debug")
        } else {
            EnvFilter::new("mocat=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Cli::parse();
    init_tracing(&args);
    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}: {err}", "Error".bright_red().bold());
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    let rc = match &args.command {
        Command::Check(args) => run_check(args, &config),
        Command::Dump(args) => run_dump(args, &config),
        Command::Lookup(args) => run_lookup(args, &config),
        Command::Eval(args) => run_eval(args, &config),
    };
    std::process::exit(rc);
}
