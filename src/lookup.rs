// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Translate a message with an MO file.

use std::fmt::Display;

use colored::Colorize;
use mocat::{
    catalog::Catalog,
    config::Config,
    error::Result,
    format::format_positional,
    loader::{merge_into_catalog, open_stream, parse_file},
    locale::Locale,
};

use crate::{args, dir::locale_from_path};

/// Load the catalog of the file given on command line.
fn load(args: &args::LookupArgs, config: &Config) -> Result<Catalog> {
    let parser = config.parser()?;
    let mut generator = config.generator()?;
    let mut stream = open_stream(&args.file)?;
    let parsed = parse_file(&parser, &mut stream)?;
    let locale = match &args.locale {
        Some(name) => Locale::new(name),
        None => parsed
            .language()
            .map(Locale::new)
            .or_else(|| locale_from_path(&args.file))
            .unwrap_or_else(Locale::from_env),
    };
    let mut catalog = Catalog::new(locale);
    merge_into_catalog(&mut catalog, parsed, &mut generator)?;
    Ok(catalog)
}

/// Return the translated message, with placeholders replaced.
fn translate(catalog: &Catalog, args: &args::LookupArgs) -> Result<String> {
    let text = args.msgid.as_str();
    let message = match (&args.plural, args.count, &args.context) {
        (Some(plural), Some(n), Some(context)) => {
            catalog.get_particular_plural_string(context, text, plural, n)?
        }
        (Some(plural), Some(n), None) => catalog.get_plural_string(text, plural, n)?,
        (_, _, Some(context)) => catalog.get_particular_string(context, text),
        _ => catalog.get_string(text),
    };
    if args.args.is_empty() {
        return Ok(message.to_string());
    }
    let values: Vec<&dyn Display> = args.args.iter().map(|arg| arg as &dyn Display).collect();
    format_positional(message, &values)
}

/// Translate the message and return the exit code.
pub fn run_lookup(args: &args::LookupArgs, config: &Config) -> i32 {
    match load(args, config).and_then(|catalog| translate(&catalog, args)) {
        Ok(message) => {
            println!("{message}");
            0
        }
        Err(err) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            1
        }
    }
}
