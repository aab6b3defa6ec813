// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display check result.

use std::{path::PathBuf, time::Duration};

use crate::{
    args,
    checker::CheckResult,
    diagnostic::{Diagnostic, Severity},
};

/// Display diagnostics in human format.
fn display_diagnostics_human(result: &[CheckResult], args: &args::CheckArgs) {
    let mut diags: Vec<&Diagnostic> = result.iter().flat_map(|x| &x.1).collect();
    match args.sort {
        args::CheckSort::Path => {
            diags.sort_by_key(|diag| (diag.path.as_path(), diag.rule));
        }
        args::CheckSort::Rule => {
            diags.sort_by_key(|diag| (diag.rule, diag.path.as_path()));
        }
        args::CheckSort::Severity => {
            diags.sort_by_key(|diag| {
                (
                    std::cmp::Reverse(diag.severity),
                    diag.path.as_path(),
                    diag.rule,
                )
            });
        }
    }
    for diag in diags {
        println!("{diag}");
    }
}

/// Display file status.
fn display_file_status(file_errors: &[(PathBuf, usize, usize, usize)]) {
    for (filename, info, warnings, errors) in file_errors {
        if errors + warnings + info == 0 {
            println!("{}: all OK!", filename.display());
        } else {
            println!(
                "{}: {} problems ({} errors, {} warnings, {} info)",
                filename.display(),
                errors + warnings + info,
                errors,
                warnings,
                info,
            );
        }
    }
}

/// Display diagnostics in JSON format.
fn display_diagnostics_json(result: &[CheckResult]) {
    let mut diags: Vec<&Diagnostic> = result.iter().flat_map(|x| &x.1).collect();
    diags.sort_by_key(|diag| (diag.path.as_path(), diag.rule));
    println!("{}", serde_json::to_string(&diags).unwrap_or_default());
}

/// Display the result of the checks and return the appropriate exit code:
/// 1 if at least one error was found, 0 otherwise.
pub fn display_result(result: &[CheckResult], args: &args::CheckArgs, elapsed: &Duration) -> i32 {
    let mut files_checked = 0;
    let mut files_with_problems = 0;
    let mut count_info = 0;
    let mut count_warnings = 0;
    let mut count_errors = 0;
    let mut file_errors: Vec<(PathBuf, usize, usize, usize)> = Vec::new();
    for (filename, diagnostics) in result {
        let mut count_file_info = 0;
        let mut count_file_warnings = 0;
        let mut count_file_errors = 0;
        files_checked += 1;
        if !diagnostics.is_empty() {
            files_with_problems += 1;
            for diagnostic in diagnostics {
                match diagnostic.severity {
                    Severity::Info => {
                        count_info += 1;
                        count_file_info += 1;
                    }
                    Severity::Warning => {
                        count_warnings += 1;
                        count_file_warnings += 1;
                    }
                    Severity::Error => {
                        count_errors += 1;
                        count_file_errors += 1;
                    }
                }
            }
        }
        if args.file_status {
            file_errors.push((
                filename.clone(),
                count_file_info,
                count_file_warnings,
                count_file_errors,
            ));
        }
    }
    if !args.quiet {
        match args.output {
            args::OutputFormat::Human => {
                if !args.no_errors {
                    display_diagnostics_human(result, args);
                }
                if args.file_status {
                    file_errors.sort();
                    display_file_status(&file_errors);
                }
                if files_with_problems == 0 {
                    if files_checked > 0 {
                        println!("{files_checked} files checked: all OK! [{elapsed:?}]");
                    } else {
                        println!("No files checked [{elapsed:?}]");
                    }
                } else {
                    println!(
                        "{files_checked} files checked: \
                        {} problems \
                        in {files_with_problems} files \
                        ({count_errors} errors, \
                        {count_warnings} warnings, \
                        {count_info} info) \
                        [{elapsed:?}]",
                        count_errors + count_warnings + count_info
                    );
                }
            }
            args::OutputFormat::Json => {
                if !args.no_errors {
                    display_diagnostics_json(result);
                }
            }
        }
    }
    i32::from(count_errors > 0)
}
