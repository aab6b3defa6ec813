// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checker for MO files.

use std::path::{Path, PathBuf};

use colored::Colorize;
use mocat::{
    catalog::Catalog,
    config::Config,
    loader::{merge_into_catalog, open_stream, parse_file},
    locale::Locale,
    mo::{file::CONTEXT_GLUE, parser::MoParser},
    plural::{generator::AstPluralRuleGenerator, rule::PluralRule},
};
use rayon::prelude::*;

use crate::{
    args,
    diagnostic::{Diagnostic, Severity},
    dir::{find_mo_files, locale_from_path},
    result::display_result,
};

/// Values of n used to check that plural formulas stay in range.
const PLURAL_RANGE_MAX: i64 = 1000;

pub type CheckResult = (PathBuf, Vec<Diagnostic>);

/// Describe a translation key for display: `msgctxt "ctx" msgid "id"`.
pub fn describe_key(key: &str) -> String {
    match key.split_once(CONTEXT_GLUE) {
        Some((context, msgid)) => format!("msgctxt {context:?} msgid {msgid:?}"),
        None => format!("msgid {key:?}"),
    }
}

pub struct Checker<'p> {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
    parser: &'p MoParser,
    generator: AstPluralRuleGenerator,
    severities: &'p [Severity],
}

impl<'p> Checker<'p> {
    /// Create a new `Checker` for the given file.
    pub fn new(path: &Path, parser: &'p MoParser, generator: AstPluralRuleGenerator) -> Self {
        Checker {
            path: PathBuf::from(path),
            diagnostics: Vec::new(),
            parser,
            generator,
            severities: &[],
        }
    }

    /// Report only diagnostics with one of these severities (all if empty).
    pub fn with_severities(mut self, severities: &'p [Severity]) -> Self {
        self.severities = severities;
        self
    }

    /// Report a diagnostic for the file being checked.
    pub fn report(
        &mut self,
        rule: &'static str,
        severity: Severity,
        message: String,
        lines: Vec<String>,
    ) {
        if !self.severities.is_empty() && !self.severities.contains(&severity) {
            return;
        }
        let mut diagnostic = Diagnostic::new(self.path.as_path(), rule, severity, message);
        for line in lines {
            diagnostic.add_line(line);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Check that translations have as many forms as the plural rule.
    fn check_plural_count(&mut self, catalog: &Catalog) {
        let num_plurals = catalog.plural_rule().num_plurals();
        let mut keys: Vec<(&str, usize)> = catalog
            .iter()
            .filter(|(_, forms)| forms.len() > 1 && forms.len() != num_plurals)
            .map(|(key, forms)| (key, forms.len()))
            .collect();
        keys.sort_unstable();
        for (key, count) in keys {
            self.report(
                "plural-count",
                Severity::Error,
                format!("{count} plural forms instead of {num_plurals}"),
                vec![describe_key(key)],
            );
        }
    }

    /// Check that the plural rule returns an index in range for small numbers.
    fn check_plural_range(&mut self, rule: &dyn PluralRule) {
        if let Some(err) = (0..=PLURAL_RANGE_MAX).find_map(|n| rule.plural_index(n).err()) {
            self.report("plural-range", Severity::Error, err.to_string(), vec![]);
        }
    }

    /// Perform all checks on the MO file.
    pub fn do_all_checks(&mut self) {
        let parsed = match open_stream(&self.path)
            .and_then(|mut stream| parse_file(self.parser, &mut stream))
        {
            Ok(parsed) => parsed,
            Err(err) => {
                self.report("load-error", Severity::Error, err.to_string(), vec![]);
                return;
            }
        };
        if parsed.encoding_errors > 0 {
            self.report(
                "encoding",
                Severity::Info,
                format!(
                    "{} strings with invalid byte sequences for encoding {}",
                    parsed.encoding_errors,
                    parsed.encoding.name()
                ),
                vec![],
            );
        }
        let has_plural_forms = parsed.plural_forms().is_some();
        let locale = parsed
            .language()
            .map(Locale::new)
            .or_else(|| locale_from_path(&self.path))
            .unwrap_or_default();
        let mut catalog = Catalog::new(locale);
        let report = match merge_into_catalog(&mut catalog, parsed, &mut self.generator) {
            Ok(report) => report,
            Err(err) => {
                self.report("plural-forms", Severity::Error, err.to_string(), vec![]);
                return;
            }
        };
        for key in &report.duplicates {
            self.report(
                "duplicate",
                Severity::Warning,
                "duplicate key, only the first translation is used".to_string(),
                vec![describe_key(key)],
            );
        }
        if !has_plural_forms {
            self.report(
                "plural-forms",
                Severity::Info,
                format!(
                    "missing Plural-Forms header, using built-in rule for language \"{}\"",
                    catalog.locale().language_code()
                ),
                vec![],
            );
        }
        self.check_plural_count(&catalog);
        self.check_plural_range(catalog.plural_rule().as_ref());
    }
}

/// Check a single MO file and return the list of diagnostics found.
pub fn check_file(
    path: &Path,
    args: &args::CheckArgs,
    parser: &MoParser,
    generator: &AstPluralRuleGenerator,
) -> CheckResult {
    let mut checker =
        Checker::new(path, parser, generator.clone()).with_severities(&args.severity);
    checker.do_all_checks();
    (PathBuf::from(path), checker.diagnostics)
}

/// Check and display result for all MO files.
pub fn run_check(args: &args::CheckArgs, config: &Config) -> i32 {
    let start = std::time::Instant::now();
    let (parser, generator) = match (config.parser(), config.generator()) {
        (Ok(parser), Ok(generator)) => (parser, generator),
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            return 1;
        }
    };
    let mo_files = find_mo_files(&args.files);
    let result: Vec<CheckResult> = mo_files
        .par_iter()
        .map(|f| check_file(f, args, &parser, &generator))
        .collect();
    let elapsed = start.elapsed();
    display_result(&result, args, &elapsed)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mocat::mo::testing::MoBuilder;

    use super::*;

    fn check(name: &str, data: &[u8]) -> Vec<Diagnostic> {
        let path = std::env::temp_dir().join(format!(
            "mocat-check-{}-{name}.mo",
            std::process::id()
        ));
        fs::write(&path, data).unwrap();
        let parser = MoParser::default();
        let mut checker = Checker::new(&path, &parser, AstPluralRuleGenerator::default());
        checker.do_all_checks();
        let _ = fs::remove_file(&path);
        checker.diagnostics
    }

    fn rules(diagnostics: &[Diagnostic]) -> Vec<(&'static str, Severity)> {
        diagnostics.iter().map(|d| (d.rule, d.severity)).collect()
    }

    #[test]
    fn test_describe_key() {
        assert_eq!(describe_key("File"), "msgid \"File\"");
        assert_eq!(
            describe_key("menu\u{4}Open"),
            "msgctxt \"menu\" msgid \"Open\""
        );
    }

    #[test]
    fn test_check_ok() {
        let data = MoBuilder::new()
            .header(
                "Language: ru\n\
                 Plural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n",
            )
            .entry("File", "Файл")
            .plural("{0} file", "{0} files", &["{0} файл", "{0} файла", "{0} файлов"])
            .build();
        assert!(check("ok", &data).is_empty());
    }

    #[test]
    fn test_check_problems() {
        let data = MoBuilder::new()
            .header("Language: fr\n")
            .entry("a", "1")
            .entry("a", "2")
            .plural("b", "bs", &["x", "y", "z"])
            .build();
        let diagnostics = check("problems", &data);
        assert_eq!(
            rules(&diagnostics),
            [
                ("duplicate", Severity::Warning),
                ("plural-forms", Severity::Info),
                ("plural-count", Severity::Error),
            ]
        );
        assert_eq!(diagnostics[0].lines, ["msgid \"a\""]);
        assert_eq!(diagnostics[2].message, "3 plural forms instead of 2");
    }

    #[test]
    fn test_check_plural_range() {
        let data = MoBuilder::new()
            .header("Plural-Forms: nplurals=2; plural=n;\n")
            .build();
        let diagnostics = check("range", &data);
        assert_eq!(rules(&diagnostics), [("plural-range", Severity::Error)]);
    }

    #[test]
    fn test_check_invalid() {
        let diagnostics = check("invalid", b"this is not an MO file, really");
        assert_eq!(rules(&diagnostics), [("load-error", Severity::Error)]);
        let data = MoBuilder::new()
            .header("Plural-Forms: nplurals=2; plural=n +;\n")
            .build();
        let diagnostics = check("invalid-plural", &data);
        assert_eq!(rules(&diagnostics), [("plural-forms", Severity::Error)]);
        let header = format!(
            "Plural-Forms: nplurals=2; plural={}n{};\n",
            "(".repeat(20_000),
            ")".repeat(20_000)
        );
        let data = MoBuilder::new().header(&header).build();
        let diagnostics = check("deep-plural", &data);
        assert_eq!(rules(&diagnostics), [("plural-forms", Severity::Error)]);
    }
}
