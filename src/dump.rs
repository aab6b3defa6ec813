// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display the content of an MO file.

use std::collections::BTreeMap;

use colored::Colorize;
use mocat::{
    config::Config,
    loader::{open_stream, parse_file},
    mo::file::ParsedFile,
};

use crate::{args, checker::describe_key};

/// Format the parsed file in human format.
fn format_human(parsed: &ParsedFile) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Revision:".bold(), parsed.revision));
    out.push_str(&format!(
        "{} {}\n",
        "Byte order:".bold(),
        if parsed.big_endian {
            "big endian"
        } else {
            "little endian"
        }
    ));
    out.push_str(&format!(
        "{} {}\n",
        "Encoding:".bold(),
        parsed.encoding.name()
    ));
    out.push_str(&format!("{}\n", "Headers:".bold()));
    for (name, value) in parsed.headers.iter() {
        out.push_str(&format!("  {}: {value}\n", name.cyan()));
    }
    out.push_str(&format!(
        "{} {}\n",
        "Translations:".bold(),
        parsed.translations.len()
    ));
    let translations: BTreeMap<_, _> = parsed.translations.iter().collect();
    for (key, forms) in translations {
        out.push_str(&format!("  {}\n", describe_key(key).green()));
        if let [form] = forms.as_slice() {
            out.push_str(&format!("    {form:?}\n"));
        } else {
            for (index, form) in forms.iter().enumerate() {
                out.push_str(&format!("    [{index}] {form:?}\n"));
            }
        }
    }
    for key in &parsed.duplicates {
        out.push_str(&format!(
            "{}: duplicate {} skipped\n",
            "Warning".yellow(),
            describe_key(key)
        ));
    }
    out
}

/// Display the content of a file and return the exit code.
pub fn run_dump(args: &args::DumpArgs, config: &Config) -> i32 {
    let parsed = match config.parser().and_then(|parser| {
        let mut stream = open_stream(&args.file)?;
        parse_file(&parser, &mut stream)
    }) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!(
                "{}: {}: {err}",
                "Error".bright_red().bold(),
                args.file.display()
            );
            return 1;
        }
    };
    match args.output {
        args::OutputFormat::Human => print!("{}", format_human(&parsed)),
        args::OutputFormat::Json => {
            println!("{}", serde_json::to_string(&parsed).unwrap_or_default());
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use mocat::mo::file::Revision;

    use super::*;

    #[test]
    fn test_format_human() {
        colored::control::set_override(false);
        let mut parsed = ParsedFile::new(Revision::default(), encoding_rs::KOI8_R, true);
        parsed.headers.insert("Language", "ru");
        parsed
            .translations
            .insert("b".to_string(), vec!["x".to_string(), "y".to_string()]);
        parsed
            .translations
            .insert("ctx\u{4}a".to_string(), vec!["z".to_string()]);
        parsed.duplicates.push("b".to_string());
        assert_eq!(
            format_human(&parsed),
            "Revision: 0.0\n\
             Byte order: big endian\n\
             Encoding: KOI8-R\n\
             Headers:\n  Language: ru\n\
             Translations: 2\n  \
             msgid \"b\"\n    [0] \"x\"\n    [1] \"y\"\n  \
             msgctxt \"ctx\" msgid \"a\"\n    \"z\"\n\
             Warning: duplicate msgid \"b\" skipped\n"
        );
    }
}
