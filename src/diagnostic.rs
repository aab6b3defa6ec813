// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostic for MO files.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Default, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub lines: Vec<String>,
}

impl std::fmt::Display for Severity {
    /// Format the `Severity` as a colored string for display.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Severity::Info => "info".cyan(),
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".bright_red().bold(),
        };
        write!(f, "{s}")
    }
}

impl Diagnostic {
    /// Create a new `Diagnostic` with the given path, severity, and message.
    pub fn new(path: &Path, rule: &'static str, severity: Severity, message: String) -> Self {
        Self {
            path: PathBuf::from(path),
            rule,
            severity,
            message,
            ..Default::default()
        }
    }

    pub fn add_line(&mut self, line: String) {
        self.lines.push(line);
    }

    fn format_lines(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            let mut list_lines = Vec::with_capacity(self.lines.len() + 2);
            list_lines.push(String::new());
            list_lines.push("    |".cyan().to_string());
            for line in &self.lines {
                list_lines.push(format!("{} {line}", "    |".cyan()));
            }
            list_lines.push("    |".cyan().to_string());
            list_lines.join("\n")
        }
    }
}

impl std::fmt::Display for Diagnostic {
    /// Format the `Diagnostic` for display, including file, severity, message, and context.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}:{}] {}{}",
            self.path.display().to_string().white().bold(),
            self.severity,
            self.rule,
            self.message,
            self.format_lines(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        colored::control::set_override(false);
        let mut diag = Diagnostic::new(
            Path::new("fr.mo"),
            "duplicate",
            Severity::Warning,
            "duplicate key".to_string(),
        );
        assert_eq!(diag.to_string(), "fr.mo: [warning:duplicate] duplicate key");
        diag.add_line("msgid \"File\"".to_string());
        assert_eq!(
            diag.to_string(),
            "fr.mo: [warning:duplicate] duplicate key\n    |\n    | msgid \"File\"\n    |"
        );
    }

    #[test]
    fn test_json() {
        let diag = Diagnostic::new(
            Path::new("fr.mo"),
            "load-error",
            Severity::Error,
            "bad".to_string(),
        );
        assert_eq!(
            serde_json::to_string(&diag).unwrap(),
            r#"{"path":"fr.mo","rule":"load-error","severity":"error","message":"bad","lines":[]}"#
        );
    }
}
