// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Errors reported while loading catalogs and evaluating plural rules.

use std::path::PathBuf;

use crate::plural::parser::ParserError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input: {expected} bytes requested, {available} available")]
    UnexpectedEndOfInput { expected: usize, available: usize },

    #[error("stream is too short ({0} bytes), an MO file has at least 20 bytes")]
    StreamTooShort(u64),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("unsupported MO file major revision: {0}")]
    UnsupportedVersion(u16),

    #[error("could not load catalog: {message}")]
    CatalogLoading {
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    #[error("format error: {0}")]
    Format(String),

    #[error("parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("plural index {index} out of range [0, {num_plurals}) for n = {n}")]
    PluralIndexOutOfRange {
        n: i64,
        index: i64,
        num_plurals: usize,
    },

    #[error("invalid number of plural forms: {0}")]
    InvalidNumPlurals(usize),

    #[error("MO file not found for domain \"{domain}\" in {}", locale_dir.display())]
    FileNotFound { domain: String, locale_dir: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an error as a catalog loading failure.
    pub fn catalog_loading(message: impl Into<String>, source: Error) -> Self {
        Error::CatalogLoading {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::UnsupportedVersion(2).to_string(),
            "unsupported MO file major revision: 2"
        );
        assert_eq!(
            Error::PluralIndexOutOfRange {
                n: 3,
                index: 5,
                num_plurals: 2
            }
            .to_string(),
            "plural index 5 out of range [0, 2) for n = 3"
        );
    }

    #[test]
    fn test_catalog_loading_source() {
        let err = Error::catalog_loading(
            "invalid Content-Type header",
            Error::Format("missing subtype".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "could not load catalog: invalid Content-Type header"
        );
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("format error: missing subtype".to_string())
        );
    }
}
