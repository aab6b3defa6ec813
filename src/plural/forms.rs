// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Extraction of the fields of a `Plural-Forms` header.

use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForms {
    pub nplurals: usize,
    pub formula: String,
}

impl PluralForms {
    /// Parse a `Plural-Forms` header value, for example
    /// `nplurals=2; plural=(n != 1);`.
    ///
    /// Both `nplurals` and `plural` are mandatory, `nplurals` must be a
    /// positive integer.
    pub fn parse(value: &str) -> Result<Self> {
        let mut nplurals = None;
        let mut formula = None;
        for field in value.split(';') {
            let Some((name, field_value)) = field.split_once('=') else {
                continue;
            };
            match name.trim() {
                "nplurals" => {
                    let text = field_value.trim();
                    let count = text.parse::<usize>().ok().filter(|count| *count > 0).ok_or_else(
                        || Error::Format(format!("invalid number of plurals: \"{text}\"")),
                    )?;
                    nplurals = Some(count);
                }
                "plural" => {
                    let text = field_value.split('\n').next().unwrap_or_default().trim();
                    formula = Some(text.to_string());
                }
                _ => {}
            }
        }
        match (nplurals, formula) {
            (Some(nplurals), Some(formula)) if !formula.is_empty() => {
                Ok(Self { nplurals, formula })
            }
            (None, _) => Err(Error::Format(format!(
                "missing \"nplurals\" in plural forms: \"{value}\""
            ))),
            _ => Err(Error::Format(format!(
                "missing \"plural\" in plural forms: \"{value}\""
            ))),
        }
    }
}

impl fmt::Display for PluralForms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "nplurals={}; plural={};", self.nplurals, self.formula)
    }
}
