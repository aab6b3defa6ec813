// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for the `Content-Type` header of catalogs, e.g. `text/plain; charset=UTF-8`.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    type_: String,
    sub_type: String,
    parameters: BTreeMap<String, String>,
}

/// Check if the char is allowed in a type, subtype, parameter name or bare value.
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_')
}

fn parse_token<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Format(format!("missing {what} in content type")));
    }
    if let Some(c) = value.chars().find(|c| !is_token_char(*c)) {
        return Err(Error::Format(format!(
            "invalid character '{c}' in {what} of content type"
        )));
    }
    Ok(value)
}

/// Split parameters on `;`, except inside double quotes.
fn split_parameters(value: &str) -> Result<Vec<&str>> {
    let mut params = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (idx, c) in value.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&value[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if in_quotes {
        return Err(Error::Format(
            "unterminated quoted string in content type".to_string(),
        ));
    }
    params.push(&value[start..]);
    Ok(params)
}

impl ContentType {
    /// Parse a content type, with its optional parameters.
    ///
    /// Type, subtype and parameter names are case-insensitive: they are stored
    /// in lower case. Parameter values are kept as is (without the quotes).
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::Format("empty content type".to_string()));
        }
        let (media_type, params) = value.split_once(';').unwrap_or((value, ""));
        let Some((type_, sub_type)) = media_type.split_once('/') else {
            return Err(Error::Format(format!(
                "missing subtype in content type \"{value}\""
            )));
        };
        let type_ = parse_token(type_, "type")?.to_ascii_lowercase();
        let sub_type = parse_token(sub_type, "subtype")?.to_ascii_lowercase();
        let mut parameters = BTreeMap::new();
        for param in split_parameters(params)? {
            if param.trim().is_empty() {
                continue;
            }
            let Some((name, raw_value)) = param.split_once('=') else {
                return Err(Error::Format(format!(
                    "missing '=' in content type parameter \"{}\"",
                    param.trim()
                )));
            };
            let name = parse_token(name, "parameter name")?.to_ascii_lowercase();
            let raw_value = raw_value.trim();
            let param_value = if let Some(quoted) = raw_value.strip_prefix('"') {
                match quoted.strip_suffix('"') {
                    Some(inner) => inner.to_string(),
                    None => {
                        return Err(Error::Format(format!(
                            "invalid quoted value for parameter \"{name}\""
                        )));
                    }
                }
            } else {
                parse_token(raw_value, "parameter value")?.to_string()
            };
            parameters.insert(name, param_value);
        }
        Ok(Self {
            type_,
            sub_type,
            parameters,
        })
    }

    #[must_use]
    pub fn type_(&self) -> &str {
        &self.type_
    }

    #[must_use]
    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    /// Return the media type, e.g. `text/plain`.
    #[must_use]
    pub fn media_type(&self) -> String {
        format!("{}/{}", self.type_, self.sub_type)
    }

    /// Return the value of a parameter (name is case-insensitive).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameter("charset")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let ct = ContentType::parse("text/plain").unwrap();
        assert_eq!(ct.type_(), "text");
        assert_eq!(ct.sub_type(), "plain");
        assert_eq!(ct.media_type(), "text/plain");
        assert!(ct.charset().is_none());
    }

    #[test]
    fn test_parse_charset() {
        let ct = ContentType::parse("Text/Plain; CharSet=KOI8-R").unwrap();
        assert_eq!(ct.media_type(), "text/plain");
        assert_eq!(ct.charset(), Some("KOI8-R"));
        assert_eq!(ct.parameter("CHARSET"), Some("KOI8-R"));
    }

    #[test]
    fn test_parse_quoted_and_multiple() {
        let ct = ContentType::parse("text/plain; format=\"flowed; x\" ; charset=utf-8;").unwrap();
        assert_eq!(ct.parameter("format"), Some("flowed; x"));
        assert_eq!(ct.charset(), Some("utf-8"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ContentType::parse(""), Err(Error::Format(_))));
        assert!(matches!(ContentType::parse("text"), Err(Error::Format(_))));
        assert!(matches!(ContentType::parse("text/"), Err(Error::Format(_))));
        assert!(matches!(
            ContentType::parse("text/plain; charset"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            ContentType::parse("text/plain; charset=\"utf-8"),
            Err(Error::Format(_))
        ));
        assert!(matches!(
            ContentType::parse("text/pl@in"),
            Err(Error::Format(_))
        ));
    }
}
