// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content of a parsed MO file.

use std::collections::{BTreeMap, HashMap};

use encoding_rs::Encoding;
use serde::{
    Serialize,
    ser::{SerializeMap, SerializeStruct, Serializer},
};

/// Character used to join a context and a message id in a translation key.
pub const CONTEXT_GLUE: char = '\u{0004}';

/// Translations: key (with optional context) to translated forms.
pub type TranslationMap = HashMap<String, Vec<String>>;

/// Format revision of an MO file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Revision {
    pub major: u16,
    pub minor: u16,
}

impl From<u32> for Revision {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: u32) -> Self {
        Self {
            major: (value >> 16) as u16,
            minor: (value & 0xffff) as u16,
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Header of a catalog, with case-insensitive names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Headers {
    // lower case name -> (name as written, value)
    entries: BTreeMap<String, (String, String)>,
}

impl Headers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header value, replacing any value with the same name.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.entries.insert(
            name.to_ascii_lowercase(),
            (name.to_string(), value.to_string()),
        );
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate on (name, value), sorted by lower case name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parse the metadata entry (translation of the empty message id), one
    /// `Name: value` per line.
    pub fn parse_into(&mut self, text: &str) {
        for line in text.split('\n').filter(|line| !line.trim().is_empty()) {
            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    self.insert(name, value.trim());
                }
            }
        }
    }
}

impl Serialize for Headers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub revision: Revision,
    pub big_endian: bool,
    pub encoding: &'static Encoding,
    pub headers: Headers,
    pub translations: TranslationMap,
    /// Keys found more than once in the file (only the first one is kept).
    pub duplicates: Vec<String>,
    /// Number of strings with invalid byte sequences for the encoding.
    pub encoding_errors: usize,
}

impl ParsedFile {
    #[must_use]
    pub fn new(revision: Revision, encoding: &'static Encoding, big_endian: bool) -> Self {
        Self {
            revision,
            big_endian,
            encoding,
            headers: Headers::new(),
            translations: TranslationMap::new(),
            duplicates: Vec::new(),
            encoding_errors: 0,
        }
    }

    /// Return the `Plural-Forms` header, if any.
    #[must_use]
    pub fn plural_forms(&self) -> Option<&str> {
        self.headers.get("Plural-Forms")
    }

    /// Return the `Language` header, if any and not empty.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.headers
            .get("Language")
            .filter(|language| !language.is_empty())
    }
}

impl Serialize for ParsedFile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Sort translations by key for a stable output.
        let translations: BTreeMap<_, _> = self.translations.iter().collect();
        let mut state = serializer.serialize_struct("ParsedFile", 6)?;
        state.serialize_field("revision", &self.revision.to_string())?;
        state.serialize_field("big_endian", &self.big_endian)?;
        state.serialize_field("encoding", self.encoding.name())?;
        state.serialize_field("headers", &self.headers)?;
        state.serialize_field("translations", &translations)?;
        state.serialize_field("duplicates", &self.duplicates)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision() {
        let rev = Revision::from(0x0001_0002);
        assert_eq!(rev, Revision { major: 1, minor: 2 });
        assert_eq!(rev.to_string(), "1.2");
    }

    #[test]
    fn test_headers_case_insensitive() {
        let mut headers = Headers::new();
        headers.parse_into(
            "Project-Id-Version: test\n\
             content-type: text/plain; charset=UTF-8\n\
             \n\
             no colon here\n\
             Plural-Forms: nplurals=2; plural=(n != 1);\n",
        );
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("Project-Id-Version"), Some("test"));
        assert_eq!(
            headers.get("Content-Type"),
            Some("text/plain; charset=UTF-8")
        );
        assert_eq!(
            headers.get("PLURAL-FORMS"),
            Some("nplurals=2; plural=(n != 1);")
        );
        assert!(headers.contains("content-TYPE"));
        assert_eq!(
            headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["content-type", "Plural-Forms", "Project-Id-Version"]
        );
    }

    #[test]
    fn test_serialize_json() {
        let mut file = ParsedFile::new(Revision::default(), encoding_rs::UTF_8, true);
        file.headers.insert("Language", "fr");
        file.translations
            .insert("hello".to_string(), vec!["bonjour".to_string()]);
        assert_eq!(file.language(), Some("fr"));
        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(
            json,
            r#"{"revision":"0.0","big_endian":true,"encoding":"UTF-8","headers":{"Language":"fr"},"translations":{"hello":["bonjour"]},"duplicates":[]}"#
        );
    }

    #[test]
    fn test_language() {
        let mut file = ParsedFile::new(Revision::default(), encoding_rs::UTF_8, false);
        assert_eq!(file.language(), None);
        file.headers.insert("Language", "");
        assert_eq!(file.language(), None);
        assert_eq!(file.plural_forms(), None);
    }
}
