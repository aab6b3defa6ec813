// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locale identifiers.

use std::fmt;

use serde::Serialize;

/// Locale identifier, for example `ru_RU`, `pt-BR`, `fr_FR.UTF-8` or
/// `sr@latin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locale {
    name: String,
    language_code: String,
    country: String,
}

impl Locale {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        // Strip codeset and modifier: "sr_RS.UTF-8@latin" -> "sr_RS".
        let base = name.split(['.', '@']).next().unwrap_or_default();
        let (language, country) = base.split_once(['_', '-']).unwrap_or((base, ""));
        let language_code = match language.to_ascii_lowercase().as_str() {
            "c" | "posix" => String::from("en"),
            code => code.to_string(),
        };
        Self {
            name: name.to_string(),
            language_code,
            country: country.to_string(),
        }
    }

    /// Build the locale from the environment variables `LC_ALL`,
    /// `LC_MESSAGES` and `LANG` (the first one not empty).
    #[must_use]
    pub fn from_env() -> Self {
        let name = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| String::from("C"));
        Self::new(&name)
    }

    /// Return the name as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the lowercase language code (`"ru"` for `ru_RU`).
    #[must_use]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Return the country part (`"RU"` for `ru_RU`), empty if none.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Return the name with `_` between language and country (`pt-BR` becomes
    /// `pt_BR`); codeset and modifier are kept as is (`fr_FR.UTF-8`).
    #[must_use]
    pub fn canonical_name(&self) -> String {
        let (base, rest) = split_base(&self.name);
        format!("{}{rest}", base.replace('-', "_"))
    }

    /// Return the names of the directories to search for catalogs of this
    /// locale, most specific first (`["pt_BR", "pt"]`).
    ///
    /// The candidates are the canonical name, the name without codeset (the
    /// modifier is kept) and the language code.
    #[must_use]
    pub fn catalog_dirs(&self) -> Vec<String> {
        let full = self.canonical_name();
        let (base, rest) = split_base(&full);
        let without_codeset = match rest.split_once('@') {
            Some((_, modifier)) => format!("{base}@{modifier}"),
            None => base.to_string(),
        };
        let mut dirs: Vec<String> = Vec::with_capacity(3);
        for dir in [full, without_codeset, self.language_code.clone()] {
            if !dir.is_empty() && !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        dirs
    }
}

/// Split a locale name before its codeset or modifier:
/// `"sr_RS.UTF-8@latin"` gives `("sr_RS", ".UTF-8@latin")`.
fn split_base(name: &str) -> (&str, &str) {
    name.split_at(name.find(['.', '@']).unwrap_or(name.len()))
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Locale {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let locale = Locale::new("ru_RU");
        assert_eq!(locale.name(), "ru_RU");
        assert_eq!(locale.language_code(), "ru");
        assert_eq!(locale.country(), "RU");

        let locale = Locale::new("pt-BR");
        assert_eq!(locale.language_code(), "pt");
        assert_eq!(locale.country(), "BR");

        let locale = Locale::new("fr_FR.UTF-8");
        assert_eq!(locale.name(), "fr_FR.UTF-8");
        assert_eq!(locale.language_code(), "fr");
        assert_eq!(locale.country(), "FR");

        let locale = Locale::new("sr@latin");
        assert_eq!(locale.language_code(), "sr");
        assert_eq!(locale.country(), "");

        let locale = Locale::new("EN");
        assert_eq!(locale.language_code(), "en");
        assert_eq!(locale.to_string(), "EN");
    }

    #[test]
    fn test_c_locale() {
        assert_eq!(Locale::new("C").language_code(), "en");
        assert_eq!(Locale::new("POSIX").language_code(), "en");
        assert_eq!(Locale::new("C.UTF-8").language_code(), "en");
    }

    #[test]
    fn test_catalog_dirs() {
        assert_eq!(Locale::new("pt-BR").catalog_dirs(), ["pt_BR", "pt"]);
        assert_eq!(Locale::new("de").catalog_dirs(), ["de"]);
        assert_eq!(Locale::new("sr@latin").catalog_dirs(), ["sr@latin", "sr"]);
        assert_eq!(
            Locale::new("fr_FR.UTF-8").catalog_dirs(),
            ["fr_FR.UTF-8", "fr_FR", "fr"]
        );
        assert_eq!(
            Locale::new("sr_RS.UTF-8@latin").catalog_dirs(),
            ["sr_RS.UTF-8@latin", "sr_RS@latin", "sr"]
        );
        assert_eq!(
            Locale::new("pt-BR.ISO-8859-1").catalog_dirs(),
            ["pt_BR.ISO-8859-1", "pt_BR", "pt"]
        );
        assert_eq!(
            Locale::new("be-BY@tarask").catalog_dirs(),
            ["be_BY@tarask", "be"]
        );
        assert!(Locale::new("").catalog_dirs().is_empty());
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(Locale::new("pt-BR").canonical_name(), "pt_BR");
        assert_eq!(Locale::new("fr_FR.UTF-8").canonical_name(), "fr_FR.UTF-8");
        assert_eq!(
            Locale::new("sr-RS.UTF-8@latin").canonical_name(),
            "sr_RS.UTF-8@latin"
        );
    }
}
