// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration file (TOML).
//!
//! ```toml
//! [parser]
//! encoding = "UTF-8"
//! auto_detect_encoding = true
//!
//! [plural]
//! backend = "tree"
//!
//! [plural.custom]
//! pt_BR = "nplurals=2; plural=(n > 1);"
//! ```

use std::{collections::BTreeMap, path::Path};

use encoding_rs::Encoding;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    mo::parser::MoParser,
    plural::{
        forms::PluralForms,
        generator::{AstPluralRuleGenerator, DefaultPluralRuleGenerator, PluralBackend},
        parser::AstParser,
    },
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parser: ParserConfig,
    pub plural: PluralConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Encoding used until a `Content-Type` header declares another one.
    pub encoding: String,
    pub auto_detect_encoding: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            encoding: String::from("UTF-8"),
            auto_detect_encoding: true,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluralConfig {
    pub backend: PluralBackend,
    /// Plural forms by locale, used when a catalog has no `Plural-Forms`
    /// header.
    pub custom: BTreeMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("cannot read {}: {err}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| Error::Config(err.to_string()))
    }

    /// Build the MO parser with the configured encoding.
    pub fn parser(&self) -> Result<MoParser> {
        let encoding = Encoding::for_label(self.parser.encoding.as_bytes()).ok_or_else(|| {
            Error::Config(format!("unknown encoding \"{}\"", self.parser.encoding))
        })?;
        Ok(MoParser::new()
            .with_encoding(encoding)
            .with_auto_detect_encoding(self.parser.auto_detect_encoding))
    }

    /// Build a plural rule generator with the configured backend and custom
    /// rules.
    pub fn generator(&self) -> Result<AstPluralRuleGenerator> {
        let mut fallback = DefaultPluralRuleGenerator::new();
        for (locale, text) in &self.plural.custom {
            let rule = PluralForms::parse(text)
                .and_then(|forms| {
                    let ast = AstParser::parse(&forms.formula)?;
                    self.plural.backend.build(forms.nplurals, ast)
                })
                .map_err(|err| {
                    Error::Config(format!("invalid plural forms for locale \"{locale}\": {err}"))
                })?;
            fallback.add_custom_rule(locale, rule);
        }
        Ok(AstPluralRuleGenerator::new(fallback).with_backend(self.plural.backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        locale::Locale,
        plural::generator::PluralRuleGenerator,
    };

    #[test]
    fn test_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        let parser = config.parser().unwrap();
        assert_eq!(parser.encoding(), encoding_rs::UTF_8);
        assert!(parser.auto_detect_encoding());
        assert_eq!(config.generator().unwrap().backend(), PluralBackend::Tree);
    }

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml(
            r#"
[parser]
encoding = "koi8-r"
auto_detect_encoding = false

[plural]
backend = "compiled"

[plural.custom]
pt_BR = "nplurals=2; plural=(n > 1);"
"#,
        )
        .unwrap();
        let parser = config.parser().unwrap();
        assert_eq!(parser.encoding(), encoding_rs::KOI8_R);
        assert!(!parser.auto_detect_encoding());
        let generator = config.generator().unwrap();
        assert_eq!(generator.backend(), PluralBackend::Compiled);
        let rule = generator.create_rule(&Locale::new("pt-BR")).unwrap();
        assert_eq!(rule.plural_index(0).unwrap(), 0);
        assert_eq!(rule.plural_index(2).unwrap(), 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_toml("[parser]\nunknown = 1\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("[plural]\nbackend = \"jit\"\n"),
            Err(Error::Config(_))
        ));
        let config = Config::from_toml("[parser]\nencoding = \"CHARSET\"\n").unwrap();
        assert!(matches!(config.parser(), Err(Error::Config(_))));
        let config =
            Config::from_toml("[plural.custom]\nfr = \"nplurals=2; plural=n ==;\"\n").unwrap();
        assert!(matches!(config.generator(), Err(Error::Config(_))));
        assert!(matches!(
            Config::load(Path::new("/nonexistent/mocat.toml")),
            Err(Error::Config(_))
        ));
    }
}
