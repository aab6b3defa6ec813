// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Strategies creating the plural rule of a catalog.

use std::{collections::HashMap, sync::Arc};

use serde::Deserialize;
use tracing::debug;

use crate::{
    error::Result,
    locale::Locale,
    plural::{
        compile::CompiledPluralRule,
        forms::PluralForms,
        parser::AstParser,
        rule::{AstPluralRule, BuiltinPluralRule, PluralRule},
        token::Ast,
    },
};

/// Evaluator used for rules parsed from a `Plural-Forms` header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralBackend {
    /// Walk the syntax tree.
    #[default]
    Tree,
    /// Run a compiled stack machine program.
    Compiled,
}

impl PluralBackend {
    /// Build a rule from a parsed expression with this backend.
    pub fn build(self, num_plurals: usize, ast: Ast) -> Result<Arc<dyn PluralRule>> {
        Ok(match self {
            PluralBackend::Tree => Arc::new(AstPluralRule::new(num_plurals, ast)?),
            PluralBackend::Compiled => Arc::new(CompiledPluralRule::new(num_plurals, &ast)?),
        })
    }
}

pub trait PluralRuleTextParser {
    /// Set the `Plural-Forms` header value used for the next rules created.
    fn set_plural_rule_text(&mut self, text: &str) -> Result<()>;

    /// Forget the header value, so that the next rules come from the locale.
    fn clear_plural_rule_text(&mut self);
}

pub trait PluralRuleGenerator {
    fn create_rule(&self, locale: &Locale) -> Result<Arc<dyn PluralRule>>;

    /// Return the generator as a text parser, if it can use the
    /// `Plural-Forms` header of a catalog.
    fn as_text_parser(&mut self) -> Option<&mut dyn PluralRuleTextParser> {
        None
    }
}

/// Custom rules registered by locale name, then built-in rules.
#[derive(Debug, Default, Clone)]
pub struct DefaultPluralRuleGenerator {
    custom_rules: HashMap<String, Arc<dyn PluralRule>>,
}

impl DefaultPluralRuleGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule for a locale name (`pt_BR`) or a language code (`pt`).
    #[must_use]
    pub fn with_custom_rule(mut self, locale: &str, rule: Arc<dyn PluralRule>) -> Self {
        self.add_custom_rule(locale, rule);
        self
    }

    pub fn add_custom_rule(&mut self, locale: &str, rule: Arc<dyn PluralRule>) {
        self.custom_rules.insert(Locale::new(locale).canonical_name(), rule);
    }

    /// Find a custom rule with the same candidates as catalog directories:
    /// `pt_BR.UTF-8`, then `pt_BR`, then `pt`.
    fn custom_rule(&self, locale: &Locale) -> Option<&Arc<dyn PluralRule>> {
        locale
            .catalog_dirs()
            .iter()
            .find_map(|name| self.custom_rules.get(name))
    }
}

impl PluralRuleGenerator for DefaultPluralRuleGenerator {
    fn create_rule(&self, locale: &Locale) -> Result<Arc<dyn PluralRule>> {
        if let Some(rule) = self.custom_rule(locale) {
            debug!("Using custom plural rule for locale \"{}\"", locale.name());
            return Ok(Arc::clone(rule));
        }
        let rule = BuiltinPluralRule::for_locale(locale);
        debug!(
            "Using built-in plural rule {:?} for language code \"{}\" (locale \"{}\")",
            rule.family(),
            locale.language_code(),
            locale.name()
        );
        Ok(Arc::new(rule))
    }
}

/// Rules parsed from the `Plural-Forms` header when one was set, otherwise
/// the rules of a [`DefaultPluralRuleGenerator`].
#[derive(Debug, Default, Clone)]
pub struct AstPluralRuleGenerator {
    fallback: DefaultPluralRuleGenerator,
    backend: PluralBackend,
    parsed: Option<(usize, Ast)>,
}

impl AstPluralRuleGenerator {
    #[must_use]
    pub fn new(fallback: DefaultPluralRuleGenerator) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_backend(mut self, backend: PluralBackend) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn backend(&self) -> PluralBackend {
        self.backend
    }

    #[must_use]
    pub fn has_rule_text(&self) -> bool {
        self.parsed.is_some()
    }
}

impl PluralRuleTextParser for AstPluralRuleGenerator {
    fn set_plural_rule_text(&mut self, text: &str) -> Result<()> {
        let forms = PluralForms::parse(text)?;
        let ast = AstParser::parse(&forms.formula)?;
        debug!("Parsed plural rule: nplurals={}, plural={ast}", forms.nplurals);
        self.parsed = Some((forms.nplurals, ast));
        Ok(())
    }

    fn clear_plural_rule_text(&mut self) {
        self.parsed = None;
    }
}

impl PluralRuleGenerator for AstPluralRuleGenerator {
    fn create_rule(&self, locale: &Locale) -> Result<Arc<dyn PluralRule>> {
        match &self.parsed {
            Some((num_plurals, ast)) => self.backend.build(*num_plurals, ast.clone()),
            None => self.fallback.create_rule(locale),
        }
    }

    fn as_text_parser(&mut self) -> Option<&mut dyn PluralRuleTextParser> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, plural::rule::FnPluralRule};

    #[test]
    fn test_default_generator() {
        let generator = DefaultPluralRuleGenerator::new();
        let rule = generator.create_rule(&Locale::new("fr_FR")).unwrap();
        assert_eq!(rule.num_plurals(), 2);
        assert_eq!(rule.plural_index(1).unwrap(), 0);
        assert_eq!(rule.plural_index(2).unwrap(), 1);
        let rule = generator.create_rule(&Locale::new("xx")).unwrap();
        assert_eq!(rule.num_plurals(), 1);
    }

    #[test]
    fn test_custom_rules() {
        let brazilian = Arc::new(FnPluralRule::new(2, |n| i64::from(n > 1)).unwrap());
        let mut generator = DefaultPluralRuleGenerator::new().with_custom_rule("pt-BR", brazilian);
        generator.add_custom_rule("de", Arc::new(FnPluralRule::new(3, |_| 2).unwrap()));
        let rule = generator.create_rule(&Locale::new("pt_BR")).unwrap();
        assert_eq!(rule.plural_index(0).unwrap(), 0);
        assert_eq!(rule.plural_index(2).unwrap(), 1);
        // Built-in rule for "pt": 0 is plural.
        let rule = generator.create_rule(&Locale::new("pt_PT")).unwrap();
        assert_eq!(rule.plural_index(0).unwrap(), 1);
        let rule = generator.create_rule(&Locale::new("de_AT")).unwrap();
        assert_eq!(rule.num_plurals(), 3);
    }

    #[test]
    fn test_custom_rules_with_codeset() {
        let brazilian = Arc::new(FnPluralRule::new(2, |n| i64::from(n > 1)).unwrap());
        let mut generator = DefaultPluralRuleGenerator::new().with_custom_rule("pt_BR", brazilian);
        for name in ["pt_BR.UTF-8", "pt-BR.UTF-8", "pt_BR@mod", "pt_BR.ISO-8859-1@mod"] {
            let rule = generator.create_rule(&Locale::new(name)).unwrap();
            assert_eq!(rule.plural_index(0).unwrap(), 0, "locale: {name}");
        }
        generator.add_custom_rule("sr@latin", Arc::new(FnPluralRule::new(3, |_| 2).unwrap()));
        let rule = generator.create_rule(&Locale::new("sr.UTF-8@latin")).unwrap();
        assert_eq!(rule.plural_index(1).unwrap(), 2);
        // Built-in rule when only the codeset is registered elsewhere.
        let rule = generator.create_rule(&Locale::new("pt_PT.UTF-8")).unwrap();
        assert_eq!(rule.plural_index(0).unwrap(), 1);
    }

    #[test]
    fn test_ast_generator() {
        let mut generator = AstPluralRuleGenerator::default();
        assert!(!generator.has_rule_text());
        let rule = generator.create_rule(&Locale::new("ru")).unwrap();
        assert_eq!(rule.num_plurals(), 3);

        generator
            .as_text_parser()
            .unwrap()
            .set_plural_rule_text("nplurals=2; plural=(n > 1);")
            .unwrap();
        assert!(generator.has_rule_text());
        let rule = generator.create_rule(&Locale::new("ru")).unwrap();
        assert_eq!(rule.num_plurals(), 2);
        assert_eq!(rule.plural_index(1).unwrap(), 0);
        assert_eq!(rule.plural_index(5).unwrap(), 1);

        generator.clear_plural_rule_text();
        assert!(!generator.has_rule_text());
        let rule = generator.create_rule(&Locale::new("ru")).unwrap();
        assert_eq!(rule.num_plurals(), 3);
    }

    #[test]
    fn test_deeply_nested_rule_text() {
        let mut generator = AstPluralRuleGenerator::default();
        let text = format!(
            "nplurals=2; plural={}n != 1{};",
            "(".repeat(10_000),
            ")".repeat(10_000)
        );
        assert!(matches!(
            generator.set_plural_rule_text(&text),
            Err(Error::Parser(_))
        ));
        assert!(!generator.has_rule_text());
    }

    #[test]
    fn test_compiled_backend() {
        let mut generator =
            AstPluralRuleGenerator::default().with_backend(PluralBackend::Compiled);
        assert_eq!(generator.backend(), PluralBackend::Compiled);
        generator
            .set_plural_rule_text(
                "nplurals=3; plural=n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2;",
            )
            .unwrap();
        let rule = generator.create_rule(&Locale::new("en")).unwrap();
        for (n, index) in [(1, 0), (2, 1), (5, 2), (11, 2), (21, 0), (0, 2)] {
            assert_eq!(rule.plural_index(n).unwrap(), index);
        }
    }

    #[test]
    fn test_invalid_rule_text() {
        let mut generator = AstPluralRuleGenerator::default();
        assert!(matches!(
            generator.set_plural_rule_text("nplurals=2; plural=n = 1;"),
            Err(Error::Parser(_))
        ));
        assert!(matches!(
            generator.set_plural_rule_text("plural=n != 1;"),
            Err(Error::Format(_))
        ));
        assert!(!generator.has_rule_text());
    }

    #[test]
    fn test_default_has_no_text_parser() {
        let mut generator = DefaultPluralRuleGenerator::new();
        assert!(generator.as_text_parser().is_none());
    }
}
