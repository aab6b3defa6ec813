// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog of translations, with lookups of singular and plural messages.

use std::{fmt::Display, sync::Arc};

use tracing::trace;

use crate::{
    error::Result,
    format::format_positional,
    locale::Locale,
    mo::file::{CONTEXT_GLUE, TranslationMap},
    plural::rule::{BuiltinPluralRule, PluralRule},
};

/// Translations of a locale, with the plural rule used to select a plural
/// form.
///
/// Lookups never fail on a missing translation: the source text is returned
/// instead.
#[derive(Debug, Clone)]
pub struct Catalog {
    translations: TranslationMap,
    locale: Locale,
    plural_rule: Arc<dyn PluralRule>,
}

impl Catalog {
    /// Create an empty catalog using the built-in plural rule of the locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        let plural_rule = Arc::new(BuiltinPluralRule::for_locale(&locale));
        Self::with_rule(locale, plural_rule)
    }

    #[must_use]
    pub fn with_rule(locale: Locale, plural_rule: Arc<dyn PluralRule>) -> Self {
        Self {
            translations: TranslationMap::new(),
            locale,
            plural_rule,
        }
    }

    /// Build the key of a message with a context.
    #[must_use]
    pub fn context_key(context: &str, id: &str) -> String {
        format!("{context}{CONTEXT_GLUE}{id}")
    }

    /// Add translations for a key; an existing key is kept and `false` is
    /// returned.
    pub fn insert(&mut self, key: String, forms: Vec<String>) -> bool {
        if self.translations.contains_key(&key) {
            return false;
        }
        self.translations.insert(key, forms);
        true
    }

    /// Return all the translated forms of a key (`None` for an empty key).
    #[must_use]
    pub fn get_translations(&self, id: &str) -> Option<&[String]> {
        if id.is_empty() {
            return None;
        }
        self.translations.get(id).map(Vec::as_slice)
    }

    fn get_form(&self, key: &str, index: usize) -> Option<&str> {
        let form = self
            .get_translations(key)
            .and_then(|forms| forms.get(index))
            .map(String::as_str);
        if form.is_none() {
            trace!("No translation for {key:?} (form {index})");
        }
        form
    }

    /// Return the translation of `text`, or `text` itself if not translated.
    #[must_use]
    pub fn get_string<'a>(&'a self, text: &'a str) -> &'a str {
        self.get_form(text, 0).unwrap_or(text)
    }

    /// Return the translation of `text` in `context`, or `text` itself.
    #[must_use]
    pub fn get_particular_string<'a>(&'a self, context: &str, text: &'a str) -> &'a str {
        self.get_form(&Self::context_key(context, text), 0)
            .unwrap_or(text)
    }

    fn plural_fallback<'a>(
        &'a self,
        key: &str,
        text: &'a str,
        plural: &'a str,
        n: i64,
    ) -> Result<&'a str> {
        let index = self.plural_rule.plural_index(n)?;
        Ok(self
            .get_form(key, index)
            .unwrap_or(if n == 1 { text } else { plural }))
    }

    /// Return the plural form of `text` for the count `n`.
    ///
    /// Without translation, `text` is returned when `n` is 1, `plural`
    /// otherwise. The plural rule is always evaluated, so an index out of
    /// range is an error even without translation.
    pub fn get_plural_string<'a>(
        &'a self,
        text: &'a str,
        plural: &'a str,
        n: i64,
    ) -> Result<&'a str> {
        self.plural_fallback(text, text, plural, n)
    }

    /// Return the plural form of `text` in `context` for the count `n`.
    pub fn get_particular_plural_string<'a>(
        &'a self,
        context: &str,
        text: &'a str,
        plural: &'a str,
        n: i64,
    ) -> Result<&'a str> {
        self.plural_fallback(&Self::context_key(context, text), text, plural, n)
    }

    /// Translate `text` and replace its placeholders `{0}`, `{1}`, ...
    pub fn get_string_fmt(&self, text: &str, args: &[&dyn Display]) -> Result<String> {
        format_positional(self.get_string(text), args)
    }

    /// Select the plural form of `text` and replace its placeholders.
    pub fn get_plural_string_fmt(
        &self,
        text: &str,
        plural: &str,
        n: i64,
        args: &[&dyn Display],
    ) -> Result<String> {
        format_positional(self.get_plural_string(text, plural, n)?, args)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn plural_rule(&self) -> &Arc<dyn PluralRule> {
        &self.plural_rule
    }

    pub fn set_plural_rule(&mut self, plural_rule: Arc<dyn PluralRule>) {
        self.plural_rule = plural_rule;
    }

    /// Iterate on keys and translated forms, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.translations
            .iter()
            .map(|(key, forms)| (key.as_str(), forms.as_slice()))
    }
}
