// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plural rules: map a count to the index of a plural form.

use std::{fmt, sync::Arc};

use crate::{
    error::{Error, Result},
    locale::Locale,
    plural::{builtin::PluralFamily, forms::PluralForms, parser::AstParser, token::Ast},
};

pub trait PluralRule: Send + Sync + fmt::Debug {
    /// Number of plural forms of the language.
    fn num_plurals(&self) -> usize;

    /// Evaluate the rule for the count `n`, without range check.
    fn evaluate(&self, n: i64) -> i64;

    /// Return the plural form index for the count `n`.
    ///
    /// An index outside `[0, num_plurals)` is an error, it is never clamped.
    fn plural_index(&self, n: i64) -> Result<usize> {
        let index = self.evaluate(n);
        let num_plurals = self.num_plurals();
        usize::try_from(index)
            .ok()
            .filter(|value| *value < num_plurals)
            .ok_or(Error::PluralIndexOutOfRange {
                n,
                index,
                num_plurals,
            })
    }
}

pub(crate) fn check_num_plurals(num_plurals: usize) -> Result<usize> {
    if num_plurals == 0 {
        Err(Error::InvalidNumPlurals(num_plurals))
    } else {
        Ok(num_plurals)
    }
}

/// Rule evaluated by walking the syntax tree of a plural expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstPluralRule {
    num_plurals: usize,
    ast: Ast,
}

impl AstPluralRule {
    pub fn new(num_plurals: usize, ast: Ast) -> Result<Self> {
        Ok(Self {
            num_plurals: check_num_plurals(num_plurals)?,
            ast,
        })
    }

    /// Build a rule from the fields of a `Plural-Forms` header.
    pub fn from_forms(forms: &PluralForms) -> Result<Self> {
        Self::new(forms.nplurals, AstParser::parse(&forms.formula)?)
    }

    #[must_use]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }
}

impl PluralRule for AstPluralRule {
    fn num_plurals(&self) -> usize {
        self.num_plurals
    }

    fn evaluate(&self, n: i64) -> i64 {
        self.ast.evaluate(n)
    }
}

/// Rule evaluated by a closure.
#[derive(Clone)]
pub struct FnPluralRule {
    num_plurals: usize,
    evaluator: Arc<dyn Fn(i64) -> i64 + Send + Sync>,
}

impl FnPluralRule {
    pub fn new(
        num_plurals: usize,
        evaluator: impl Fn(i64) -> i64 + Send + Sync + 'static,
    ) -> Result<Self> {
        Ok(Self {
            num_plurals: check_num_plurals(num_plurals)?,
            evaluator: Arc::new(evaluator),
        })
    }
}

impl fmt::Debug for FnPluralRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnPluralRule")
            .field("num_plurals", &self.num_plurals)
            .finish_non_exhaustive()
    }
}

impl PluralRule for FnPluralRule {
    fn num_plurals(&self) -> usize {
        self.num_plurals
    }

    fn evaluate(&self, n: i64) -> i64 {
        (self.evaluator)(n)
    }
}

/// Built-in rule of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinPluralRule {
    family: PluralFamily,
}

impl BuiltinPluralRule {
    #[must_use]
    pub fn new(family: PluralFamily) -> Self {
        Self { family }
    }

    #[must_use]
    pub fn for_locale(locale: &Locale) -> Self {
        Self::new(PluralFamily::from_language_code(locale.language_code()))
    }

    #[must_use]
    pub fn family(&self) -> PluralFamily {
        self.family
    }
}

impl Default for BuiltinPluralRule {
    fn default() -> Self {
        Self::new(PluralFamily::Singular)
    }
}

impl PluralRule for BuiltinPluralRule {
    fn num_plurals(&self) -> usize {
        self.family.num_plurals()
    }

    fn evaluate(&self, n: i64) -> i64 {
        self.family.evaluate(n)
    }
}
