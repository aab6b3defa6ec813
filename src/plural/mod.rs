// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plural forms: expression parser, evaluators and rule generators.

pub mod builtin;
pub mod compile;
pub mod forms;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod rule;
pub mod token;
