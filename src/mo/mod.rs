// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! MO file reader module.

pub mod content_type;
pub mod file;
pub mod parser;
pub mod reader;

#[doc(hidden)]
pub mod testing;
