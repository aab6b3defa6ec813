// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mocat loads GNU gettext MO catalogs and evaluates their plural forms.
//!
//! - [`mo`]: MO file parser (both byte orders, headers, charset detection)
//! - [`plural`]: `Plural-Forms` expressions, evaluators and built-in rules
//! - [`catalog`]: lookups of singular, plural and contextual messages
//! - [`loader`]: locate, parse and merge MO files into a catalog
//!
//! # Example
//!
//! ```no_run
//! use mocat::{
//!     locale::Locale,
//!     loader::{LoadOptions, load_catalog},
//! };
//!
//! let options = LoadOptions::new("/usr/share/locale", "coreutils");
//! let catalog = load_catalog(&options, Locale::new("fr_FR"))?;
//! println!("{}", catalog.get_string("Usage:"));
//! println!("{}", catalog.get_plural_string("{0} file", "{0} files", 3)?);
//! # Ok::<(), mocat::error::Error>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod mo;
pub mod plural;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use locale::Locale;
