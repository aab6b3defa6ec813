// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Positional placeholders in translated strings: `{0}`, `{1}`, ...

use std::fmt::{Display, Write};

use crate::error::{Error, Result};

/// Replace `{N}` in `template` by the argument at index `N`.
///
/// `{{` and `}}` are replaced by a literal brace.
pub fn format_positional(template: &str, args: &[&dyn Display]) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|(_, c)| *c == '{').is_some() => result.push('{'),
            '}' if chars.next_if(|(_, c)| *c == '}').is_some() => result.push('}'),
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => index.push(c),
                        None => {
                            return Err(Error::Format(format!(
                                "unterminated placeholder at position {pos} in \"{template}\""
                            )));
                        }
                    }
                }
                let arg = index
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .ok_or_else(|| {
                        Error::Format(format!(
                            "invalid placeholder \"{{{index}}}\" at position {pos} ({} arguments)",
                            args.len()
                        ))
                    })?;
                // Writing to a String never fails.
                let _ = write!(result, "{arg}");
            }
            '}' => {
                return Err(Error::Format(format!(
                    "unmatched '}}' at position {pos} in \"{template}\""
                )));
            }
            _ => result.push(c),
        }
    }
    Ok(result)
}
