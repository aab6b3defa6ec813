// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory utilities.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::{collections::HashSet, sync::Arc};

use colored::Colorize;
use ignore::WalkBuilder;
use mocat::locale::Locale;

/// Recursively find all compiled gettext files (matching the `*.mo` pattern) under the given paths.
///
/// The .gitignore rules are respected: ignored files are skipped.
pub fn find_mo_files(paths: &[PathBuf]) -> HashSet<PathBuf> {
    let all_paths: Vec<PathBuf> = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    };

    let mut builder = WalkBuilder::new(&all_paths[0]);
    for root in all_paths.iter().skip(1) {
        builder.add(root);
    }

    builder.follow_links(false);

    let files = Arc::new(Mutex::new(HashSet::new()));
    builder.build_parallel().run(|| {
        let files = Arc::clone(&files);
        Box::new(move |entry| {
            match entry {
                Ok(dirent) => {
                    if dirent.file_type().is_some_and(|ft| ft.is_file())
                        && dirent.path().extension().is_some_and(|ext| ext == "mo")
                        && let Ok(mut files) = files.lock()
                    {
                        files.insert(
                            dirent
                                .path()
                                .strip_prefix("./")
                                .unwrap_or(dirent.path())
                                .to_path_buf(),
                        );
                    }
                }
                Err(err) => {
                    eprintln!("{}: could not read entry: {err}", "Warning".yellow());
                }
            }
            ignore::WalkState::Continue
        })
    });
    files
        .lock()
        .map(|files| files.clone())
        .unwrap_or_default()
}

/// Return the locale of a file installed as `<locale>/LC_MESSAGES/<domain>.mo`.
pub fn locale_from_path(path: &Path) -> Option<Locale> {
    let lc_messages = path.parent()?;
    if lc_messages.file_name()? != "LC_MESSAGES" {
        return None;
    }
    let name = lc_messages.parent()?.file_name()?.to_str()?;
    Some(Locale::new(name))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_locale_from_path() {
        assert_eq!(
            locale_from_path(Path::new("locale/pt_BR/LC_MESSAGES/app.mo")),
            Some(Locale::new("pt_BR"))
        );
        assert_eq!(locale_from_path(Path::new("po/app.mo")), None);
        assert_eq!(locale_from_path(Path::new("app.mo")), None);
    }

    #[test]
    fn test_find_mo_files() {
        let root = std::env::temp_dir().join(format!("mocat-dir-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("fr").join("LC_MESSAGES")).unwrap();
        fs::write(root.join("fr").join("LC_MESSAGES").join("app.mo"), b"").unwrap();
        fs::write(root.join("fr").join("app.po"), b"").unwrap();
        fs::write(root.join("other.mo"), b"").unwrap();
        let files = find_mo_files(&[root.clone()]);
        let _ = fs::remove_dir_all(&root);
        assert_eq!(files.len(), 2);
        assert!(files.contains(&root.join("fr").join("LC_MESSAGES").join("app.mo")));
        assert!(files.contains(&root.join("other.mo")));
    }
}
