// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Loading of catalogs: locate the MO file of a domain, parse it and merge
//! its translations into a catalog.

use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    error::{Error, Result},
    locale::Locale,
    mo::{file::ParsedFile, parser::MoParser},
    plural::generator::{AstPluralRuleGenerator, PluralRuleGenerator},
};

/// Result of the merge of a parsed file into a catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Number of translations added to the catalog.
    pub inserted: usize,
    /// Keys skipped because they were already present (in the file or in the
    /// catalog).
    pub duplicates: Vec<String>,
    /// Whether the plural rule comes from the `Plural-Forms` header.
    pub plural_forms_applied: bool,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub locale_dir: PathBuf,
    pub domain: String,
    pub parser: MoParser,
    pub generator: AstPluralRuleGenerator,
}

impl LoadOptions {
    #[must_use]
    pub fn new(locale_dir: impl Into<PathBuf>, domain: &str) -> Self {
        Self {
            locale_dir: locale_dir.into(),
            domain: domain.to_string(),
            parser: MoParser::default(),
            generator: AstPluralRuleGenerator::default(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: MoParser) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: AstPluralRuleGenerator) -> Self {
        self.generator = generator;
        self
    }
}

/// Return the path to the MO file of `domain` for the locale, searching
/// `<locale_dir>/<locale>/LC_MESSAGES/<domain>.mo` for each name of
/// [`Locale::catalog_dirs`] (`fr_FR.UTF-8`, `fr_FR`, then `fr`).
#[must_use]
pub fn locate_file(locale_dir: &Path, domain: &str, locale: &Locale) -> Option<PathBuf> {
    let file_name = format!("{domain}.mo");
    locale.catalog_dirs().into_iter().find_map(|dir| {
        let path = locale_dir.join(dir).join("LC_MESSAGES").join(&file_name);
        debug!("Looking for catalog file {}", path.display());
        path.is_file().then_some(path)
    })
}

pub fn open_stream(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

pub fn parse_file<R: Read + Seek>(parser: &MoParser, stream: &mut R) -> Result<ParsedFile> {
    let parsed = parser.parse(stream)?;
    debug!(
        "Parsed MO file: revision {}, {} translations, encoding {}",
        parsed.revision,
        parsed.translations.len(),
        parsed.encoding.name()
    );
    Ok(parsed)
}

/// Merge the translations of a parsed file into the catalog and set the
/// plural rule of the catalog with the generator.
///
/// If the file has a `Plural-Forms` header and the generator accepts rule
/// texts, the rule is built from this header.
pub fn merge_into_catalog(
    catalog: &mut Catalog,
    parsed: ParsedFile,
    generator: &mut dyn PluralRuleGenerator,
) -> Result<MergeReport> {
    let mut report = MergeReport {
        duplicates: parsed.duplicates,
        ..MergeReport::default()
    };
    if let Some(text_parser) = generator.as_text_parser() {
        // A rule parsed from a previous file must not leak into this catalog.
        text_parser.clear_plural_rule_text();
        if let Some(plural_forms) = parsed.headers.get("Plural-Forms") {
            text_parser
                .set_plural_rule_text(plural_forms)
                .map_err(|err| {
                    Error::catalog_loading(
                        format!("invalid Plural-Forms header \"{plural_forms}\""),
                        err,
                    )
                })?;
            report.plural_forms_applied = true;
        }
    }
    catalog.set_plural_rule(generator.create_rule(catalog.locale())?);
    for (key, forms) in parsed.translations {
        if catalog.get_translations(&key).is_some() {
            warn!("Translation {key:?} already in catalog, skipped");
            report.duplicates.push(key);
        } else {
            catalog.insert(key, forms);
            report.inserted += 1;
        }
    }
    Ok(report)
}

/// Locate, parse and load the catalog of a domain for a locale.
pub fn load_catalog(options: &LoadOptions, locale: Locale) -> Result<Catalog> {
    let path = locate_file(&options.locale_dir, &options.domain, &locale).ok_or_else(|| {
        Error::FileNotFound {
            domain: options.domain.clone(),
            locale_dir: options.locale_dir.clone(),
        }
    })?;
    debug!("Loading catalog {} for locale {locale}", path.display());
    let mut stream = open_stream(&path)?;
    let parsed = parse_file(&options.parser, &mut stream)?;
    let mut catalog = Catalog::new(locale);
    let mut generator = options.generator.clone();
    let report = merge_into_catalog(&mut catalog, parsed, &mut generator)?;
    debug!(
        "Loaded {} translations ({} duplicates) from {}",
        report.inserted,
        report.duplicates.len(),
        path.display()
    );
    Ok(catalog)
}

impl Catalog {
    /// Load a catalog from an already opened MO stream, with the default
    /// parser and plural rule generator.
    pub fn from_stream<R: Read + Seek>(stream: &mut R, locale: Locale) -> Result<Self> {
        let parsed = parse_file(&MoParser::default(), stream)?;
        let mut catalog = Catalog::new(locale);
        merge_into_catalog(&mut catalog, parsed, &mut AstPluralRuleGenerator::default())?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use super::*;
    use crate::{
        mo::testing::MoBuilder,
        plural::generator::{DefaultPluralRuleGenerator, PluralBackend},
    };

    const RU_HEADER: &str = "Content-Type: text/plain; charset=UTF-8\n\
        Plural-Forms: nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);\n";

    fn russian_mo() -> Vec<u8> {
        MoBuilder::new()
            .header(RU_HEADER)
            .entry("File", "Файл")
            .plural("{0} file", "{0} files", &["{0} файл", "{0} файла", "{0} файлов"])
            .context("menu", "Open", "Открыть")
            .build()
    }

    /// Temporary locale directory, removed on drop.
    struct TempLocaleDir(PathBuf);

    impl TempLocaleDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!("mocat-{}-{name}", std::process::id()));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn add(&self, locale: &str, domain: &str, content: &[u8]) {
            let dir = self.0.join(locale).join("LC_MESSAGES");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(format!("{domain}.mo")), content).unwrap();
        }
    }

    impl Drop for TempLocaleDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_from_stream() {
        let mut stream = Cursor::new(russian_mo());
        let catalog = Catalog::from_stream(&mut stream, Locale::new("ru_RU")).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get_string("File"), "Файл");
        assert_eq!(catalog.get_particular_string("menu", "Open"), "Открыть");
        for (n, expected) in [
            (1, "{0} файл"),
            (3, "{0} файла"),
            (11, "{0} файлов"),
            (21, "{0} файл"),
        ] {
            assert_eq!(
                catalog.get_plural_string("{0} file", "{0} files", n).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_merge_report() {
        let data = MoBuilder::new()
            .header("Plural-Forms: nplurals=2; plural=n > 1;\n")
            .entry("a", "1")
            .entry("a", "2")
            .entry("b", "3")
            .build();
        let parsed = parse_file(&MoParser::default(), &mut Cursor::new(data)).unwrap();
        let mut catalog = Catalog::new(Locale::new("en"));
        catalog.insert("b".to_string(), vec!["0".to_string()]);
        let report = merge_into_catalog(
            &mut catalog,
            parsed,
            &mut AstPluralRuleGenerator::default(),
        )
        .unwrap();
        assert_eq!(report.inserted, 1);
        assert!(report.plural_forms_applied);
        let mut duplicates = report.duplicates.clone();
        duplicates.sort();
        assert_eq!(duplicates, ["a", "b"]);
        assert_eq!(catalog.get_string("a"), "1");
        assert_eq!(catalog.get_string("b"), "0");
        // Rule "n > 1": 0 is singular.
        assert_eq!(catalog.plural_rule().plural_index(0).unwrap(), 0);
    }

    #[test]
    fn test_merge_without_plural_forms() {
        let data = MoBuilder::new()
            .header("Content-Type: text/plain; charset=UTF-8\n")
            .entry("a", "1")
            .build();
        let parsed = parse_file(&MoParser::default(), &mut Cursor::new(data)).unwrap();
        let mut catalog = Catalog::new(Locale::new("pl"));
        let report = merge_into_catalog(
            &mut catalog,
            parsed,
            &mut DefaultPluralRuleGenerator::default(),
        )
        .unwrap();
        assert!(!report.plural_forms_applied);
        assert_eq!(catalog.plural_rule().num_plurals(), 3);
    }

    #[test]
    fn test_invalid_plural_forms() {
        let data = MoBuilder::new()
            .header("Plural-Forms: nplurals=2; plural=n = 1;\n")
            .build();
        let parsed = parse_file(&MoParser::default(), &mut Cursor::new(data)).unwrap();
        let mut catalog = Catalog::new(Locale::new("en"));
        let err = merge_into_catalog(
            &mut catalog,
            parsed,
            &mut AstPluralRuleGenerator::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CatalogLoading { source: Some(_), .. }));
    }

    #[test]
    fn test_deeply_nested_plural_forms() {
        let header = format!(
            "Plural-Forms: nplurals=2; plural={}n != 1{};\n",
            "(".repeat(20_000),
            ")".repeat(20_000)
        );
        let data = MoBuilder::new().header(&header).entry("a", "1").build();
        let parsed = parse_file(&MoParser::default(), &mut Cursor::new(data)).unwrap();
        let mut catalog = Catalog::new(Locale::new("en"));
        let err = merge_into_catalog(
            &mut catalog,
            parsed,
            &mut AstPluralRuleGenerator::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CatalogLoading { source: Some(_), .. }));
    }

    #[test]
    fn test_generator_reused_across_merges() {
        let mut generator = AstPluralRuleGenerator::default();
        let with_rule = MoBuilder::new()
            .header("Plural-Forms: nplurals=2; plural=n > 1;\n")
            .entry("a", "1")
            .build();
        let parsed = parse_file(&MoParser::default(), &mut Cursor::new(with_rule)).unwrap();
        let mut catalog = Catalog::new(Locale::new("pl"));
        merge_into_catalog(&mut catalog, parsed, &mut generator).unwrap();
        assert_eq!(catalog.plural_rule().num_plurals(), 2);

        let without_rule = MoBuilder::new().entry("b", "2").build();
        let parsed = parse_file(&MoParser::default(), &mut Cursor::new(without_rule)).unwrap();
        let mut catalog = Catalog::new(Locale::new("pl"));
        let report = merge_into_catalog(&mut catalog, parsed, &mut generator).unwrap();
        assert!(!report.plural_forms_applied);
        // Built-in rule for "pl", not the rule of the previous file.
        assert_eq!(catalog.plural_rule().num_plurals(), 3);
    }

    #[test]
    fn test_locate_and_load() {
        let dir = TempLocaleDir::new("locate");
        dir.add("ru", "app", &russian_mo());
        dir.add("pt_BR", "app", &MoBuilder::new().entry("File", "Arquivo").build());

        assert_eq!(
            locate_file(&dir.0, "app", &Locale::new("ru_RU")),
            Some(dir.0.join("ru").join("LC_MESSAGES").join("app.mo"))
        );
        assert_eq!(
            locate_file(&dir.0, "app", &Locale::new("pt-BR")),
            Some(dir.0.join("pt_BR").join("LC_MESSAGES").join("app.mo"))
        );
        assert_eq!(locate_file(&dir.0, "other", &Locale::new("ru")), None);

        dir.add("fr_FR.UTF-8", "app", &MoBuilder::new().entry("File", "Fichier").build());
        dir.add("sr@latin", "app", &MoBuilder::new().entry("File", "Datoteka").build());
        assert_eq!(
            locate_file(&dir.0, "app", &Locale::new("fr_FR.UTF-8")),
            Some(dir.0.join("fr_FR.UTF-8").join("LC_MESSAGES").join("app.mo"))
        );
        assert_eq!(
            locate_file(&dir.0, "app", &Locale::new("sr.UTF-8@latin")),
            Some(dir.0.join("sr@latin").join("LC_MESSAGES").join("app.mo"))
        );
        assert_eq!(
            locate_file(&dir.0, "app", &Locale::new("pt-BR.UTF-8")),
            Some(dir.0.join("pt_BR").join("LC_MESSAGES").join("app.mo"))
        );

        let options = LoadOptions::new(&dir.0, "app").with_generator(
            AstPluralRuleGenerator::default().with_backend(PluralBackend::Compiled),
        );
        let catalog = load_catalog(&options, Locale::new("ru_RU")).unwrap();
        assert_eq!(catalog.get_string("File"), "Файл");
        assert_eq!(
            catalog.get_plural_string("{0} file", "{0} files", 2).unwrap(),
            "{0} файла"
        );
        let catalog = load_catalog(&options, Locale::new("pt-BR")).unwrap();
        assert_eq!(catalog.get_string("File"), "Arquivo");
        // Built-in rule for "pt", no Plural-Forms header.
        assert_eq!(catalog.plural_rule().num_plurals(), 2);

        assert!(matches!(
            load_catalog(&options, Locale::new("de")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempLocaleDir::new("invalid");
        dir.add("fr", "app", b"not an MO file at all");
        let options = LoadOptions::new(&dir.0, "app");
        assert!(matches!(
            load_catalog(&options, Locale::new("fr")),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            open_stream(&dir.0.join("missing.mo")),
            Err(Error::Io(_))
        ));
    }
}
