// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! MO file parser.
//!
//! See <https://www.gnu.org/software/gettext/manual/html_node/MO-Files.html>.

use std::io::{Read, Seek};

use encoding_rs::Encoding;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    mo::{
        content_type::ContentType,
        file::{ParsedFile, Revision},
        reader::{ByteOrder, ByteOrderReader},
    },
};

/// Magic number of MO files, as read in the byte order of the file.
pub const MAGIC: u32 = 0x9504_12de;

/// Minimum length of an MO file: magic, revision, count and the two table offsets.
pub const MIN_LENGTH: u64 = 20;

#[derive(Debug, Clone, Copy)]
struct StringSpan {
    length: usize,
    offset: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct MoParser {
    encoding: &'static Encoding,
    auto_detect_encoding: bool,
}

impl Default for MoParser {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
            auto_detect_encoding: true,
        }
    }
}

fn to_offset(value: i32, what: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::InvalidFormat(format!("negative {what}: {value}")))
}

/// Return the encoding declared in the `Content-Type` header, if any.
fn detect_encoding(content_type: &str) -> Result<Option<&'static Encoding>> {
    let content_type = ContentType::parse(content_type).map_err(|err| {
        Error::catalog_loading(
            format!("invalid Content-Type header \"{content_type}\""),
            err,
        )
    })?;
    let Some(charset) = content_type.charset() else {
        return Ok(None);
    };
    match Encoding::for_label(charset.as_bytes()) {
        Some(encoding) => Ok(Some(encoding)),
        None => Err(Error::CatalogLoading {
            message: format!("unknown encoding \"{charset}\" in Content-Type header"),
            source: None,
        }),
    }
}

impl MoParser {
    /// Create a parser with UTF-8 as default encoding and charset auto-detection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoding used to decode strings (until a charset is detected).
    #[must_use]
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enable or disable the switch to the charset declared in the `Content-Type` header.
    #[must_use]
    pub fn with_auto_detect_encoding(mut self, auto_detect_encoding: bool) -> Self {
        self.auto_detect_encoding = auto_detect_encoding;
        self
    }

    #[must_use]
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    #[must_use]
    pub fn auto_detect_encoding(&self) -> bool {
        self.auto_detect_encoding
    }

    /// Read a table of `count` (length, offset) pairs.
    fn read_table<R: Read + Seek>(
        reader: &mut ByteOrderReader<'_, R>,
        offset: u64,
        count: usize,
    ) -> Result<Vec<StringSpan>> {
        reader.seek_to(offset)?;
        let mut table = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            let length = reader.read_i32()?;
            let offset = reader.read_i32()?;
            table.push(StringSpan {
                length: usize::try_from(length).map_err(|_| {
                    Error::InvalidFormat(format!("negative string length: {length}"))
                })?,
                offset: to_offset(offset, "string offset")?,
            });
        }
        Ok(table)
    }

    /// Read the strings of a span: one or more strings separated by NUL bytes.
    fn read_strings<R: Read + Seek>(
        reader: &mut ByteOrderReader<'_, R>,
        span: StringSpan,
        encoding: &'static Encoding,
        encoding_errors: &mut usize,
    ) -> Result<Vec<String>> {
        reader.seek_to(span.offset)?;
        let bytes = reader.read_bytes(span.length)?;
        let mut strings = Vec::new();
        let mut start = 0;
        for end in memchr::memchr_iter(0, &bytes).chain(std::iter::once(bytes.len())) {
            let (value, had_errors) = encoding.decode_without_bom_handling(&bytes[start..end]);
            if had_errors {
                *encoding_errors += 1;
                warn!(
                    "invalid byte sequence for encoding {} at offset {}",
                    encoding.name(),
                    span.offset + start as u64
                );
            }
            strings.push(value.into_owned());
            start = end + 1;
        }
        Ok(strings)
    }

    /// Parse an MO file from the given stream.
    ///
    /// The stream is read from its start and is left open; it is positioned
    /// anywhere after the call.
    pub fn parse<R: Read + Seek>(&self, stream: &mut R) -> Result<ParsedFile> {
        debug!("parsing MO stream");
        let mut reader = ByteOrderReader::new(stream);
        let length = reader.stream_len()?;
        if length < MIN_LENGTH {
            return Err(Error::StreamTooShort(length));
        }
        reader.seek_to(0)?;

        let magic = reader.read_u32()?;
        let big_endian = if magic == MAGIC {
            false
        } else if magic.swap_bytes() == MAGIC {
            reader.set_byte_order(ByteOrder::BigEndian);
            true
        } else {
            return Err(Error::InvalidFormat(format!(
                "not an MO stream (magic number: {magic:#010x})"
            )));
        };

        let revision = Revision::from(reader.read_u32()?);
        debug!("MO file revision: {revision}, big endian: {big_endian}");
        if revision.major > 1 {
            return Err(Error::UnsupportedVersion(revision.major));
        }

        let count = reader.read_i32()?;
        let count = usize::try_from(count)
            .map_err(|_| Error::InvalidFormat(format!("negative string count: {count}")))?;
        let orig_offset = to_offset(reader.read_i32()?, "original strings table offset")?;
        let trans_offset = to_offset(reader.read_i32()?, "translated strings table offset")?;
        // The hash table and system dependent segments are not used.
        debug!("MO file contains {count} strings");

        let orig_table = Self::read_table(&mut reader, orig_offset, count)?;
        let trans_table = Self::read_table(&mut reader, trans_offset, count)?;

        let mut encoding = self.encoding;
        let mut file = ParsedFile::new(revision, encoding, big_endian);
        debug!("decoding strings with encoding {}", encoding.name());
        for (orig_span, trans_span) in orig_table.into_iter().zip(trans_table) {
            let original =
                Self::read_strings(&mut reader, orig_span, encoding, &mut file.encoding_errors)?;
            let mut translated =
                Self::read_strings(&mut reader, trans_span, encoding, &mut file.encoding_errors)?;
            let Some(key) = original.into_iter().next() else {
                continue;
            };
            if translated.is_empty() {
                continue;
            }
            if key.is_empty() {
                file.headers.parse_into(&translated[0]);
                if self.auto_detect_encoding
                    && let Some(content_type) = file.headers.get("Content-Type")
                    && let Some(detected) = detect_encoding(content_type)?
                {
                    if detected != encoding {
                        debug!("switching to encoding {}", detected.name());
                    }
                    encoding = detected;
                    file.encoding = detected;
                }
            } else if file.translations.contains_key(&key) {
                warn!("duplicate translation key \"{key}\" skipped");
                file.duplicates.push(key);
            } else {
                translated.shrink_to_fit();
                file.translations.insert(key, translated);
            }
        }
        debug!(
            "MO stream parsed: {} translations, {} headers",
            file.translations.len(),
            file.headers.len()
        );
        Ok(file)
    }
}
