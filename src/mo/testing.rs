// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minimal MO file writer used by the tests of the library and the CLI.

use encoding_rs::Encoding;

use crate::mo::{file::CONTEXT_GLUE, parser::MAGIC};
use crate::mo::reader::ByteOrder;

/// Size or offset in a generated file (sizes above 4 GiB are not supported).
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone)]
pub struct MoBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    byte_order: ByteOrder,
    revision: u32,
    encoding: &'static Encoding,
}

impl Default for MoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MoBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            byte_order: ByteOrder::LittleEndian,
            revision: 0,
            encoding: encoding_rs::UTF_8,
        }
    }

    #[must_use]
    pub fn big_endian(mut self) -> Self {
        self.byte_order = ByteOrder::BigEndian;
        self
    }

    #[must_use]
    pub fn revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }

    /// Set the encoding used for the strings added after this call.
    #[must_use]
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    fn encode(&self, strings: &[&str]) -> Vec<u8> {
        let joined = strings.join("\0");
        self.encoding.encode(&joined).0.into_owned()
    }

    #[must_use]
    pub fn raw(mut self, original: &[u8], translated: &[u8]) -> Self {
        self.entries.push((original.to_vec(), translated.to_vec()));
        self
    }

    #[must_use]
    pub fn header(self, text: &str) -> Self {
        self.entry("", text)
    }

    #[must_use]
    pub fn entry(self, msgid: &str, msgstr: &str) -> Self {
        let original = self.encode(&[msgid]);
        let translated = self.encode(&[msgstr]);
        self.raw(&original, &translated)
    }

    #[must_use]
    pub fn context(self, msgctxt: &str, msgid: &str, msgstr: &str) -> Self {
        self.entry(&format!("{msgctxt}{CONTEXT_GLUE}{msgid}"), msgstr)
    }

    #[must_use]
    pub fn plural(self, msgid: &str, msgid_plural: &str, msgstr: &[&str]) -> Self {
        let original = self.encode(&[msgid, msgid_plural]);
        let translated = self.encode(msgstr);
        self.raw(&original, &translated)
    }

    fn push_u32(&self, out: &mut Vec<u8>, value: u32) {
        match self.byte_order {
            ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
        }
    }

    /// Write the file: header, both string tables, an empty hash table, then
    /// the strings.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let count = self.entries.len();
        let orig_table = 28;
        let trans_table = orig_table + 8 * count;
        let hash_table = trans_table + 8 * count;
        let mut strings = Vec::new();
        let mut orig_spans = Vec::new();
        let mut trans_spans = Vec::new();
        for (original, _) in &self.entries {
            orig_spans.push((original.len(), hash_table + strings.len()));
            strings.extend_from_slice(original);
            strings.push(0);
        }
        for (_, translated) in &self.entries {
            trans_spans.push((translated.len(), hash_table + strings.len()));
            strings.extend_from_slice(translated);
            strings.push(0);
        }
        let mut out = Vec::new();
        for value in [MAGIC, self.revision] {
            self.push_u32(&mut out, value);
        }
        for value in [count, orig_table, trans_table, 0, hash_table] {
            self.push_u32(&mut out, to_u32(value));
        }
        for (len, offset) in orig_spans.iter().chain(trans_spans.iter()) {
            self.push_u32(&mut out, to_u32(*len));
            self.push_u32(&mut out, to_u32(*offset));
        }
        out.extend_from_slice(&strings);
        out
    }
}
