// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Binary reader with a selectable byte order.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::{Error, Result};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

/// Reader of fixed-width numbers from a borrowed stream.
///
/// The stream is never closed by the reader; it is only borrowed for the
/// lifetime of the reader. The internal scratch buffer is reused between
/// reads, so one reader must be used per stream.
pub struct ByteOrderReader<'s, R> {
    stream: &'s mut R,
    byte_order: ByteOrder,
    buffer: [u8; 16],
}

impl<'s, R: Read + Seek> ByteOrderReader<'s, R> {
    /// Create a new little-endian reader on the given stream.
    pub fn new(stream: &'s mut R) -> Self {
        Self::with_byte_order(stream, ByteOrder::LittleEndian)
    }

    /// Create a new reader with the given byte order.
    pub fn with_byte_order(stream: &'s mut R, byte_order: ByteOrder) -> Self {
        Self {
            stream,
            byte_order,
            buffer: [0; 16],
        }
    }

    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Switch the byte order used by all subsequent reads.
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Return the total length of the stream, keeping the current position.
    pub fn stream_len(&mut self) -> Result<u64> {
        let pos = self.stream.stream_position()?;
        let len = self.stream.seek(SeekFrom::End(0))?;
        if pos != len {
            self.stream.seek(SeekFrom::Start(pos))?;
        }
        Ok(len)
    }

    /// Move to an absolute offset in the stream.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.stream.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Fill the scratch buffer with `count` bytes, in the byte order of the stream.
    fn fill_buffer(&mut self, count: usize) -> Result<()> {
        let mut read = 0;
        while read < count {
            match self.stream.read(&mut self.buffer[read..count]) {
                Ok(0) => {
                    return Err(Error::UnexpectedEndOfInput {
                        expected: count,
                        available: read,
                    });
                }
                Ok(n) => read += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Read `count` bytes and return them in little-endian order.
    fn read_le<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.fill_buffer(N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(&self.buffer[..N]);
        if self.byte_order == ByteOrder::BigEndian {
            bytes.reverse();
        }
        Ok(bytes)
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(len.min(65536));
        let got = self
            .stream
            .by_ref()
            .take(len as u64)
            .read_to_end(&mut bytes)?;
        if got < len {
            return Err(Error::UnexpectedEndOfInput {
                expected: len,
                available: got,
            });
        }
        Ok(bytes)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_le()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_le()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_le()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_le()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_le()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_le()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_le()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_le()?))
    }
}
