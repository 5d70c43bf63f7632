//! Validated read-only view over a flattened string-pool chunk.
//!
//! Mirrors the checks the resource loader performs when it maps a chunk;
//! the flatten tests use it to confirm a pool reads back intact. It never
//! rebuilds a `StringPool`: the chunk is the end of the pipeline.

use std::borrow::Cow;
use std::io;
use std::path::Path;

use crate::constants::{HEADER_SIZE, SPAN_END, SPAN_SIZE};
use crate::header::ChunkHeader;

/// Chunk load or access error.
#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("chunk too small: {0} bytes (header is {HEADER_SIZE})")]
    TooSmall(usize),
    #[error("not a string-pool chunk: tag {0:#06x}")]
    InvalidTag(u16),
    #[error("declared header size {0} does not match {HEADER_SIZE}")]
    InvalidHeaderSize(u16),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("offset tables extend past the string data at {strings_start}")]
    TablesOutOfBounds { strings_start: u32 },
    #[error("index {0} out of bounds")]
    IndexOutOfBounds(usize),
    #[error("string {0} extends past the end of its region")]
    Truncated(usize),
    #[error("string {0} is not valid UTF-8")]
    InvalidUtf8(usize),
    #[error("string {0} is not valid UTF-16")]
    InvalidUtf16(usize),
    #[error("span list {0} is missing its terminator")]
    MissingTerminator(usize),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One decoded span record: the tag's string-table index plus the
/// inclusive character range it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpanRecord {
    pub name: u32,
    pub first_char: u32,
    pub last_char: u32,
}

/// An owned, validated string-pool chunk.
///
/// Strings are decoded lazily per access; span lists are walked to their
/// terminator on demand.
#[derive(Debug)]
pub struct Chunk {
    data: Vec<u8>,
    header: ChunkHeader,
}

impl Chunk {
    /// Load a chunk from owned bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ChunkError> {
        if data.len() < HEADER_SIZE as usize {
            return Err(ChunkError::TooSmall(data.len()));
        }

        let header = ChunkHeader::from_bytes(&data);
        if !header.validate_tag() {
            return Err(ChunkError::InvalidTag(header.tag));
        }
        if header.header_size != HEADER_SIZE {
            return Err(ChunkError::InvalidHeaderSize(header.header_size));
        }
        if header.size as usize != data.len() {
            return Err(ChunkError::SizeMismatch {
                header: header.size,
                actual: data.len(),
            });
        }

        let strings_start = header.strings_start as usize;
        let tables_end = (header.string_count as usize)
            .checked_add(header.style_count as usize)
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_add(HEADER_SIZE as usize));
        let tables_ok =
            tables_end.is_some_and(|end| end <= strings_start && strings_start <= data.len());
        if !tables_ok {
            return Err(ChunkError::TablesOutOfBounds {
                strings_start: header.strings_start,
            });
        }

        Ok(Self { data, header })
    }

    /// Load a chunk from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChunkError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn header(&self) -> &ChunkHeader {
        &self.header
    }

    /// Raw chunk bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of entries in the string offset table.
    pub fn string_count(&self) -> usize {
        self.header.string_count as usize
    }

    /// Number of styled entries (span lists in the style region).
    pub fn style_count(&self) -> usize {
        self.header.style_count as usize
    }

    pub fn is_utf8(&self) -> bool {
        self.header.is_utf8()
    }

    pub fn is_sorted(&self) -> bool {
        self.header.is_sorted()
    }

    /// Decode the string at `index` in pool order.
    ///
    /// Narrow chunks borrow straight from the chunk; wide chunks decode
    /// into an owned string.
    pub fn string(&self, index: usize) -> Result<Cow<'_, str>, ChunkError> {
        if index >= self.string_count() {
            return Err(ChunkError::IndexOutOfBounds(index));
        }

        let offset = read_u32_le(&self.data, HEADER_SIZE as usize + index * 4) as usize;
        let record = self
            .data
            .get(self.header.strings_start as usize + offset..)
            .ok_or(ChunkError::Truncated(index))?;

        if self.is_utf8() {
            decode_narrow(record, index).map(Cow::Borrowed)
        } else {
            decode_wide(record, index).map(Cow::Owned)
        }
    }

    /// Span records of the `style_index`-th styled entry, in list order.
    pub fn spans(&self, style_index: usize) -> Result<Vec<SpanRecord>, ChunkError> {
        if style_index >= self.style_count() {
            return Err(ChunkError::IndexOutOfBounds(style_index));
        }

        let table_at = HEADER_SIZE as usize + self.string_count() * 4 + style_index * 4;
        let offset = read_u32_le(&self.data, table_at) as usize;
        let mut cursor = self
            .data
            .get(self.header.styles_start as usize + offset..)
            .ok_or(ChunkError::MissingTerminator(style_index))?;

        let mut spans = Vec::new();
        loop {
            if cursor.len() < SPAN_SIZE {
                return Err(ChunkError::MissingTerminator(style_index));
            }
            let name = read_u32_le(cursor, 0);
            if name == SPAN_END {
                return Ok(spans);
            }
            spans.push(SpanRecord {
                name,
                first_char: read_u32_le(cursor, 4),
                last_char: read_u32_le(cursor, 8),
            });
            cursor = &cursor[SPAN_SIZE..];
        }
    }
}

/// Read a little-endian u32 from bytes at the given offset.
#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decode one narrow record: skip the unit-count prefix, slice the byte
/// length, check the data is UTF-8.
fn decode_narrow(record: &[u8], index: usize) -> Result<&str, ChunkError> {
    let (_, rest) = read_len8(record, index)?;
    let (byte_len, rest) = read_len8(rest, index)?;
    let bytes = rest.get(..byte_len).ok_or(ChunkError::Truncated(index))?;
    std::str::from_utf8(bytes).map_err(|_| ChunkError::InvalidUtf8(index))
}

/// Decode one wide record into an owned string.
fn decode_wide(record: &[u8], index: usize) -> Result<String, ChunkError> {
    let (unit_len, rest) = read_len16(record, index)?;
    if rest.len() < unit_len * 2 {
        return Err(ChunkError::Truncated(index));
    }
    let units: Vec<u16> = rest[..unit_len * 2]
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| ChunkError::InvalidUtf16(index))
}

/// Read a one-or-two-byte length prefix.
fn read_len8(bytes: &[u8], index: usize) -> Result<(usize, &[u8]), ChunkError> {
    let first = *bytes.first().ok_or(ChunkError::Truncated(index))? as usize;
    if first & 0x80 != 0 {
        let second = *bytes.get(1).ok_or(ChunkError::Truncated(index))? as usize;
        Ok((((first & 0x7F) << 8) | second, &bytes[2..]))
    } else {
        Ok((first, &bytes[1..]))
    }
}

/// Read a one-or-two-unit length prefix.
fn read_len16(bytes: &[u8], index: usize) -> Result<(usize, &[u8]), ChunkError> {
    if bytes.len() < 2 {
        return Err(ChunkError::Truncated(index));
    }
    let first = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    if first & 0x8000 != 0 {
        if bytes.len() < 4 {
            return Err(ChunkError::Truncated(index));
        }
        let second = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
        Ok((((first & 0x7FFF) << 16) | second, &bytes[4..]))
    } else {
        Ok((first, &bytes[2..]))
    }
}
