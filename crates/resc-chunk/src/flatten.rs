//! Pool serialization into the string-pool chunk layout.
//!
//! Both text widths share the same section order: header, string offset
//! table, style offset table, string data, style data. Every region is
//! built in a scratch buffer before the output buffer is touched, so a
//! capacity failure leaves the caller's buffer exactly as it was.

use resc_core::StringPool;

use crate::constants::{
    CHUNK_ALIGN, CHUNK_STRING_POOL, FLAG_UTF8, HEADER_SIZE, MAX_LEN_NARROW, MAX_LEN_WIDE, SPAN_END,
};
use crate::header::ChunkHeader;

/// Error during chunk serialization.
///
/// Any variant is fatal for the output being built; a failed flatten
/// writes no bytes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// An entry's text has more UTF-16 units than the length prefix holds.
    #[error("string {index}: {units} UTF-16 units exceed the length prefix capacity {max}")]
    TextTooLong { index: usize, units: usize, max: usize },
    /// An entry's narrow encoding has more bytes than the prefix holds.
    #[error("string {index}: UTF-8 encoding is {bytes} bytes, exceeds the length prefix capacity {max}")]
    DataTooLong { index: usize, bytes: usize, max: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TextWidth {
    Narrow,
    Wide,
}

/// Append `pool` to `out` as a narrow (UTF-8) string-pool chunk.
pub fn flatten_utf8(out: &mut Vec<u8>, pool: &StringPool) -> Result<(), FlattenError> {
    flatten(out, pool, TextWidth::Narrow)
}

/// Append `pool` to `out` as a wide (UTF-16) string-pool chunk.
pub fn flatten_utf16(out: &mut Vec<u8>, pool: &StringPool) -> Result<(), FlattenError> {
    flatten(out, pool, TextWidth::Wide)
}

fn flatten(out: &mut Vec<u8>, pool: &StringPool, width: TextWidth) -> Result<(), FlattenError> {
    // String-data region plus one offset per entry, in pool order.
    let mut string_data = Vec::new();
    let mut string_offsets: Vec<u32> = Vec::with_capacity(pool.len());
    for entry in pool.entries() {
        string_offsets.push(string_data.len() as u32);
        match width {
            TextWidth::Narrow => encode_narrow(&mut string_data, entry.index(), entry.value())?,
            TextWidth::Wide => encode_wide(&mut string_data, entry.index(), entry.value())?,
        }
        pad_to_align(&mut string_data);
    }

    // Style-data region: a terminated span list per styled entry, then one
    // extra terminator closing the region.
    let mut style_data = Vec::new();
    let mut style_offsets: Vec<u32> = Vec::new();
    for entry in pool.entries() {
        let Some(spans) = entry.spans() else { continue };
        style_offsets.push(style_data.len() as u32);
        for span in spans {
            push_u32(&mut style_data, span.name.index() as u32);
            push_u32(&mut style_data, span.first_char);
            push_u32(&mut style_data, span.last_char);
        }
        push_terminator(&mut style_data);
    }
    if !style_offsets.is_empty() {
        push_terminator(&mut style_data);
    }

    let tables = 4 * (string_offsets.len() + style_offsets.len());
    let strings_start = HEADER_SIZE as usize + tables;
    let styles_start = if style_offsets.is_empty() {
        0
    } else {
        strings_start + string_data.len()
    };
    let size = strings_start + string_data.len() + style_data.len();
    debug_assert!(size % CHUNK_ALIGN == 0, "regions are individually padded");

    let header = ChunkHeader {
        tag: CHUNK_STRING_POOL,
        header_size: HEADER_SIZE,
        size: size as u32,
        string_count: string_offsets.len() as u32,
        style_count: style_offsets.len() as u32,
        flags: match width {
            TextWidth::Narrow => FLAG_UTF8,
            TextWidth::Wide => 0,
        },
        strings_start: strings_start as u32,
        styles_start: styles_start as u32,
    };

    out.reserve(size);
    out.extend_from_slice(&header.to_bytes());
    for offset in &string_offsets {
        out.extend_from_slice(&offset.to_le_bytes());
    }
    for offset in &style_offsets {
        out.extend_from_slice(&offset.to_le_bytes());
    }
    out.extend_from_slice(&string_data);
    out.extend_from_slice(&style_data);
    Ok(())
}

/// One narrow record: varint8 UTF-16 unit count, varint8 byte count,
/// UTF-8 bytes, NUL byte.
fn encode_narrow(out: &mut Vec<u8>, index: usize, text: &str) -> Result<(), FlattenError> {
    let units = text.encode_utf16().count();
    if units > MAX_LEN_NARROW {
        return Err(FlattenError::TextTooLong {
            index,
            units,
            max: MAX_LEN_NARROW,
        });
    }
    let bytes = text.len();
    if bytes > MAX_LEN_NARROW {
        return Err(FlattenError::DataTooLong {
            index,
            bytes,
            max: MAX_LEN_NARROW,
        });
    }

    push_len8(out, units);
    push_len8(out, bytes);
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    Ok(())
}

/// One wide record: varint16 unit count, UTF-16 units, NUL unit.
fn encode_wide(out: &mut Vec<u8>, index: usize, text: &str) -> Result<(), FlattenError> {
    let units = text.encode_utf16().count();
    if units > MAX_LEN_WIDE {
        return Err(FlattenError::TextTooLong {
            index,
            units,
            max: MAX_LEN_WIDE,
        });
    }

    if units >= 0x8000 {
        push_u16(out, (0x8000 | (units >> 16)) as u16);
    }
    push_u16(out, (units & 0xFFFF) as u16);
    for unit in text.encode_utf16() {
        push_u16(out, unit);
    }
    push_u16(out, 0);
    Ok(())
}

/// Lengths below 0x80 take one byte; larger ones set the continuation bit
/// on the first of two.
fn push_len8(out: &mut Vec<u8>, len: usize) {
    if len >= 0x80 {
        out.push((0x80 | (len >> 8)) as u8);
    }
    out.push((len & 0xFF) as u8);
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// A full span record with every field set to the reserved end value.
fn push_terminator(out: &mut Vec<u8>) {
    for _ in 0..3 {
        push_u32(out, SPAN_END);
    }
}

/// Pad a buffer to the chunk alignment boundary.
fn pad_to_align(buf: &mut Vec<u8>) {
    let rem = buf.len() % CHUNK_ALIGN;
    if rem != 0 {
        buf.resize(buf.len() + CHUNK_ALIGN - rem, 0);
    }
}
