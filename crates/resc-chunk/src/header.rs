//! Chunk header (28 bytes, little-endian).

use crate::constants::{CHUNK_STRING_POOL, FLAG_SORTED, FLAG_UTF8, HEADER_SIZE};

/// Header of a string-pool chunk: the first 28 bytes.
///
/// All offsets are measured from the start of the chunk, so a chunk can
/// be embedded at any position of a larger container file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct ChunkHeader {
    /// Chunk type tag: `CHUNK_STRING_POOL`.
    pub tag: u16,
    /// Size of this header in bytes (28).
    pub header_size: u16,
    /// Total chunk size in bytes, including this header and all padding.
    pub size: u32,
    /// Number of entries in the string offset table.
    pub string_count: u32,
    /// Number of entries in the style offset table.
    pub style_count: u32,
    /// Flag bits (see `FLAG_UTF8`, `FLAG_SORTED`).
    pub flags: u32,
    /// Byte offset to the string-data region.
    pub strings_start: u32,
    /// Byte offset to the style-data region, 0 when there are no styles.
    pub styles_start: u32,
}

const _: () = assert!(std::mem::size_of::<ChunkHeader>() == 28);

impl Default for ChunkHeader {
    fn default() -> Self {
        Self {
            tag: CHUNK_STRING_POOL,
            header_size: HEADER_SIZE,
            size: 0,
            string_count: 0,
            style_count: 0,
            flags: 0,
            strings_start: 0,
            styles_start: 0,
        }
    }
}

impl ChunkHeader {
    /// Decode a header from the first 28 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE as usize, "header too short");

        Self {
            tag: u16::from_le_bytes([bytes[0], bytes[1]]),
            header_size: u16::from_le_bytes([bytes[2], bytes[3]]),
            size: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            string_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            style_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            flags: u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
            strings_start: u32::from_le_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]),
            styles_start: u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
        }
    }

    /// Encode the header to 28 bytes.
    pub fn to_bytes(&self) -> [u8; 28] {
        let mut bytes = [0u8; 28];
        bytes[0..2].copy_from_slice(&self.tag.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.header_size.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.size.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.string_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.style_count.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.flags.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.strings_start.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.styles_start.to_le_bytes());
        bytes
    }

    pub fn validate_tag(&self) -> bool {
        self.tag == CHUNK_STRING_POOL
    }

    /// Returns true if string data is narrow (UTF-8) encoded.
    pub fn is_utf8(&self) -> bool {
        self.flags & FLAG_UTF8 != 0
    }

    /// Returns true if entries are flagged as sorted by value.
    pub fn is_sorted(&self) -> bool {
        self.flags & FLAG_SORTED != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_size() {
        assert_eq!(std::mem::size_of::<ChunkHeader>(), 28);
    }

    #[test]
    fn header_default() {
        let h = ChunkHeader::default();
        assert!(h.validate_tag());
        assert_eq!(h.header_size, HEADER_SIZE);
        assert_eq!(h.size, 0);
        assert!(!h.is_utf8());
        assert!(!h.is_sorted());
    }

    #[test]
    fn header_roundtrip() {
        let h = ChunkHeader {
            size: 256,
            string_count: 5,
            style_count: 2,
            flags: FLAG_UTF8,
            strings_start: 56,
            styles_start: 200,
            ..Default::default()
        };

        let bytes = h.to_bytes();
        assert_eq!(bytes.len(), 28);

        let decoded = ChunkHeader::from_bytes(&bytes);
        assert_eq!(decoded, h);
        assert!(decoded.is_utf8());
    }

    #[test]
    fn header_flag_bits() {
        let h = ChunkHeader {
            flags: FLAG_SORTED | FLAG_UTF8,
            ..Default::default()
        };

        assert!(h.is_sorted());
        assert!(h.is_utf8());
    }
}
