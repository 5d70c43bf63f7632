//! String-pool chunk format constants.

/// Chunk type tag identifying a string-pool chunk.
pub const CHUNK_STRING_POOL: u16 = 0x0001;

/// Size of the chunk header in bytes.
pub const HEADER_SIZE: u16 = 28;

/// Flag bit: entries are sorted by value.
pub const FLAG_SORTED: u32 = 1 << 0;

/// Flag bit: string data is narrow (UTF-8) rather than wide (UTF-16).
pub const FLAG_UTF8: u32 = 1 << 8;

/// Reserved name index terminating a span list, and the style region.
pub const SPAN_END: u32 = 0xFFFF_FFFF;

/// Size of one span record in the style region, in bytes.
pub const SPAN_SIZE: usize = 12;

/// String records and the chunk itself are padded to this boundary.
pub const CHUNK_ALIGN: usize = 4;

/// Longest text length a narrow length prefix can carry (15 bits).
pub const MAX_LEN_NARROW: usize = 0x7FFF;

/// Longest text length a wide length prefix can carry (31 bits).
pub const MAX_LEN_WIDE: usize = 0x7FFF_FFFF;
