#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Binary string-pool chunk format for the resc resource compiler.
//!
//! [`flatten_utf8`] and [`flatten_utf16`] serialize a
//! [`resc_core::StringPool`] into the self-contained little-endian chunk
//! the resource loader maps at runtime. [`Chunk`] is the validated
//! read-back view over a flattened chunk, and [`dump`] renders one for
//! humans.

mod constants;
mod dump;
mod flatten;
mod header;
mod view;

#[cfg(test)]
mod view_tests;

pub use constants::{
    CHUNK_ALIGN, CHUNK_STRING_POOL, FLAG_SORTED, FLAG_UTF8, HEADER_SIZE, MAX_LEN_NARROW,
    MAX_LEN_WIDE, SPAN_END, SPAN_SIZE,
};
pub use dump::dump;
pub use flatten::{FlattenError, flatten_utf8, flatten_utf16};
pub use header::ChunkHeader;
pub use view::{Chunk, ChunkError, SpanRecord};
