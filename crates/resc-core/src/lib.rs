#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the resc resource compiler.
//!
//! The central type is [`StringPool`]: a deduplicating pool of plain and
//! styled strings. Interning hands out reference-counted handles that keep
//! reporting their entry's current position as the pool is sorted and
//! pruned, so a build step can reorder the pool for output after all
//! references have been handed out. The `resc-chunk` crate serializes a
//! pool into the binary string-pool chunk consumed by the resource loader.

mod pool;
mod style;


pub use pool::{Entry, Ref, StringPool, StyleRef};
pub use style::{Span, StyledText, TextSpan};
