//! Value types for styled text.
//!
//! The markup pipeline hands the pool text that has already been split
//! into a raw value plus named spans ([`StyledText`]). Once interned, the
//! pool stores spans with their tag names resolved to pool references
//! ([`Span`]).

use crate::pool::Ref;

/// A named, ranged markup annotation over an interned text value.
///
/// `first_char` and `last_char` are zero-based, inclusive character
/// offsets into the owning entry's text.
#[derive(Clone, Debug)]
pub struct Span {
    /// Tag name, interned in the plain namespace of the same pool.
    pub name: Ref,
    pub first_char: u32,
    pub last_char: u32,
}

/// A span as it arrives from the markup pipeline: the tag name is still
/// raw text, not yet interned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub name: String,
    pub first_char: u32,
    pub last_char: u32,
}

impl TextSpan {
    pub fn new(name: impl Into<String>, first_char: u32, last_char: u32) -> Self {
        Self {
            name: name.into(),
            first_char,
            last_char,
        }
    }
}

/// A text value annotated with ordered markup spans, ready for styled
/// interning.
///
/// An empty span list is still styled text: it never merges with a plain
/// string of the same value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledText {
    pub text: String,
    pub spans: Vec<TextSpan>,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Append a span covering `first_char..=last_char`.
    pub fn with_span(mut self, name: impl Into<String>, first_char: u32, last_char: u32) -> Self {
        self.spans.push(TextSpan::new(name, first_char, last_char));
        self
    }
}
