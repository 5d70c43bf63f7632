//! Human-readable dump of a string-pool chunk.

use std::fmt::Write as _;

use crate::view::Chunk;

/// Render `chunk` section by section for debugging.
pub fn dump(chunk: &Chunk) -> String {
    let mut out = String::new();

    let header = chunk.header();
    out.push_str("[header]\n");
    writeln!(out, "encoding = {}", if chunk.is_utf8() { "utf8" } else { "utf16" }).unwrap();
    writeln!(out, "sorted = {}", chunk.is_sorted()).unwrap();
    writeln!(out, "strings = {}", header.string_count).unwrap();
    writeln!(out, "styles = {}", header.style_count).unwrap();

    out.push_str("\n[strings]\n");
    let width = width_for_count(chunk.string_count());
    for i in 0..chunk.string_count() {
        let text = match chunk.string(i) {
            Ok(text) => text.into_owned(),
            Err(_) => String::from("<invalid>"),
        };
        writeln!(out, "S{i:0width$} {text:?}").unwrap();
    }

    if chunk.style_count() > 0 {
        out.push_str("\n[styles]\n");
        for i in 0..chunk.style_count() {
            write!(out, "{i}:").unwrap();
            match chunk.spans(i) {
                Ok(spans) if spans.is_empty() => out.push_str(" -"),
                Ok(spans) => {
                    for span in spans {
                        let name = span.name as usize;
                        write!(out, " S{name:0width$} [{}..{}]", span.first_char, span.last_char)
                            .unwrap();
                    }
                }
                Err(_) => out.push_str(" <invalid>"),
            }
            out.push('\n');
        }
    }

    out
}

/// Minimum width needed to display indices up to `count - 1`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}
