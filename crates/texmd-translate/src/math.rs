//! Extraction of `$$ ... $$` math spans.

use std::fmt::Display;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

// A single `$` is allowed inside a span as long as it is not followed by another one.
static MATH_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$(?P<latex>(?:[^$]|\$[^$])*)\$\$").unwrap());

/// A delimited formula found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathSpan<'a> {
    /// The LaTeX source between the delimiters.
    pub latex: &'a str,
    /// Byte offset of the opening `$$`.
    pub start: usize,
    /// Byte offset just past the closing `$$`.
    pub end: usize,
}

/// Finds the non-overlapping math spans of `line`, left to right.
pub fn find_spans(line: &str) -> Vec<MathSpan<'_>> {
    MATH_SPAN
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(MathSpan {
                latex: caps.name("latex")?.as_str(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Inline image reference for a rendered formula.
///
/// `align="top"` keeps symbols vaguely aligned in the middle of the text.
pub fn image_tag(asset: &str) -> String {
    format!("<img src=\"{}\" align=\"top\"/>", asset)
}

/// Replaces every math span of `line` with an image of the rendered formula.
///
/// `render` is called once per span, in order, and returns the asset path to
/// embed. A span whose rendering fails is dropped from the output.
pub fn extract<F, E>(line: &str, mut render: F) -> String
where
    F: FnMut(&str) -> Result<String, E>,
    E: Display,
{
    let mut translated = String::with_capacity(line.len());
    let mut pos = 0;

    for span in find_spans(line) {
        translated.push_str(&line[pos..span.start]);
        match render(span.latex) {
            Ok(asset) => translated.push_str(&image_tag(&asset)),
            Err(e) => warn!("Dropping formula `{}`: {}", span.latex, e),
        }
        pos = span.end;
    }

    translated.push_str(&line[pos..]);
    translated
}
