//! Two-pass document translation.
//!
//! Pass 1 collects the chapter headings and numbers them, pass 2 rewrites
//! the document line by line: headings get their numbers, the table of
//! contents is spliced in and math spans are replaced by images.

use std::fmt::Display;

use crate::error::{Result, TranslateError};
use crate::heading::{self, Heading};
use crate::math;
use crate::toc::{self, TOC_HEADER, TocMode};

const CODE_FENCE: &str = "```";

/// Placeholder line replaced by the generated table of contents.
pub const TOC_MARKER: &str = "[TOC]";

/// What the scan state machine made of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opening or closing code fence.
    Fence,
    /// Inside a fenced code block.
    Code,
    /// First line of a previously generated table of contents.
    TocStart,
    /// Inside a previously generated table of contents.
    InToc,
    /// A `[TOC]` placeholder.
    TocMarker,
    /// First line of the document.
    Title,
    /// A chapter heading. `closes_toc` is set on the heading that ends an old table.
    Heading { closes_toc: bool },
    Text,
}

/// Scan state shared by both passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub in_code_block: bool,
    pub in_existing_toc: bool,
}

impl ScanState {
    /// Feeds the 1-based line `line_no` through the state machine.
    pub fn step(&mut self, line_no: usize, line: &str) -> LineKind {
        if self.in_existing_toc {
            if heading::is_heading(line) {
                self.in_existing_toc = false;
                return LineKind::Heading { closes_toc: true };
            }
            return LineKind::InToc;
        }

        if line.starts_with(CODE_FENCE) {
            self.in_code_block = !self.in_code_block;
            return LineKind::Fence;
        }
        if self.in_code_block {
            return LineKind::Code;
        }

        if line_no == 1 {
            return LineKind::Title;
        }
        if line.starts_with(TOC_HEADER) {
            self.in_existing_toc = true;
            return LineKind::TocStart;
        }
        if line.trim() == TOC_MARKER {
            return LineKind::TocMarker;
        }
        if heading::is_heading(line) {
            return LineKind::Heading { closes_toc: false };
        }
        LineKind::Text
    }
}

/// Result of the collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    /// Numbered chapter headings, in document order.
    pub headings: Vec<Heading>,
    /// Generated table of contents, empty for [`TocMode::None`].
    pub toc: String,
}

/// Collects the chapter headings of `source`, leaving out the title line,
/// code blocks and any previously generated table of contents.
pub fn collect_headings(source: &str) -> Vec<Heading> {
    let mut state = ScanState::default();
    split_lines(source)
        .enumerate()
        .filter_map(|(idx, (line, _))| match state.step(idx + 1, line) {
            LineKind::Heading { .. } => Heading::parse(idx + 1, line),
            _ => None,
        })
        .collect()
}

/// Translates whole documents for a given [`TocMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTranslator {
    mode: TocMode,
}

impl DocumentTranslator {
    pub fn new(mode: TocMode) -> Self {
        Self { mode }
    }

    /// Pass 1: collects and numbers the headings and builds the table of contents.
    pub fn outline(&self, source: &str) -> Result<Outline> {
        let mut headings = collect_headings(source);
        let toc = toc::build(&mut headings, self.mode)?;
        Ok(Outline { headings, toc })
    }

    /// Runs both passes over `source`.
    ///
    /// `render` turns the LaTeX of each math span into the path of an image
    /// asset; see [`math::extract`].
    pub fn translate<F, E>(&self, source: &str, render: F) -> Result<String>
    where
        F: FnMut(&str) -> std::result::Result<String, E>,
        E: Display,
    {
        let outline = self.outline(source)?;
        rewrite(source, &outline, render)
    }
}

/// Splits `source` into `(line, terminator)` pairs. The terminator is `\r\n`,
/// `\n`, or empty on a last line that has none.
fn split_lines(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.split_inclusive('\n').map(|chunk| {
        let line = chunk
            .strip_suffix("\r\n")
            .or_else(|| chunk.strip_suffix('\n'))
            .unwrap_or(chunk);
        (line, &chunk[line.len()..])
    })
}

/// Pass 2: rewrites `source` using a previously computed `outline`.
///
/// Line terminators are kept as they are in `source`; the table of contents
/// uses the terminator of the line it replaces.
pub fn rewrite<F, E>(source: &str, outline: &Outline, mut render: F) -> Result<String>
where
    F: FnMut(&str) -> std::result::Result<String, E>,
    E: Display,
{
    let mut out = String::with_capacity(source.len() + outline.toc.len());
    let mut state = ScanState::default();
    let mut pending = outline.headings.iter();
    let mut rewritten = 0;
    let mut line_count = 0;

    for (idx, (line, eol)) in split_lines(source).enumerate() {
        let line_no = idx + 1;
        line_count = line_no;
        let sep = if eol.is_empty() { "\n" } else { eol };

        match state.step(line_no, line) {
            LineKind::TocStart | LineKind::InToc => {}
            LineKind::Fence | LineKind::Code => push_line(&mut out, line, eol),
            LineKind::TocMarker => {
                splice_toc(&mut out, &outline.toc, sep, &mut render);
                push_line(&mut out, "", eol);
            }
            LineKind::Title | LineKind::Text => {
                push_line(&mut out, &math::extract(line, &mut render), eol)
            }
            LineKind::Heading { closes_toc } => {
                rewritten += 1;
                let heading = pending
                    .next()
                    .filter(|h| h.source_line == line_no)
                    .ok_or(TranslateError::PassConsistency {
                        line: line_no,
                        collected: outline.headings.len(),
                        rewritten,
                    })?;

                // Same layout as a `[TOC]` replacement so that reruns are stable.
                if closes_toc && !outline.toc.is_empty() {
                    splice_toc(&mut out, &outline.toc, sep, &mut render);
                    push_line(&mut out, "", sep);
                }
                push_line(
                    &mut out,
                    &math::extract(&heading.rewritten_line(), &mut render),
                    eol,
                );
            }
        }
    }

    if rewritten != outline.headings.len() {
        return Err(TranslateError::PassConsistency {
            line: line_count,
            collected: outline.headings.len(),
            rewritten,
        });
    }

    Ok(out)
}

/// Emits the table of contents line by line. Entry labels go through math
/// extraction like any other text, so formulas in titles are rendered there too.
fn splice_toc<F, E>(out: &mut String, toc: &str, sep: &str, render: &mut F)
where
    F: FnMut(&str) -> std::result::Result<String, E>,
    E: Display,
{
    for line in toc.lines() {
        push_line(out, &math::extract(line, &mut *render), sep);
    }
}

fn push_line(out: &mut String, line: &str, eol: &str) {
    out.push_str(line);
    out.push_str(eol);
}
