//! Table of contents generation.

use log::debug;

use crate::error::{Result, TranslateError};
use crate::heading::Heading;
use crate::numbering::ChapterNumberer;

/// First line of a generated table of contents. Also used to find (and
/// replace) a table generated by a previous run.
pub const TOC_HEADER: &str = "# Table of content";

/// Markdown hard line break.
const HARD_BREAK: &str = "  \n";

/// One indentation unit of a tabulated table of contents.
const INDENT: &str = "&nbsp;&nbsp;&nbsp;&nbsp;";

/// Which table of contents to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TocMode {
    /// Headings are numbered, no table is generated.
    #[default]
    None,
    /// A flat list with blank lines between top-level sections.
    Linear,
    /// A list indented by nesting level.
    Tabulated,
}

/// Numbers `headings` in order and flags section breaks.
///
/// Levels are relative to the shallowest heading of the sequence, so a
/// document whose chapters start at `##` (under a `#` title) is numbered
/// from `1` just like one whose chapters start at `#`.
pub fn number_headings(headings: &mut [Heading]) -> Result<()> {
    let base = headings.iter().map(|h| h.depth).min().unwrap_or(1) - 1;
    let mut numberer = ChapterNumberer::new();

    for heading in headings.iter_mut() {
        let step = numberer
            .advance(heading.depth - base)
            .map_err(|source| TranslateError::InvalidHeadingDepth {
                line: heading.source_line,
                title: heading.raw_title.clone(),
                source,
            })?;

        heading.level = step.current_depth;
        heading.is_new_section = (step.previous_depth > 2 && step.current_depth == 2)
            || (step.previous_depth > 1 && step.current_depth == 1);
        heading.numbered_title = Some(heading.number_title(&step.number));
    }

    Ok(())
}

/// Numbers `headings` and renders the table of contents for `mode`.
///
/// Returns an empty string for [`TocMode::None`] or when there is nothing
/// to list; the headings are numbered either way.
pub fn build(headings: &mut [Heading], mode: TocMode) -> Result<String> {
    number_headings(headings)?;
    Ok(render(headings, mode))
}

/// Renders already numbered headings.
pub fn render(headings: &[Heading], mode: TocMode) -> String {
    if headings.is_empty() || mode == TocMode::None {
        return String::new();
    }

    let mut toc = String::new();
    toc.push_str(TOC_HEADER);
    toc.push_str("\n\n");

    for (idx, heading) in headings.iter().enumerate() {
        debug!("{}", heading.display_title());
        match mode {
            TocMode::Tabulated => {
                for _ in 1..heading.level {
                    toc.push_str(INDENT);
                }
            }
            TocMode::Linear if idx > 0 && heading.is_new_section => {
                toc.push_str(HARD_BREAK);
                toc.push_str(HARD_BREAK);
            }
            _ => {}
        }
        toc.push_str(&format!("[{}](#{})", heading.display_title(), heading.anchor()));
        toc.push_str(HARD_BREAK);
    }

    toc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(lines: &[&str]) -> Vec<Heading> {
        lines
            .iter()
            .enumerate()
            .map(|(i, l)| Heading::parse(i + 2, l).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_or_disabled() {
        assert_eq!(build(&mut [], TocMode::Linear).unwrap(), "");

        let mut hs = headings(&["# A", "## B"]);
        assert_eq!(build(&mut hs, TocMode::None).unwrap(), "");
        // Numbering still happens.
        assert_eq!(hs[1].numbered_title.as_deref(), Some("1.1 B"));
    }

    #[test]
    fn test_linear_with_section_break() {
        let mut hs = headings(&["## A", "### A.1", "## B"]);
        let toc = build(&mut hs, TocMode::Linear).unwrap();
        assert_eq!(
            toc,
            "# Table of content\n\n\
             [1 A](#1-a)  \n\
             [1.1 A.1](#11-a1)  \n  \n  \n\
             [2 B](#2-b)  \n"
        );
        assert!(hs[2].is_new_section);
        assert!(!hs[1].is_new_section);
    }

    #[test]
    fn test_tabulated_indents_without_breaks() {
        let mut hs = headings(&["# A", "## A.1", "### A.1.1", "# B"]);
        let toc = build(&mut hs, TocMode::Tabulated).unwrap();
        let expected = [
            "# Table of content",
            "",
            "[1 A](#1-a)  ",
            "&nbsp;&nbsp;&nbsp;&nbsp;[1.1 A.1](#11-a1)  ",
            "&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;[1.1.1 A.1.1](#111-a11)  ",
            "[2 B](#2-b)  ",
        ];
        assert_eq!(toc.lines().collect::<Vec<_>>(), expected);
        assert!(hs[3].is_new_section);
    }

    #[test]
    fn test_second_level_section_break() {
        let mut hs = headings(&["# A", "## B", "### C", "## D", "### E", "### F"]);
        number_headings(&mut hs).unwrap();
        let flags: Vec<bool> = hs.iter().map(|h| h.is_new_section).collect();
        assert_eq!(flags, vec![false, false, false, true, false, false]);
    }

    #[test]
    fn test_depth_skip_reports_heading() {
        let mut hs = headings(&["# A", "### Too deep"]);
        let err = build(&mut hs, TocMode::Linear).unwrap_err();
        match err {
            TranslateError::InvalidHeadingDepth { line, title, .. } => {
                assert_eq!(line, 3);
                assert_eq!(title, "Too deep");
            }
            other => panic!("Expected InvalidHeadingDepth, got {:?}", other),
        }
    }
}
