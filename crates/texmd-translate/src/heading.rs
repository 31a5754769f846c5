use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::slug::slug;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#+)\s+(.+)$").unwrap());
static CHAPTER_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)*)\s+(.+)$").unwrap());

/// Returns true if `line` is a markdown ATX heading (`#`, `##`, ...).
pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

/// A chapter heading collected from a document.
///
/// `numbered_title`, `level` and `is_new_section` are filled in once by
/// [`toc::number_headings`](crate::toc::number_headings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 1-based line of the heading in the source document.
    pub source_line: usize,
    /// Length of the `#` run.
    pub depth: usize,
    /// The `#` run, kept verbatim for the rewrite.
    pub marker: String,
    /// Title text after the marker.
    pub raw_title: String,
    /// Nesting level relative to the shallowest heading of the document (1-based).
    pub level: usize,
    /// `"<number> <title>"` once numbered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbered_title: Option<String>,
    /// Set when this heading returns to a top-level grouping after nested content.
    pub is_new_section: bool,
}

impl Heading {
    /// Parses a heading line, returning `None` for anything else.
    pub fn parse(source_line: usize, line: &str) -> Option<Self> {
        let caps = HEADING.captures(line)?;
        let marker = caps.get(1)?.as_str();
        let title = caps.get(2)?.as_str();
        Some(Self {
            source_line,
            depth: marker.len(),
            marker: marker.to_string(),
            raw_title: title.to_string(),
            level: 0,
            numbered_title: None,
            is_new_section: false,
        })
    }

    /// Title with `number` applied.
    ///
    /// A title that already starts with a chapter number of the same shape
    /// (as many dotted parts as `number`) is taken to be the output of a
    /// previous run and renumbered in place. A heading like `## 2024 Plans`
    /// at the first level therefore loses its leading `2024`.
    pub fn number_title(&self, number: &str) -> String {
        let parts = number.split('.').count();
        let title = CHAPTER_NUMBER
            .captures(&self.raw_title)
            .filter(|caps| caps[1].split('.').count() == parts)
            .and_then(|caps| caps.get(2))
            .map_or(self.raw_title.as_str(), |m| m.as_str());
        format!("{} {}", number, title)
    }

    /// The numbered title, or the raw title when numbering has not run.
    pub fn display_title(&self) -> &str {
        self.numbered_title.as_deref().unwrap_or(&self.raw_title)
    }

    pub fn anchor(&self) -> String {
        slug(self.display_title())
    }

    /// The heading line as emitted by the rewrite pass.
    pub fn rewritten_line(&self) -> String {
        format!("{} {}", self.marker, self.display_title())
    }
}
