//! Error types for document translation.

use crate::numbering::DepthSkip;

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors that abort the translation of a single document.
///
/// Render failures are not part of this enum: a formula that cannot be
/// rendered is dropped from the output and the document carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// A heading skipped one or more nesting levels (e.g. `#` then `###`).
    #[error("chapter depth is wrong for \"{title}\" at line {line}")]
    InvalidHeadingDepth {
        /// 1-based line of the offending heading
        line: usize,
        /// Heading title as written in the source
        title: String,
        #[source]
        source: DepthSkip,
    },

    /// The rewrite pass met a different heading sequence than the collection pass.
    #[error("heading pass mismatch: {collected} collected, {rewritten} rewritten (line {line})")]
    PassConsistency {
        /// Line where the mismatch was detected
        line: usize,
        /// Headings collected by the first pass
        collected: usize,
        /// Headings seen by the second pass so far
        rewritten: usize,
    },
}
