//! # texmd translation engine
//!
//! Turns LaTeX-flavoured markdown (`*.tex.md`) into plain markdown that any
//! GitHub-style renderer can display.
//!
//! ## Overview
//!
//! Two things happen to a document:
//!
//! - **Chapters** are numbered. Every heading after the document title gets a
//!   dotted chapter number (`1`, `1.2`, `1.2.4`) and, depending on the
//!   [`TocMode`], a table of contents is generated whose anchors follow
//!   GitHub's slug rules (see [`slug()`](slug::slug)).
//! - **Math spans** delimited by `$$ ... $$` are handed to a renderer and
//!   replaced by an inline `<img>` reference to the produced asset.
//!
//! ## Architecture
//!
//! ```text
//!  source ──► pass 1 (collect) ──► ChapterNumberer ──► Outline { headings, toc }
//!                                                          │
//!  source ──► pass 2 (rewrite) ◄───────────────────────────┘
//!                    │
//!                    └──► math::extract (per line) ──► output
//! ```
//!
//! Both passes share the [`ScanState`](translator::ScanState) machine that
//! tracks fenced code blocks and a previously generated table of contents.
//!
//! ## Example
//!
//! ```
//! use texmd_translate::{DocumentTranslator, TocMode};
//!
//! let source = "# Notes\n## Circle\nIt is $$x^2+y^2=1$$.\n";
//! let translator = DocumentTranslator::new(TocMode::None);
//! let mut next_id = 0;
//! let output = translator
//!     .translate(source, |_latex: &str| {
//!         next_id += 1;
//!         Ok::<_, std::convert::Infallible>(format!("assets/formula-{next_id}.svg"))
//!     })
//!     .unwrap();
//!
//! assert_eq!(
//!     output,
//!     "# Notes\n## 1 Circle\nIt is <img src=\"assets/formula-1.svg\" align=\"top\"/>.\n"
//! );
//! ```

pub mod error;
pub mod heading;
pub mod math;
pub mod numbering;
pub mod slug;
pub mod toc;
pub mod translator;

pub use error::{Result, TranslateError};
pub use heading::Heading;
pub use numbering::ChapterNumberer;
pub use toc::TocMode;
pub use translator::{DocumentTranslator, Outline};
