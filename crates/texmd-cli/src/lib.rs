//! Batch conversion of `*.tex.md` documents.
//!
//! [`discover`] finds the documents, [`process`] converts each of them with
//! `texmd-translate` and writes the formulas through a `texmd-render`
//! [`Renderer`](texmd_render::Renderer).

pub mod discover;
pub mod process;

pub use process::{Conversion, Converter, ProcessError, Summary};
