//! Rendering of LaTeX formulas into SVG assets.
//!
//! The translation engine only needs a path to embed. Everything that
//! actually draws a formula lives behind the [`Renderer`] trait:
//!
//! - [`LatexSvgRenderer`](latex::LatexSvgRenderer) drives `latex` and
//!   `dvisvgm` on a standalone document.
//! - [`AssetWriter`](assets::AssetWriter) names the output files
//!   (`assets/formula-<id>.svg`) using an [`AssetIds`](ids::AssetIds)
//!   allocator shared by the whole run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub mod assets;
pub mod error;
pub mod ids;
pub mod latex;
pub mod svg;

pub use assets::AssetWriter;
pub use error::RenderError;
pub use ids::{AssetIds, SequentialIds, SharedIds};
pub use latex::LatexSvgRenderer;

/// A formula written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFormula {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
    pub path: PathBuf,
}

/// Turns LaTeX math into an image file.
pub trait Renderer {
    /// Renders `latex` (the content of a math span, without delimiters) to `dest`.
    fn render(&self, latex: &str, dest: &Path) -> Result<RenderedFormula, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, latex: &str, dest: &Path) -> Result<RenderedFormula, RenderError> {
        (**self).render(latex, dest)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&self, latex: &str, dest: &Path) -> Result<RenderedFormula, RenderError> {
        (**self).render(latex, dest)
    }
}

/// An HTML-style `#RRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    /// The colour as `xcolor` expects it for the `HTML` model (`RRGGBB`).
    pub fn to_xcolor_html(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RenderError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_xcolor_html())
    }
}

/// Options passed through to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfig {
    /// Fill colour behind the formula; transparent when unset.
    pub background: Option<HexColor>,
    /// Inset around the formula, in points.
    pub margin: u32,
}
