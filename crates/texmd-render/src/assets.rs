use log::info;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::ids::AssetIds;
use crate::{RenderedFormula, Renderer};

/// Directory, next to the document, that receives the rendered formulas.
pub const ASSETS_DIR: &str = "assets";

/// File name of the asset with identifier `id`.
pub fn formula_file_name(id: u64) -> String {
    format!("formula-{}.svg", id)
}

/// Renders the formulas of one document into its `assets/` directory.
///
/// Identifiers come from `ids`, which outlives the writer so numbering
/// continues from one document to the next.
pub struct AssetWriter<'a, R: ?Sized, I: ?Sized> {
    renderer: &'a R,
    ids: &'a mut I,
    document_dir: PathBuf,
    rendered: Vec<RenderedFormula>,
}

impl<'a, R, I> AssetWriter<'a, R, I>
where
    R: Renderer + ?Sized,
    I: AssetIds + ?Sized,
{
    pub fn new(renderer: &'a R, ids: &'a mut I, document_dir: &Path) -> Self {
        Self {
            renderer,
            ids,
            document_dir: document_dir.to_path_buf(),
            rendered: Vec::new(),
        }
    }

    /// Renders `latex` to the next asset file and returns the path to embed,
    /// relative to the document (`assets/formula-<id>.svg`).
    ///
    /// An identifier is consumed even when rendering fails.
    pub fn render(&mut self, latex: &str) -> Result<String, RenderError> {
        let name = formula_file_name(self.ids.next_id());
        let dest = self.document_dir.join(ASSETS_DIR).join(&name);
        info!("Generate {}", dest.display());

        let formula = self.renderer.render(latex, &dest)?;
        self.rendered.push(formula);
        Ok(format!("{}/{}", ASSETS_DIR, name))
    }

    /// Formulas rendered so far.
    pub fn rendered(&self) -> &[RenderedFormula] {
        &self.rendered
    }
}
