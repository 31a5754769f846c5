//! Converting documents on disk.

use log::{error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use texmd_render::{AssetIds, AssetWriter, Renderer};
use texmd_translate::{DocumentTranslator, TocMode, TranslateError};

use crate::discover::{destination_path, find_sources, parent_dir};

/// Errors that abort the conversion of one document.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A successfully converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// The source was overwritten.
    pub in_place: bool,
    /// Formulas rendered to assets.
    pub formulas: usize,
}

/// Outcome of a directory run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub converted: Vec<Conversion>,
    pub failed: Vec<PathBuf>,
}

/// Converts documents one after the other, sharing one asset id sequence.
pub struct Converter<R, I> {
    translator: DocumentTranslator,
    renderer: R,
    ids: I,
}

impl<R: Renderer, I: AssetIds> Converter<R, I> {
    pub fn new(mode: TocMode, renderer: R, ids: I) -> Self {
        Self {
            translator: DocumentTranslator::new(mode),
            renderer,
            ids,
        }
    }

    /// Converts `source` next to itself.
    ///
    /// The output is fully computed before anything is written, then written
    /// to a temporary sibling and renamed over the destination, so a failure
    /// never leaves a truncated destination (or a missing source when
    /// converting in place).
    pub fn convert_file(&mut self, source: &Path) -> Result<Conversion, ProcessError> {
        let destination = destination_path(source);
        let in_place = destination == source;
        if in_place {
            info!("Update {}", destination.display());
        } else {
            info!("Generate {}", destination.display());
        }

        let text = fs::read_to_string(source).map_err(|e| ProcessError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut assets = AssetWriter::new(&self.renderer, &mut self.ids, parent_dir(source));
        let output = self
            .translator
            .translate(&text, |latex: &str| assets.render(latex))?;
        let formulas = assets.rendered().len();

        write_atomically(&destination, &output).map_err(|e| ProcessError::Write {
            path: destination.clone(),
            source: e,
        })?;

        Ok(Conversion {
            source: source.to_path_buf(),
            destination,
            in_place,
            formulas,
        })
    }

    /// Converts every `*.tex.md` file below `root`.
    ///
    /// A document that fails is logged and skipped; the walk goes on.
    pub fn convert_tree(&mut self, root: &Path) -> Summary {
        let mut summary = Summary::default();
        for source in find_sources(root) {
            match self.convert_file(&source) {
                Ok(conversion) => summary.converted.push(conversion),
                Err(e) => {
                    error!("Failed to convert {}: {}", source.display(), e);
                    summary.failed.push(source);
                }
            }
        }
        summary
    }
}

fn write_atomically(destination: &Path, content: &str) -> std::io::Result<()> {
    let prefix = destination
        .file_name()
        .map(|n| format!("{}.", n.to_string_lossy()))
        .unwrap_or_default();
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp.md")
        .tempfile_in(parent_dir(destination))?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(destination).map_err(|e| e.error)?;
    Ok(())
}
