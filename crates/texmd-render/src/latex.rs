use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::RenderError;
use crate::svg;
use crate::{RenderConfig, RenderedFormula, Renderer};

/// Scale applied by dvisvgm; formulas come out at 20pt instead of 10pt.
const ZOOM: &str = "2";

/// Renders formulas with a TeX installation: `latex` produces a DVI file of
/// a `standalone` document, `dvisvgm` converts it to SVG.
#[derive(Debug, Clone)]
pub struct LatexSvgRenderer {
    latex: PathBuf,
    dvisvgm: PathBuf,
    config: RenderConfig,
}

impl LatexSvgRenderer {
    /// Uses `latex` and `dvisvgm` from `PATH`, unchecked.
    pub fn new(config: RenderConfig) -> Self {
        Self {
            latex: PathBuf::from("latex"),
            dvisvgm: PathBuf::from("dvisvgm"),
            config,
        }
    }

    /// Resolves both programs with `which`, failing if either is missing.
    pub fn locate(latex: &str, dvisvgm: &str, config: RenderConfig) -> Result<Self, RenderError> {
        let find = |program: &str| {
            which::which(program).map_err(|source| RenderError::MissingTool {
                program: program.to_string(),
                source,
            })
        };
        let latex = find(latex)?;
        let dvisvgm = find(dvisvgm)?;
        debug!("Using {:?} and {:?}", latex, dvisvgm);
        Ok(Self {
            latex,
            dvisvgm,
            config,
        })
    }

    /// The TeX source compiled for a formula.
    pub fn standalone_document(&self, latex: &str) -> String {
        let mut doc = format!(
            "\\documentclass[border={}pt]{{standalone}}\n\
             \\usepackage{{amsmath}}\n\
             \\usepackage{{amssymb}}\n\
             \\usepackage{{xcolor}}\n\
             \\begin{{document}}\n",
            self.config.margin
        );
        if let Some(background) = self.config.background {
            doc.push_str(&format!("\\pagecolor[HTML]{{{}}}\n", background.to_xcolor_html()));
        }
        doc.push_str(&format!("$\\displaystyle {}$\n", latex));
        doc.push_str("\\end{document}\n");
        doc
    }

    fn run(&self, program: &Path, args: &[&OsStr], dir: &Path) -> Result<(), RenderError> {
        let name = program.display().to_string();
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| RenderError::Spawn {
                program: name.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = tex_error_summary(&stdout)
            .or_else(|| stderr.lines().find(|l| !l.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| format!("exit status {}", output.status));
        Err(RenderError::Tool {
            program: name,
            message,
        })
    }
}

impl Renderer for LatexSvgRenderer {
    fn render(&self, latex: &str, dest: &Path) -> Result<RenderedFormula, RenderError> {
        let work = tempfile::tempdir()?;
        fs::write(work.path().join("formula.tex"), self.standalone_document(latex))?;

        self.run(
            &self.latex,
            &[
                OsStr::new("-interaction=nonstopmode"),
                OsStr::new("-halt-on-error"),
                OsStr::new("formula.tex"),
            ],
            work.path(),
        )?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let dest = std::path::absolute(dest)?;
        let zoom = format!("--zoom={}", ZOOM);
        self.run(
            &self.dvisvgm,
            &[
                OsStr::new("--no-fonts"),
                OsStr::new("--exact-bbox"),
                OsStr::new(&zoom),
                OsStr::new("-o"),
                dest.as_os_str(),
                OsStr::new("formula.dvi"),
            ],
            work.path(),
        )?;

        let content = fs::read_to_string(&dest)?;
        let (width, height) = svg::dimensions(&content).ok_or_else(|| RenderError::Svg {
            path: dest.clone(),
            reason: "no width/height on the root element".to_string(),
        })?;

        Ok(RenderedFormula {
            width,
            height,
            path: dest,
        })
    }
}

/// Pulls the first TeX error (`! ...`) and its `l.<n>` context out of
/// engine output.
pub fn tex_error_summary(output: &str) -> Option<String> {
    let mut lines = output.lines().skip_while(|l| !l.starts_with('!'));
    let message = lines.next()?.trim_start_matches('!').trim().to_string();
    match lines.find(|l| l.starts_with("l.")) {
        Some(context) => Some(format!("{} ({})", message, context.trim())),
        None => Some(message),
    }
}
