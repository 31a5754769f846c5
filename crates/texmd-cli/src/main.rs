use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs;
use std::path::PathBuf;

use texmd_cli::Converter;
use texmd_render::{HexColor, LatexSvgRenderer, RenderConfig, SequentialIds};
use texmd_translate::{DocumentTranslator, TocMode};

#[derive(Parser)]
#[command(name = "texmd")]
#[command(version, about = "Turns LaTeX-flavoured markdown (*.tex.md) into plain markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert documents, rendering formulas to SVG
    Convert {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        toc: TocArgs,

        /// Force the background colour instead of a transparent one
        #[arg(long, value_name = "#RRGGBB")]
        background: Option<HexColor>,

        /// Inset around each formula, in points
        #[arg(long, value_name = "PT", default_value_t = 0)]
        margin: u32,

        /// LaTeX program producing DVI output
        #[arg(long, value_name = "BIN", default_value = "latex")]
        latex: String,

        /// DVI to SVG converter
        #[arg(long, value_name = "BIN", default_value = "dvisvgm")]
        dvisvgm: String,
    },
    /// Print the numbered chapters of a document as JSON
    Outline {
        /// Path to the document
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Input {
    /// Directory where the *.tex.md files are
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// A single document to convert
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct TocArgs {
    /// Generate a table of contents
    #[arg(long, conflicts_with = "tabulated_toc")]
    toc: bool,

    /// Same as --toc, with entries indented by nesting level
    #[arg(long)]
    tabulated_toc: bool,
}

impl TocArgs {
    fn mode(&self) -> TocMode {
        if self.tabulated_toc {
            TocMode::Tabulated
        } else if self.toc {
            TocMode::Linear
        } else {
            TocMode::None
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            toc,
            background,
            margin,
            latex,
            dvisvgm,
        } => {
            let config = RenderConfig { background, margin };
            let renderer = LatexSvgRenderer::locate(&latex, &dvisvgm, config)
                .context("cannot render formulas")?;
            let mut converter = Converter::new(toc.mode(), renderer, SequentialIds::new());

            if let Some(file) = input.file {
                let conversion = converter
                    .convert_file(&file)
                    .with_context(|| format!("failed to convert {}", file.display()))?;
                info!(
                    "Converted {} ({} formulas)",
                    conversion.destination.display(),
                    conversion.formulas
                );
            } else if let Some(dir) = input.dir {
                let summary = converter.convert_tree(&dir);
                info!(
                    "{} file(s) converted, {} failed",
                    summary.converted.len(),
                    summary.failed.len()
                );
                if !summary.failed.is_empty() {
                    anyhow::bail!("{} file(s) could not be converted", summary.failed.len());
                }
            }
        }
        Commands::Outline { path } => {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let outline = DocumentTranslator::new(TocMode::None).outline(&source)?;
            println!("{}", serde_json::to_string_pretty(&outline.headings)?);
        }
    }
    Ok(())
}
