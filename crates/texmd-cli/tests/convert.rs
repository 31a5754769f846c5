use std::fs;
use std::path::Path;

use texmd_cli::discover::find_sources;
use texmd_cli::{Converter, ProcessError};
use texmd_render::{RenderError, RenderedFormula, Renderer, SequentialIds};
use texmd_translate::{TocMode, TranslateError};

/// Writes a tiny SVG for every formula; `\fail` cannot be rendered.
struct StubRenderer;

impl Renderer for StubRenderer {
    fn render(&self, latex: &str, dest: &Path) -> Result<RenderedFormula, RenderError> {
        if latex.contains("\\fail") {
            return Err(RenderError::Tool {
                program: "stub".to_string(),
                message: "! Undefined control sequence.".to_string(),
            });
        }
        fs::create_dir_all(dest.parent().unwrap())?;
        fs::write(dest, format!("<svg width='1pt' height='1pt'><!-- {} --></svg>", latex))?;
        Ok(RenderedFormula {
            width: 1.0,
            height: 1.0,
            path: dest.to_path_buf(),
        })
    }
}

fn converter(mode: TocMode) -> Converter<StubRenderer, SequentialIds> {
    Converter::new(mode, StubRenderer, SequentialIds::new())
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_convert_writes_sibling_and_assets() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("circle.tex.md");
    write(&source, "# Circle\n[TOC]\n## Equation\n$$x^2+y^2=1$$\n");

    let conversion = converter(TocMode::Linear).convert_file(&source)?;

    assert!(!conversion.in_place);
    assert_eq!(conversion.formulas, 1);
    assert_eq!(conversion.destination, dir.path().join("circle.md"));
    assert_eq!(
        fs::read_to_string(&conversion.destination)?,
        "# Circle\n\
         # Table of content\n\
         \n\
         [1 Equation](#1-equation)  \n\
         \n\
         ## 1 Equation\n\
         <img src=\"assets/formula-1.svg\" align=\"top\"/>\n"
    );
    assert!(dir.path().join("assets/formula-1.svg").exists());
    // The source is left alone.
    assert!(fs::read_to_string(&source)?.contains("$$x^2+y^2=1$$"));
    Ok(())
}

#[test]
fn test_convert_in_place() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("notes.md");
    write(&source, "# Notes\n## First\n## Second\n");

    let conversion = converter(TocMode::None).convert_file(&source)?;

    assert!(conversion.in_place);
    assert_eq!(
        fs::read_to_string(&source)?,
        "# Notes\n## 1 First\n## 2 Second\n"
    );
    let leftovers: Vec<_> = fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("notes.md")]);
    Ok(())
}

#[test]
fn test_failed_in_place_conversion_keeps_source() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("broken.md");
    let original = "# Broken\n# Top\n### Skipped a level\n";
    write(&source, original);

    let err = converter(TocMode::Linear).convert_file(&source).unwrap_err();

    assert!(matches!(
        err,
        ProcessError::Translate(TranslateError::InvalidHeadingDepth { line: 3, .. })
    ));
    assert_eq!(fs::read_to_string(&source)?, original);
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_missing_source_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = converter(TocMode::None)
        .convert_file(&dir.path().join("absent.tex.md"))
        .unwrap_err();
    assert!(matches!(err, ProcessError::Read { .. }));
}

#[test]
fn test_unrenderable_formula_is_dropped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = dir.path().join("mixed.tex.md");
    write(&source, "# Mixed\nA $$\\fail$$ B $$y$$ C\n");

    let conversion = converter(TocMode::None).convert_file(&source)?;

    assert_eq!(conversion.formulas, 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("mixed.md"))?,
        "# Mixed\nA  B <img src=\"assets/formula-2.svg\" align=\"top\"/> C\n"
    );
    Ok(())
}

#[test]
fn test_discovery_order_and_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for name in [
        "b.tex.md",
        "a.tex.md",
        "plain.md",
        "sub/c.tex.md",
        "sub/deeper/d.tex.md",
        "aaa/e.tex.md",
        ".git/f.tex.md",
        "node_modules/pkg/g.tex.md",
    ] {
        write(&root.join(name), "# T\n");
    }

    let found: Vec<_> = find_sources(root)
        .into_iter()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect();

    let expected: Vec<_> = [
        "a.tex.md",
        "b.tex.md",
        "aaa/e.tex.md",
        "sub/c.tex.md",
        "sub/deeper/d.tex.md",
    ]
    .iter()
    .map(|p| Path::new(p).to_path_buf())
    .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_tree_run_continues_after_failures() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("1-ok.tex.md"), "# One\n$$a$$\n");
    write(&root.join("2-bad.tex.md"), "# Two\n# A\n### B\n");
    write(&root.join("nested/3-ok.tex.md"), "# Three\n$$b$$ and $$c$$\n");

    let summary = converter(TocMode::None).convert_tree(root);

    assert_eq!(summary.converted.len(), 2);
    assert_eq!(summary.failed, vec![root.join("2-bad.tex.md")]);
    assert!(!root.join("2-bad.md").exists());

    // Asset ids keep counting across documents.
    let nested = fs::read_to_string(root.join("nested/3-ok.md")).unwrap();
    assert_eq!(
        nested,
        "# Three\n<img src=\"assets/formula-2.svg\" align=\"top\"/> and <img src=\"assets/formula-3.svg\" align=\"top\"/>\n"
    );
    assert!(root.join("nested/assets/formula-3.svg").exists());
}
