//! Reading back the size of a generated SVG.

use once_cell::sync::Lazy;
use regex::Regex;

static SVG_ROOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<svg\b[^>]*>").unwrap());
static LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\s(width|height)\s*=\s*['"]([0-9]*\.?[0-9]+)\s*(pt|px)?['"]"#).unwrap()
});

/// Returns `(width, height)` of the root `<svg>` element, in the units it
/// declares (dvisvgm writes points).
pub fn dimensions(svg: &str) -> Option<(f64, f64)> {
    let root = SVG_ROOT.find(svg)?.as_str();
    let mut width = None;
    let mut height = None;

    for caps in LENGTH.captures_iter(root) {
        let value: f64 = caps[2].parse().ok()?;
        match &caps[1] {
            "width" => width = Some(value),
            _ => height = Some(value),
        }
    }

    Some((width?, height?))
}
