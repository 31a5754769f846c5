//! GitHub heading anchors.

/// Maps a heading title to the fragment GitHub generates for it.
///
/// Lowercases, keeps only `[a-z0-9- ]`, turns spaces into hyphens, folds
/// each `---` into `--` and drops trailing hyphens. Longer hyphen runs are
/// only folded three at a time, the way GitHub's anchors come out.
pub fn slug(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | ' '))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect();

    kept.replace("---", "--").trim_end_matches('-').to_string()
}
