//! Finding the documents to convert.

use log::warn;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Suffix of the files picked up by a directory walk.
pub const SOURCE_SUFFIX: &str = ".tex.md";

/// Directories never descended into.
const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

/// Returns the `*.tex.md` files below `root`.
///
/// The walk is depth-first; inside a directory, files come before
/// subdirectories and both are visited in name order.
pub fn find_sources(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_source(e.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

pub fn is_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SOURCE_SUFFIX))
}

/// Output path of `source`: `.tex.` is dropped from the file name
/// (`notes.tex.md` becomes `notes.md`).
///
/// A name without `.tex.` maps to itself, which means converting in place.
pub fn destination_path(source: &Path) -> PathBuf {
    match source.file_name().and_then(|n| n.to_str()) {
        Some(name) => source.with_file_name(name.replace(".tex.", ".")),
        None => source.to_path_buf(),
    }
}

/// Directory containing `path`, `.` for a bare file name.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
