//! Path helpers for selected and dropped files

use crate::constants::{IMAGE_EXTENSIONS, OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use std::path::{Path, PathBuf};

/// Strip the delimiters a drag-and-drop transport may wrap around a path.
///
/// One pair of braces is removed first, then one pair of double quotes.
pub fn unwrap_drop_payload(raw: &str) -> &str {
    let mut path = raw;
    if let Some(inner) = strip_pair(path, '{', '}') {
        path = inner;
    }
    if let Some(inner) = strip_pair(path, '"', '"') {
        path = inner;
    }
    path
}

fn strip_pair(s: &str, open: char, close: char) -> Option<&str> {
    if s.len() >= 2 && s.starts_with(open) && s.ends_with(close) {
        Some(&s[open.len_utf8()..s.len() - close.len_utf8()])
    } else {
        None
    }
}

/// Whether the file name ends in one of the supported image extensions (any casing).
///
/// Matches on the name suffix, so a bare `.png` counts too.
pub fn has_image_extension(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(*ext).is_some_and(|rest| rest.ends_with('.')))
}

/// `<dir>/<stem>_no_bg.png` for the given input
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, OUTPUT_SUFFIX, OUTPUT_EXTENSION))
}

/// Append `.png` when a save-dialog result has no extension
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(OUTPUT_EXTENSION)
    }
}
