//! Input discovery
//!
//! Finds layout documents on disk and loads their text. Directories are
//! searched recursively; results come back sorted so runs are reproducible.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{PalettizeError, Result};

/// Extensions searched for when none are given.
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["storyboard", "xib"];

/// Roots searched when none are given.
pub const DEFAULT_ROOTS: [&str; 2] = ["storyboard", "xib"];

/// One loaded input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    /// File name used in banners and logs.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Collect every layout document under `roots`.
///
/// A root that is a file is taken as-is when its extension matches; a
/// directory is walked recursively. Roots that do not exist are skipped.
///
/// # Errors
/// Returns [`PalettizeError::NoInputs`] if nothing was found.
pub fn discover(roots: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for root in roots {
        if root.is_file() {
            if has_extension(root, extensions) {
                found.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            debug!("skipping missing input root {}", root.display());
            continue;
        }

        let walk = WalkDir::new(root)
            .follow_links(true)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter()
            .filter_map(|e| e.ok());

        for entry in walk {
            let path = entry.path();
            if entry.file_type().is_file() && has_extension(path, extensions) {
                found.push(path.to_path_buf());
            }
        }
    }

    if found.is_empty() {
        let searched: Vec<String> = roots.iter().map(|r| r.display().to_string()).collect();
        return Err(PalettizeError::NoInputs(format!(
            "no .{} files under {}",
            extensions.join("/."),
            searched.join(", ")
        )));
    }
    Ok(found)
}

/// Read every path as UTF-8 text. Unreadable files are dropped.
pub fn load_sources(paths: &[PathBuf]) -> Vec<SourceFile> {
    paths
        .iter()
        .filter_map(|path| match fs::read_to_string(path) {
            Ok(text) => Some(SourceFile {
                path: path.clone(),
                text,
            }),
            Err(e) => {
                debug!("skipping unreadable {}: {e}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_discover_walks_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Feature");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("Main.storyboard"), "<document/>").unwrap();
        fs::write(nested.join("Cell.xib"), "<document/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let found = discover(&[dir.path().to_path_buf()], &exts()).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Cell.xib", "Main.storyboard"]);
    }

    #[test]
    fn test_discover_accepts_file_roots() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Launch.xib");
        fs::write(&file, "<document/>").unwrap();
        let found = discover(&[file.clone()], &exts()).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn test_discover_nothing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = discover(&[dir.path().to_path_buf(), missing], &exts()).unwrap_err();
        assert!(matches!(err, PalettizeError::NoInputs(_)));
    }

    #[test]
    fn test_load_sources_skips_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Main.storyboard");
        fs::write(&good, "<document/>").unwrap();
        let gone = dir.path().join("Gone.xib");

        let sources = load_sources(&[gone, good.clone()]);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, good);
        assert_eq!(sources[0].text, "<document/>");
        assert_eq!(sources[0].display_name(), "Main.storyboard");
    }
}
