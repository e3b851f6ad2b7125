//! Filesystem implementations of the collaborator traits.

use crate::collaborators::{FileLister, FileReader};
use diffractor_core::errors::DiffractorError;
use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;
use walkdir::WalkDir;

/// Walks a directory tree and keeps files whose root-relative path matches
/// a glob. `*` does not cross `/`; use `**` for any depth.
#[derive(Debug, Clone, Default)]
pub struct GlobFileLister {
    follow_links: bool,
}

impl GlobFileLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

fn list_error(root: &str, reason: impl Into<String>) -> DiffractorError {
    DiffractorError::ListError {
        root: root.to_string(),
        reason: reason.into(),
    }
}

fn build_matcher(root: &str, pattern: &str) -> Result<GlobMatcher, DiffractorError> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| list_error(root, format!("invalid glob pattern '{}': {}", pattern, e)))?;
    Ok(glob.compile_matcher())
}

impl FileLister for GlobFileLister {
    fn list(&self, root: &str, pattern: &str) -> Result<Vec<String>, DiffractorError> {
        let root_path = Path::new(root);
        if !root_path.is_dir() {
            return Err(list_error(root, "root is not an existing directory"));
        }
        let matcher = build_matcher(root, pattern)?;

        let mut paths = Vec::new();
        for entry in WalkDir::new(root_path).follow_links(self.follow_links) {
            let entry = entry.map_err(|e| list_error(root, e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(root_path).unwrap_or(path);
            let relative = relative.to_string_lossy().replace('\\', "/");
            if matcher.is_match(&relative) {
                paths.push(path.to_string_lossy().into_owned());
            }
        }

        paths.sort();
        tracing::debug!(root, pattern, files = paths.len(), "listed snapshot");
        Ok(paths)
    }
}

/// Reads files from disk, requiring valid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileReader;

impl FileReader for FsFileReader {
    fn read(&self, raw_path: &str) -> Result<String, DiffractorError> {
        let bytes = std::fs::read(raw_path).map_err(|e| DiffractorError::ReadError {
            path: raw_path.to_string(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| DiffractorError::ReadError {
            path: raw_path.to_string(),
            reason: format!("content is not valid UTF-8: {}", e.utf8_error()),
        })
    }
}
