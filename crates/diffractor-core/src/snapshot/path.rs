//! Root-relative file paths and snapshot listings.

use crate::errors::{DiffractorError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// A normalized, snapshot-root-stripped relative path.
///
/// Always `/`-separated with no leading `./` or `/` and no empty segments.
/// Ordering is plain byte-lexicographic, which is the processing order used
/// everywhere output order matters. Deserialization goes through
/// [`FilePath::new`], so decoded paths are normalized too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilePath(String);

impl FilePath {
    /// Normalize an already-relative path.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if nothing remains after normalization.
    pub fn new(relative: &str) -> Result<Self> {
        let segments = segments(relative);
        if segments.is_empty() {
            return Err(DiffractorError::InvalidInput {
                reason: format!("path '{}' is empty after normalization", relative),
            });
        }
        Ok(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FilePath {
    type Error = DiffractorError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(&raw)
    }
}

impl From<FilePath> for String {
    fn from(path: FilePath) -> Self {
        path.0
    }
}

impl AsRef<str> for FilePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FilePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Split a raw path into meaningful segments, accepting both separators.
fn segments(raw: &str) -> Vec<&str> {
    raw.split(&['/', '\\'][..])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Raw lister output for one snapshot root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotListing {
    root: String,
    raw_paths: Vec<String>,
}

impl SnapshotListing {
    pub fn new(root: impl Into<String>, raw_paths: Vec<String>) -> Self {
        Self {
            root: root.into(),
            raw_paths,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn raw_paths(&self) -> &[String] {
        &self.raw_paths
    }

    /// Strip this listing's root from a raw path.
    ///
    /// A raw path that does not lie under the root is taken as already
    /// relative.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the raw path is the root itself or empty.
    pub fn strip_root(&self, raw: &str) -> Result<FilePath> {
        let root = segments(&self.root);
        let raw_segments = segments(raw);
        let relative = if !root.is_empty() && raw_segments.starts_with(&root) {
            &raw_segments[root.len()..]
        } else {
            &raw_segments[..]
        };
        if relative.is_empty() {
            return Err(DiffractorError::InvalidInput {
                reason: format!(
                    "path '{}' has no file component below root '{}'",
                    raw, self.root
                ),
            });
        }
        Ok(FilePath(relative.join("/")))
    }

    /// Normalize every raw path into the shared relative key space.
    ///
    /// The same raw path listed twice is collapsed; two different raw paths
    /// landing on one key are rejected.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a path with no file component
    /// - `DuplicatePath` for a normalization collision, carrying both raw paths
    pub fn normalize(&self) -> Result<NormalizedListing> {
        let mut entries: BTreeMap<FilePath, String> = BTreeMap::new();
        for raw in &self.raw_paths {
            let path = self.strip_root(raw)?;
            if let Some(existing) = entries.get(&path) {
                if existing != raw {
                    return Err(DiffractorError::DuplicatePath {
                        normalized: path.to_string(),
                        first_raw: existing.clone(),
                        second_raw: raw.clone(),
                    });
                }
                continue;
            }
            entries.insert(path, raw.clone());
        }
        Ok(NormalizedListing {
            root: self.root.clone(),
            entries,
        })
    }
}

/// A snapshot listing keyed by [`FilePath`], remembering each raw path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedListing {
    root: String,
    entries: BTreeMap<FilePath, String>,
}

impl NormalizedListing {
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn contains(&self, path: &FilePath) -> bool {
        self.entries.contains_key(path)
    }

    /// Raw path the collaborator reported for `path`
    pub fn raw_path(&self, path: &FilePath) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Paths in lexicographic order
    pub fn paths(&self) -> impl Iterator<Item = &FilePath> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
