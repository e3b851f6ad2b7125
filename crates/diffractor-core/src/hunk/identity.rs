//! Content-addressed hunk identity and the cross-file index.

use crate::hunk::model::Hunk;
use crate::snapshot::FilePath;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// SHA-256 digest of a hunk's rendered lines.
///
/// Each rendered line is hashed followed by `\n`, so the digest covers the
/// tags and content but never the line ranges.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HunkIdentity([u8; 32]);

impl HunkIdentity {
    pub fn of(hunk: &Hunk) -> Self {
        let mut hasher = Sha256::new();
        for line in &hunk.lines {
            hasher.update(line.render().as_bytes());
            hasher.update(b"\n");
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// 64-character lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex characters, for display
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }

    /// Parse the 64-character hex form.
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for HunkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for HunkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HunkIdentity({})", self.short())
    }
}

impl Serialize for HunkIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HunkIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HunkIdentity::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hunk identity '{}'", s)))
    }
}

/// One distinct hunk and every file it was observed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkRecord {
    identity: HunkIdentity,
    hunk: Hunk,
    file_paths: Vec<FilePath>,
}

impl HunkRecord {
    fn new(identity: HunkIdentity, hunk: Hunk, first_path: FilePath) -> Self {
        Self {
            identity,
            hunk,
            file_paths: vec![first_path],
        }
    }

    pub fn identity(&self) -> HunkIdentity {
        self.identity
    }

    /// Representative hunk (the first one observed)
    pub fn hunk(&self) -> &Hunk {
        &self.hunk
    }

    /// Paths in observation order; never empty, may repeat.
    pub fn file_paths(&self) -> &[FilePath] {
        &self.file_paths
    }

    pub fn first_file_path(&self) -> &FilePath {
        &self.file_paths[0]
    }
}

/// Accumulates hunks into records keyed by identity.
///
/// Records keep first-observed order. Feed files in lexicographic path
/// order for deterministic output.
#[derive(Debug, Default)]
pub struct HunkIndex {
    records: Vec<HunkRecord>,
    by_identity: HashMap<HunkIdentity, usize>,
}

impl HunkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hunk observed in `path`.
    pub fn insert(&mut self, path: &FilePath, hunk: Hunk) {
        let identity = HunkIdentity::of(&hunk);
        match self.by_identity.get(&identity) {
            Some(&position) => self.records[position].file_paths.push(path.clone()),
            None => {
                self.by_identity.insert(identity, self.records.len());
                self.records
                    .push(HunkRecord::new(identity, hunk, path.clone()));
            }
        }
    }

    /// Record all hunks of one file, in order.
    pub fn insert_file(&mut self, path: &FilePath, hunks: Vec<Hunk>) {
        for hunk in hunks {
            self.insert(path, hunk);
        }
    }

    /// Number of distinct identities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<HunkRecord> {
        self.records
    }
}

/// Index every file's hunks in path order.
pub fn index_hunks(hunks_by_path: BTreeMap<FilePath, Vec<Hunk>>) -> Vec<HunkRecord> {
    let files = hunks_by_path.len();
    let mut index = HunkIndex::new();
    for (path, hunks) in hunks_by_path {
        index.insert_file(&path, hunks);
    }
    tracing::debug!(
        files,
        records = index.len(),
        "indexed hunks"
    );
    index.into_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunk::model::{HunkLine, LineTag};

    fn hunk(old_start: usize, lines: &[(LineTag, &str)]) -> Hunk {
        Hunk {
            old_start,
            old_lines: 1,
            new_start: old_start,
            new_lines: 1,
            lines: lines.iter().map(|(t, c)| HunkLine::new(*t, *c)).collect(),
        }
    }

    fn path(p: &str) -> FilePath {
        FilePath::new(p).unwrap()
    }

    #[test]
    fn test_identity_ignores_ranges() {
        let a = hunk(1, &[(LineTag::Removed, "x"), (LineTag::Added, "y")]);
        let b = hunk(40, &[(LineTag::Removed, "x"), (LineTag::Added, "y")]);
        assert_eq!(HunkIdentity::of(&a), HunkIdentity::of(&b));
    }

    #[test]
    fn test_identity_depends_on_tags() {
        let a = hunk(1, &[(LineTag::Context, "x")]);
        let b = hunk(1, &[(LineTag::Added, "x")]);
        assert_ne!(HunkIdentity::of(&a), HunkIdentity::of(&b));
    }

    #[test]
    fn test_identity_hex_round_trip() {
        let id = HunkIdentity::of(&hunk(1, &[(LineTag::Added, "z")]));
        let hex = id.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(HunkIdentity::from_hex(&hex), Some(id));
        assert_eq!(HunkIdentity::from_hex("zz"), None);
    }

    #[test]
    fn test_repeats_append_without_dedup() {
        let h = hunk(1, &[(LineTag::Added, "same")]);
        let mut index = HunkIndex::new();
        index.insert_file(&path("a.html"), vec![h.clone(), h.clone()]);
        index.insert(&path("b.html"), h);

        let records = index.into_records();
        assert_eq!(records.len(), 1);
        let paths: Vec<&str> = records[0].file_paths().iter().map(|p| p.as_str()).collect();
        assert_eq!(paths, vec!["a.html", "a.html", "b.html"]);
    }

    #[test]
    fn test_records_keep_first_observed_order() {
        let mut by_path = BTreeMap::new();
        by_path.insert(path("b.html"), vec![hunk(1, &[(LineTag::Added, "first-in-b")])]);
        by_path.insert(path("a.html"), vec![hunk(1, &[(LineTag::Added, "first-in-a")])]);

        let records = index_hunks(by_path);
        assert_eq!(records[0].first_file_path().as_str(), "a.html");
        assert_eq!(records[1].first_file_path().as_str(), "b.html");
    }
}
