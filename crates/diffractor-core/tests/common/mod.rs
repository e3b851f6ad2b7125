#![allow(dead_code)]

use diffractor_core::hunk::{extract_hunks, Hunk, HunkIndex, HunkRecord};
use diffractor_core::snapshot::{FilePath, SnapshotListing};

pub fn path(p: &str) -> FilePath {
    FilePath::new(p).unwrap()
}

pub fn listing(root: &str, relative: &[&str]) -> SnapshotListing {
    SnapshotListing::new(
        root,
        relative.iter().map(|r| format!("{}/{}", root, r)).collect(),
    )
}

/// Hunks of a single-file edit with the default context
pub fn hunks(from: &str, to: &str) -> Vec<Hunk> {
    extract_hunks(from, to, 5).unwrap()
}

/// Records for `(path, from, to)` triples, indexed in the order given
pub fn records(files: &[(&str, &str, &str)]) -> Vec<HunkRecord> {
    let mut index = HunkIndex::new();
    for (p, from, to) in files {
        index.insert_file(&path(p), hunks(from, to));
    }
    index.into_records()
}

/// One distinct single-line replacement per label, each in its own file
pub fn labelled_records(labels: &[&str]) -> Vec<HunkRecord> {
    let mut index = HunkIndex::new();
    for label in labels {
        let from = "old\n".to_string();
        let to = format!("{}\n", label);
        index.insert_file(&path(&format!("{}.html", label)), hunks(&from, &to));
    }
    index.into_records()
}

/// Label of a record built by [`labelled_records`]
pub fn label_of(record: &HunkRecord) -> String {
    record
        .first_file_path()
        .as_str()
        .trim_end_matches(".html")
        .to_string()
}
