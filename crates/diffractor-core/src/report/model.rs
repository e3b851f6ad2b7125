//! Read-only projection of the clustering result.
//!
//! Report types serialize for output but are only ever built by
//! [`build_report`].

use crate::hunk::{HunkIdentity, HunkRecord};
use crate::similarity::Cluster;
use crate::snapshot::FilePath;
use serde::Serialize;
use std::collections::BTreeSet;

/// One hunk record as shown to a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterMember {
    identity: HunkIdentity,
    file_paths: Vec<FilePath>,
    old_start: usize,
    old_lines: usize,
    new_start: usize,
    new_lines: usize,
    hunk_lines: Vec<String>,
}

impl ClusterMember {
    fn from_record(record: &HunkRecord) -> Self {
        let hunk = record.hunk();
        Self {
            identity: record.identity(),
            file_paths: record.file_paths().to_vec(),
            old_start: hunk.old_start,
            old_lines: hunk.old_lines,
            new_start: hunk.new_start,
            new_lines: hunk.new_lines,
            hunk_lines: hunk.rendered_lines(),
        }
    }

    pub fn identity(&self) -> HunkIdentity {
        self.identity
    }

    pub fn file_paths(&self) -> &[FilePath] {
        &self.file_paths
    }

    /// The file this change was first observed in
    pub fn root_change_path(&self) -> &FilePath {
        &self.file_paths[0]
    }

    pub fn hunk_lines(&self) -> &[String] {
        &self.hunk_lines
    }

    /// `@@ -a,b +c,d @@` header of the representative hunk
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        )
    }
}

/// One cluster of similar changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterEntry {
    cluster_index: usize,
    size: usize,
    affected_file_count: usize,
    root_file_path: FilePath,
    members: Vec<ClusterMember>,
}

impl ClusterEntry {
    pub fn cluster_index(&self) -> usize {
        self.cluster_index
    }

    /// Number of distinct hunk records
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distinct paths across all members
    pub fn affected_file_count(&self) -> usize {
        self.affected_file_count
    }

    /// Lexicographically smallest affected path
    pub fn root_file_path(&self) -> &FilePath {
        &self.root_file_path
    }

    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }
}

/// Ordered cluster entries for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterReport {
    clusters: Vec<ClusterEntry>,
}

impl ClusterReport {
    pub fn clusters(&self) -> &[ClusterEntry] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Total hunk records across clusters
    pub fn record_count(&self) -> usize {
        self.clusters.iter().map(|c| c.size).sum()
    }
}

/// Project ordered clusters into a report, preserving their order.
///
/// Empty clusters are skipped; the clusterer never produces them.
pub fn build_report(clusters: Vec<Cluster>) -> ClusterReport {
    let clusters = clusters
        .iter()
        .filter_map(|cluster| {
            let paths: BTreeSet<&FilePath> = cluster
                .members()
                .iter()
                .flat_map(|r| r.file_paths())
                .collect();
            let root = paths.iter().next().map(|p| (*p).clone())?;
            Some((root, paths.len(), cluster))
        })
        .enumerate()
        .map(|(cluster_index, (root_file_path, affected_file_count, cluster))| ClusterEntry {
            cluster_index,
            size: cluster.len(),
            affected_file_count,
            root_file_path,
            members: cluster
                .members()
                .iter()
                .map(ClusterMember::from_record)
                .collect(),
        })
        .collect();
    ClusterReport { clusters }
}
