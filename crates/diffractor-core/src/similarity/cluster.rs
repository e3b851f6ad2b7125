//! Threshold graph over hunk records and its connected components.

use crate::errors::{DiffractorError, Result};
use crate::hunk::HunkRecord;
use crate::similarity::ratio::MatchTarget;
use petgraph::unionfind::UnionFind;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Default minimum score for two hunks to be linked.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

/// One connected component of the similarity graph.
///
/// Members are ordered by first file path, then by the order in which
/// their identity was first observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    members: Vec<HunkRecord>,
}

impl Cluster {
    pub fn members(&self) -> &[HunkRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Representative member
    pub fn first(&self) -> Option<&HunkRecord> {
        self.members.first()
    }

    pub fn into_members(self) -> Vec<HunkRecord> {
        self.members
    }
}

fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(DiffractorError::InvalidThreshold { value: threshold })
    }
}

/// Cluster records with the character-level sequence ratio.
///
/// Two records are linked when `ratio(text(earlier), text(later)) >=
/// threshold`; clusters are the connected components. Pair scoring runs on
/// the rayon pool and skips exact matching when a cheap upper bound already
/// falls short.
///
/// # Errors
///
/// `InvalidThreshold` if `threshold` is not finite or outside `[0, 1]`.
pub fn cluster_records(records: Vec<HunkRecord>, threshold: f64) -> Result<Vec<Cluster>> {
    validate_threshold(threshold)?;

    let (texts, targets): (Vec<Vec<char>>, Vec<MatchTarget>) = records
        .par_iter()
        .map(|r| {
            let text = r.hunk().text();
            let target = MatchTarget::new(&text);
            (text.chars().collect(), target)
        })
        .unzip();

    let edges = linked_pairs(records.len(), |i, j| {
        let (a, b) = (&texts[i], &targets[j]);
        b.real_quick_ratio(a) >= threshold
            && b.quick_ratio(a) >= threshold
            && b.ratio(a) >= threshold
    });
    Ok(components(records, &edges))
}

/// Cluster records with a caller-supplied pair score.
///
/// `scorer(earlier, later)` is called once per unordered pair.
///
/// # Errors
///
/// `InvalidThreshold` if `threshold` is not finite or outside `[0, 1]`.
pub fn cluster_records_with<F>(
    records: Vec<HunkRecord>,
    threshold: f64,
    scorer: F,
) -> Result<Vec<Cluster>>
where
    F: Fn(&HunkRecord, &HunkRecord) -> f64 + Sync,
{
    validate_threshold(threshold)?;
    let edges = linked_pairs(records.len(), |i, j| {
        scorer(&records[i], &records[j]) >= threshold
    });
    Ok(components(records, &edges))
}

/// Every `(i, j)` with `i < j` accepted by `linked`, scored in parallel.
fn linked_pairs<F>(n: usize, linked: F) -> Vec<(usize, usize)>
where
    F: Fn(usize, usize) -> bool + Sync,
{
    let linked = &linked;
    (0..n)
        .into_par_iter()
        .flat_map_iter(|i| ((i + 1)..n).filter(move |&j| linked(i, j)).map(move |j| (i, j)))
        .collect()
}

fn components(records: Vec<HunkRecord>, edges: &[(usize, usize)]) -> Vec<Cluster> {
    let mut set = UnionFind::<usize>::new(records.len());
    for &(i, j) in edges {
        set.union(i, j);
    }

    let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, root) in set.into_labeling().into_iter().enumerate() {
        by_root.entry(root).or_default().push(i);
    }
    let mut groups: Vec<Vec<usize>> = by_root.into_values().collect();
    for group in &mut groups {
        group.sort_by(|&x, &y| {
            records[x]
                .first_file_path()
                .cmp(records[y].first_file_path())
                .then(x.cmp(&y))
        });
    }
    groups.sort_by(|a, b| {
        (Reverse(a.len()), records[a[0]].first_file_path(), a[0]).cmp(&(
            Reverse(b.len()),
            records[b[0]].first_file_path(),
            b[0],
        ))
    });

    tracing::debug!(
        records = records.len(),
        edges = edges.len(),
        clusters = groups.len(),
        "clustered records"
    );

    let mut slots: Vec<Option<HunkRecord>> = records.into_iter().map(Some).collect();
    groups
        .into_iter()
        .map(|group| Cluster {
            members: group
                .into_iter()
                .filter_map(|i| slots[i].take())
                .collect(),
        })
        .collect()
}
