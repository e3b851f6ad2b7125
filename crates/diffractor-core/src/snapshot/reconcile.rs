//! Classification of paths across two snapshots.

use crate::errors::Result;
use crate::snapshot::path::{FilePath, NormalizedListing, SnapshotListing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Path classification between a "from" and a "to" snapshot.
///
/// "Unchanged" refers to path existence only; the file content may still
/// differ and is what the hunk extractor looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Present in both snapshots
    pub unchanged: BTreeSet<FilePath>,
    /// Present only in the "to" snapshot
    pub added: BTreeSet<FilePath>,
    /// Present only in the "from" snapshot
    pub removed: BTreeSet<FilePath>,
}

/// Classify every normalized path of two listings.
pub fn reconcile(from: &NormalizedListing, to: &NormalizedListing) -> Reconciliation {
    let mut result = Reconciliation::default();

    for path in from.paths() {
        if to.contains(path) {
            result.unchanged.insert(path.clone());
        } else {
            result.removed.insert(path.clone());
        }
    }
    result.added = to
        .paths()
        .filter(|path| !from.contains(path))
        .cloned()
        .collect();

    tracing::debug!(
        unchanged = result.unchanged.len(),
        added = result.added.len(),
        removed = result.removed.len(),
        "reconciled snapshots"
    );
    result
}

/// Normalize both raw listings, then reconcile them.
///
/// The normalized listings are returned alongside so callers can map each
/// [`FilePath`] back to the raw path its collaborator reported.
///
/// # Errors
///
/// Propagates `InvalidInput` and `DuplicatePath` from normalization.
pub fn reconcile_listings(
    from: &SnapshotListing,
    to: &SnapshotListing,
) -> Result<(Reconciliation, NormalizedListing, NormalizedListing)> {
    let from = from.normalize()?;
    let to = to.normalize()?;
    Ok((reconcile(&from, &to), from, to))
}
