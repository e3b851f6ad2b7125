//! Diffractor Core - change-clustering kernel
//!
//! This crate compares paired files from two snapshots of a generated-markup
//! tree and groups their textual changes into clusters of near-identical
//! edits:
//! - Snapshot reconciliation (added / removed / present-in-both paths)
//! - Unified-diff hunk extraction with fixed context
//! - Content-addressed hunk identity and cross-file deduplication
//! - Pairwise similarity scoring and connected-component clustering
//! - A read-only cluster report plus Markdown summary rendering
//!
//! Nothing here touches the filesystem; listing and reading files belong to
//! `diffractor-engine`.

pub mod errors;
pub mod hunk;
pub mod logging_facility;
pub mod report;
pub mod similarity;
pub mod snapshot;

// Re-export commonly used types
pub use errors::{DiffractorError, ExError, ExErrorKind, Result};
pub use hunk::{extract_hunks, index_hunks, Hunk, HunkIdentity, HunkIndex, HunkRecord};
pub use report::{build_report, render_human_summary, ClusterReport};
pub use similarity::{cluster_records, sequence_ratio, Cluster};
pub use snapshot::{reconcile, FilePath, Reconciliation, SnapshotListing};

#[doc(hidden)]
pub use diffractor_core_types;
