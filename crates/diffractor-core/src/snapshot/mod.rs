//! Snapshot path reconciliation.
//!
//! Turns the raw listings of two snapshot roots into one shared key space of
//! root-relative [`FilePath`]s and classifies every key as added, removed or
//! present in both.
//!
//! ## Responsibilities
//!
//! - Normalize raw lister output into [`FilePath`]s
//! - Reject normalization collisions instead of merging them
//! - Classify paths across the two snapshots
//!
//! ## Non-Responsibilities
//!
//! - Enumerating files (handled by the engine's `FileLister`)
//! - Comparing file contents (handled by [`crate::hunk`])

pub mod path;
pub mod reconcile;

pub use path::{FilePath, NormalizedListing, SnapshotListing};
pub use reconcile::{reconcile, reconcile_listings, Reconciliation};
