//! Hunk extraction and content-addressed deduplication.
//!
//! ## Entry points
//!
//! ```
//! use diffractor_core::hunk::{extract_hunks, HunkIndex, DEFAULT_CONTEXT_LINES};
//! use diffractor_core::snapshot::FilePath;
//!
//! let hunks = extract_hunks("line1\nline2\n", "line1\nCHANGED\n", DEFAULT_CONTEXT_LINES).unwrap();
//! let mut index = HunkIndex::new();
//! index.insert_file(&FilePath::new("a.html").unwrap(), hunks);
//! assert_eq!(index.into_records().len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Verbatim tagging**: every hunk line keeps its context / added /
//!   removed tag, and the tag participates in identity.
//! - **Determinism**: identical inputs produce identical hunks, identities
//!   and record order.

pub mod extract;
pub mod identity;
pub mod model;

pub use extract::{extract_hunks, DEFAULT_CONTEXT_LINES};
pub use identity::{index_hunks, HunkIdentity, HunkIndex, HunkRecord};
pub use model::{Hunk, HunkLine, LineTag};
