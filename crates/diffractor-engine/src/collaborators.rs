//! Seams between the engine and the storage holding the snapshots.
//!
//! Both traits are `Sync` so one instance can serve the parallel
//! extraction workers.

use diffractor_core::errors::DiffractorError;

/// Enumerates the files of one snapshot.
pub trait FileLister: Sync {
    /// Raw paths under `root` matching `pattern`, as the reader expects them.
    ///
    /// # Errors
    ///
    /// `ListError` when the root cannot be enumerated.
    fn list(&self, root: &str, pattern: &str) -> Result<Vec<String>, DiffractorError>;
}

/// Loads one snapshot file as text.
pub trait FileReader: Sync {
    /// Full text content of the file at `raw_path`.
    ///
    /// # Errors
    ///
    /// `ReadError` when the file is missing, unreadable or not UTF-8.
    fn read(&self, raw_path: &str) -> Result<String, DiffractorError>;
}
