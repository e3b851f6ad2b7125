//! Diffractor Engine - Orchestration layer
//!
//! Wires the pure kernel in `diffractor-core` to the outside world: loads
//! configuration, lists and reads snapshot files through collaborator
//! traits, and runs a whole comparison as one all-or-nothing operation.

pub mod collaborators;
pub mod config;
pub mod fs;
pub mod pipeline;

pub use collaborators::{FileLister, FileReader};
pub use config::{load_config, read_config, EngineConfig};
pub use fs::{FsFileReader, GlobFileLister};
pub use pipeline::{run_comparison, ComparisonOutcome, FileWarning};
