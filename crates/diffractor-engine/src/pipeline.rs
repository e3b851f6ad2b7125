//! End-to-end comparison of two snapshots.

use crate::collaborators::{FileLister, FileReader};
use crate::config::EngineConfig;
use diffractor_core::errors::{DiffractorError, ExError};
use diffractor_core::hunk::{extract_hunks, index_hunks, Hunk};
use diffractor_core::report::{build_report, ClusterReport};
use diffractor_core::similarity::cluster_records;
use diffractor_core::snapshot::{reconcile_listings, FilePath, NormalizedListing, SnapshotListing};
use diffractor_core::{log_op_end, log_op_error, log_op_start};
use diffractor_core_types::RunId;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A file left out of the comparison because its diff failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWarning {
    pub path: FilePath,
    /// Stable error code, e.g. `ERR_DIFF_COMPUTATION`
    pub code: String,
    pub message: String,
}

/// Everything a comparison run produces.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub run_id: RunId,
    pub report: ClusterReport,
    /// Present only in the "to" snapshot
    pub added: BTreeSet<FilePath>,
    /// Present only in the "from" snapshot
    pub removed: BTreeSet<FilePath>,
    /// Files present in both snapshots whose diff was computed
    pub compared_files: usize,
    pub warnings: Vec<FileWarning>,
}

enum FileOutcome {
    Hunks(Vec<Hunk>),
    Skipped(FileWarning),
}

/// Run one comparison between `config.from_root` and `config.to_root`.
///
/// Listing, reading and reconciliation failures abort the run with no
/// report. A file whose diff cannot be computed is excluded and reported
/// in [`ComparisonOutcome::warnings`].
///
/// # Errors
///
/// `ERR_CONFIG` / `ERR_INVALID_THRESHOLD` for a bad config, `ERR_LIST`,
/// `ERR_READ` and `ERR_DUPLICATE_PATH` from the collaborators and the
/// reconciler.
pub fn run_comparison(
    config: &EngineConfig,
    lister: &dyn FileLister,
    reader: &dyn FileReader,
) -> Result<ComparisonOutcome, ExError> {
    let run_id = RunId::new();
    log_op_start!("run_comparison", run_id = %run_id);
    let start = std::time::Instant::now();

    let result = (|| -> Result<ComparisonOutcome, ExError> {
        config.validate()?;

        let from = SnapshotListing::new(
            config.from_root.as_str(),
            lister.list(&config.from_root, &config.glob_pattern)?,
        );
        let to = SnapshotListing::new(
            config.to_root.as_str(),
            lister.list(&config.to_root, &config.glob_pattern)?,
        );
        let (reconciliation, from, to) = reconcile_listings(&from, &to)?;

        let unchanged: Vec<&FilePath> = reconciliation.unchanged.iter().collect();
        let outcomes = unchanged
            .par_iter()
            .map(|path| {
                diff_file(path, &from, &to, reader, config.diff_context_lines)
                    .map(|outcome| ((*path).clone(), outcome))
            })
            .collect::<Result<Vec<_>, DiffractorError>>()?;

        let mut hunks_by_path: BTreeMap<FilePath, Vec<Hunk>> = BTreeMap::new();
        let mut warnings = Vec::new();
        for (path, outcome) in outcomes {
            match outcome {
                FileOutcome::Hunks(hunks) => {
                    hunks_by_path.insert(path, hunks);
                }
                FileOutcome::Skipped(warning) => warnings.push(warning),
            }
        }
        warnings.sort_by(|a, b| a.path.cmp(&b.path));

        let compared_files = hunks_by_path.len();
        let records = index_hunks(hunks_by_path);
        let clusters = cluster_records(records, config.similarity_threshold)?;
        let report = build_report(clusters);

        Ok(ComparisonOutcome {
            run_id: run_id.clone(),
            report,
            added: reconciliation.added,
            removed: reconciliation.removed,
            compared_files,
            warnings,
        })
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => log_op_end!(
            "run_comparison",
            duration_ms = elapsed,
            run_id = %run_id,
            file_count = outcome.compared_files,
            record_count = outcome.report.record_count(),
            cluster_count = outcome.report.len()
        ),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!("run_comparison", e_clone, duration_ms = elapsed, run_id = %run_id);
        }
    }
    result
}

/// Read both sides of one present-in-both path and extract its hunks.
fn diff_file(
    path: &FilePath,
    from: &NormalizedListing,
    to: &NormalizedListing,
    reader: &dyn FileReader,
    context: usize,
) -> Result<FileOutcome, DiffractorError> {
    let old = read_side(path, from, reader)?;
    let new = read_side(path, to, reader)?;

    match extract_hunks(&old, &new, context) {
        Ok(hunks) => Ok(FileOutcome::Hunks(hunks)),
        Err(DiffractorError::DiffComputation { reason, .. }) => {
            let err = DiffractorError::DiffComputation {
                path: path.to_string(),
                reason,
            };
            tracing::warn!(file_path = %path, err_code = err.kind().code(), "{}", err);
            Ok(FileOutcome::Skipped(FileWarning {
                path: path.clone(),
                code: err.kind().code().to_string(),
                message: err.to_string(),
            }))
        }
        Err(other) => Err(other),
    }
}

fn read_side(
    path: &FilePath,
    listing: &NormalizedListing,
    reader: &dyn FileReader,
) -> Result<String, DiffractorError> {
    let raw = listing
        .raw_path(path)
        .ok_or_else(|| DiffractorError::Internal {
            message: format!("{} has no raw path under {}", path, listing.root()),
        })?;
    reader.read(raw)
}
