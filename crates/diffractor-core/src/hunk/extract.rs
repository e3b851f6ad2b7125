//! Unified-diff hunk extraction for one file pair.

use crate::errors::{DiffractorError, Result};
use crate::hunk::model::{Hunk, HunkLine, LineTag};
use similar::{Algorithm, ChangeTag, DiffOp, TextDiff};

/// Unchanged lines kept on each side of a change.
pub const DEFAULT_CONTEXT_LINES: usize = 5;

/// Compute the hunks turning `from` into `to`.
///
/// Lines are compared with their terminators, so a file that only gains or
/// loses its final newline still differs. Within each changed run removals
/// come before additions. Change runs separated by at most `2 * context`
/// unchanged lines share a hunk.
///
/// # Errors
///
/// `DiffComputation` when either side looks binary (contains a NUL byte).
/// The `path` field is left empty for the caller to fill in.
pub fn extract_hunks(from: &str, to: &str, context: usize) -> Result<Vec<Hunk>> {
    if from.contains('\0') || to.contains('\0') {
        return Err(DiffractorError::DiffComputation {
            path: String::new(),
            reason: "content contains a NUL byte and looks binary".to_string(),
        });
    }
    if from == to {
        return Ok(Vec::new());
    }

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(from, to);

    let hunks: Vec<Hunk> = diff
        .grouped_ops(context)
        .iter()
        .filter(|group| !group.is_empty())
        .map(|group| build_hunk(&diff, group))
        .collect();

    tracing::debug!(
        old_lines = diff.old_slices().len(),
        new_lines = diff.new_slices().len(),
        hunks = hunks.len(),
        "extracted hunks"
    );
    Ok(hunks)
}

/// Map one group of diff ops onto a tagged [`Hunk`].
///
/// `Replace` ops yield their deletions before their insertions.
fn build_hunk(diff: &TextDiff<'_, '_, '_, str>, group: &[DiffOp]) -> Hunk {
    let (old_before, new_before) = group
        .first()
        .map(|op| (op.old_range().start, op.new_range().start))
        .unwrap_or((0, 0));
    let old_lines: usize = group.iter().map(|op| op.old_range().len()).sum();
    let new_lines: usize = group.iter().map(|op| op.new_range().len()).sum();

    let mut lines = Vec::new();
    for op in group {
        for change in diff.iter_changes(op) {
            let tag = match change.tag() {
                ChangeTag::Equal => LineTag::Context,
                ChangeTag::Delete => LineTag::Removed,
                ChangeTag::Insert => LineTag::Added,
            };
            let token = change.value();
            match token.strip_suffix('\n') {
                Some(content) => lines.push(HunkLine::new(tag, content)),
                None => {
                    lines.push(HunkLine::new(tag, token));
                    lines.push(HunkLine::no_newline_marker());
                }
            }
        }
    }

    Hunk {
        old_start: range_start(old_before, old_lines),
        old_lines,
        new_start: range_start(new_before, new_lines),
        new_lines,
        lines,
    }
}

/// 1-based start; an empty range reports the line before it.
fn range_start(before: usize, count: usize) -> usize {
    if count == 0 {
        before
    } else {
        before + 1
    }
}
