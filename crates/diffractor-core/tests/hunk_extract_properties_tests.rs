#![allow(clippy::unwrap_used, clippy::expect_used)]

use diffractor_core::hunk::{extract_hunks, Hunk, LineTag};
use proptest::prelude::*;

fn lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c]", 0..12)
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

/// Lines of one side of a hunk: context plus the given change tag
fn side(hunk: &Hunk, change: LineTag) -> Vec<String> {
    hunk.lines
        .iter()
        .filter(|l| l.tag == LineTag::Context || l.tag == change)
        .map(|l| l.content.clone())
        .collect()
}

fn lcs_len(a: &[String], b: &[String]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut diag = 0;
        for (j, y) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if x == y { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }
    row[b.len()]
}

fn leading_context(hunk: &Hunk) -> usize {
    hunk.lines
        .iter()
        .take_while(|l| l.tag == LineTag::Context)
        .count()
}

fn trailing_context(hunk: &Hunk) -> usize {
    hunk.lines
        .iter()
        .rev()
        .filter(|l| l.tag != LineTag::NoNewlineMarker)
        .take_while(|l| l.tag == LineTag::Context)
        .count()
}

proptest! {
    #[test]
    fn prop_wide_context_reconstructs_both_sides(old in lines(), new in lines()) {
        let hunks = extract_hunks(&join(&old), &join(&new), old.len() + new.len()).unwrap();

        if old == new {
            prop_assert!(hunks.is_empty());
        } else {
            prop_assert_eq!(hunks.len(), 1);
            prop_assert_eq!(side(&hunks[0], LineTag::Removed), old.clone());
            prop_assert_eq!(side(&hunks[0], LineTag::Added), new.clone());
            prop_assert_eq!(hunks[0].old_lines, old.len());
            prop_assert_eq!(hunks[0].new_lines, new.len());
        }
    }

    #[test]
    fn prop_edit_script_is_minimal(old in lines(), new in lines()) {
        let hunks = extract_hunks(&join(&old), &join(&new), 0).unwrap();
        let common = lcs_len(&old, &new);

        let removed: usize = hunks.iter().map(|h| h.removed_count()).sum();
        let added: usize = hunks.iter().map(|h| h.added_count()).sum();
        prop_assert_eq!(removed, old.len() - common);
        prop_assert_eq!(added, new.len() - common);
    }

    #[test]
    fn prop_context_never_exceeds_window(old in lines(), new in lines(), context in 0usize..4) {
        let hunks = extract_hunks(&join(&old), &join(&new), context).unwrap();

        for hunk in &hunks {
            prop_assert!(leading_context(hunk) <= context);
            prop_assert!(trailing_context(hunk) <= context);
            prop_assert!(hunk.lines.iter().any(|l| l.tag.is_change()));
        }
        for pair in hunks.windows(2) {
            prop_assert!(pair[0].old_start + pair[0].old_lines <= pair[1].old_start);
            prop_assert!(pair[0].new_start + pair[0].new_lines <= pair[1].new_start);
        }
    }
}

#[test]
fn test_interleaved_edits_render_removals_first() {
    let hunks = extract_hunks("a\nb\nc\nd\n", "x\nb\ny\nz\n", 1).unwrap();

    assert_eq!(hunks.len(), 1);
    assert_eq!(
        hunks[0].rendered_lines(),
        vec!["-a", "+x", " b", "-c", "-d", "+y", "+z"]
    );
    assert_eq!(hunks[0].header(), "@@ -1,4 +1,4 @@");
}
