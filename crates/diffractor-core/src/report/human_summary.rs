//! Markdown renderers for cluster reports.

use crate::report::breadcrumb::root_breadcrumb;
use crate::report::model::{ClusterEntry, ClusterReport};

/// Render a Markdown review summary of a [`ClusterReport`].
///
/// One section per cluster with its counts, the root breadcrumb, the root
/// change path of every member and the representative hunk.
pub fn render_human_summary(report: &ClusterReport) -> String {
    let mut out = String::new();

    out.push_str("## Change Clusters\n\n");
    out.push_str(&format!(
        "**Clusters**: {}  \n**Distinct changes**: {}\n\n",
        report.len(),
        report.record_count()
    ));

    if report.is_empty() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    for entry in report.clusters() {
        out.push_str(&format!("### Change {}\n\n", entry.cluster_index()));
        out.push_str(&format!(
            "| Similar changes | Affected files | Root |\n\
             |---|---|---|\n\
             | {} | {} | {} |\n\n",
            entry.size(),
            entry.affected_file_count(),
            root_breadcrumb(entry.root_file_path()).join(" › ")
        ));

        out.push_str("**Root changes**:\n\n");
        for member in entry.members() {
            out.push_str(&format!(
                "- `{}` _{}_\n",
                member.identity().short(),
                member.root_change_path()
            ));
        }
        out.push('\n');

        if let Some(first) = entry.members().first() {
            push_diff_block(&mut out, &first.header(), first.hunk_lines());
        }
    }

    out
}

/// Render every member of one cluster with its affected files and hunk.
pub fn render_cluster_detail(entry: &ClusterEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Group of similar changes {}\n\n",
        entry.cluster_index()
    ));

    for (index, member) in entry.members().iter().enumerate() {
        out.push_str(&format!("## Change {}\n\n", index));
        out.push_str(&format!("Identity: `{}`\n\n", member.identity()));
        out.push_str("Affected files:\n\n");
        for path in member.file_paths() {
            out.push_str(&format!("- {}\n", path));
        }
        out.push('\n');
        push_diff_block(&mut out, &member.header(), member.hunk_lines());
    }

    out
}

fn push_diff_block(out: &mut String, header: &str, lines: &[String]) {
    out.push_str("```diff\n");
    out.push_str(header);
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("```\n\n");
}
