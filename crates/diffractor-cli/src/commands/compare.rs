//! Compare command
//!
//! Usage: diffractor compare --from <DIR> --to <DIR> [--format json|summary]

use clap::{Args, ValueEnum};
use diffractor_core::report::{render_cluster_detail, render_human_summary};
use diffractor_engine::{
    read_config, run_comparison, ComparisonOutcome, EngineConfig, FsFileReader, GlobFileLister,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root of the older snapshot
    #[arg(long)]
    pub from: Option<String>,

    /// Root of the newer snapshot
    #[arg(long)]
    pub to: Option<String>,

    /// Glob selecting files under each root
    #[arg(long)]
    pub glob: Option<String>,

    /// Unchanged lines around each change
    #[arg(long)]
    pub context: Option<usize>,

    /// Similarity threshold in [0, 1]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write one Markdown file per cluster into this directory
    #[arg(long)]
    pub patch_dir: Option<PathBuf>,

    /// Follow symbolic links while listing
    #[arg(long)]
    pub follow_links: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Summary,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(&args)?;

    let lister = GlobFileLister::new().follow_links(args.follow_links);
    let outcome = run_comparison(&config, &lister, &FsFileReader)?;

    for warning in &outcome.warnings {
        eprintln!("warning: skipped {}: {}", warning.path, warning.message);
    }

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&outcome)? + "\n",
        OutputFormat::Summary => render_summary(&outcome),
    };

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, rendered)?;
        eprintln!("✓ Report written to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    if let Some(dir) = &args.patch_dir {
        write_patches(dir, &outcome)?;
    }

    Ok(())
}

/// Layer flags over the config file (if any), then validate.
fn resolve_config(args: &CompareArgs) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => EngineConfig::default(),
    };

    if let Some(from) = &args.from {
        config.from_root = from.clone();
    }
    if let Some(to) = &args.to {
        config.to_root = to.clone();
    }
    if let Some(glob) = &args.glob {
        config.glob_pattern = glob.clone();
    }
    if let Some(context) = args.context {
        config.diff_context_lines = context;
    }
    if let Some(threshold) = args.threshold {
        config.similarity_threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

fn render_summary(outcome: &ComparisonOutcome) -> String {
    let mut out = render_human_summary(&outcome.report);
    out.push_str(&format!(
        "\n**Compared files**: {}  \n**Added**: {}  \n**Removed**: {}\n",
        outcome.compared_files,
        outcome.added.len(),
        outcome.removed.len()
    ));
    if !outcome.warnings.is_empty() {
        out.push_str("\n**Skipped files**:\n\n");
        for warning in &outcome.warnings {
            out.push_str(&format!("- `{}` ({})\n", warning.path, warning.code));
        }
    }
    out
}

fn write_patches(dir: &Path, outcome: &ComparisonOutcome) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for entry in outcome.report.clusters() {
        let path = dir.join(format!("patch-{}.md", entry.cluster_index()));
        std::fs::write(path, render_cluster_detail(entry))?;
    }
    Ok(())
}
