//! Readable label for a cluster's root file.
//!
//! Generated markup files carry their component path flattened into the
//! file name, e.g. `01-atoms-button-primary.markup-only.html`. The
//! breadcrumb recovers the path segments from that name.

use crate::snapshot::FilePath;
use regex::Regex;
use std::sync::OnceLock;

/// Rewrite rules applied in order: `(pattern, replacement)`
const RULES: [(&str, &str); 3] = [
    (r"-(\d+)", "/${1}"),
    (r"(\d+-\w+)-", "${1}/"),
    (r"-_", "/_"),
];

fn compiled_rules() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .filter_map(|(pattern, replacement)| {
                Regex::new(pattern).ok().map(|re| (re, *replacement))
            })
            .collect()
    })
}

/// Breadcrumb segments derived from the file name of `path`.
///
/// ```
/// use diffractor_core::report::root_breadcrumb;
/// use diffractor_core::snapshot::FilePath;
///
/// let path = FilePath::new("atoms/atoms-button-02-primary.markup-only.html").unwrap();
/// assert_eq!(root_breadcrumb(&path), vec!["atoms-button", "02-primary"]);
/// ```
pub fn root_breadcrumb(path: &FilePath) -> Vec<String> {
    let name = path.file_name();
    let stem = name.split('.').next().unwrap_or(name);

    let label = compiled_rules()
        .iter()
        .fold(stem.to_string(), |label, (re, replacement)| {
            re.replace_all(&label, *replacement).into_owned()
        });

    label
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
