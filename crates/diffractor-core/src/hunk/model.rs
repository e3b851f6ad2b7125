//! Hunk data types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.

use serde::{Deserialize, Serialize};

/// Marker line emitted after a final line that lacks a terminator.
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// How a hunk line relates the two file versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTag {
    /// Unchanged line carried for context
    Context,
    /// Line only in the "to" version
    Added,
    /// Line only in the "from" version
    Removed,
    /// The preceding line has no trailing newline
    NoNewlineMarker,
}

impl LineTag {
    /// Unified-diff prefix character(s) for this tag
    pub fn prefix(&self) -> &'static str {
        match self {
            LineTag::Context => " ",
            LineTag::Added => "+",
            LineTag::Removed => "-",
            LineTag::NoNewlineMarker => "",
        }
    }

    /// Whether this line is part of the change itself
    pub fn is_change(&self) -> bool {
        matches!(self, LineTag::Added | LineTag::Removed)
    }
}

/// One tagged line of a hunk, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HunkLine {
    pub tag: LineTag,
    pub content: String,
}

impl HunkLine {
    pub fn new(tag: LineTag, content: impl Into<String>) -> Self {
        Self {
            tag,
            content: content.into(),
        }
    }

    pub fn no_newline_marker() -> Self {
        Self::new(LineTag::NoNewlineMarker, "")
    }

    /// Unified-diff rendering (`" ctx"`, `"+new"`, `"-old"`, marker)
    pub fn render(&self) -> String {
        match self.tag {
            LineTag::NoNewlineMarker => NO_NEWLINE_MARKER.to_string(),
            tag => format!("{}{}", tag.prefix(), self.content),
        }
    }
}

/// A contiguous changed region with its surrounding context.
///
/// Ranges follow unified-diff conventions: starts are 1-based, and a
/// zero-length range reports the line before it (`0` at file start).
/// Ranges are informational; identity depends on `lines` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// Rendered lines in order
    pub fn rendered_lines(&self) -> Vec<String> {
        self.lines.iter().map(HunkLine::render).collect()
    }

    /// Concatenation of the rendered lines with no separator.
    ///
    /// This is the text the similarity measure compares.
    pub fn text(&self) -> String {
        self.lines.iter().map(HunkLine::render).collect()
    }

    /// `@@ -a,b +c,d @@` header
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        )
    }

    pub fn added_count(&self) -> usize {
        self.count(LineTag::Added)
    }

    pub fn removed_count(&self) -> usize {
        self.count(LineTag::Removed)
    }

    fn count(&self, tag: LineTag) -> usize {
        self.lines.iter().filter(|l| l.tag == tag).count()
    }
}
