//! OLX document kind detection.

use crate::error::Result;
use crate::model::{tags, Element};
use crate::parser::OlxParser;
use std::fmt;
use std::path::Path;

/// Level of the course hierarchy a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OlxKind {
    /// `<chapter>`: top of a converted assessment
    Chapter,
    /// `<sequential>`: becomes a zone
    Sequential,
    /// `<vertical>`: groups problems
    Vertical,
    /// `<problem>`: a single question
    Problem,
    /// Anything else (html, video, discussion, ...)
    Other,
}

impl fmt::Display for OlxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OlxKind::Chapter => "chapter",
            OlxKind::Sequential => "sequential",
            OlxKind::Vertical => "vertical",
            OlxKind::Problem => "problem",
            OlxKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Detect the kind of an already-parsed document from its root tag.
pub fn detect_kind(root: &Element) -> OlxKind {
    match root.name.as_str() {
        tags::CHAPTER => OlxKind::Chapter,
        tags::SEQUENTIAL => OlxKind::Sequential,
        tags::VERTICAL => OlxKind::Vertical,
        tags::PROBLEM => OlxKind::Problem,
        _ => OlxKind::Other,
    }
}

/// Parse a file and detect its kind.
///
/// # Example
/// ```no_run
/// use olx2pl::detect::{detect_kind_from_path, OlxKind};
///
/// let kind = detect_kind_from_path("course/chapter/week1.xml").unwrap();
/// assert_eq!(kind, OlxKind::Chapter);
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<OlxKind> {
    let root = OlxParser::new().parse_file(path)?;
    Ok(detect_kind(&root))
}

/// Parse bytes and detect their kind.
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<OlxKind> {
    let root = OlxParser::new().parse_bytes(data)?;
    Ok(detect_kind(&root))
}

/// Check if bytes hold a `<problem>` document.
pub fn is_problem_bytes(data: &[u8]) -> bool {
    matches!(detect_kind_from_bytes(data), Ok(OlxKind::Problem))
}
