//! Problem shape classification.
//!
//! Classification looks at the direct-child tags of a `<problem>` root to
//! pick the family, and at descendant counts of numeric markers and
//! `<ul>` lists to pick the numeric sub-family.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::{tags, Element, ProblemShape};

/// Marker and list counts a classification was based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerCounts {
    /// `<numericalresponse>` descendants
    pub numeric: usize,
    /// `<ul>` descendants
    pub lists: usize,
}

impl MarkerCounts {
    /// Count numeric markers and lists anywhere in the document.
    pub fn of(doc: &Element) -> Self {
        Self {
            numeric: doc.count(tags::NUMERICAL),
            lists: doc.count(tags::LIST),
        }
    }
}

/// Classify a problem document.
///
/// Fails with [`Error::AmbiguousShape`] when both choice markers are
/// present. Documents matching no family yield
/// [`ProblemShape::Unrecognized`]; deciding what to do with them is up to
/// the caller.
pub fn classify(doc: &Element) -> Result<ProblemShape> {
    let top: HashSet<&str> = doc.child_elements().map(|e| e.name.as_str()).collect();

    let multiple_choice = top.contains(tags::MULTIPLE_CHOICE);
    let checkbox = top.contains(tags::CHECKBOX);

    if multiple_choice && checkbox {
        return Err(Error::AmbiguousShape);
    }
    if multiple_choice {
        return Ok(ProblemShape::SingleOrMultiChoice);
    }
    if checkbox {
        return Ok(ProblemShape::Checkbox);
    }

    if top.contains(tags::NUMERICAL) {
        return Ok(classify_numeric(MarkerCounts::of(doc)));
    }

    Ok(ProblemShape::Unrecognized)
}

/// Pick the numeric sub-family from marker and list counts.
pub fn classify_numeric(counts: MarkerCounts) -> ProblemShape {
    match counts.numeric {
        0 => ProblemShape::Unrecognized,
        1 => ProblemShape::SingleNumeric,
        n if counts.lists == n => ProblemShape::MultiNumericWithLists,
        _ => ProblemShape::MultiNumericFreeform,
    }
}
