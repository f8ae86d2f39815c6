//! Problem shape classification result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The family a problem document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemShape {
    /// `<multiplechoiceresponse>`: pick one answer
    SingleOrMultiChoice,
    /// `<choiceresponse>`: tick any number of answers
    Checkbox,
    /// Exactly one `<numericalresponse>`
    SingleNumeric,
    /// Several numeric markers, each paired with a `<ul>` by position
    MultiNumericWithLists,
    /// Several numeric markers with prompts interleaved as paragraphs
    MultiNumericFreeform,
    /// None of the above
    Unrecognized,
}

impl ProblemShape {
    /// All shapes, in classification priority order.
    pub const ALL: [ProblemShape; 6] = [
        ProblemShape::SingleOrMultiChoice,
        ProblemShape::Checkbox,
        ProblemShape::SingleNumeric,
        ProblemShape::MultiNumericWithLists,
        ProblemShape::MultiNumericFreeform,
        ProblemShape::Unrecognized,
    ];

    /// Whether the shape renders as a choice control.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            ProblemShape::SingleOrMultiChoice | ProblemShape::Checkbox
        )
    }

    /// Whether the shape renders numeric inputs plus an answer key.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ProblemShape::SingleNumeric
                | ProblemShape::MultiNumericWithLists
                | ProblemShape::MultiNumericFreeform
        )
    }

    /// Short stable name, used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemShape::SingleOrMultiChoice => "multiple-choice",
            ProblemShape::Checkbox => "checkbox",
            ProblemShape::SingleNumeric => "single-numeric",
            ProblemShape::MultiNumericWithLists => "multi-numeric-with-lists",
            ProblemShape::MultiNumericFreeform => "multi-numeric-freeform",
            ProblemShape::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ProblemShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
