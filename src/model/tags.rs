//! OLX tag and attribute names the converter understands.

/// Single-answer choice marker.
pub const MULTIPLE_CHOICE: &str = "multiplechoiceresponse";
/// Checkbox (multi-answer) choice marker.
pub const CHECKBOX: &str = "choiceresponse";
/// Numeric-response marker.
pub const NUMERICAL: &str = "numericalresponse";

pub const CHOICE: &str = "choice";
/// Per-choice feedback inside a `<choice>`; not part of the answer text.
pub const CHOICE_HINT: &str = "choicehint";
pub const PARAGRAPH: &str = "p";
pub const LABEL: &str = "label";
pub const LIST: &str = "ul";
pub const HINT: &str = "hint";
pub const DIV: &str = "div";

/// `class` of the worked-solution container `<div>`.
pub const SOLUTION_CLASS: &str = "detailed-solution";

pub const ATTR_CORRECT: &str = "correct";
pub const ATTR_ANSWER: &str = "answer";
pub const ATTR_URL_NAME: &str = "url_name";
pub const ATTR_DISPLAY_NAME: &str = "display_name";
pub const ATTR_HIGHLIGHTS: &str = "highlights";

// Course hierarchy
pub const CHAPTER: &str = "chapter";
pub const SEQUENTIAL: &str = "sequential";
pub const VERTICAL: &str = "vertical";
pub const PROBLEM: &str = "problem";
