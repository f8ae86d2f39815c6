//! Pieces extracted from a problem document and the emission result.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ProblemShape;
use crate::error::{Error, Result};

/// One answer option of a choice problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Display markup (trimmed), inline elements kept
    pub text: String,
    /// Whether the source marked it `correct="true"`
    pub is_correct: bool,
}

/// A numeric answer checked to be a plain numeric literal.
///
/// Values are kept exactly as written (after trimming) so the generated
/// answer key reproduces the author's precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericAnswer(String);

fn numeric_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
            .expect("numeric literal pattern is valid")
    })
}

impl NumericAnswer {
    /// Validate a raw `answer` attribute.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if numeric_literal().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(Error::InvalidAnswer {
                answer: raw.to_string(),
            })
        }
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumericAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One numeric input and its expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubQuestion {
    /// 1-based position; `None` for the lone input of a single-numeric problem
    pub index: Option<usize>,
    /// Prompt shown above the input (may be empty)
    pub prompt: String,
    /// Expected value
    pub answer: NumericAnswer,
}

impl SubQuestion {
    /// Answer slot name: `ans` or `ans_<index>`.
    pub fn slot(&self) -> String {
        match self.index {
            Some(i) => format!("ans_{}", i),
            None => "ans".to_string(),
        }
    }
}

/// A hint revealed after enough submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
}

/// A worked-solution block: one entry per non-empty paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    pub paragraphs: Vec<String>,
}

/// Where the question stem came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// A `<label>` element, serialized verbatim
    Label(String),
    /// A run of sibling paragraphs, as inner markup
    Paragraphs(Vec<String>),
    /// No prompt source found
    Missing,
}

impl Prompt {
    pub fn is_missing(&self) -> bool {
        matches!(self, Prompt::Missing)
    }
}

/// Output of one conversion: question markup plus, for numeric
/// problems, the answer-key code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionResult {
    /// Classified shape of the source document
    pub shape: ProblemShape,

    /// Contents of the question markup file
    pub question_markup: String,

    /// Contents of the answer-key script (numeric shapes only)
    pub answer_key: Option<String>,
}

impl EmissionResult {
    /// Create a result without answer key.
    pub fn new(shape: ProblemShape, question_markup: String) -> Self {
        Self {
            shape,
            question_markup,
            answer_key: None,
        }
    }

    /// Attach answer-key code.
    pub fn with_answer_key(mut self, code: String) -> Self {
        self.answer_key = Some(code);
        self
    }
}
