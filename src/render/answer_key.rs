//! Answer-key code generation for numeric problems.

use crate::model::{NumericAnswer, SubQuestion};

/// Expected values keyed by answer slot, rendered as a `generate` function.
///
/// Only validated [`NumericAnswer`]s can be added, so nothing but numeric
/// literals ever reaches the generated code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    entries: Vec<(String, NumericAnswer)>,
}

impl AnswerKey {
    /// Create an empty answer key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a key with one entry per sub-question, in order.
    pub fn from_sub_questions(questions: &[SubQuestion]) -> Self {
        let mut key = Self::new();
        for question in questions {
            key.push(question.slot(), question.answer.clone());
        }
        key
    }

    /// Add an entry.
    pub fn push(&mut self, slot: impl Into<String>, answer: NumericAnswer) {
        self.entries.push((slot.into(), answer));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `generate(data)` function body.
    pub fn to_code(&self) -> String {
        let mut code = String::from("def generate(data):\n");
        if self.entries.is_empty() {
            code.push_str("    pass\n");
        }
        for (slot, answer) in &self.entries {
            code.push_str(&format!(
                "    data[\"correct_answers\"][\"{}\"] = {}\n",
                slot, answer
            ));
        }
        code
    }
}
