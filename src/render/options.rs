//! Rendering options and configuration.

use super::PromptRule;

/// Options for rendering question markup.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Submissions after which hints are revealed
    pub show_hint_after: u32,

    /// Relative tolerance of numeric inputs
    pub rtol: f64,

    /// Absolute tolerance of numeric inputs
    pub atol: f64,

    /// `answers-name` of the choice control
    pub choice_answers_name: String,

    /// Keep choices in source order instead of shuffling
    pub fixed_order: bool,

    /// Award partial credit on checkbox questions
    pub partial_credit: bool,

    /// Prompt sources, tried in order
    pub prompt_rules: Vec<PromptRule>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hint threshold.
    pub fn with_hint_after(mut self, submissions: u32) -> Self {
        self.show_hint_after = submissions;
        self
    }

    /// Set both numeric tolerances.
    pub fn with_tolerance(mut self, rtol: f64, atol: f64) -> Self {
        self.rtol = rtol;
        self.atol = atol;
        self
    }

    /// Set the choice control's `answers-name`.
    pub fn with_choice_answers_name(mut self, name: impl Into<String>) -> Self {
        self.choice_answers_name = name.into();
        self
    }

    /// Enable or disable fixed choice order.
    pub fn with_fixed_order(mut self, fixed: bool) -> Self {
        self.fixed_order = fixed;
        self
    }

    /// Enable or disable partial credit.
    pub fn with_partial_credit(mut self, partial: bool) -> Self {
        self.partial_credit = partial;
        self
    }

    /// Replace the prompt rule order.
    pub fn with_prompt_rules(mut self, rules: Vec<PromptRule>) -> Self {
        self.prompt_rules = rules;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_hint_after: 1,
            rtol: 1e-2,
            atol: 1e-2,
            choice_answers_name: "multichoice_1".to_string(),
            fixed_order: true,
            partial_credit: true,
            prompt_rules: PromptRule::DEFAULT_ORDER.to_vec(),
        }
    }
}
