//! Parsing options and configuration.

/// Options for parsing OLX documents.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Require the root element to carry this tag
    pub expected_root: Option<String>,

    /// Drop text nodes that consist only of whitespace
    pub trim_whitespace: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a specific root tag.
    pub fn expect_root(mut self, tag: impl Into<String>) -> Self {
        self.expected_root = Some(tag.into());
        self
    }

    /// Drop whitespace-only text nodes.
    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }
}
