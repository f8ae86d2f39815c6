//! Small indented markup writer shared by the emitters.

use quick_xml::escape::{escape, partial_escape};

const INDENT: &str = "    ";

/// Line-oriented builder for the question markup vocabulary.
#[derive(Debug, Default)]
pub(crate) struct MarkupBuilder {
    out: String,
    depth: usize,
}

impl MarkupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `<tag attrs>` and indent what follows.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        let line = format!("<{}{}>", tag, render_attrs(attrs));
        self.line(&line);
        self.depth += 1;
        self
    }

    /// Dedent and write `</tag>`.
    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        let line = format!("</{}>", tag);
        self.line(&line)
    }

    /// Write `<tag attrs>content</tag>` on one line. `content` is markup.
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)], content: &str) -> &mut Self {
        let line = format!("<{}{}>{}</{}>", tag, render_attrs(attrs), content, tag);
        self.line(&line)
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

fn render_attrs(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape(*value)))
        .collect()
}

/// Escape plain text for inclusion in markup.
pub(crate) fn escape_text(text: &str) -> String {
    partial_escape(text).into_owned()
}

/// Join rendered blocks with a blank line between them.
pub(crate) fn join_blocks(blocks: Vec<String>) -> String {
    blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_indents() {
        let mut b = MarkupBuilder::new();
        b.open("div", &[("class", "card-body")])
            .element("pl-answer", &[("correct", "true")], "B")
            .close("div");
        assert_eq!(
            b.finish(),
            "<div class=\"card-body\">\n    <pl-answer correct=\"true\">B</pl-answer>\n</div>\n"
        );
    }

    #[test]
    fn test_attr_values_are_escaped() {
        assert_eq!(render_attrs(&[("label", "a\"b")]), " label=\"a&quot;b\"");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("x < 3 & y > 2"), "x &lt; 3 &amp; y &gt; 2");
        assert_eq!(escape_text("it's"), "it's");
    }

    #[test]
    fn test_join_blocks_skips_empty() {
        let joined = join_blocks(vec!["a\n".into(), String::new(), "b\n".into()]);
        assert_eq!(joined, "a\n\nb\n");
    }
}
