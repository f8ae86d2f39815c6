//! Hints and worked-solution blocks, shared by both problem families.

use crate::model::{tags, Element, Explanation, Hint};

use super::markup::{escape_text, MarkupBuilder};
use super::RenderOptions;

/// Collect every `<hint>` in document order.
///
/// A hint's text is its own leading text; when that is blank (the hint
/// wraps its content in child elements) the children's text is joined
/// instead.
pub fn collect_hints(doc: &Element) -> Vec<Hint> {
    doc.find_all(tags::HINT)
        .into_iter()
        .map(|hint| Hint {
            text: hint_text(hint),
        })
        .collect()
}

fn hint_text(hint: &Element) -> String {
    let direct = hint.text();
    if !direct.trim().is_empty() {
        return direct.trim().to_string();
    }
    hint.child_elements()
        .map(|child| child.text_content().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the hidden-hints block, or nothing when there are no hints.
pub fn render_hints(hints: &[Hint], options: &RenderOptions) -> String {
    if hints.is_empty() {
        return String::new();
    }

    let threshold = options.show_hint_after.to_string();
    let mut b = MarkupBuilder::new();
    b.open("pl-hidden-hints", &[]);
    for hint in hints {
        b.element(
            "pl-hint",
            &[("show-after-submission", threshold.as_str())],
            &escape_text(&hint.text),
        );
    }
    b.close("pl-hidden-hints");
    b.finish()
}

/// All worked-solution containers, in document order.
pub fn solution_containers(doc: &Element) -> Vec<&Element> {
    doc.find_all_with_class(tags::DIV, tags::SOLUTION_CLASS)
}

/// One paragraph per child of the container; blank children are skipped.
pub fn collect_explanation(container: &Element) -> Explanation {
    Explanation {
        paragraphs: container
            .child_elements()
            .map(|child| child.inner_xml().trim().to_string())
            .filter(|markup| !markup.is_empty())
            .collect(),
    }
}

/// Render one answer panel.
pub fn render_explanation(explanation: &Explanation) -> String {
    let mut b = MarkupBuilder::new();
    b.open("pl-answer-panel", &[])
        .open("div", &[("class", tags::SOLUTION_CLASS)]);
    for paragraph in &explanation.paragraphs {
        b.element("p", &[], paragraph);
    }
    b.close("div").close("pl-answer-panel");
    b.finish()
}
