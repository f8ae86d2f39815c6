//! Question prompt selection.
//!
//! The stem is chosen by trying an ordered list of [`PromptRule`]s; the
//! first rule that finds a source wins. The default order prefers a
//! `<label>` over a run of paragraphs.

use crate::model::{tags, Element, Prompt};
use crate::observe::{ConversionEvent, ConversionObserver, PromptSource};

use super::markup::MarkupBuilder;

/// One way of locating a question stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRule {
    /// First `<label>` anywhere in the document, kept verbatim
    Label,
    /// First `<p>` in document order and its directly following `<p>` siblings
    ParagraphRun,
}

impl PromptRule {
    /// Default precedence.
    pub const DEFAULT_ORDER: [PromptRule; 2] = [PromptRule::Label, PromptRule::ParagraphRun];

    /// Try this rule against a document.
    pub fn apply(self, doc: &Element) -> Option<Prompt> {
        match self {
            PromptRule::Label => doc.find(tags::LABEL).map(|label| Prompt::Label(label.to_xml())),
            PromptRule::ParagraphRun => {
                let run = doc.leading_run(tags::PARAGRAPH);
                if run.is_empty() {
                    return None;
                }
                Some(Prompt::Paragraphs(
                    run.iter().map(|p| p.inner_xml().trim().to_string()).collect(),
                ))
            }
        }
    }
}

/// Pick the prompt using the first matching rule.
pub fn select_prompt(doc: &Element, rules: &[PromptRule]) -> Prompt {
    rules
        .iter()
        .find_map(|rule| rule.apply(doc))
        .unwrap_or(Prompt::Missing)
}

/// Select the prompt and report the outcome.
pub(crate) fn observed_prompt(
    doc: &Element,
    rules: &[PromptRule],
    observer: &mut dyn ConversionObserver,
) -> Prompt {
    let prompt = select_prompt(doc, rules);
    let event = match &prompt {
        Prompt::Label(_) => ConversionEvent::PromptSelected {
            source: PromptSource::Label,
        },
        Prompt::Paragraphs(paragraphs) => ConversionEvent::PromptSelected {
            source: PromptSource::Paragraphs(paragraphs.len()),
        },
        Prompt::Missing => ConversionEvent::MissingPrompt,
    };
    observer.on_event(&event);
    prompt
}

/// Render the shared question panel. A missing prompt gives an empty panel.
pub fn render_prompt(prompt: &Prompt) -> String {
    let mut b = MarkupBuilder::new();
    b.open("pl-question-panel", &[]);
    match prompt {
        Prompt::Label(xml) => {
            b.element("p", &[], xml);
        }
        Prompt::Paragraphs(paragraphs) => {
            for paragraph in paragraphs {
                b.element("p", &[], paragraph);
            }
        }
        Prompt::Missing => {}
    }
    b.close("pl-question-panel");
    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::OlxParser;

    fn parse(xml: &str) -> Element {
        OlxParser::new().parse_str(xml).unwrap()
    }

    #[test]
    fn test_label_wins_over_paragraphs() {
        let doc = parse(
            "<problem><p>Intro</p><multiplechoiceresponse><label>Pick <b>one</b></label>\
             </multiplechoiceresponse></problem>",
        );
        assert_eq!(
            select_prompt(&doc, &PromptRule::DEFAULT_ORDER),
            Prompt::Label("<label>Pick <b>one</b></label>".to_string())
        );
    }

    #[test]
    fn test_rule_order_is_configurable() {
        let doc = parse("<problem><p>Intro</p><label>Stem</label></problem>");
        let rules = [PromptRule::ParagraphRun, PromptRule::Label];
        assert_eq!(
            select_prompt(&doc, &rules),
            Prompt::Paragraphs(vec!["Intro".to_string()])
        );
    }

    #[test]
    fn test_paragraph_run_keeps_inline_markup() {
        let doc = parse(
            "<problem><p> First <code>x</code> </p><p>Second</p><ul><li>a</li></ul><p>Late</p></problem>",
        );
        assert_eq!(
            PromptRule::ParagraphRun.apply(&doc),
            Some(Prompt::Paragraphs(vec![
                "First <code>x</code>".to_string(),
                "Second".to_string()
            ]))
        );
    }

    #[test]
    fn test_missing_prompt() {
        let doc = parse("<problem><choiceresponse/></problem>");
        assert_eq!(select_prompt(&doc, &PromptRule::DEFAULT_ORDER), Prompt::Missing);
        assert_eq!(select_prompt(&doc, &[]), Prompt::Missing);
        assert_eq!(
            render_prompt(&Prompt::Missing),
            "<pl-question-panel>\n</pl-question-panel>\n"
        );
    }

    #[test]
    fn test_render_paragraphs() {
        let prompt = Prompt::Paragraphs(vec!["A".into(), "B".into()]);
        assert_eq!(
            render_prompt(&prompt),
            "<pl-question-panel>\n    <p>A</p>\n    <p>B</p>\n</pl-question-panel>\n"
        );
    }
}
