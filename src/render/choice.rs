//! Choice-family emitter: single/multi choice and checkbox problems.

use crate::error::{Error, Result};
use crate::model::{tags, Choice, EmissionResult, Element, ProblemShape};
use crate::observe::{ConversionEvent, ConversionObserver};

use super::hints::{
    collect_explanation, collect_hints, render_explanation, render_hints, solution_containers,
};
use super::markup::{join_blocks, MarkupBuilder};
use super::prompt::{observed_prompt, render_prompt};
use super::RenderOptions;

/// Collect every `<choice>` in document order.
///
/// Only the exact attribute value `"true"` marks a choice correct. The
/// text keeps inline markup and drops `<choicehint>` feedback.
pub fn collect_choices(doc: &Element) -> Vec<Choice> {
    doc.find_all(tags::CHOICE)
        .into_iter()
        .map(|choice| Choice {
            text: choice.inner_xml_except(tags::CHOICE_HINT).trim().to_string(),
            is_correct: choice.attr(tags::ATTR_CORRECT) == Some("true"),
        })
        .collect()
}

/// Markup tag of the answer control for a choice shape.
fn control_tag(shape: ProblemShape) -> Option<&'static str> {
    match shape {
        ProblemShape::SingleOrMultiChoice => Some("pl-multiple-choice"),
        ProblemShape::Checkbox => Some("pl-checkbox"),
        _ => None,
    }
}

fn render_control(tag: &str, choices: &[Choice], options: &RenderOptions) -> String {
    let mut b = MarkupBuilder::new();
    b.open("div", &[("class", "card-body")]).open(
        tag,
        &[
            ("answers-name", options.choice_answers_name.as_str()),
            ("fixed-order", bool_attr(options.fixed_order)),
            ("partial-credit", bool_attr(options.partial_credit)),
        ],
    );
    for choice in choices {
        b.element(
            "pl-answer",
            &[("correct", bool_attr(choice.is_correct))],
            &choice.text,
        );
    }
    b.close(tag).close("div");
    b.finish()
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Emit question markup for a choice-family problem.
///
/// Fails with [`Error::ShapeMismatch`] for any non-choice shape. The
/// result never carries an answer key.
pub fn emit_choice(
    doc: &Element,
    shape: ProblemShape,
    options: &RenderOptions,
    observer: &mut dyn ConversionObserver,
) -> Result<EmissionResult> {
    let tag = control_tag(shape).ok_or_else(|| Error::ShapeMismatch {
        shape: shape.to_string(),
        emitter: "choice",
    })?;

    let prompt = observed_prompt(doc, &options.prompt_rules, observer);

    let choices = collect_choices(doc);
    observer.on_event(&ConversionEvent::ChoicesCollected {
        total: choices.len(),
        correct: choices.iter().filter(|c| c.is_correct).count(),
    });

    let hints = collect_hints(doc);
    observer.on_event(&ConversionEvent::HintsCollected { count: hints.len() });

    // Only the first worked solution applies to choice problems.
    let explanation = solution_containers(doc)
        .first()
        .map(|container| collect_explanation(container));
    observer.on_event(&ConversionEvent::ExplanationsCollected {
        containers: usize::from(explanation.is_some()),
        paragraphs: explanation.as_ref().map_or(0, |e| e.paragraphs.len()),
    });

    let markup = join_blocks(vec![
        render_prompt(&prompt),
        render_control(tag, &choices, options),
        render_hints(&hints, options),
        explanation.as_ref().map(render_explanation).unwrap_or_default(),
    ]);

    Ok(EmissionResult::new(shape, markup))
}
