//! Numeric-family emitter: numeric inputs plus a generated answer key.
//!
//! Three sub-families differ only in how sub-questions are found:
//!
//! - single: one marker, one input named `ans`, no per-input prompt;
//! - with lists: the i-th marker is paired with the i-th `<ul>`, whose
//!   first item is the prompt;
//! - freeform: one pre-order walk in which paragraphs after the first
//!   marker accumulate into the prompt of the next marker.

use crate::error::{Error, Result};
use crate::model::{tags, EmissionResult, Element, NumericAnswer, ProblemShape, SubQuestion};
use crate::observe::{ConversionEvent, ConversionObserver};

use super::answer_key::AnswerKey;
use super::hints::{
    collect_explanation, collect_hints, render_explanation, render_hints, solution_containers,
};
use super::markup::{join_blocks, MarkupBuilder};
use super::prompt::{observed_prompt, render_prompt};
use super::RenderOptions;

fn marker_answer(marker: &Element) -> Result<NumericAnswer> {
    let raw = marker.attr(tags::ATTR_ANSWER).ok_or_else(|| {
        Error::MalformedSubstructure(format!(
            "<{}> without `{}` attribute",
            tags::NUMERICAL,
            tags::ATTR_ANSWER
        ))
    })?;
    NumericAnswer::parse(raw)
}

/// Extract the sub-questions of a numeric problem, in answer-slot order.
pub fn collect_sub_questions(doc: &Element, shape: ProblemShape) -> Result<Vec<SubQuestion>> {
    match shape {
        ProblemShape::SingleNumeric => single(doc),
        ProblemShape::MultiNumericWithLists => with_lists(doc),
        ProblemShape::MultiNumericFreeform => freeform(doc),
        other => Err(mismatch(other)),
    }
}

fn mismatch(shape: ProblemShape) -> Error {
    Error::ShapeMismatch {
        shape: shape.to_string(),
        emitter: "numeric",
    }
}

fn single(doc: &Element) -> Result<Vec<SubQuestion>> {
    let marker = doc.find(tags::NUMERICAL).ok_or_else(|| {
        Error::MalformedSubstructure(format!("no <{}> element", tags::NUMERICAL))
    })?;
    Ok(vec![SubQuestion {
        index: None,
        prompt: String::new(),
        answer: marker_answer(marker)?,
    }])
}

fn with_lists(doc: &Element) -> Result<Vec<SubQuestion>> {
    let markers = doc.find_all(tags::NUMERICAL);
    let lists = doc.find_all(tags::LIST);
    if markers.len() != lists.len() {
        return Err(Error::MalformedSubstructure(format!(
            "{} numeric markers but {} lists",
            markers.len(),
            lists.len()
        )));
    }

    markers
        .into_iter()
        .zip(lists)
        .enumerate()
        .map(|(i, (marker, list))| {
            let item = list.child_elements().next().ok_or_else(|| {
                Error::MalformedSubstructure(format!("list {} has no items", i + 1))
            })?;
            Ok(SubQuestion {
                index: Some(i + 1),
                prompt: item.inner_xml().trim().to_string(),
                answer: marker_answer(marker)?,
            })
        })
        .collect()
}

fn freeform(doc: &Element) -> Result<Vec<SubQuestion>> {
    let mut questions = Vec::new();
    let mut pending = String::new();
    let mut after_marker = false;

    for element in doc.iter() {
        if element.is(tags::NUMERICAL) {
            questions.push(SubQuestion {
                index: Some(questions.len() + 1),
                prompt: pending.trim().to_string(),
                answer: marker_answer(element)?,
            });
            pending.clear();
            after_marker = true;
        } else if after_marker && element.is(tags::PARAGRAPH) {
            pending.push_str(element.inner_xml().trim());
            pending.push(' ');
        }
    }

    Ok(questions)
}

fn render_input(question: &SubQuestion, options: &RenderOptions) -> String {
    let slot = question.slot();
    let label = format!("${}=$", slot);
    let rtol = format!("{:e}", options.rtol);
    let atol = format!("{:e}", options.atol);

    let mut b = MarkupBuilder::new();
    b.open("div", &[("class", "card my-2")])
        .open("div", &[("class", "card-body")]);
    if !question.prompt.is_empty() {
        b.open("pl-question-panel", &[])
            .element("p", &[], &question.prompt)
            .close("pl-question-panel");
    }
    b.element(
        "pl-number-input",
        &[
            ("answers-name", slot.as_str()),
            ("label", label.as_str()),
            ("rtol", rtol.as_str()),
            ("atol", atol.as_str()),
        ],
        "",
    );
    b.close("div").close("div");
    b.finish()
}

/// Emit question markup and answer key for a numeric-family problem.
///
/// Fails with [`Error::ShapeMismatch`] for non-numeric shapes, with
/// [`Error::MalformedSubstructure`] when a list is empty or a marker has
/// no answer, and with [`Error::InvalidAnswer`] when an answer is not a
/// numeric literal.
pub fn emit_numeric(
    doc: &Element,
    shape: ProblemShape,
    options: &RenderOptions,
    observer: &mut dyn ConversionObserver,
) -> Result<EmissionResult> {
    if !shape.is_numeric() {
        return Err(mismatch(shape));
    }

    let questions = collect_sub_questions(doc, shape)?;
    let prompt = observed_prompt(doc, &options.prompt_rules, observer);

    let mut blocks = vec![render_prompt(&prompt)];
    for question in &questions {
        observer.on_event(&ConversionEvent::SubQuestion {
            slot: question.slot(),
            prompt: question.prompt.clone(),
            answer: question.answer.to_string(),
        });
        blocks.push(render_input(question, options));
    }

    let hints = collect_hints(doc);
    observer.on_event(&ConversionEvent::HintsCollected { count: hints.len() });
    blocks.push(render_hints(&hints, options));

    let explanations: Vec<_> = solution_containers(doc)
        .into_iter()
        .map(collect_explanation)
        .collect();
    observer.on_event(&ConversionEvent::ExplanationsCollected {
        containers: explanations.len(),
        paragraphs: explanations.iter().map(|e| e.paragraphs.len()).sum(),
    });
    blocks.extend(explanations.iter().map(render_explanation));

    let key = AnswerKey::from_sub_questions(&questions);
    Ok(EmissionResult::new(shape, join_blocks(blocks)).with_answer_key(key.to_code()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{NullObserver, RecordingObserver};
    use crate::parser::OlxParser;

    fn parse(xml: &str) -> Element {
        OlxParser::new().parse_str(xml).unwrap()
    }

    fn emit(xml: &str, shape: ProblemShape) -> Result<EmissionResult> {
        emit_numeric(&parse(xml), shape, &RenderOptions::default(), &mut NullObserver)
    }

    #[test]
    fn test_single_numeric() {
        let result = emit(
            r#"<problem><p>What is pi?</p><numericalresponse answer="3.14"><formulaequationinput/></numericalresponse></problem>"#,
            ProblemShape::SingleNumeric,
        )
        .unwrap();

        assert_eq!(
            result.question_markup,
            "<pl-question-panel>\n\
             \x20   <p>What is pi?</p>\n\
             </pl-question-panel>\n\
             \n\
             <div class=\"card my-2\">\n\
             \x20   <div class=\"card-body\">\n\
             \x20       <pl-number-input answers-name=\"ans\" label=\"$ans=$\" rtol=\"1e-2\" atol=\"1e-2\"></pl-number-input>\n\
             \x20   </div>\n\
             </div>\n"
        );
        assert_eq!(
            result.answer_key.as_deref(),
            Some("def generate(data):\n    data[\"correct_answers\"][\"ans\"] = 3.14\n")
        );
    }

    #[test]
    fn test_with_lists_pairs_by_position() {
        let xml = r#"<problem>
  <p>A block slides.</p>
  <ul><li>Part A</li></ul>
  <numericalresponse answer="1"/>
  <ul><li>Part <b>B</b></li><li>unused</li></ul>
  <numericalresponse answer="2"/>
</problem>"#;
        let questions = collect_sub_questions(&parse(xml), ProblemShape::MultiNumericWithLists).unwrap();
        let prompts: Vec<&str> = questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["Part A", "Part <b>B</b>"]);

        let result = emit(xml, ProblemShape::MultiNumericWithLists).unwrap();
        assert!(result.question_markup.contains("answers-name=\"ans_1\""));
        assert!(result.question_markup.contains("            <p>Part A</p>\n"));
        let key = result.answer_key.unwrap();
        assert!(key.contains("[\"ans_1\"] = 1\n"));
        assert!(key.contains("[\"ans_2\"] = 2\n"));
    }

    #[test]
    fn test_with_lists_empty_list_is_malformed() {
        let err = emit(
            r#"<problem><ul/><numericalresponse answer="1"/><ul><li>b</li></ul><numericalresponse answer="2"/></problem>"#,
            ProblemShape::MultiNumericWithLists,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedSubstructure(_)));
    }

    #[test]
    fn test_freeform_accumulates_paragraphs() {
        let xml = r#"<problem>
  <p>Shared setup.</p>
  <numericalresponse answer="10"/>
  <p>Now double it.</p>
  <p>Units: m.</p>
  <numericalresponse answer="20"/>
  <p>Trailing note.</p>
</problem>"#;
        let questions = collect_sub_questions(&parse(xml), ProblemShape::MultiNumericFreeform).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].prompt, "");
        assert_eq!(questions[1].prompt, "Now double it. Units: m.");
        assert_eq!(questions[1].slot(), "ans_2");

        let result = emit(xml, ProblemShape::MultiNumericFreeform).unwrap();
        // The first input has no own prompt panel.
        assert_eq!(result.question_markup.matches("<pl-question-panel>").count(), 2);
        assert!(!result.question_markup.contains("Trailing note."));
    }

    #[test]
    fn test_missing_answer_is_malformed() {
        let err = emit(
            "<problem><numericalresponse/></problem>",
            ProblemShape::SingleNumeric,
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedSubstructure(_)));
    }

    #[test]
    fn test_non_numeric_answer_is_rejected() {
        let err = emit(
            r#"<problem><numericalresponse answer="__import__('os').system('x')"/></problem>"#,
            ProblemShape::SingleNumeric,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidAnswer { .. }));
    }

    #[test]
    fn test_all_solution_containers_rendered() {
        let result = emit(
            r#"<problem><numericalresponse answer="1"/>
  <solution><div class="detailed-solution"><p>One</p></div></solution>
  <solution><div class="detailed-solution"><p>Two</p></div></solution>
</problem>"#,
            ProblemShape::SingleNumeric,
        )
        .unwrap();
        assert_eq!(result.question_markup.matches("<pl-answer-panel>").count(), 2);
    }

    #[test]
    fn test_sub_question_events() {
        let mut observer = RecordingObserver::new();
        emit_numeric(
            &parse(r#"<problem><label>x?</label><numericalresponse answer="-1e3"/></problem>"#),
            ProblemShape::SingleNumeric,
            &RenderOptions::default(),
            &mut observer,
        )
        .unwrap();
        assert!(observer.events().contains(&ConversionEvent::SubQuestion {
            slot: "ans".into(),
            prompt: String::new(),
            answer: "-1e3".into(),
        }));
    }

    #[test]
    fn test_rejects_choice_shape() {
        let err = emit("<problem/>", ProblemShape::Checkbox).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { emitter: "numeric", .. }));
    }

    #[test]
    fn test_custom_tolerance() {
        let options = RenderOptions::new().with_tolerance(5e-3, 0.0);
        let result = emit_numeric(
            &parse(r#"<problem><numericalresponse answer="1"/></problem>"#),
            ProblemShape::SingleNumeric,
            &options,
            &mut NullObserver,
        )
        .unwrap();
        assert!(result.question_markup.contains("rtol=\"5e-3\" atol=\"0e0\""));
    }
}
