//! Emitters turning a classified problem into question markup.
//!
//! [`emit`] dispatches on the [`ProblemShape`] to the choice-family or
//! numeric-family emitter. Both build their output from the same shared
//! pieces: the prompt panel, the hidden hints and the answer panels.

mod answer_key;
mod choice;
mod hints;
mod json;
mod markup;
mod numeric;
mod options;
mod prompt;

pub use answer_key::AnswerKey;
pub use choice::{collect_choices, emit_choice};
pub use hints::{
    collect_explanation, collect_hints, render_explanation, render_hints, solution_containers,
};
pub use json::{to_json, JsonFormat};
pub use numeric::{collect_sub_questions, emit_numeric};
pub use options::RenderOptions;
pub use prompt::{render_prompt, select_prompt, PromptRule};

use crate::error::{Error, Result};
use crate::model::{EmissionResult, Element, ProblemShape};
use crate::observe::{ConversionEvent, ConversionObserver};

/// Emit a classified problem.
///
/// An [`ProblemShape::Unrecognized`] document produces no output: the
/// observer is told which top-level tags it had and
/// [`Error::UnrecognizedShape`] is returned.
pub fn emit(
    doc: &Element,
    shape: ProblemShape,
    options: &RenderOptions,
    observer: &mut dyn ConversionObserver,
) -> Result<EmissionResult> {
    if shape.is_choice() {
        return emit_choice(doc, shape, options, observer);
    }
    if shape.is_numeric() {
        return emit_numeric(doc, shape, options, observer);
    }

    let tags: Vec<String> = doc.child_tags().into_iter().map(String::from).collect();
    observer.on_event(&ConversionEvent::Unrecognized { tags: tags.clone() });
    Err(Error::UnrecognizedShape { tags })
}
