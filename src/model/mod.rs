//! Document model types for OLX problem content.
//!
//! The element tree is the read-only input of the converter; the problem
//! types are the pieces the emitters extract from it.

mod element;
mod problem;
mod shape;
pub mod tags;

pub use element::{Element, Iter, Node};
pub use problem::{Choice, EmissionResult, Explanation, Hint, NumericAnswer, Prompt, SubQuestion};
pub use shape::ProblemShape;
