//! Error types for olx2pl library.

use std::io;
use thiserror::Error;

/// Result type alias for olx2pl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting OLX content.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The XML input is not well-formed.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute value or entity could not be unescaped.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// The input bytes are not valid UTF-8.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Error serializing metadata or reports.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input contained no root element.
    #[error("Document has no root element")]
    EmptyDocument,

    /// The root element is not the kind the caller asked for.
    #[error("Expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        /// Tag the caller expected
        expected: String,
        /// Tag actually found
        found: String,
    },

    /// The problem carries both a multiple-choice and a checkbox marker.
    #[error("Ambiguous problem shape: both <multiplechoiceresponse> and <choiceresponse> present")]
    AmbiguousShape,

    /// The problem matches none of the supported shapes.
    #[error("Unrecognized problem shape (top-level tags: {})", tags.join(", "))]
    UnrecognizedShape {
        /// Direct-child tags of the problem root, in document order
        tags: Vec<String>,
    },

    /// An emitter was handed a shape from another family.
    #[error("Shape {shape} cannot be rendered by the {emitter} emitter")]
    ShapeMismatch {
        /// Display name of the offending shape
        shape: String,
        /// Emitter that rejected it
        emitter: &'static str,
    },

    /// A substructure the shape depends on is missing or empty.
    #[error("Malformed problem structure: {0}")]
    MalformedSubstructure(String),

    /// A numeric answer is not a plain numeric literal.
    #[error("Invalid numeric answer {answer:?}: expected a numeric literal")]
    InvalidAnswer {
        /// Raw attribute value
        answer: String,
    },

    /// A required attribute is missing from a course element.
    #[error("<{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        /// Element tag
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error describes problem content the converter cannot
    /// handle, as opposed to an I/O or parsing failure.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Error::AmbiguousShape
                | Error::UnrecognizedShape { .. }
                | Error::MalformedSubstructure(_)
                | Error::InvalidAnswer { .. }
        )
    }

    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Error::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }
}
