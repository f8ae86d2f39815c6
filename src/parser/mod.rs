//! XML parsing for OLX course exports.

mod options;
mod xml_parser;

pub use options::ParseOptions;
pub use xml_parser::{strip_bom, OlxParser};
