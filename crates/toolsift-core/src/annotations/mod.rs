//! Annotation parser
//!
//! Extracts the filtering configuration embedded at the end of a tool
//! description and produces the clean description offered to the model.

mod parser;

pub use parser::{parse_all, parse_description, AnnotationError, ParsedDescription, CONFIG_MARKER};
