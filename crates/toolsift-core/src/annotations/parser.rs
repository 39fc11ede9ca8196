//! Annotation block extraction
//!
//! A description may end with a YAML block introduced by a `---` line:
//!
//! ```text
//! Look up the weather for a city.
//! ---
//! keywords: [weather, forecast]
//! dependsOn: [geocode]
//! ```
//!
//! Parse failures never abort tool loading. They are logged and the tool
//! proceeds without annotations.

use serde_yaml::Value;

use crate::log_warn;
use crate::logging::Logger;
use crate::types::{ParsedTool, Tool, ToolConfig};

/// Line that opens the annotation block
pub const CONFIG_MARKER: &str = "---";

/// Reasons an annotation block is rejected
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("`dependsOn` and `keywords` must be lists of strings: {0}")]
    InvalidShape(serde_yaml::Error),
}

/// Result of splitting a description
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDescription {
    pub clean_description: String,
    pub configuration: Option<ToolConfig>,
    /// Whether an annotation block was found, even one that failed to parse
    pub has_block: bool,
}

/// Split a description into prose and annotation block, parsing the block.
///
/// Without a block the trimmed text is returned and no configuration. A
/// malformed block is still stripped; a warning is logged and no
/// configuration is returned.
pub fn parse_description(text: &str, logger: &dyn Logger) -> ParsedDescription {
    let Some((prose, block)) = split_block(text) else {
        return ParsedDescription {
            clean_description: text.trim().to_string(),
            configuration: None,
            has_block: false,
        };
    };

    let configuration = match parse_block(block) {
        Ok(config) => config,
        Err(e) => {
            log_warn!(logger, "[Annotations] Ignoring malformed tool configuration: {}", e);
            None
        }
    };

    ParsedDescription {
        clean_description: prose.trim().to_string(),
        configuration,
        has_block: true,
    }
}

/// Parse every tool, preserving input order.
///
/// A block in the description takes precedence. The configuration supplied
/// on the tool record is used only when the description has no block; a
/// malformed block leaves the tool without configuration.
pub fn parse_all(tools: Vec<Tool>, logger: &dyn Logger) -> Vec<ParsedTool> {
    tools
        .into_iter()
        .map(|tool| {
            let parsed = parse_description(&tool.description, logger);
            let configuration = if parsed.has_block {
                parsed.configuration
            } else {
                tool.configuration
            };
            ParsedTool {
                configuration,
                name: tool.name,
                original_description: tool.description,
                clean_description: parsed.clean_description,
                input_schema: tool.input_schema,
            }
        })
        .collect()
}

/// Locate the trailing annotation block; returns (prose, block).
///
/// Marker lines are tried from the last one back, so earlier `---` lines in
/// the prose (horizontal rules) stay in the description. The last marker
/// opening a YAML mapping wins; failing that, the last marker followed by
/// anything is taken as a malformed block, and failing that the last marker.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let mut markers = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim() == CONFIG_MARKER {
            markers.push((offset, offset + line.len()));
        }
        offset += line.len();
    }

    let candidates: Vec<(&str, &str)> = markers
        .iter()
        .rev()
        .map(|&(start, end)| (&text[..start], strip_closing_marker(&text[end..])))
        .collect();

    candidates
        .iter()
        .find(|(_, block)| opens_mapping(block))
        .or_else(|| candidates.iter().find(|(_, block)| !block.trim().is_empty()))
        .or_else(|| candidates.first())
        .copied()
}

fn opens_mapping(block: &str) -> bool {
    !block.trim().is_empty()
        && matches!(serde_yaml::from_str::<Value>(block), Ok(Value::Mapping(_)))
}

fn strip_closing_marker(block: &str) -> &str {
    let trimmed = block.trim_end();
    match trimmed.rsplit_once('\n') {
        Some((body, last)) if last.trim() == CONFIG_MARKER => body,
        None if trimmed.trim() == CONFIG_MARKER => "",
        _ => block,
    }
}

fn parse_block(block: &str) -> Result<Option<ToolConfig>, AnnotationError> {
    if block.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(block)?;
    match value {
        Value::Null => Ok(None),
        Value::Mapping(_) => serde_yaml::from_value(value)
            .map(Some)
            .map_err(AnnotationError::InvalidShape),
        other => Err(AnnotationError::NotAMapping(kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
