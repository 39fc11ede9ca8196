//! Tool definition types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filtering annotations attached to a tool
///
/// A tool without `keywords` is always offered. `depends_on` lists the
/// tools that must accompany this one whenever it is offered (one hop only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Direct dependencies, by tool name
    #[serde(default, alias = "depends_on", skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
    /// Match terms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl ToolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the match terms
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Set the direct dependencies
    pub fn with_depends_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Match terms, empty when none are declared
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// Direct dependencies, empty when none are declared
    pub fn dependencies(&self) -> &[String] {
        self.depends_on.as_deref().unwrap_or_default()
    }
}

/// Tool definition as supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (function name), unique within a tool list
    pub name: String,
    /// Description of what the tool does, possibly carrying an annotation block
    pub description: String,
    /// Annotations supplied directly instead of through the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ToolConfig>,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl Tool {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            configuration: None,
            input_schema: None,
        }
    }

    /// Attach annotations directly
    pub fn with_configuration(mut self, configuration: ToolConfig) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// A tool after its description has been run through the annotation parser
///
/// Built once when the filter is constructed and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTool {
    pub name: String,
    /// The description exactly as supplied
    pub original_description: String,
    /// The description with the annotation block stripped
    pub clean_description: String,
    /// Resolved annotations; a block in the description wins over a
    /// directly supplied configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ToolConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl ParsedTool {
    /// Match terms, empty when the tool opts out of filtering
    pub fn keywords(&self) -> &[String] {
        self.configuration
            .as_ref()
            .map(ToolConfig::keywords)
            .unwrap_or_default()
    }

    /// Direct dependencies
    pub fn dependencies(&self) -> &[String] {
        self.configuration
            .as_ref()
            .map(ToolConfig::dependencies)
            .unwrap_or_default()
    }
}

/// Provider-neutral tool spec built from the clean description
impl From<&ParsedTool> for Tool {
    fn from(parsed: &ParsedTool) -> Self {
        Tool {
            name: parsed.name.clone(),
            description: parsed.clean_description.clone(),
            configuration: None,
            input_schema: parsed.input_schema.clone(),
        }
    }
}

/// Tool call requested by the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}
