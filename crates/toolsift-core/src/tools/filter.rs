//! Keyword-driven tool filter
//!
//! The `ToolFilter` owns the parsed tool list and narrows it for each
//! request:
//!
//! 1. extract query text from the conversation (optionally only the
//!    messages added since the previous call)
//! 2. keep tools whose keywords match, plus every tool without keywords
//! 3. add the direct dependencies of the survivors (one hop)
//! 4. truncate to `max_tools`, keeping construction order

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::ToolFilterError;
use super::matching::match_by_keywords;
use super::query::{extract_query, ExtractedQuery};
use crate::annotations::parse_all;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::types::{ChatMessage, ParsedTool, Tool};
use crate::{log_debug, log_info};

/// Parameters for a single filter call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Full conversation history
    pub messages: Vec<ChatMessage>,
    /// Upper bound on returned tools; `None` or `0` means no limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tools: Option<usize>,
    /// Only read messages added since the previous call
    #[serde(default)]
    pub only_new_messages: bool,
}

impl FilterRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Limit the number of returned tools
    pub fn with_max_tools(mut self, max_tools: usize) -> Self {
        self.max_tools = Some(max_tools);
        self
    }

    /// Restrict matching to messages added since the previous call
    pub fn only_new_messages(mut self, only_new: bool) -> Self {
        self.only_new_messages = only_new;
        self
    }
}

/// Outcome of a filter call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    /// Selected tools in construction order
    pub tools: Vec<ParsedTool>,
    pub total_original_count: usize,
    pub filtered_count: usize,
    /// Human-readable account of what the filter did
    pub reason: String,
    /// Length of the supplied history
    pub messages_processed: usize,
}

impl FilterResult {
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Selected tools as provider-neutral specs with clean descriptions
    pub fn llm_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(Tool::from).collect()
    }
}

/// Filters a fixed tool list against a growing conversation
///
/// One instance per conversation. `filter` takes `&mut self` because it
/// records how many messages it has seen; wrap the filter in
/// [`SharedToolFilter`](super::SharedToolFilter) to share it across threads.
pub struct ToolFilter {
    tools: Vec<ParsedTool>,
    last_processed_message_count: usize,
    logger: SharedLogger,
}

impl ToolFilter {
    /// Build a filter with a silent logger
    pub fn new(tools: Vec<Tool>) -> Result<Self, ToolFilterError> {
        Self::with_logger(tools, NoOpLogger::shared())
    }

    /// Build a filter, parsing every description and validating that each
    /// dependency names a tool in `tools`
    pub fn with_logger(tools: Vec<Tool>, logger: SharedLogger) -> Result<Self, ToolFilterError> {
        let tools = parse_all(tools, logger.as_ref());
        validate_dependencies(&tools)?;

        log_info!(
            logger,
            "[ToolFilter] Loaded {} tools ({} with keywords)",
            tools.len(),
            tools.iter().filter(|t| !t.keywords().is_empty()).count()
        );

        Ok(Self {
            tools,
            last_processed_message_count: 0,
            logger,
        })
    }

    /// All parsed tools in construction order
    pub fn tools(&self) -> &[ParsedTool] {
        &self.tools
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Look up a parsed tool by name
    pub fn get(&self, name: &str) -> Option<&ParsedTool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// History length recorded by the previous call
    pub fn last_processed_message_count(&self) -> usize {
        self.last_processed_message_count
    }

    /// Forget the recorded history length, e.g. when a new conversation starts
    pub fn reset(&mut self) {
        self.last_processed_message_count = 0;
    }

    /// Extract query text and record the history length for the next call
    pub fn extract_query(&mut self, messages: &[ChatMessage], only_new_messages: bool) -> ExtractedQuery {
        let start = if only_new_messages {
            self.last_processed_message_count
        } else {
            0
        };
        let query = extract_query(messages, start);
        self.last_processed_message_count = messages.len();
        query
    }

    /// Keep the tools whose keywords match `query`
    pub fn match_by_keywords<'a>(&self, tools: &'a [ParsedTool], query: &str) -> Vec<&'a ParsedTool> {
        match_by_keywords(tools, query)
    }

    /// Add the direct dependencies of `filtered`, returning tools in
    /// construction order. Dependencies of dependencies are not added.
    pub fn expand_dependencies(&self, filtered: &[&ParsedTool]) -> Vec<&ParsedTool> {
        let mut wanted: HashSet<&str> = filtered.iter().map(|t| t.name.as_str()).collect();
        for tool in filtered {
            wanted.extend(tool.dependencies().iter().map(String::as_str));
        }

        let mut seen = HashSet::new();
        self.tools
            .iter()
            .filter(|t| wanted.contains(t.name.as_str()) && seen.insert(t.name.as_str()))
            .collect()
    }

    /// Select the tools relevant to the conversation in `request`
    pub fn filter(&mut self, request: &FilterRequest) -> FilterResult {
        let ExtractedQuery {
            text: query,
            messages_processed,
        } = self.extract_query(&request.messages, request.only_new_messages);
        let total = self.tools.len();

        let has_query = !query.trim().is_empty();
        let matched = if has_query {
            match_by_keywords(&self.tools, &query)
        } else {
            self.tools.iter().collect()
        };
        let matched_count = matched.len();

        let mut selected = self.expand_dependencies(&matched);
        let added = selected.len().saturating_sub(matched_count);

        let before_truncation = selected.len();
        let limit = request.max_tools.filter(|&n| n > 0);
        if let Some(max) = limit {
            selected.truncate(max);
        }
        let truncated = selected.len() < before_truncation;

        let reason = describe(Summary {
            has_query,
            total,
            matched: matched_count,
            added,
            before_truncation,
            limit: limit.filter(|_| truncated),
        });
        log_debug!(self.logger, "[ToolFilter] {}", reason);

        let tools: Vec<ParsedTool> = selected.into_iter().cloned().collect();
        FilterResult {
            filtered_count: tools.len(),
            tools,
            total_original_count: total,
            reason,
            messages_processed,
        }
    }
}

impl std::fmt::Debug for ToolFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolFilter")
            .field("tools", &self.tool_names())
            .field("last_processed_message_count", &self.last_processed_message_count)
            .finish()
    }
}

fn validate_dependencies(tools: &[ParsedTool]) -> Result<(), ToolFilterError> {
    let names: HashSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    for tool in tools {
        if let Some(missing) = tool.dependencies().iter().find(|d| !names.contains(d.as_str())) {
            return Err(ToolFilterError::missing_dependency(&tool.name, missing));
        }
    }
    Ok(())
}

struct Summary {
    has_query: bool,
    total: usize,
    matched: usize,
    added: usize,
    before_truncation: usize,
    limit: Option<usize>,
}

fn describe(s: Summary) -> String {
    let mut parts = Vec::new();
    if s.has_query {
        parts.push(format!(
            "Keyword filtering kept {} of {} tools",
            s.matched, s.total
        ));
    } else {
        parts.push(format!(
            "No query text to match, kept all {} tools",
            s.total
        ));
    }
    if s.added > 0 {
        parts.push(format!("added {} dependency tools", s.added));
    }
    if let Some(max) = s.limit {
        parts.push(format!(
            "truncated from {} to {} tools (maxTools)",
            s.before_truncation, max
        ));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::types::{ContentPart, MessageRole, ToolCall, ToolConfig};
    use serde_json::json;

    fn tool(name: &str, keywords: &[&str], depends_on: &[&str]) -> Tool {
        let mut config = ToolConfig::new().with_keywords(keywords.iter().copied());
        if !depends_on.is_empty() {
            config = config.with_depends_on(depends_on.iter().copied());
        }
        Tool::new(name, format!("{} tool", name)).with_configuration(config)
    }

    fn catalog() -> Vec<Tool> {
        vec![
            Tool::new("help", "Show help"),
            tool("auth", &["login"], &[]),
            tool("weather", &["weather", "forecast"], &["geocode"]),
            tool("geocode", &["coordinates"], &["auth"]),
            tool("git", &["commit", "branch"], &[]),
        ]
    }

    #[test]
    fn test_construction_rejects_missing_dependency() {
        let tools = vec![tool("a", &["x"], &["b", "ghost"]), tool("b", &["y"], &[])];

        let err = ToolFilter::new(tools).unwrap_err();
        assert_eq!(err, ToolFilterError::missing_dependency("a", "ghost"));
        assert_eq!(
            err.to_string(),
            "Tool \"a\" depends on \"ghost\" which is not found in the provided tools list."
        );
    }

    #[test]
    fn test_construction_validates_annotation_blocks() {
        let tools = vec![Tool::new("deploy", "Deploy\n---\ndependsOn: [build]\n")];
        assert!(matches!(
            ToolFilter::new(tools),
            Err(ToolFilterError::MissingDependency { .. })
        ));
    }

    #[test]
    fn test_circular_dependencies_are_allowed() {
        let tools = vec![tool("a", &["alpha"], &["b"]), tool("b", &["beta"], &["a"])];
        let mut filter = ToolFilter::new(tools).unwrap();

        let result = filter.filter(&FilterRequest::new(vec![ChatMessage::user("alpha")]));
        assert_eq!(result.tool_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_dependencies_are_one_hop() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let result = filter.filter(&FilterRequest::new(vec![ChatMessage::user(
            "what is the weather tomorrow",
        )]));

        // geocode comes in as a dependency of weather; auth (geocode's dependency) does not
        assert_eq!(result.tool_names(), vec!["help", "weather", "geocode"]);
        assert_eq!(result.total_original_count, 5);
        assert_eq!(result.filtered_count, 3);
        assert!(result.reason.contains("Keyword filtering kept 2 of 5 tools"));
        assert!(result.reason.contains("added 1 dependency tools"));
    }

    #[test]
    fn test_result_follows_construction_order() {
        let tools = vec![
            tool("z_dep", &["nomatch"], &[]),
            tool("m", &["middle"], &[]),
            tool("a", &["first"], &["z_dep"]),
        ];
        let mut filter = ToolFilter::new(tools).unwrap();

        let result = filter.filter(&FilterRequest::new(vec![ChatMessage::user("first then middle")]));
        assert_eq!(result.tool_names(), vec!["z_dep", "m", "a"]);
    }

    #[test]
    fn test_empty_messages_return_everything() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let result = filter.filter(&FilterRequest::new(vec![]));

        assert_eq!(result.tool_names(), filter.tool_names());
        assert_eq!(result.messages_processed, 0);
        assert_eq!(result.reason, "No query text to match, kept all 5 tools");
    }

    #[test]
    fn test_no_matches_keeps_only_unannotated_tools() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let result = filter.filter(&FilterRequest::new(vec![ChatMessage::user("tell me a joke")]));
        assert_eq!(result.tool_names(), vec!["help"]);
    }

    #[test]
    fn test_only_new_messages_window() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let mut messages = vec![ChatMessage::user("show the weather")];

        let first = filter.filter(&FilterRequest::new(messages.clone()).only_new_messages(true));
        assert_eq!(first.tool_names(), vec!["help", "weather", "geocode"]);
        assert_eq!(filter.last_processed_message_count(), 1);

        messages.push(ChatMessage::assistant("It will rain."));
        messages.push(ChatMessage::user("now commit my changes"));

        let second = filter.filter(&FilterRequest::new(messages.clone()).only_new_messages(true));
        assert_eq!(second.tool_names(), vec!["help", "git"]);
        assert_eq!(second.messages_processed, 3);

        // without the flag, the whole history is read again
        let full = filter.filter(&FilterRequest::new(messages));
        assert_eq!(full.tool_names(), vec!["help", "weather", "geocode", "git"]);
    }

    #[test]
    fn test_only_new_messages_with_nothing_new() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let messages = vec![ChatMessage::user("commit")];

        filter.filter(&FilterRequest::new(messages.clone()));
        let again = filter.filter(&FilterRequest::new(messages).only_new_messages(true));
        assert_eq!(again.filtered_count, 5);
        assert_eq!(again.messages_processed, 1);
    }

    #[test]
    fn test_shrunk_history_yields_empty_window() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        filter.filter(&FilterRequest::new(vec![
            ChatMessage::user("a"),
            ChatMessage::user("b"),
            ChatMessage::user("c"),
        ]));

        let result = filter.filter(
            &FilterRequest::new(vec![ChatMessage::user("commit")]).only_new_messages(true),
        );
        assert_eq!(result.filtered_count, 5);
        assert_eq!(filter.last_processed_message_count(), 1);
    }

    #[test]
    fn test_reset_clears_counter() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        filter.filter(&FilterRequest::new(vec![ChatMessage::user("commit")]));
        filter.reset();
        assert_eq!(filter.last_processed_message_count(), 0);

        let result = filter.filter(
            &FilterRequest::new(vec![ChatMessage::user("commit")]).only_new_messages(true),
        );
        assert_eq!(result.tool_names(), vec!["help", "git"]);
    }

    #[test]
    fn test_max_tools_truncates_prefix() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let request = FilterRequest::new(vec![ChatMessage::user("weather and commit")]).with_max_tools(2);

        let result = filter.filter(&request);
        assert_eq!(result.tool_names(), vec!["help", "weather"]);
        assert!(result.reason.contains("truncated from 4 to 2 tools"));

        let roomy = filter.filter(&FilterRequest::new(vec![ChatMessage::user("commit")]).with_max_tools(10));
        assert_eq!(roomy.filtered_count, 2);
        assert!(!roomy.reason.contains("truncated"));
    }

    #[test]
    fn test_zero_max_tools_means_unlimited() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let result = filter.filter(&FilterRequest::new(vec![]).with_max_tools(0));
        assert_eq!(result.filtered_count, 5);
    }

    #[test]
    fn test_tool_traffic_is_not_intent() {
        let mut filter = ToolFilter::new(catalog()).unwrap();
        let messages = vec![
            ChatMessage::user("hello"),
            ChatMessage::assistant("checking the forecast")
                .with_tool_calls(vec![ToolCall::new("c1", "weather", json!({}))]),
            ChatMessage::with_parts(
                MessageRole::Tool,
                vec![ContentPart::text("commit log: fix branch")],
            ),
        ];

        let result = filter.filter(&FilterRequest::new(messages));
        assert_eq!(result.tool_names(), vec!["help"]);
        assert_eq!(result.messages_processed, 3);
    }

    #[test]
    fn test_match_by_keywords_method() {
        let filter = ToolFilter::new(catalog()).unwrap();

        let matched = filter.match_by_keywords(filter.tools(), "create a branch");
        let names: Vec<&str> = matched.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["help", "git"]);

        // no dependency expansion at this stage
        let matched = filter.match_by_keywords(filter.tools(), "weather");
        let names: Vec<&str> = matched.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["help", "weather"]);
    }

    #[test]
    fn test_expand_dependencies_directly() {
        let filter = ToolFilter::new(catalog()).unwrap();
        let weather = filter.get("weather").unwrap();
        let git = filter.get("git").unwrap();

        let expanded = filter.expand_dependencies(&[git, weather]);
        let names: Vec<&str> = expanded.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["weather", "geocode", "git"]);
    }

    #[test]
    fn test_duplicate_names_are_deduplicated() {
        let tools = vec![Tool::new("dup", "first"), Tool::new("dup", "second")];
        let mut filter = ToolFilter::new(tools).unwrap();

        let result = filter.filter(&FilterRequest::new(vec![ChatMessage::user("anything")]));
        assert_eq!(result.filtered_count, 1);
        assert_eq!(result.tools[0].clean_description, "first");
    }

    #[test]
    fn test_logging() {
        let logger = Arc::new(MemoryLogger::new());
        let tools = vec![
            Tool::new("broken", "Broken\n---\nkeywords: [oops"),
            tool("git", &["commit"], &[]),
        ];
        let mut filter = ToolFilter::with_logger(tools, logger.clone()).unwrap();
        filter.filter(&FilterRequest::new(vec![ChatMessage::user("commit")]));

        assert_eq!(logger.messages(LogLevel::Warn).len(), 1);
        assert_eq!(
            logger.messages(LogLevel::Info),
            vec!["[ToolFilter] Loaded 2 tools (1 with keywords)"]
        );
        assert_eq!(
            logger.messages(LogLevel::Debug),
            vec!["[ToolFilter] Keyword filtering kept 2 of 2 tools"]
        );

        // the broken tool has no configuration and is always offered
        assert_eq!(filter.get("broken").unwrap().clean_description, "Broken");
    }

    #[test]
    fn test_llm_tools_use_clean_descriptions() {
        let tools = vec![Tool::new("search", "Search the web\n---\nkeywords: [search]")
            .with_schema(json!({"type": "object"}))];
        let mut filter = ToolFilter::new(tools).unwrap();

        let result = filter.filter(&FilterRequest::new(vec![ChatMessage::user("search cats")]));
        let llm = result.llm_tools();
        assert_eq!(llm[0].description, "Search the web");
        assert_eq!(llm[0].input_schema, Some(json!({"type": "object"})));
    }
}
