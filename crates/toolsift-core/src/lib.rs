//! ToolSift Core
//!
//! Narrows the set of tools offered to a language model by matching the
//! conversation against per-tool keywords, then re-adding the tools that
//! matched tools depend on.
//!
//! ## Annotating tools
//!
//! Keywords and dependencies are declared in a YAML block at the end of a
//! tool description, or supplied directly as a [`ToolConfig`]. Tools with
//! no keywords are always offered.
//!
//! ```rust
//! use toolsift_core::{ChatMessage, FilterRequest, Tool, ToolFilter};
//!
//! let tools = vec![
//!     Tool::new("geocode", "Resolve a place to coordinates\n---\nkeywords: [address]"),
//!     Tool::new(
//!         "weather",
//!         "Get the forecast\n---\nkeywords: [weather]\ndependsOn: [geocode]",
//!     ),
//!     Tool::new("git_commit", "Commit changes\n---\nkeywords: [commit]"),
//! ];
//!
//! let mut filter = ToolFilter::new(tools)?;
//! let result = filter.filter(&FilterRequest::new(vec![
//!     ChatMessage::user("What's the weather in Lisbon?"),
//! ]));
//!
//! assert_eq!(result.tool_names(), vec!["geocode", "weather"]);
//! # Ok::<(), toolsift_core::ToolFilterError>(())
//! ```

pub mod types;
pub mod logging;
pub mod annotations;
pub mod tools;
pub mod config;

// Re-export commonly used types
pub use types::{
    ChatMessage, ContentPart, MessageRole, MessageContent,
    Tool, ToolCall, ToolConfig, ParsedTool,
};

pub use logging::{Logger, SharedLogger, NoOpLogger, ConsoleLogger, MemoryLogger};

pub use annotations::{parse_all, parse_description, ParsedDescription};

pub use tools::{
    ToolFilter, ToolFilterError, FilterRequest, FilterResult,
    SharedToolFilter, ExtractedQuery,
};

pub use config::{CatalogFile, ConfigError, ConfigResult, ToolCatalog, FilterDefaults};
