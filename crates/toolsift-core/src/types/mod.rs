//! Core types for tool filtering
//!
//! This module contains the shared message and tool types.

mod message;
mod tool;

pub use message::{ChatMessage, ContentPart, MessageRole, MessageContent};
pub use tool::{Tool, ToolCall, ToolConfig, ParsedTool};
