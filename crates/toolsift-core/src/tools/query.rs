//! Query text extraction from conversation history

use crate::types::{ChatMessage, MessageRole};

/// Text extracted from a conversation window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedQuery {
    /// Non-empty message texts joined with single spaces
    pub text: String,
    /// Total length of the supplied history, whatever window was scanned
    pub messages_processed: usize,
}

/// Build the query text from `messages[start..]`.
///
/// Tool responses and assistant messages that invoke tools are skipped.
/// A `start` past the end yields an empty window.
pub fn extract_query(messages: &[ChatMessage], start: usize) -> ExtractedQuery {
    let window = messages.get(start..).unwrap_or_default();

    let text = window
        .iter()
        .filter(|m| expresses_intent(m))
        .map(|m| m.content.plain_text())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ExtractedQuery {
        text,
        messages_processed: messages.len(),
    }
}

fn expresses_intent(message: &ChatMessage) -> bool {
    match message.role {
        MessageRole::Tool => false,
        MessageRole::Assistant => !message.has_tool_invocation(),
        MessageRole::User => true,
    }
}
