//! Keyword matching
//!
//! Containment of the keyword in the whole query is checked first; only
//! then are individual query words compared. Words of two characters or
//! fewer never take part in word-level matching.

use crate::types::ParsedTool;

/// Shortest query word considered for word-level matching
const MIN_WORD_LEN: usize = 3;

/// Keep the tools relevant to `query`, preserving order.
///
/// Tools without keywords always pass, as does every tool when the query
/// is empty. Otherwise any single matching keyword is enough.
pub fn match_by_keywords<'a, I>(tools: I, query: &str) -> Vec<&'a ParsedTool>
where
    I: IntoIterator<Item = &'a ParsedTool>,
{
    let query = query.to_lowercase();
    if query.trim().is_empty() {
        return tools.into_iter().collect();
    }

    let words: Vec<&str> = query
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN)
        .collect();

    tools
        .into_iter()
        .filter(|tool| {
            let keywords = tool.keywords();
            keywords.is_empty() || keywords.iter().any(|k| keyword_matches(k, &query, &words))
        })
        .collect()
}

/// Whether `keyword` matches a lowercase query and its eligible words
pub fn keyword_matches(keyword: &str, query: &str, words: &[&str]) -> bool {
    let keyword = keyword.to_lowercase();
    if query.contains(&keyword) {
        return true;
    }
    words.iter().any(|word| words_overlap(word, &keyword))
}

fn words_overlap(word: &str, keyword: &str) -> bool {
    word.contains(keyword)
        || keyword.contains(word)
        || keyword.starts_with(word)
        || word.starts_with(keyword)
}
