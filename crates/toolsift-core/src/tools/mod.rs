//! Tool filtering engine
//!
//! Narrows a fixed tool list to the tools relevant to a conversation.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  ToolFilter::with_logger(tools, logger)     │
//! │    - parses annotation blocks               │
//! │    - validates dependsOn references         │
//! └─────────────────────────────────────────────┘
//!           │
//!           │ filter(FilterRequest) per turn
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  query extraction  (user/assistant text)    │
//! │  keyword matching  (tools w/o keywords pass)│
//! │  dependency expansion (one hop)             │
//! │  maxTools truncation (construction order)   │
//! └─────────────────────────────────────────────┘
//! ```

mod error;
mod filter;
mod matching;
mod query;
mod shared;

pub use error::ToolFilterError;
pub use filter::{FilterRequest, FilterResult, ToolFilter};
pub use matching::{keyword_matches, match_by_keywords};
pub use query::{extract_query, ExtractedQuery};
pub use shared::SharedToolFilter;
