//! Tool catalog contents

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use crate::logging::SharedLogger;
use crate::tools::{FilterRequest, ToolFilter};
use crate::types::{ChatMessage, Tool};

/// Default filter settings stored alongside the tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tools: Option<usize>,
    #[serde(default)]
    pub only_new_messages: bool,
}

impl FilterDefaults {
    /// Create a request for `messages` carrying these defaults
    pub fn request(&self, messages: Vec<ChatMessage>) -> FilterRequest {
        FilterRequest {
            messages,
            max_tools: self.max_tools,
            only_new_messages: self.only_new_messages,
        }
    }
}

/// Tool list plus filter defaults, as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCatalog {
    #[serde(default)]
    pub tools: Vec<Tool>,

    #[serde(default)]
    pub defaults: FilterDefaults,
}

impl ToolCatalog {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self {
            tools,
            defaults: FilterDefaults::default(),
        }
    }

    /// Build a filter over this catalog's tools
    pub fn build_filter(&self, logger: SharedLogger) -> ConfigResult<ToolFilter> {
        Ok(ToolFilter::with_logger(self.tools.clone(), logger)?)
    }
}
