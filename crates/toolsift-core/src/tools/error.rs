//! Filter construction errors

use thiserror::Error;

/// Errors raised while building a `ToolFilter`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolFilterError {
    /// A `dependsOn` entry names a tool that is not in the list
    #[error("Tool \"{tool}\" depends on \"{dependency}\" which is not found in the provided tools list.")]
    MissingDependency { tool: String, dependency: String },
}

impl ToolFilterError {
    pub fn missing_dependency(tool: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::MissingDependency {
            tool: tool.into(),
            dependency: dependency.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_message() {
        let err = ToolFilterError::missing_dependency("X", "Y");
        assert_eq!(
            err.to_string(),
            "Tool \"X\" depends on \"Y\" which is not found in the provided tools list."
        );
    }
}
