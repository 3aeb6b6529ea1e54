//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool execution
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors a tool reports back to the model
#[derive(Error, Debug)]
pub enum ToolError {
    /// Arguments did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The tool ran but its data source failed
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    /// No tool is registered under the requested name
    #[error("Tool not found: {0}")]
    NotFound(String),
}

/// Output serialization; argument errors go through `parse_params`
impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::ExecutionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_is_execution_failure() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let tool_err: ToolError = err.into();
        assert!(matches!(tool_err, ToolError::ExecutionFailed(_)));
    }
}
