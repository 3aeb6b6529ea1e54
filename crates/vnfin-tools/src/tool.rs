//! Tool trait definition

use crate::{Result, ToolError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use vnfin_llm::ToolDefinition;

/// Trait for tools that the agent can execute
///
/// Each tool provides a name, a description the LLM reads to decide when
/// to call it, and a JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value. A `Value::String` is passed to the model
    /// verbatim, anything else as JSON text.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique (case-insensitively) within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;

    /// Definition advertised to the LLM
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// Deserialize tool arguments, treating `null` as an empty object
pub fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}

/// Text sent back to the model for a tool output
pub fn render_output(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default = "default_limit")]
        limit: u32,
    }

    fn default_limit() -> u32 {
        5
    }

    #[test]
    fn test_parse_params_null_is_empty_object() {
        let params: Params = parse_params(Value::Null).unwrap();
        assert_eq!(params.limit, 5);
    }

    #[test]
    fn test_parse_params_rejects_wrong_type() {
        let err = parse_params::<Params>(json!({"limit": "many"})).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[test]
    fn test_parse_params_rejects_raw_text() {
        let err = parse_params::<Params>(json!("{\"limit\": 3")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[test]
    fn test_render_output() {
        assert_eq!(render_output(&json!("symbol,year\nFPT,2023")), "symbol,year\nFPT,2023");
        assert_eq!(render_output(&json!(["FPT", "CMG"])), r#"["FPT","CMG"]"#);
        assert_eq!(render_output(&json!({})), "{}");
    }
}
