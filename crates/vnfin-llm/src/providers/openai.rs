//! OpenAI provider implementation
//!
//! This module implements the LLMProvider trait for OpenAI's chat completion
//! API, including OpenAI-compatible endpoints configured through
//! `OPENAI_API_BASE`.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! ```no_run
//! use vnfin_llm::{CompletionRequest, Message, LLMProvider};
//! use vnfin_llm::providers::OpenAIProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAIProvider::from_env()?;
//!
//!     let request = CompletionRequest::builder("gpt-4o-mini")
//!         .messages(vec![Message::user("Xin chào!")])
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.joined_text());
//!     Ok(())
//! }
//! ```

use crate::model::is_reasoning_model;
use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY` and the base URL from
    /// `OPENAI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = vnfin_utils::env::require("OPENAI_API_KEY")?;
        let config = Self::new(api_key);
        Ok(match vnfin_utils::env::var("OPENAI_API_BASE") {
            Some(base) => config.with_api_base(base),
            None => config,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// OpenAI provider
///
/// Serves `gpt-4o`, `gpt-4o-mini` and the `o`-series reasoning models.
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new OpenAI provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenAIConfig::from_env()?)
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!(
            message_count = request.messages.len(),
            "Sending request to OpenAI API"
        );

        let openai_request = build_request(request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(LLMError::from_status(
                status,
                error_text,
                &openai_request.model,
            ));
        }

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

        let usage = openai_response.usage.unwrap_or_default();
        debug!(
            finish_reason = %choice.finish_reason,
            input_tokens = usage.prompt_tokens,
            output_tokens = usage.completion_tokens,
            "Received response"
        );

        Ok(CompletionResponse {
            message: parse_openai_response(choice.message),
            stop_reason: map_stop_reason(&choice.finish_reason),
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// OpenAI-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAIMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAIFunction,
}

#[derive(Debug, Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct OpenAIToolCall {
    id: String,
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAIFunctionCall,
}

#[derive(Debug, Serialize)]
struct OpenAIFunctionCall {
    name: String,
    arguments: String,
}

// ============================================================================
// OpenAI-specific response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAIResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseToolCall {
    id: String,
    function: OpenAIResponseFunctionCall,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

fn build_request(request: CompletionRequest) -> OpenAIRequest {
    let reasoning = is_reasoning_model(&request.model);
    OpenAIRequest {
        messages: build_openai_messages(request.system, request.messages),
        tools: request.tools.as_deref().map(convert_tools),
        max_tokens: (!reasoning).then_some(request.max_tokens),
        max_completion_tokens: reasoning.then_some(request.max_tokens),
        temperature: if reasoning { None } else { request.temperature },
        model: request.model,
    }
}

/// Build OpenAI messages from our generic format
///
/// The system prompt becomes the first entry of the messages array.
fn build_openai_messages(system: Option<String>, messages: Vec<Message>) -> Vec<OpenAIMessage> {
    let mut result = Vec::with_capacity(messages.len() + 1);
    if let Some(sys) = system {
        result.push(OpenAIMessage::text("system", sys));
    }
    for msg in messages {
        result.extend(convert_message(msg));
    }
    result
}

/// Convert a single message to OpenAI format
///
/// Tool results expand into one `tool` message each.
fn convert_message(msg: Message) -> Vec<OpenAIMessage> {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    };

    match msg.content {
        Some(MessageContent::Text(text)) => vec![OpenAIMessage::text(role, text)],
        Some(MessageContent::Blocks(blocks)) => convert_blocks(role, blocks),
        None => vec![OpenAIMessage::text(role, String::new())],
    }
}

fn convert_blocks(role: &'static str, blocks: Vec<ContentBlock>) -> Vec<OpenAIMessage> {
    let mut messages = Vec::new();
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(OpenAIToolCall {
                    id,
                    tool_type: "function",
                    function: OpenAIFunctionCall {
                        name,
                        arguments: match input {
                            serde_json::Value::String(raw) => raw,
                            other => other.to_string(),
                        },
                    },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => messages.push(OpenAIMessage {
                role: "tool",
                content: Some(content),
                tool_calls: None,
                tool_call_id: Some(tool_use_id),
            }),
        }
    }

    if !texts.is_empty() || !tool_calls.is_empty() {
        let content = if texts.is_empty() {
            None
        } else {
            Some(texts.join("\n"))
        };
        messages.insert(
            0,
            OpenAIMessage {
                role,
                content,
                tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                tool_call_id: None,
            },
        );
    }

    messages
}

fn convert_tools(tools: &[ToolDefinition]) -> Vec<OpenAITool> {
    tools
        .iter()
        .map(|tool| OpenAITool {
            tool_type: "function",
            function: OpenAIFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

/// Arguments that are not valid JSON, e.g. cut off by `max_tokens`, are
/// kept as a raw string so the tool rejects them and the model can retry.
fn parse_openai_response(msg: OpenAIResponseMessage) -> Message {
    let mut blocks = Vec::new();

    if let Some(content) = msg.content.filter(|c| !c.is_empty()) {
        blocks.push(ContentBlock::Text { text: content });
    }

    for call in msg.tool_calls.unwrap_or_default() {
        let arguments = call.function.arguments;
        let input = if arguments.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&arguments).unwrap_or_else(|e| {
                warn!(tool = %call.function.name, error = %e, "Tool arguments are not valid JSON");
                serde_json::Value::String(arguments)
            })
        };

        blocks.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Message::assistant_blocks(blocks)
}

fn map_stop_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "length" => StopReason::MaxTokens,
        "tool_calls" | "function_call" => StopReason::ToolUse,
        "content_filter" => {
            debug!("Content filtered by OpenAI safety systems");
            StopReason::EndTurn
        }
        _ => {
            debug!("Unknown stop reason: {}", reason);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config.api_key, "test-key");
        assert_eq!(provider.config.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_custom_config() {
        let config = OpenAIConfig::new("k").with_api_base("http://localhost:1234/v1/");
        assert_eq!(config.api_base, "http://localhost:1234/v1");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_system_message_first() {
        let messages =
            build_openai_messages(Some("Bạn là chuyên gia".to_string()), vec![Message::user("hi")]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content.as_deref(), Some("Bạn là chuyên gia"));
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_reasoning_model_request() {
        let request = CompletionRequest::builder("o3-mini")
            .messages(vec![Message::user("hi")])
            .max_tokens(500)
            .temperature(Some(0.0))
            .build();
        let body = serde_json::to_value(build_request(request)).unwrap();
        assert_eq!(body["max_completion_tokens"], 500);
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());

        let request = CompletionRequest::builder("gpt-4o")
            .max_tokens(500)
            .temperature(Some(0.0))
            .build();
        let body = serde_json::to_value(build_request(request)).unwrap();
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["temperature"], 0.0);
    }

    #[test]
    fn test_assistant_tool_calls_conversion() {
        let msg = Message::assistant_blocks(vec![ContentBlock::ToolUse {
            id: "call_1".to_string(),
            name: "get_all_symbols_tool".to_string(),
            input: json!({}),
        }]);
        let converted = convert_message(msg);

        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].role, "assistant");
        assert!(converted[0].content.is_none());
        let calls = converted[0].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "get_all_symbols_tool");
        assert_eq!(calls[0].function.arguments, "{}");
    }

    #[test]
    fn test_multiple_tool_results() {
        let msg = Message::tool_results(vec![
            ContentBlock::tool_result("call_1", "result 1"),
            ContentBlock::tool_error("call_2", "Error: not found"),
        ]);

        let converted = convert_message(msg);
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].role, "tool");
        assert_eq!(converted[0].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(converted[1].tool_call_id.as_deref(), Some("call_2"));
        assert_eq!(converted[1].content.as_deref(), Some("Error: not found"));
    }

    #[test]
    fn test_response_with_tool_calls() {
        let raw = json!({
            "content": null,
            "tool_calls": [{
                "id": "call_123",
                "type": "function",
                "function": {"name": "get_company_info_tool", "arguments": "{\"symbol\":\"HPG\"}"}
            }]
        });
        let response_msg: OpenAIResponseMessage = serde_json::from_value(raw).unwrap();
        let message = parse_openai_response(response_msg);

        assert_eq!(message.role, Role::Assistant);
        let calls = message.tool_uses();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_123");
        assert_eq!(calls[0].input["symbol"], "HPG");
    }

    #[test]
    fn test_empty_arguments_parse_as_object() {
        let response_msg = OpenAIResponseMessage {
            content: None,
            tool_calls: Some(vec![OpenAIResponseToolCall {
                id: "c".to_string(),
                function: OpenAIResponseFunctionCall {
                    name: "get_industries_list_tool".to_string(),
                    arguments: String::new(),
                },
            }]),
        };
        let message = parse_openai_response(response_msg);
        assert_eq!(message.tool_uses()[0].input, &json!({}));
    }

    #[test]
    fn test_truncated_arguments_kept_as_raw_text() {
        let response_msg = OpenAIResponseMessage {
            content: None,
            tool_calls: Some(vec![OpenAIResponseToolCall {
                id: "c".to_string(),
                function: OpenAIResponseFunctionCall {
                    name: "get_current_stock_price_tool".to_string(),
                    arguments: "{\"symbol\": \"FP".to_string(),
                },
            }]),
        };
        let message = parse_openai_response(response_msg);
        let calls = message.tool_uses();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].input, &json!("{\"symbol\": \"FP"));

        // Sent back unchanged on the next request
        let converted = convert_message(message);
        let sent = converted[0].tool_calls.as_ref().unwrap();
        assert_eq!(sent[0].function.arguments, "{\"symbol\": \"FP");
    }

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(map_stop_reason("stop"), StopReason::EndTurn);
        assert_eq!(map_stop_reason("length"), StopReason::MaxTokens);
        assert_eq!(map_stop_reason("tool_calls"), StopReason::ToolUse);
        assert_eq!(map_stop_reason("content_filter"), StopReason::EndTurn);
    }

    #[test]
    fn test_tool_definition_conversion() {
        let tool = ToolDefinition::new("search", "Search the web", json!({"type": "object"}));
        let converted = convert_tools(&[tool]);
        assert_eq!(converted[0].tool_type, "function");
        assert_eq!(converted[0].function.name, "search");
    }
}
