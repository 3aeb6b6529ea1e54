//! LLM provider trait

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A hosted chat model that supports tool calling
///
/// The agent sends the whole conversation with every request; providers
/// are stateless apart from their HTTP client and credentials.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one request and return the assistant message it produced
    ///
    /// Tool calls requested by the model come back as
    /// [`ContentBlock::ToolUse`](crate::ContentBlock::ToolUse) blocks.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short provider name for logs, e.g. `anthropic`
    fn name(&self) -> &str;
}
