//! The tool-calling agent loop
//!
//! One call to [`ToolsCallingAgent::process_user_message`] is one turn:
//! 1. Append the user message to history
//! 2. Call the LLM with history and tool definitions
//! 3. While the reply requests tools, run them, append the reply and the
//!    tool results, and call the LLM again
//! 4. Compact the turn to `[user, final answer]` and return the answer

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::events::{AgentEventListener, NoOpListener};
use crate::memory::ConversationMemory;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use vnfin_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, TokenUsage, ToolCall,
};
use vnfin_tools::{ToolError, ToolRegistry, render_output};

/// Conversational agent with tool calling and compacting memory
pub struct ToolsCallingAgent {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: AgentConfig,
    memory: ConversationMemory,
    listener: Arc<dyn AgentEventListener>,
    usage: TokenUsage,
}

impl ToolsCallingAgent {
    /// Create a new agent with an empty history
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            memory: ConversationMemory::new(config.system_prompt.clone()),
            provider,
            tool_registry,
            config,
            listener: Arc::new(NoOpListener),
            usage: TokenUsage::default(),
        }
    }

    pub fn builder() -> ToolsCallingAgentBuilder {
        ToolsCallingAgentBuilder::new()
    }

    /// Set the listener receiving execution events
    pub fn with_listener(mut self, listener: Arc<dyn AgentEventListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Tokens consumed since the agent was created
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    /// Forget the conversation, keeping the system prompt
    pub fn reset(&mut self) {
        info!(dropped = self.memory.len(), "Resetting conversation");
        self.memory.reset();
    }

    /// Run one conversation turn and return the model's final answer
    ///
    /// On success history grows by exactly the user message and the final
    /// answer. On failure history is left as it was before the call.
    pub async fn process_user_message(&mut self, user_message: &str) -> Result<String> {
        let checkpoint = self.memory.len();
        self.memory.push(Message::user(user_message));

        match self.run_turn().await {
            Ok(answer) => {
                self.memory
                    .compact_turn(checkpoint, Message::assistant(answer.clone()));
                self.listener.on_complete(&answer).await;
                Ok(answer)
            }
            Err(e) => {
                warn!(error = %e, "Turn failed, rolling back history");
                self.memory.truncate(checkpoint);
                self.listener.on_error(&e.to_string()).await;
                Err(e)
            }
        }
    }

    async fn run_turn(&mut self) -> Result<String> {
        let tools = self.tool_registry.definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                history_len = self.memory.len(),
                "Sending request to LLM"
            );

            let request = CompletionRequest::builder(&self.config.model)
                .messages(self.memory.messages().to_vec())
                .system(self.memory.system_prompt())
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature)
                .tools(tools.clone())
                .build();

            let response = self.provider.complete(request).await?;
            self.usage += response.usage;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            if !response.message.has_tool_uses() {
                if response.stop_reason == StopReason::MaxTokens {
                    warn!("Final answer truncated by max_tokens");
                }
                let answer = response.message.joined_text();
                if answer.trim().is_empty() {
                    warn!(iteration, stop_reason = ?response.stop_reason, "Empty final answer");
                    return Err(AgentError::EmptyResponse);
                }
                info!(iteration, answer_length = answer.len(), "Agent completed");
                return Ok(answer);
            }

            let narration = response.message.joined_text();
            if !narration.is_empty() {
                self.listener.on_assistant_text(&narration).await;
            }

            let results = self.execute_tools(response.message.tool_uses()).await;
            self.memory.push(response.message);
            self.memory.push(Message::tool_results(results));
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached without a final answer"
        );
        Err(AgentError::IterationLimit(self.config.max_iterations))
    }

    /// Run the requested tools in order, one result block per call
    async fn execute_tools(&self, calls: Vec<ToolCall<'_>>) -> Vec<ContentBlock> {
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            let input_preview: String = call.input.to_string().chars().take(500).collect();
            info!(
                tool_name = %call.name,
                tool_id = %call.id,
                input_preview = %input_preview,
                "Executing tool"
            );
            self.listener
                .on_tool_start(call.id, call.name, call.input)
                .await;

            let start_time = Instant::now();
            let outcome = match self.tool_registry.get(call.name) {
                Some(tool) => tool
                    .execute(call.input.clone())
                    .await
                    .map(|value| render_output(&value)),
                None => Err(ToolError::NotFound(call.name.to_string())),
            };
            let duration_ms = start_time.elapsed().as_millis() as u64;

            match outcome {
                Ok(output) => {
                    let result_preview: String = output.chars().take(300).collect();
                    info!(
                        tool_name = %call.name,
                        duration_ms,
                        result_length = output.len(),
                        result_preview = %result_preview,
                        "Tool execution succeeded"
                    );
                    self.listener
                        .on_tool_done(call.id, call.name, Ok(&output), duration_ms)
                        .await;
                    results.push(ContentBlock::tool_result(call.id, output));
                }
                Err(e) => {
                    let error = format!("Error: {e}");
                    warn!(
                        tool_name = %call.name,
                        duration_ms,
                        error = %e,
                        "Tool execution failed"
                    );
                    self.listener
                        .on_tool_done(call.id, call.name, Err(&error), duration_ms)
                        .await;
                    results.push(ContentBlock::tool_error(call.id, error));
                }
            }
        }

        results
    }
}

/// Builder for ToolsCallingAgent
pub struct ToolsCallingAgentBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: AgentConfig,
    listener: Option<Arc<dyn AgentEventListener>>,
}

impl ToolsCallingAgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: AgentConfig::default(),
            listener: None,
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn listener(mut self, listener: Arc<dyn AgentEventListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Build the agent
    pub fn build(self) -> Result<ToolsCallingAgent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::InitializationFailed("Provider not set".to_string()))?;
        if self.config.max_iterations == 0 {
            return Err(AgentError::InitializationFailed(
                "max_iterations must be greater than 0".to_string(),
            ));
        }

        let agent = ToolsCallingAgent::new(provider, self.tool_registry, self.config);
        Ok(match self.listener {
            Some(listener) => agent.with_listener(listener),
            None => agent,
        })
    }
}

impl Default for ToolsCallingAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
