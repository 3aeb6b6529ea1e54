//! Error types for the conversation agent

use thiserror::Error;
use vnfin_llm::LLMError;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that abort a conversation turn
#[derive(Error, Debug)]
pub enum AgentError {
    /// The LLM provider call failed
    #[error("LLM request failed: {0}")]
    Provider(#[from] LLMError),

    /// The model kept requesting tools past the configured bound
    #[error("Tool-calling loop exceeded {0} iterations without a final answer")]
    IterationLimit(usize),

    /// The model ended its turn without text or tool calls
    #[error("Model returned an empty answer")]
    EmptyResponse,

    /// Agent could not be constructed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),
}
