//! LLM provider abstraction layer for vnfin
//!
//! This crate provides provider-agnostic abstractions for tool-calling
//! conversations with hosted Large Language Models. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Tool definitions for function calling
//! - Provider trait for LLM implementations
//! - Model name to provider resolution
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod model;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role, ToolCall};
pub use model::ProviderKind;
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

// Provider implementations (feature-gated)
#[cfg(any(feature = "anthropic", feature = "openai"))]
pub mod providers;

#[cfg(all(feature = "anthropic", feature = "openai"))]
pub use model::create_provider;
