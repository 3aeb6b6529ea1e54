//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait for
//! the hosted LLM services the assistant can run on.

#[cfg(feature = "anthropic")]
pub mod anthropic;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicProvider;

#[cfg(feature = "openai")]
pub use openai::{OpenAIConfig, OpenAIProvider};
