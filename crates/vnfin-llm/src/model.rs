//! Model name resolution
//!
//! The assistant is configured with a bare model name; the provider that
//! serves it is derived from the name.

use crate::{LLMError, Result};
use std::fmt;

/// OpenAI models known to support tool calling
pub const OPENAI_MODELS: &[&str] = &["gpt-4o", "gpt-4o-mini", "o3-mini"];

/// Hosted API family serving a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI Chat Completions API (or a compatible endpoint)
    OpenAI,
}

impl ProviderKind {
    /// Resolve the provider from a model name
    pub fn for_model(model: &str) -> Result<Self> {
        let name = model.trim().to_ascii_lowercase();
        if name.starts_with("claude") {
            Ok(ProviderKind::Anthropic)
        } else if OPENAI_MODELS.contains(&name.as_str())
            || ["gpt-", "o1", "o3", "o4"].iter().any(|p| name.starts_with(p))
        {
            Ok(ProviderKind::OpenAI)
        } else {
            Err(LLMError::ConfigurationError(format!(
                "Cannot determine provider for model '{model}'"
            )))
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Anthropic => f.write_str("anthropic"),
            ProviderKind::OpenAI => f.write_str("openai"),
        }
    }
}

/// Reasoning models reject `temperature` and use `max_completion_tokens`
pub fn is_reasoning_model(model: &str) -> bool {
    let name = model.trim().to_ascii_lowercase();
    ["o1", "o3", "o4"].iter().any(|p| name.starts_with(p))
}

/// Build the provider serving `model`, reading credentials from the environment
#[cfg(all(feature = "anthropic", feature = "openai"))]
pub fn create_provider(model: &str) -> Result<std::sync::Arc<dyn crate::LLMProvider>> {
    use crate::providers::{AnthropicProvider, OpenAIProvider};

    let kind = ProviderKind::for_model(model)?;
    tracing::info!(model = %model, provider = %kind, "Creating LLM provider");
    Ok(match kind {
        ProviderKind::Anthropic => std::sync::Arc::new(AnthropicProvider::from_env()?),
        ProviderKind::OpenAI => std::sync::Arc::new(OpenAIProvider::from_env()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_for_model() {
        assert_eq!(
            ProviderKind::for_model("claude-3-5-sonnet-20241022").unwrap(),
            ProviderKind::Anthropic
        );
        assert_eq!(ProviderKind::for_model("gpt-4o").unwrap(), ProviderKind::OpenAI);
        assert_eq!(ProviderKind::for_model("o3-mini").unwrap(), ProviderKind::OpenAI);
        assert_eq!(ProviderKind::for_model(" GPT-4o-mini ").unwrap(), ProviderKind::OpenAI);
        assert!(ProviderKind::for_model("llama-3").is_err());
    }

    #[test]
    fn test_reasoning_models() {
        assert!(is_reasoning_model("o3-mini"));
        assert!(!is_reasoning_model("gpt-4o"));
        assert!(!is_reasoning_model("claude-3-5-haiku"));
    }
}
