//! Agent configuration

/// System prompt used when none is configured
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Default model when `TOOL_CALLING_MODEL` is not set
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Configuration for the tool-calling agent
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Model to use
    pub model: String,

    /// System prompt, kept at the head of every request
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature; `None` leaves the provider default
    pub temperature: Option<f32>,

    /// Maximum LLM calls per turn (prevents infinite tool loops)
    pub max_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: 4096,
            temperature: None,
            max_iterations: 10,
        }
    }
}

impl AgentConfig {
    /// Config for `model` with default settings
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.temperature, None);
    }

    #[test]
    fn test_for_model() {
        let config = AgentConfig::for_model("gpt-4o");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 4096);
    }
}
