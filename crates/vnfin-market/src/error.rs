//! Error types for market data operations

use thiserror::Error;
use vnfin_tools::ToolError;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Database query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Invalid tool or query argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Every price source failed for the symbol
    #[error("Could not get price for {symbol}: {reason}")]
    PriceUnavailable {
        symbol: String,
        reason: String,
    },

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded {
        provider: String,
    },

    /// Upstream API answered with an error
    #[error("{provider} API error: {message}")]
    Api {
        provider: String,
        message: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV rendering error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Prompt template error
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Agent assembly failed
    #[error("Agent error: {0}")]
    Agent(#[from] vnfin_agent::AgentError),
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;

impl MarketError {
    pub(crate) fn api(provider: &str, message: impl Into<String>) -> Self {
        MarketError::Api {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

impl From<vnfin_utils::EnvError> for MarketError {
    fn from(err: vnfin_utils::EnvError) -> Self {
        MarketError::Config(err.to_string())
    }
}

/// Bad input goes back to the model as a parameter error so it can retry
impl From<MarketError> for ToolError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::InvalidSymbol(_) | MarketError::InvalidArgument(_) => {
                ToolError::InvalidParameters(err.to_string())
            }
            other => ToolError::ExecutionFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::InvalidSymbol("F@T".to_string());
        assert_eq!(err.to_string(), "Invalid symbol: F@T");

        let err = MarketError::PriceUnavailable {
            symbol: "FPT".to_string(),
            reason: "all sources failed".to_string(),
        };
        assert_eq!(err.to_string(), "Could not get price for FPT: all sources failed");
    }

    #[test]
    fn test_tool_error_conversion() {
        let tool_err: ToolError = MarketError::InvalidSymbol("x".to_string()).into();
        assert!(matches!(tool_err, ToolError::InvalidParameters(_)));

        let tool_err: ToolError = MarketError::api("VNDirect", "HTTP 500").into();
        match tool_err {
            ToolError::ExecutionFailed(msg) => assert!(msg.contains("VNDirect API error")),
            other => panic!("Expected ExecutionFailed, got {other:?}"),
        }
    }
}
