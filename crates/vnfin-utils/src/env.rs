//! Environment variable helpers
//!
//! Configuration for the assistant lives in the process environment,
//! optionally seeded from a `.env` file.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is missing or empty
    #[error("{0} environment variable not set")]
    Missing(String),

    /// A variable is present but cannot be parsed
    #[error("Invalid value for {key}: {value}")]
    Invalid {
        /// Variable name
        key: String,
        /// Raw value found in the environment
        value: String,
    },
}

/// Load a `.env` file from the current directory or its parents
///
/// Returns the path of the loaded file. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load .env file");
            None
        }
    }
}

/// Read a variable, treating empty values as unset
pub fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable that must be present
pub fn require(key: &str) -> Result<String, EnvError> {
    var(key).ok_or_else(|| EnvError::Missing(key.to_string()))
}

/// Read and parse a variable, using `default` when it is unset
pub fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, EnvError> {
    match var(key) {
        Some(value) => value.parse().map_err(|_| EnvError::Invalid {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_treats_blank_as_unset() {
        // SAFETY: test-local variable names, no other thread reads them
        unsafe {
            std::env::set_var("VNFIN_TEST_BLANK", "   ");
        }
        assert_eq!(var("VNFIN_TEST_BLANK"), None);
        assert_eq!(
            require("VNFIN_TEST_BLANK"),
            Err(EnvError::Missing("VNFIN_TEST_BLANK".to_string()))
        );
    }

    #[test]
    fn test_parse_or() {
        // SAFETY: test-local variable names, no other thread reads them
        unsafe {
            std::env::set_var("VNFIN_TEST_PORT", "3307");
            std::env::set_var("VNFIN_TEST_BAD_PORT", "abc");
            std::env::remove_var("VNFIN_TEST_NO_PORT");
        }
        assert_eq!(parse_or("VNFIN_TEST_PORT", 3306_u16), Ok(3307));
        assert_eq!(parse_or("VNFIN_TEST_NO_PORT", 3306_u16), Ok(3306));
        assert!(matches!(
            parse_or("VNFIN_TEST_BAD_PORT", 3306_u16),
            Err(EnvError::Invalid { .. })
        ));
    }
}
