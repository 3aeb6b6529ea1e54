//! Configuration for market data access

use crate::error::{MarketError, Result};
use std::time::Duration;
use vnfin_utils::env;

/// MySQL connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Pool size
    pub max_connections: u32,
    /// How long a query waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: String::new(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

impl DatabaseConfig {
    /// Read `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD` and `MYSQL_DB`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("MYSQL_HOST").unwrap_or(defaults.host),
            port: env::parse_or("MYSQL_PORT", defaults.port)?,
            user: env::var("MYSQL_USER").unwrap_or(defaults.user),
            password: std::env::var("MYSQL_PASSWORD").unwrap_or_default(),
            database: env::require("MYSQL_DB")?,
            ..defaults
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(MarketError::Config("database host must not be empty".to_string()));
        }
        if self.database.is_empty() {
            return Err(MarketError::Config("database name must not be empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(MarketError::Config(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the market data layer and its tools
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub database: DatabaseConfig,

    /// Alpha Vantage API key; the source is skipped without it
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage requests per minute
    pub alpha_vantage_rate_limit: u32,

    /// Tavily API key; web search is unavailable without it
    pub tavily_api_key: Option<String>,

    /// Maximum web search results per query
    pub search_max_results: usize,

    /// How long a fetched price is reused
    pub price_cache_ttl: Duration,

    /// Timeout for outbound HTTP requests
    pub request_timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            alpha_vantage_api_key: None,
            alpha_vantage_rate_limit: 5,
            tavily_api_key: None,
            search_max_results: 5,
            price_cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Load the full configuration from the environment
    pub fn from_env() -> Result<Self> {
        Self::builder()
            .database(DatabaseConfig::from_env()?)
            .with_env_api_keys()
            .build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.database.validate()?;

        if self.alpha_vantage_rate_limit == 0 {
            return Err(MarketError::Config(
                "alpha_vantage_rate_limit must be greater than 0".to_string(),
            ));
        }
        if self.search_max_results == 0 {
            return Err(MarketError::Config(
                "search_max_results must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    database: Option<DatabaseConfig>,
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_rate_limit: Option<u32>,
    tavily_api_key: Option<String>,
    search_max_results: Option<usize>,
    price_cache_ttl: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl MarketConfigBuilder {
    pub fn database(mut self, database: DatabaseConfig) -> Self {
        self.database = Some(database);
        self
    }

    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    pub fn tavily_api_key(mut self, key: impl Into<String>) -> Self {
        self.tavily_api_key = Some(key.into());
        self
    }

    pub fn search_max_results(mut self, max: usize) -> Self {
        self.search_max_results = Some(max);
        self
    }

    pub fn price_cache_ttl(mut self, ttl: Duration) -> Self {
        self.price_cache_ttl = Some(ttl);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load `ALPHA_VANTAGE_API_KEY` and `TAVILY_API_KEY` when set
    pub fn with_env_api_keys(mut self) -> Self {
        if let Some(key) = env::var("ALPHA_VANTAGE_API_KEY") {
            self.alpha_vantage_api_key = Some(key);
        }
        if let Some(key) = env::var("TAVILY_API_KEY") {
            self.tavily_api_key = Some(key);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            database: self.database.unwrap_or(defaults.database),
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
            tavily_api_key: self.tavily_api_key,
            search_max_results: self.search_max_results.unwrap_or(defaults.search_max_results),
            price_cache_ttl: self.price_cache_ttl.unwrap_or(defaults.price_cache_ttl),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> MarketConfig {
    MarketConfig {
        database: DatabaseConfig {
            database: "vn100".to_string(),
            ..DatabaseConfig::default()
        },
        ..MarketConfig::default()
    }
}
