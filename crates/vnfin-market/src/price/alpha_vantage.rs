//! Alpha Vantage `GLOBAL_QUOTE`

use super::{PriceSource, valid_price};
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage client limited to `rate_limit` requests per minute
#[derive(Debug, Clone)]
pub struct AlphaVantageSource {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageSource {
    pub fn new(client: Client, api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn parse_global_quote(body: &Value) -> Result<Option<f64>> {
    if let Some(message) = body.get("Error Message").and_then(Value::as_str) {
        return Err(MarketError::api(PROVIDER, message));
    }
    if body.get("Note").is_some() || body.get("Information").is_some() {
        return Err(MarketError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }

    Ok(body
        .get("Global Quote")
        .and_then(|quote| quote.get("05. price"))
        .and_then(Value::as_str)
        .and_then(|price| price.trim().parse::<f64>().ok())
        .and_then(valid_price))
}

#[async_trait]
impl PriceSource for AlphaVantageSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Option<f64>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::api(PROVIDER, format!("HTTP {status}")));
        }

        let body: Value = response.json().await?;
        parse_global_quote(&body)
    }
}
