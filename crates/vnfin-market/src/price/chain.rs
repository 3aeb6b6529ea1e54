//! Ordered fallback over price sources

use super::{
    AlphaVantageSource, PriceQuote, PriceSource, TcbsSource, VnDirectSource, YahooSource,
};
use crate::cache::TtlCache;
use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::symbol::normalize_symbol;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tries each source in order and caches the first price found
#[derive(Clone)]
pub struct PriceChain {
    sources: Vec<Arc<dyn PriceSource>>,
    cache: TtlCache<String, PriceQuote>,
}

impl PriceChain {
    pub fn new(sources: Vec<Arc<dyn PriceSource>>, cache_ttl: Duration) -> Self {
        Self {
            sources,
            cache: TtlCache::new(cache_ttl),
        }
    }

    /// TCBS, Yahoo Finance, VNDirect, then Alpha Vantage when a key is configured
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        let mut sources: Vec<Arc<dyn PriceSource>> = vec![
            Arc::new(TcbsSource::new(client.clone())),
            Arc::new(YahooSource::new()),
            Arc::new(VnDirectSource::new(client.clone())),
        ];
        if let Some(key) = &config.alpha_vantage_api_key {
            sources.push(Arc::new(AlphaVantageSource::new(
                client,
                key.clone(),
                config.alpha_vantage_rate_limit,
            )));
        }

        Ok(Self::new(sources, config.price_cache_ttl))
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Current price of a symbol
    ///
    /// The symbol is normalized first, so `fpt` and `FPT.VN` share a cache entry.
    pub async fn current_price(&self, symbol: &str) -> Result<PriceQuote> {
        let symbol = normalize_symbol(symbol)?;
        self.cache
            .get_or_fetch(symbol.clone(), || self.fetch_uncached(symbol))
            .await
    }

    async fn fetch_uncached(&self, symbol: String) -> Result<PriceQuote> {
        let mut failures = Vec::new();

        for source in &self.sources {
            match source.fetch_price(&symbol).await {
                Ok(Some(price)) => {
                    info!(symbol = %symbol, source = source.name(), price, "Price found");
                    return Ok(PriceQuote {
                        symbol,
                        price,
                        source: source.name().to_string(),
                    });
                }
                Ok(None) => {
                    debug!(symbol = %symbol, source = source.name(), "No price from source");
                    failures.push(format!("{}: no data", source.name()));
                }
                Err(e) => {
                    warn!(symbol = %symbol, source = source.name(), error = %e, "Price source failed");
                    failures.push(format!("{}: {e}", source.name()));
                }
            }
        }

        let reason = if failures.is_empty() {
            "no price sources configured".to_string()
        } else {
            failures.join("; ")
        };
        Err(MarketError::PriceUnavailable { symbol, reason })
    }
}
