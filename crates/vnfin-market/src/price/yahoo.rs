//! Yahoo Finance quotes for `<SYMBOL>.VN`

use super::{PriceSource, valid_price};
use crate::error::{MarketError, Result};
use crate::symbol::yahoo_ticker;
use async_trait::async_trait;
use yahoo_finance_api as yahoo;

const PROVIDER: &str = "Yahoo Finance";

#[derive(Debug, Clone, Default)]
pub struct YahooSource;

impl YahooSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceSource for YahooSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Option<f64>> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| MarketError::api(PROVIDER, e.to_string()))?;

        let response = provider
            .get_latest_quotes(&yahoo_ticker(symbol), "1d")
            .await
            .map_err(|e| MarketError::api(PROVIDER, e.to_string()))?;

        let quote = response
            .last_quote()
            .map_err(|e| MarketError::api(PROVIDER, e.to_string()))?;
        Ok(valid_price(quote.close))
    }
}
