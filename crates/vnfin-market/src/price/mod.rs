//! Current stock price lookup
//!
//! Several public price sources are tried in a fixed order and the first one
//! that answers wins. See [`PriceChain`].

pub mod alpha_vantage;
pub mod chain;
pub mod tcbs;
pub mod vndirect;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageSource;
pub use chain::PriceChain;
pub use tcbs::TcbsSource;
pub use vndirect::VnDirectSource;
pub use yahoo::YahooSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// A single upstream price provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short name reported with quotes and in logs
    fn name(&self) -> &'static str;

    /// Latest price in VND, `Ok(None)` when the source has no data for the symbol
    async fn fetch_price(&self, symbol: &str) -> Result<Option<f64>>;
}

/// Price returned by the chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub symbol: String,
    /// Price in VND
    pub price: f64,
    /// Name of the source that answered
    pub source: String,
}

/// Positive finite prices only
pub(crate) fn valid_price(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Browser user agent; some endpoints refuse unknown clients
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
