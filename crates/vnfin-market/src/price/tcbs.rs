//! TCBS daily bars, the feed behind vnstock

use super::{PriceSource, valid_price};
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;

const BASE_URL: &str = "https://apipubaws.tcbs.com.vn/stock-insight/v2/stock/bars-long-term";
const PROVIDER: &str = "TCBS";

#[derive(Debug, Deserialize)]
struct BarsResponse {
    #[serde(default)]
    data: Vec<Bar>,
}

#[derive(Debug, Deserialize)]
struct Bar {
    close: Option<f64>,
}

/// Close of the most recent daily bar within a short lookback window
#[derive(Debug, Clone)]
pub struct TcbsSource {
    client: Client,
    base_url: String,
    lookback_days: i64,
}

impl TcbsSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
            lookback_days: 3,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }
}

fn latest_close(body: &str) -> Result<Option<f64>> {
    let bars: BarsResponse = serde_json::from_str(body)?;
    Ok(bars
        .data
        .iter()
        .rev()
        .find_map(|bar| bar.close.and_then(valid_price)))
}

#[async_trait]
impl PriceSource for TcbsSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Option<f64>> {
        let to = Utc::now();
        let from = (to - Duration::days(self.lookback_days)).timestamp().to_string();
        let to = to.timestamp().to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ticker", symbol),
                ("type", "stock"),
                ("resolution", "D"),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::api(PROVIDER, format!("HTTP {status}")));
        }

        latest_close(&response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_close_takes_last_bar() {
        let body = r#"{"ticker":"FPT","data":[
            {"open":95000,"close":95500,"tradingDate":"2024-06-10T00:00:00.000Z"},
            {"open":95500,"close":96200,"tradingDate":"2024-06-11T00:00:00.000Z"}
        ]}"#;
        assert_eq!(latest_close(body).unwrap(), Some(96_200.0));
    }

    #[test]
    fn test_latest_close_without_bars() {
        assert_eq!(latest_close(r#"{"ticker":"FPT","data":[]}"#).unwrap(), None);
        assert_eq!(latest_close(r#"{"ticker":"FPT"}"#).unwrap(), None);
        assert_eq!(latest_close(r#"{"data":[{"close":null}]}"#).unwrap(), None);
    }

    #[test]
    fn test_latest_close_rejects_malformed_body() {
        assert!(matches!(latest_close("<html>"), Err(MarketError::Json(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_price() {
        let source = TcbsSource::new(Client::new()).with_lookback_days(10);
        let price = source.fetch_price("FPT").await.unwrap();
        assert!(price.is_some_and(|p| p > 1_000.0));
    }
}
