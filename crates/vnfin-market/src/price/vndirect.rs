//! VNDirect chart endpoint

use super::{BROWSER_USER_AGENT, PriceSource, valid_price};
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde_json::Value;

const BASE_URL: &str = "https://dchart.vndirect.com.vn/general";
const PROVIDER: &str = "VNDirect";

#[derive(Debug, Clone)]
pub struct VnDirectSource {
    client: Client,
    base_url: String,
}

impl VnDirectSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// `data[0].last`, sent either as a number or a numeric string
fn last_price(body: &Value) -> Option<f64> {
    let last = body.get("data")?.as_array()?.first()?.get("last")?;
    let price = match last {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    valid_price(price)
}

#[async_trait]
impl PriceSource for VnDirectSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Option<f64>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("symbol", symbol)])
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::api(PROVIDER, format!("HTTP {status}")));
        }

        let body: Value = response.json().await?;
        Ok(last_price(&body))
    }
}
