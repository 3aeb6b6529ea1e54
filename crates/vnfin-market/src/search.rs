//! Tavily web search client

use crate::error::{MarketError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://api.tavily.com/search";
const PROVIDER: &str = "Tavily";

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: usize,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>, max_results: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            max_results,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MarketError::InvalidArgument(
                "search query must not be empty".to_string(),
            ));
        }

        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results: self.max_results,
            include_answer: false,
        };

        let response = self.client.post(&self.base_url).json(&request).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketError::RateLimitExceeded {
                provider: PROVIDER.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::api(PROVIDER, format!("HTTP {status}: {body}")));
        }

        let body = response.text().await?;
        let results = parse_results(&body, self.max_results)?;
        debug!(query, results = results.len(), "Web search completed");
        Ok(results)
    }
}

fn parse_results(body: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .take(max_results)
        .map(|r| SearchResult {
            title: r.title,
            url: r.url,
            content: r.content,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "query": "giá vàng hôm nay",
        "answer": null,
        "results": [
            {"title": "Giá vàng", "url": "https://example.vn/a", "content": "SJC 76 triệu", "score": 0.92},
            {"title": "Thị trường", "url": "https://example.vn/b", "content": "Tăng nhẹ", "score": 0.81},
            {"url": "https://example.vn/c", "score": 0.5}
        ],
        "response_time": 1.2
    }"#;

    #[test]
    fn test_parse_results() {
        let results = parse_results(BODY, 5).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Giá vàng");
        assert_eq!(results[0].content, "SJC 76 triệu");
        assert_eq!(results[2].title, "");
    }

    #[test]
    fn test_parse_results_caps_count() {
        assert_eq!(parse_results(BODY, 2).unwrap().len(), 2);
        assert!(parse_results(r#"{"query":"x"}"#, 5).unwrap().is_empty());
    }

    #[test]
    fn test_request_shape() {
        let request = SearchRequest {
            api_key: "tvly-key",
            query: "FPT",
            max_results: 5,
            include_answer: false,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_results"], 5);
        assert_eq!(value["include_answer"], false);
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let client = TavilyClient::new("tvly-key", 5, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            client.search("  ").await,
            Err(MarketError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires TAVILY_API_KEY and network access
    async fn test_live_search() {
        vnfin_utils::load_dotenv();
        let key = std::env::var("TAVILY_API_KEY").unwrap();
        let client = TavilyClient::new(key, 3, Duration::from_secs(30)).unwrap();
        let results = client.search("VN-Index hôm nay").await.unwrap();
        assert!(results.len() <= 3);
    }
}
