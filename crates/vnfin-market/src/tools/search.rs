//! Web search tool

use super::WEB_SEARCH_TOOL;
use crate::search::TavilyClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use vnfin_llm::tools::schema;
use vnfin_tools::{Result, Tool, parse_params};

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

pub struct WebSearchTool {
    client: TavilyClient,
}

impl WebSearchTool {
    pub fn new(client: TavilyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SearchParams = parse_params(params)?;
        let results = self.client.search(&params.query).await?;
        Ok(serde_json::to_value(results)?)
    }

    fn name(&self) -> &str {
        WEB_SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "A search engine optimized for comprehensive, accurate, and trusted results. \
         Useful for when you need to answer questions about current events, news, \
         macroeconomic or industry outlook. Input should be a search query. \
         Returns a list of {title, url, content}."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "query": schema::string("search query to look up") }),
            &["query"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vnfin_tools::ToolError;

    fn tool() -> WebSearchTool {
        WebSearchTool::new(TavilyClient::new("tvly-test", 5, Duration::from_secs(5)).unwrap())
    }

    #[test]
    fn test_metadata() {
        let tool = tool();
        assert_eq!(tool.name(), "tavily_search_results_json");
        assert_eq!(tool.input_schema()["required"], json!(["query"]));
    }

    #[tokio::test]
    async fn test_missing_query() {
        let err = tool().execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));

        let err = tool().execute(json!({"query": ""})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }
}
