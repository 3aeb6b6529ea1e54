//! Assembly of the financial assistant

use crate::config::MarketConfig;
use crate::db::MarketDb;
use crate::error::Result;
use crate::price::PriceChain;
use crate::prompts::financial_system_prompt;
use crate::search::TavilyClient;
use crate::tools::{
    AllSymbolsTool, BestSymbolsByIndustryTool, CompanyInfoTool, CurrentStockPriceTool,
    FinancialDataTool, IndustriesListTool, SymbolsByIndustryTool, TableSchemasTool,
    WebSearchTool,
};
use std::sync::Arc;
use tracing::{info, warn};
use vnfin_agent::{AgentConfig, ToolsCallingAgent};
use vnfin_llm::LLMProvider;
use vnfin_tools::ToolRegistry;

/// Register every market tool over shared resources
///
/// The database pool connects lazily, so this must run inside a tokio
/// runtime but does not need the database to be reachable. Web search is
/// left out when no Tavily key is configured.
pub fn build_registry(config: &MarketConfig) -> Result<Arc<ToolRegistry>> {
    config.validate()?;

    let db = MarketDb::connect_lazy(&config.database)?;
    let prices = PriceChain::from_config(config)?;
    let registry = ToolRegistry::new();

    registry.register(Arc::new(FinancialDataTool::new(db.clone())));
    registry.register(Arc::new(IndustriesListTool::new(db.clone())));
    registry.register(Arc::new(AllSymbolsTool::new(db.clone())));
    registry.register(Arc::new(CompanyInfoTool::new(db.clone())));

    match &config.tavily_api_key {
        Some(key) => {
            let client = TavilyClient::new(
                key.clone(),
                config.search_max_results,
                config.request_timeout,
            )?;
            registry.register(Arc::new(WebSearchTool::new(client)));
        }
        None => warn!("TAVILY_API_KEY not set, web search disabled"),
    }

    registry.register(Arc::new(BestSymbolsByIndustryTool::new(db.clone())));
    registry.register(Arc::new(CurrentStockPriceTool::new(prices)));
    registry.register(Arc::new(SymbolsByIndustryTool::new(db.clone())));
    registry.register(Arc::new(TableSchemasTool::new(db)));

    info!(tools = registry.len(), "Tool registry ready");
    Ok(Arc::new(registry))
}

/// Agent with the market tools and the Vietnamese financial system prompt
///
/// The `system_prompt` of `agent_config` is replaced.
pub fn build_agent(
    provider: Arc<dyn LLMProvider>,
    config: &MarketConfig,
    agent_config: AgentConfig,
) -> Result<ToolsCallingAgent> {
    let registry = build_registry(config)?;
    let agent_config = AgentConfig {
        system_prompt: financial_system_prompt()?,
        ..agent_config
    };

    let agent = ToolsCallingAgent::builder()
        .provider(provider)
        .tool_registry(registry)
        .config(agent_config)
        .build()?;
    Ok(agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::tools::{
        CURRENT_PRICE_TOOL, FINANCIAL_DATA_TOOL, TABLE_SCHEMAS_TOOL, WEB_SEARCH_TOOL,
    };
    use async_trait::async_trait;
    use vnfin_llm::{CompletionRequest, CompletionResponse};

    struct UnusedProvider;

    #[async_trait]
    impl LLMProvider for UnusedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> vnfin_llm::Result<CompletionResponse> {
            Err(vnfin_llm::LLMError::RequestFailed("not scripted".to_string()))
        }

        fn name(&self) -> &str {
            "unused"
        }
    }

    fn names(registry: &ToolRegistry) -> Vec<String> {
        registry.definitions().into_iter().map(|d| d.name).collect()
    }

    #[tokio::test]
    async fn test_registry_without_search_key() {
        let registry = build_registry(&test_config()).unwrap();
        let names = names(&registry);

        assert_eq!(names.len(), 8);
        assert_eq!(names[0], FINANCIAL_DATA_TOOL);
        assert!(!names.iter().any(|n| n == WEB_SEARCH_TOOL));
        assert!(names.iter().any(|n| n == CURRENT_PRICE_TOOL));
        assert_eq!(names.last().map(String::as_str), Some(TABLE_SCHEMAS_TOOL));
    }

    #[tokio::test]
    async fn test_registry_with_search_key() {
        let mut config = test_config();
        config.tavily_api_key = Some("tvly-test".to_string());

        let registry = build_registry(&config).unwrap();
        let names = names(&registry);
        assert_eq!(names.len(), 9);
        assert_eq!(names[4], WEB_SEARCH_TOOL);
        assert!(registry.get("TAVILY_SEARCH_RESULTS_JSON").is_some());
    }

    #[tokio::test]
    async fn test_build_agent_uses_financial_prompt() {
        let agent = build_agent(
            Arc::new(UnusedProvider),
            &test_config(),
            AgentConfig::for_model("gpt-4o"),
        )
        .unwrap();

        assert_eq!(agent.config().model, "gpt-4o");
        assert!(agent.config().system_prompt.starts_with("Bạn là chuyên gia"));
        assert!(agent.memory().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = test_config();
        config.database.database.clear();
        assert!(build_registry(&config).is_err());
    }
}
