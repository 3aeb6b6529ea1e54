//! Current price tool

use super::CURRENT_PRICE_TOOL;
use crate::price::PriceChain;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use vnfin_llm::tools::schema;
use vnfin_tools::{Result, Tool, parse_params};

#[derive(Debug, Deserialize)]
struct PriceParams {
    symbol: String,
}

pub struct CurrentStockPriceTool {
    chain: PriceChain,
}

impl CurrentStockPriceTool {
    pub fn new(chain: PriceChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Tool for CurrentStockPriceTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: PriceParams = parse_params(params)?;
        let quote = self.chain.current_price(&params.symbol).await?;
        Ok(serde_json::to_value(quote)?)
    }

    fn name(&self) -> &str {
        CURRENT_PRICE_TOOL
    }

    fn description(&self) -> &str {
        "Get the current stock price of a given symbol in VND. \
         Returns {symbol, price, source} where source is the data provider that answered."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "symbol": schema::string("The symbol of the stock, e.g. FPT") }),
            &["symbol"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::{MockPriceSource, PriceSource};
    use std::sync::Arc;
    use std::time::Duration;
    use vnfin_tools::ToolError;

    fn chain(price: Option<f64>) -> PriceChain {
        let mut source = MockPriceSource::new();
        source.expect_name().return_const("TCBS");
        source.expect_fetch_price().returning(move |_| Ok(price));
        let sources: Vec<Arc<dyn PriceSource>> = vec![Arc::new(source)];
        PriceChain::new(sources, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_returns_quote() {
        let tool = CurrentStockPriceTool::new(chain(Some(96_200.0)));
        let result = tool.execute(json!({"symbol": "fpt"})).await.unwrap();
        assert_eq!(result, json!({"symbol": "FPT", "price": 96_200.0, "source": "TCBS"}));
    }

    #[tokio::test]
    async fn test_unavailable_price_is_execution_failure() {
        let tool = CurrentStockPriceTool::new(chain(None));
        let err = tool.execute(json!({"symbol": "FPT"})).await.unwrap_err();
        match err {
            ToolError::ExecutionFailed(msg) => assert!(msg.contains("Could not get price for FPT")),
            other => panic!("Expected ExecutionFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_symbol_is_parameter_error() {
        let tool = CurrentStockPriceTool::new(chain(Some(1.0)));
        let err = tool.execute(json!({"symbol": "?"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
        assert_eq!(tool.name(), "get_current_stock_price_tool");
    }
}
