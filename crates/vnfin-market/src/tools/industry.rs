//! Industry level tools

use super::{BEST_SYMBOLS_TOOL, INDUSTRIES_LIST_TOOL, SYMBOLS_BY_INDUSTRY_TOOL};
use crate::db::MarketDb;
use crate::error::MarketError;
use crate::scoring::ScoringOptions;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use vnfin_llm::tools::schema;
use vnfin_tools::{Result, Tool, parse_params};

const MAX_NUM_STOCKS: usize = 50;

#[derive(Debug, Deserialize)]
struct IndustryParams {
    industry_code_lv2: IndustryCode,
}

#[derive(Debug, Deserialize)]
struct BestSymbolsParams {
    industry_code_lv2: IndustryCode,
    #[serde(default = "default_num_stocks")]
    num_stocks: usize,
}

fn default_num_stocks() -> usize {
    ScoringOptions::default().num_stocks
}

/// Industry codes are numeric strings, but models often send them as numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndustryCode {
    Text(String),
    Number(u64),
}

impl IndustryCode {
    fn into_code(self) -> std::result::Result<String, MarketError> {
        let code = match self {
            IndustryCode::Text(s) => s.trim().to_string(),
            IndustryCode::Number(n) => n.to_string(),
        };
        if code.is_empty() {
            return Err(MarketError::InvalidArgument(
                "industry_code_lv2 must not be empty".to_string(),
            ));
        }
        Ok(code)
    }
}

pub struct IndustriesListTool {
    db: MarketDb,
}

impl IndustriesListTool {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for IndustriesListTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        let industries = self.db.get_industries_list().await?;
        Ok(serde_json::to_value(industries)?)
    }

    fn name(&self) -> &str {
        INDUSTRIES_LIST_TOOL
    }

    fn description(&self) -> &str {
        "Get list of industries with industry_code_lv2 and industry_name_lv2, \
         e.g. [{\"industry_code_lv2\": \"8300\", \"industry_name_lv2\": \"Ngân hàng\"}]. \
         Pay attention that the input industry name may be not the exact name, \
         try to find the matched industry name in the list."
    }

    fn input_schema(&self) -> Value {
        schema::empty()
    }
}

pub struct SymbolsByIndustryTool {
    db: MarketDb,
}

impl SymbolsByIndustryTool {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for SymbolsByIndustryTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: IndustryParams = parse_params(params)?;
        let code = params.industry_code_lv2.into_code()?;
        let symbols = self.db.get_symbols_by_industry(&code).await?;
        Ok(json!(symbols))
    }

    fn name(&self) -> &str {
        SYMBOLS_BY_INDUSTRY_TOOL
    }

    fn description(&self) -> &str {
        "Get list of symbols by industry, e.g. [\"VCB\", \"BID\", \"CTG\"]. \
         Use get_industries_list_tool first to find the industry code."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "industry_code_lv2": schema::string("Industry code of the industry, e.g. 8300") }),
            &["industry_code_lv2"],
        )
    }
}

/// Top companies of an industry by composite score
pub struct BestSymbolsByIndustryTool {
    db: MarketDb,
    missing_threshold: f64,
}

impl BestSymbolsByIndustryTool {
    pub fn new(db: MarketDb) -> Self {
        Self {
            db,
            missing_threshold: ScoringOptions::default().missing_threshold,
        }
    }
}

#[async_trait]
impl Tool for BestSymbolsByIndustryTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: BestSymbolsParams = parse_params(params)?;
        let code = params.industry_code_lv2.into_code()?;
        if params.num_stocks == 0 || params.num_stocks > MAX_NUM_STOCKS {
            return Err(MarketError::InvalidArgument(format!(
                "num_stocks must be between 1 and {MAX_NUM_STOCKS}"
            ))
            .into());
        }

        let options = ScoringOptions {
            num_stocks: params.num_stocks,
            missing_threshold: self.missing_threshold,
        };
        let ranked = self.db.get_best_symbols_by_industry(&code, &options).await?;
        let symbols: Vec<String> = ranked.into_iter().map(|s| s.symbol).collect();
        Ok(json!(symbols))
    }

    fn name(&self) -> &str {
        BEST_SYMBOLS_TOOL
    }

    fn description(&self) -> &str {
        "Get list of best stocks by industry based on a composite score of the latest \
         reported year: return on equity, net profit margin, revenue growth, \
         debt to equity (lower is better) and total trading value (price * volume), \
         weighted by how much each metric varies within the industry. \
         Returns a list of symbols, best first."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "industry_code_lv2": schema::string("Industry code of the industry, e.g. 8300"),
                "num_stocks": schema::integer("Number of stocks to return, default 5"),
            }),
            &["industry_code_lv2"],
        )
    }
}
