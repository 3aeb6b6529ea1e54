//! Per-company database tools

use super::{ALL_SYMBOLS_TOOL, COMPANY_INFO_TOOL, FINANCIAL_DATA_TOOL, TABLE_SCHEMAS_TOOL};
use crate::db::{FinancialRecord, MarketDb};
use crate::symbol::normalize_symbol;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use vnfin_llm::tools::schema;
use vnfin_tools::{Result, Tool, parse_params};

#[derive(Debug, Deserialize)]
struct SymbolParams {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct FinancialDataParams {
    symbol: String,
    #[serde(default)]
    years: Option<Vec<i32>>,
}

/// Yearly statements and market data of one company as CSV
pub struct FinancialDataTool {
    db: MarketDb,
}

impl FinancialDataTool {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for FinancialDataTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: FinancialDataParams = parse_params(params)?;
        let symbol = normalize_symbol(&params.symbol)?;

        let mut records = self.db.get_financial_data(&symbol).await?;
        if let Some(years) = params.years.filter(|y| !y.is_empty()) {
            records.retain(|r| years.contains(&r.year_report));
        }

        Ok(Value::String(FinancialRecord::to_csv(&records)?))
    }

    fn name(&self) -> &str {
        FINANCIAL_DATA_TOOL
    }

    fn description(&self) -> &str {
        "Get financial data by symbol: income statement, balance sheet, cash flow statement \
         and yearly stock price, one row per reported year, as CSV. \
         Pay attention to percentage values, they may be stored as decimal values \
         (e.g: 15% is stored as 0.15). Monetary columns are in billion VND unless the \
         column name says otherwise."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Symbol of the company, e.g. FPT"),
                "years": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "description": "Report years to keep; omit to get all years",
                },
            }),
            &["symbol"],
        )
    }
}

/// Listing and industry of one company
pub struct CompanyInfoTool {
    db: MarketDb,
}

impl CompanyInfoTool {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for CompanyInfoTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: SymbolParams = parse_params(params)?;
        let symbol = normalize_symbol(&params.symbol)?;

        match self.db.get_company_info(&symbol).await? {
            Some(info) => Ok(serde_json::to_value(info)?),
            None => Ok(json!({})),
        }
    }

    fn name(&self) -> &str {
        COMPANY_INFO_TOOL
    }

    fn description(&self) -> &str {
        "Get company information by symbol: organization name, industry name and \
         industry code (level 2). Returns an empty object when the symbol is not in VN100."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "symbol": schema::string("Symbol of the company, e.g. VNM") }),
            &["symbol"],
        )
    }
}

pub struct AllSymbolsTool {
    db: MarketDb,
}

impl AllSymbolsTool {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for AllSymbolsTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        let symbols = self.db.get_all_symbols().await?;
        Ok(json!(symbols))
    }

    fn name(&self) -> &str {
        ALL_SYMBOLS_TOOL
    }

    fn description(&self) -> &str {
        "Get list of all symbols in the database (the VN100 constituents), \
         e.g. [\"VCB\", \"BID\", \"CTG\", ...]"
    }

    fn input_schema(&self) -> Value {
        schema::empty()
    }
}

/// Column and foreign key layout of the database tables
pub struct TableSchemasTool {
    db: MarketDb,
}

impl TableSchemasTool {
    pub fn new(db: MarketDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for TableSchemasTool {
    async fn execute(&self, _params: Value) -> Result<Value> {
        let schemas = self.db.extract_table_schemas().await?;
        Ok(serde_json::to_value(schemas)?)
    }

    fn name(&self) -> &str {
        TABLE_SCHEMAS_TOOL
    }

    fn description(&self) -> &str {
        "Get the structure of the financial database: for every table its columns \
         (name, type, nullable, key, extra, comment) and foreign keys. Use it to \
         understand what a column of the financial data means."
    }

    fn input_schema(&self) -> Value {
        schema::empty()
    }
}
