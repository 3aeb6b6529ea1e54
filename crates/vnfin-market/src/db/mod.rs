//! Read-only access to the VN100 MySQL database

pub mod models;

pub use models::{
    ColumnInfo, CompanyInfo, CompanyMetrics, FINANCIAL_COLUMNS, FinancialRecord, ForeignKey,
    Industry, MetricsRow, TableSchema,
};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::scoring::{self, ScoredSymbol, ScoringOptions};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

const INDUSTRIES_SQL: &str = "\
SELECT DISTINCT industry_code_lv2, industry_name_lv2
FROM vn100_listing_by_industry
WHERE industry_code_lv2 IS NOT NULL AND industry_name_lv2 IS NOT NULL
ORDER BY industry_code_lv2";

const SYMBOLS_BY_INDUSTRY_SQL: &str = "\
SELECT symbol FROM vn100_listing_by_industry
WHERE industry_code_lv2 = ?
ORDER BY symbol";

const ALL_SYMBOLS_SQL: &str = "SELECT symbol FROM vn100_listing ORDER BY symbol";

const COMPANY_INFO_SQL: &str = "\
SELECT symbol, organ_name, industry_name_lv2, industry_code_lv2
FROM vn100_listing_by_industry
WHERE symbol = ?";

const LATEST_METRICS_SQL: &str = "\
SELECT f.symbol, f.year_report,
       f.return_on_equity_percent, f.net_profit_margin_percent, f.revenue_growth_percent,
       f.total_liabilities_billion_vnd, f.owner_equity_billion_vnd,
       f.yearly_close_price_vnd, f.yearly_volume
FROM financial_data f
JOIN vn100_listing_by_industry l ON l.symbol = f.symbol
JOIN (
    SELECT symbol, MAX(year_report) AS latest_year
    FROM financial_data
    GROUP BY symbol
) latest ON latest.symbol = f.symbol AND latest.latest_year = f.year_report
WHERE l.industry_code_lv2 = ?
ORDER BY f.symbol";

const COLUMNS_SQL: &str = "\
SELECT CAST(table_name AS CHAR) AS table_name,
       CAST(column_name AS CHAR) AS name,
       CAST(column_type AS CHAR) AS type,
       CAST(is_nullable AS CHAR) AS nullable,
       CAST(column_key AS CHAR) AS `key`,
       CAST(extra AS CHAR) AS extra,
       CAST(column_comment AS CHAR) AS comment
FROM information_schema.columns
WHERE table_schema = DATABASE()
ORDER BY table_name, ordinal_position";

const FOREIGN_KEYS_SQL: &str = "\
SELECT CAST(table_name AS CHAR) AS table_name,
       CAST(column_name AS CHAR) AS `column`,
       CAST(referenced_table_name AS CHAR) AS references_table,
       CAST(referenced_column_name AS CHAR) AS references_column
FROM information_schema.key_column_usage
WHERE table_schema = DATABASE() AND referenced_table_name IS NOT NULL
ORDER BY table_name, ordinal_position";

fn financial_data_sql() -> String {
    format!(
        "SELECT {} FROM financial_data WHERE symbol = ? ORDER BY year_report",
        FINANCIAL_COLUMNS.join(", ")
    )
}

#[derive(sqlx::FromRow)]
struct ColumnRow {
    table_name: String,
    #[sqlx(flatten)]
    column: ColumnInfo,
}

#[derive(sqlx::FromRow)]
struct ForeignKeyRow {
    table_name: String,
    #[sqlx(flatten)]
    foreign_key: ForeignKey,
}

/// Query layer over a shared connection pool
#[derive(Clone)]
pub struct MarketDb {
    pool: MySqlPool,
}

impl MarketDb {
    /// Create a pool that connects on first use
    ///
    /// Must be called inside a tokio runtime.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self> {
        config.validate()?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(options);

        debug!(host = %config.host, port = config.port, database = %config.database, "MySQL pool created");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Distinct level-2 industries
    #[instrument(skip(self))]
    pub async fn get_industries_list(&self) -> Result<Vec<Industry>> {
        let rows = sqlx::query_as::<_, Industry>(INDUSTRIES_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Symbols listed under an industry code
    #[instrument(skip(self))]
    pub async fn get_symbols_by_industry(&self, industry_code_lv2: &str) -> Result<Vec<String>> {
        let symbols = sqlx::query_scalar::<_, String>(SYMBOLS_BY_INDUSTRY_SQL)
            .bind(industry_code_lv2)
            .fetch_all(&self.pool)
            .await?;
        Ok(symbols)
    }

    /// Every VN100 symbol
    #[instrument(skip(self))]
    pub async fn get_all_symbols(&self) -> Result<Vec<String>> {
        let symbols = sqlx::query_scalar::<_, String>(ALL_SYMBOLS_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(symbols)
    }

    #[instrument(skip(self))]
    pub async fn get_company_info(&self, symbol: &str) -> Result<Option<CompanyInfo>> {
        let info = sqlx::query_as::<_, CompanyInfo>(COMPANY_INFO_SQL)
            .bind(symbol)
            .fetch_optional(&self.pool)
            .await?;
        Ok(info)
    }

    /// All reported years of a symbol, oldest first
    #[instrument(skip(self))]
    pub async fn get_financial_data(&self, symbol: &str) -> Result<Vec<FinancialRecord>> {
        let records = sqlx::query_as::<_, FinancialRecord>(&financial_data_sql())
            .bind(symbol)
            .fetch_all(&self.pool)
            .await?;
        debug!(symbol, years = records.len(), "Financial data loaded");
        Ok(records)
    }

    /// Latest-year ranking inputs of every symbol in an industry
    #[instrument(skip(self))]
    pub async fn latest_metrics_by_industry(
        &self,
        industry_code_lv2: &str,
    ) -> Result<Vec<CompanyMetrics>> {
        let rows = sqlx::query_as::<_, MetricsRow>(LATEST_METRICS_SQL)
            .bind(industry_code_lv2)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CompanyMetrics::from).collect())
    }

    /// Top symbols of an industry by composite score
    #[instrument(skip(self, options))]
    pub async fn get_best_symbols_by_industry(
        &self,
        industry_code_lv2: &str,
        options: &ScoringOptions,
    ) -> Result<Vec<ScoredSymbol>> {
        let metrics = self.latest_metrics_by_industry(industry_code_lv2).await?;
        if metrics.is_empty() {
            debug!(industry_code_lv2, "No financial data for industry");
            return Ok(Vec::new());
        }
        Ok(scoring::rank(&metrics, options))
    }

    /// Columns and foreign keys of every table in the current database
    #[instrument(skip(self))]
    pub async fn extract_table_schemas(&self) -> Result<BTreeMap<String, TableSchema>> {
        let columns = sqlx::query_as::<_, ColumnRow>(COLUMNS_SQL)
            .fetch_all(&self.pool)
            .await?;
        let foreign_keys = sqlx::query_as::<_, ForeignKeyRow>(FOREIGN_KEYS_SQL)
            .fetch_all(&self.pool)
            .await?;

        let mut schemas: BTreeMap<String, TableSchema> = BTreeMap::new();
        for row in columns {
            schemas.entry(row.table_name).or_default().columns.push(row.column);
        }
        for row in foreign_keys {
            schemas
                .entry(row.table_name)
                .or_default()
                .foreign_keys
                .push(row.foreign_key);
        }
        Ok(schemas)
    }
}
