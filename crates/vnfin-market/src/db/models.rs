//! Row types for the VN100 schema

use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Level-2 industry of the VN100 classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Industry {
    pub industry_code_lv2: String,
    pub industry_name_lv2: String,
}

/// Listing entry of a VN100 company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CompanyInfo {
    pub symbol: String,
    pub organ_name: Option<String>,
    pub industry_name_lv2: Option<String>,
    pub industry_code_lv2: Option<String>,
}

/// Columns of `financial_data` other than `id`, in table order
pub const FINANCIAL_COLUMNS: &[&str] = &[
    "symbol",
    "year_report",
    "cash_and_equivalents_billion_vnd",
    "fixed_assets_billion_vnd",
    "total_assets_billion_vnd",
    "total_liabilities_billion_vnd",
    "owner_equity_billion_vnd",
    "undistributed_earnings_billion_vnd",
    "revenue_billion_vnd",
    "revenue_growth_percent",
    "profit_before_tax_billion_vnd",
    "net_profit_billion_vnd",
    "parent_company_growth_percent",
    "cash_end_period_billion_vnd",
    "cash_from_operations_billion_vnd",
    "cash_from_investments_billion_vnd",
    "earnings_per_share_vnd",
    "price_to_earnings",
    "price_to_book",
    "return_on_equity_percent",
    "return_on_assets_percent",
    "net_profit_margin_percent",
    "dividend_yield_percent",
    "yearly_close_price_vnd",
    "yearly_volume",
];

/// One year of balance sheet, income, cash flow and market data
///
/// Field order matches [`FINANCIAL_COLUMNS`]; it drives the CSV header.
/// Percentages are stored as fractions (15% is `0.15`).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FinancialRecord {
    pub symbol: String,
    pub year_report: i32,
    pub cash_and_equivalents_billion_vnd: Option<Decimal>,
    pub fixed_assets_billion_vnd: Option<Decimal>,
    pub total_assets_billion_vnd: Option<Decimal>,
    pub total_liabilities_billion_vnd: Option<Decimal>,
    pub owner_equity_billion_vnd: Option<Decimal>,
    pub undistributed_earnings_billion_vnd: Option<Decimal>,
    pub revenue_billion_vnd: Option<Decimal>,
    pub revenue_growth_percent: Option<Decimal>,
    pub profit_before_tax_billion_vnd: Option<Decimal>,
    pub net_profit_billion_vnd: Option<Decimal>,
    pub parent_company_growth_percent: Option<Decimal>,
    pub cash_end_period_billion_vnd: Option<Decimal>,
    pub cash_from_operations_billion_vnd: Option<Decimal>,
    pub cash_from_investments_billion_vnd: Option<Decimal>,
    pub earnings_per_share_vnd: Option<Decimal>,
    pub price_to_earnings: Option<Decimal>,
    pub price_to_book: Option<Decimal>,
    pub return_on_equity_percent: Option<Decimal>,
    pub return_on_assets_percent: Option<Decimal>,
    pub net_profit_margin_percent: Option<Decimal>,
    pub dividend_yield_percent: Option<Decimal>,
    pub yearly_close_price_vnd: Option<Decimal>,
    pub yearly_volume: Option<i64>,
}

impl FinancialRecord {
    /// Render records as CSV with a header row, empty cells for NULLs
    pub fn to_csv(records: &[FinancialRecord]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(FINANCIAL_COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Latest-year inputs of the composite ranking for one company
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MetricsRow {
    pub symbol: String,
    pub year_report: i32,
    pub return_on_equity_percent: Option<Decimal>,
    pub net_profit_margin_percent: Option<Decimal>,
    pub revenue_growth_percent: Option<Decimal>,
    pub total_liabilities_billion_vnd: Option<Decimal>,
    pub owner_equity_billion_vnd: Option<Decimal>,
    pub yearly_close_price_vnd: Option<Decimal>,
    pub yearly_volume: Option<i64>,
}

/// `MetricsRow` with numbers as `f64`, the input of [`crate::scoring`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyMetrics {
    pub symbol: String,
    pub year_report: i32,
    pub return_on_equity: Option<f64>,
    pub net_profit_margin: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub owner_equity: Option<f64>,
    pub close_price: Option<f64>,
    pub volume: Option<f64>,
}

fn to_f64(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

impl From<MetricsRow> for CompanyMetrics {
    fn from(row: MetricsRow) -> Self {
        Self {
            symbol: row.symbol,
            year_report: row.year_report,
            return_on_equity: to_f64(row.return_on_equity_percent),
            net_profit_margin: to_f64(row.net_profit_margin_percent),
            revenue_growth: to_f64(row.revenue_growth_percent),
            total_liabilities: to_f64(row.total_liabilities_billion_vnd),
            owner_equity: to_f64(row.owner_equity_billion_vnd),
            close_price: to_f64(row.yearly_close_price_vnd),
            volume: row.yearly_volume.map(|v| v as f64),
        }
    }
}

/// Column of a table as reported by `information_schema`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub column_type: String,
    pub nullable: String,
    pub key: String,
    pub extra: String,
    pub comment: String,
}

/// Foreign key of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ForeignKey {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
}

/// Columns and foreign keys of one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnInfo>,
    pub foreign_keys: Vec<ForeignKey>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    fn record(year: i32) -> FinancialRecord {
        FinancialRecord {
            symbol: "FPT".to_string(),
            year_report: year,
            cash_and_equivalents_billion_vnd: dec("8279.12"),
            fixed_assets_billion_vnd: None,
            total_assets_billion_vnd: dec("60004.5"),
            total_liabilities_billion_vnd: dec("30000"),
            owner_equity_billion_vnd: dec("30004.5"),
            undistributed_earnings_billion_vnd: None,
            revenue_billion_vnd: dec("52617.9"),
            revenue_growth_percent: dec("0.197"),
            profit_before_tax_billion_vnd: None,
            net_profit_billion_vnd: None,
            parent_company_growth_percent: None,
            cash_end_period_billion_vnd: None,
            cash_from_operations_billion_vnd: None,
            cash_from_investments_billion_vnd: None,
            earnings_per_share_vnd: dec("4527"),
            price_to_earnings: None,
            price_to_book: None,
            return_on_equity_percent: dec("0.27"),
            return_on_assets_percent: None,
            net_profit_margin_percent: None,
            dividend_yield_percent: None,
            yearly_close_price_vnd: dec("96000"),
            yearly_volume: Some(450_000_000),
        }
    }

    #[test]
    fn test_csv_header_matches_columns() {
        let csv = FinancialRecord::to_csv(&[record(2022), record(2023)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(FINANCIAL_COLUMNS.join(",").as_str()));

        let first = lines.next().unwrap();
        let cells: Vec<_> = first.split(',').collect();
        assert_eq!(cells.len(), FINANCIAL_COLUMNS.len());
        assert_eq!(cells[0], "FPT");
        assert_eq!(cells[1], "2022");
        assert_eq!(cells[2], "8279.12");
        assert_eq!(cells[3], "");
        assert_eq!(cells[9], "0.197");
        assert_eq!(cells[24], "450000000");
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_csv_without_rows_has_header_only() {
        let csv = FinancialRecord::to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), FINANCIAL_COLUMNS.join(","));
    }

    #[test]
    fn test_metrics_conversion() {
        let row = MetricsRow {
            symbol: "VNM".to_string(),
            year_report: 2023,
            return_on_equity_percent: dec("0.25"),
            net_profit_margin_percent: None,
            revenue_growth_percent: dec("-0.02"),
            total_liabilities_billion_vnd: dec("17000"),
            owner_equity_billion_vnd: dec("34000"),
            yearly_close_price_vnd: dec("67500"),
            yearly_volume: Some(1_000),
        };

        let metrics = CompanyMetrics::from(row);
        assert_eq!(metrics.return_on_equity, Some(0.25));
        assert_eq!(metrics.net_profit_margin, None);
        assert_eq!(metrics.revenue_growth, Some(-0.02));
        assert_eq!(metrics.volume, Some(1000.0));
    }
}
