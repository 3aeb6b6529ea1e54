//! Tools exposed to the language model
//!
//! Tool names are part of the contract with the model and with the console
//! progress output, so they are kept as constants here together with the
//! Vietnamese labels shown to users.

pub mod company;
pub mod industry;
pub mod price;
pub mod search;

pub use company::{AllSymbolsTool, CompanyInfoTool, FinancialDataTool, TableSchemasTool};
pub use industry::{BestSymbolsByIndustryTool, IndustriesListTool, SymbolsByIndustryTool};
pub use price::CurrentStockPriceTool;
pub use search::WebSearchTool;

pub const FINANCIAL_DATA_TOOL: &str = "get_financial_data_tool";
pub const INDUSTRIES_LIST_TOOL: &str = "get_industries_list_tool";
pub const ALL_SYMBOLS_TOOL: &str = "get_all_symbols_tool";
pub const COMPANY_INFO_TOOL: &str = "get_company_info_tool";
pub const WEB_SEARCH_TOOL: &str = "tavily_search_results_json";
pub const BEST_SYMBOLS_TOOL: &str = "get_best_symbols_by_industry_tool";
pub const CURRENT_PRICE_TOOL: &str = "get_current_stock_price_tool";
pub const SYMBOLS_BY_INDUSTRY_TOOL: &str = "get_symbols_by_industry_tool";
pub const TABLE_SCHEMAS_TOOL: &str = "get_table_schemas_tool";

const READABLE_NAMES: &[(&str, &str)] = &[
    (FINANCIAL_DATA_TOOL, "Truy xuất dữ liệu tài chính"),
    (INDUSTRIES_LIST_TOOL, "Truy xuất danh sách ngành"),
    (ALL_SYMBOLS_TOOL, "Truy xuất tất cả mã chứng khoán"),
    (COMPANY_INFO_TOOL, "Truy xuất thông tin công ty"),
    (WEB_SEARCH_TOOL, "Tìm kiếm trên internet"),
    (BEST_SYMBOLS_TOOL, "Truy xuất mã chứng khoán tốt nhất theo ngành"),
    (CURRENT_PRICE_TOOL, "Truy xuất giá cổ phiếu hiện tại"),
    (SYMBOLS_BY_INDUSTRY_TOOL, "Truy xuất mã chứng khoán theo ngành"),
    (TABLE_SCHEMAS_TOOL, "Truy xuất cấu trúc cơ sở dữ liệu"),
];

/// Vietnamese label of a tool for progress output
///
/// Unknown names are returned unchanged.
pub fn readable_tool_name(name: &str) -> &str {
    READABLE_NAMES
        .iter()
        .find(|(tool, _)| tool.eq_ignore_ascii_case(name.trim()))
        .map_or(name, |(_, label)| *label)
}
