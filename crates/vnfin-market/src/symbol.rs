//! Ticker symbol normalization

use crate::error::{MarketError, Result};
use regex::Regex;

/// Exchange suffix Yahoo Finance uses for Vietnamese listings
pub const VN_SUFFIX: &str = ".VN";

/// Normalize a user or model supplied ticker
///
/// Trims, upper-cases and strips a `.VN` suffix, then checks the result is
/// a plain HOSE/HNX style code such as `FPT` or `VN30F1M`.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let upper = raw.trim().to_ascii_uppercase();
    let symbol = upper.strip_suffix(VN_SUFFIX).unwrap_or(&upper);

    let pattern = Regex::new(r"^[A-Z0-9]{2,10}$")
        .map_err(|e| MarketError::Config(format!("invalid symbol pattern: {e}")))?;
    if !pattern.is_match(symbol) {
        return Err(MarketError::InvalidSymbol(raw.to_string()));
    }
    Ok(symbol.to_string())
}

/// Yahoo Finance ticker for a normalized symbol
pub fn yahoo_ticker(symbol: &str) -> String {
    format!("{symbol}{VN_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("fpt").unwrap(), "FPT");
        assert_eq!(normalize_symbol(" VNM.VN ").unwrap(), "VNM");
        assert_eq!(normalize_symbol("hpg.vn").unwrap(), "HPG");
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "F", "FPT; DROP TABLE", "VNM.HM", "ĐẠT"] {
            assert!(
                matches!(normalize_symbol(bad), Err(MarketError::InvalidSymbol(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_yahoo_ticker() {
        assert_eq!(yahoo_ticker("FPT"), "FPT.VN");
    }
}
