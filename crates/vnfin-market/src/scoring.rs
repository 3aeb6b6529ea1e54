//! Composite ranking of companies within an industry
//!
//! Each company is scored on five metrics taken from its latest report:
//! return on equity, net profit margin, revenue growth, debt to equity and
//! traded value (close price times yearly volume). Metrics are min-max
//! normalised so that 1.0 is always best, missing values are imputed with the
//! metric median, and metric weights follow their variance across the
//! industry so that metrics which actually separate companies count more.
//! Companies whose leverage is far above the industry's upper quartile have
//! their debt-to-equity score reduced.

use crate::db::CompanyMetrics;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Ranking input metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ReturnOnEquity,
    NetProfitMargin,
    RevenueGrowth,
    DebtToEquity,
    TotalVolume,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::ReturnOnEquity,
        Metric::NetProfitMargin,
        Metric::RevenueGrowth,
        Metric::DebtToEquity,
        Metric::TotalVolume,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::ReturnOnEquity => "return_on_equity",
            Metric::NetProfitMargin => "net_profit_margin",
            Metric::RevenueGrowth => "revenue_growth",
            Metric::DebtToEquity => "debt_to_equity",
            Metric::TotalVolume => "total_volume",
        }
    }

    pub fn higher_is_better(self) -> bool {
        !matches!(self, Metric::DebtToEquity)
    }

    /// Value of the metric for one company, derived where needed
    pub fn value(self, company: &CompanyMetrics) -> Option<f64> {
        let value = match self {
            Metric::ReturnOnEquity => company.return_on_equity,
            Metric::NetProfitMargin => company.net_profit_margin,
            Metric::RevenueGrowth => company.revenue_growth,
            Metric::DebtToEquity => match (company.total_liabilities, company.owner_equity) {
                (Some(liabilities), Some(equity)) if equity != 0.0 => Some(liabilities / equity),
                _ => None,
            },
            Metric::TotalVolume => match (company.close_price, company.volume) {
                (Some(price), Some(volume)) => Some(price * volume),
                _ => None,
            },
        };
        value.filter(|v| v.is_finite())
    }
}

/// Ranking parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOptions {
    /// How many companies to return
    pub num_stocks: usize,
    /// Metrics missing for a larger share of companies are dropped
    pub missing_threshold: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            num_stocks: 5,
            missing_threshold: 0.5,
        }
    }
}

impl ScoringOptions {
    pub fn with_num_stocks(mut self, num_stocks: usize) -> Self {
        self.num_stocks = num_stocks;
        self
    }
}

/// A ranked company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSymbol {
    pub symbol: String,
    pub year_report: i32,
    /// Weighted composite in `[0, 1]`
    pub score: f64,
    /// Normalised value of every metric used
    pub breakdown: BTreeMap<Metric, f64>,
}

/// Summary of one metric over the companies that report it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub variance: f64,
}

impl MetricStats {
    /// `None` when there are no values
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n < 2 {
            0.0
        } else {
            let mean = sorted.iter().sum::<f64>() / n as f64;
            sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64
        };

        Some(Self {
            min: sorted[0],
            max: sorted[n - 1],
            median,
            variance,
        })
    }

    /// Min-max scale where 1.0 is best
    pub fn normalize(&self, value: f64, higher_is_better: bool) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 1.0;
        }
        if higher_is_better {
            (value - self.min) / range
        } else {
            (self.max - value) / range
        }
    }
}

/// Percentile with linear interpolation between closest ranks
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Factor applied to the debt-to-equity score of a company
///
/// 1.0 unless `d/e > 1.5 * p75`; then `max(0, 1 - (d/e - p75) / p75)`,
/// or 0 when `p75` is not positive.
pub fn leverage_penalty(debt_to_equity: f64, p75: f64) -> f64 {
    if debt_to_equity <= 1.5 * p75 {
        return 1.0;
    }
    if p75 <= 0.0 {
        return 0.0;
    }
    (1.0 - (debt_to_equity - p75) / p75).max(0.0)
}

/// Variance-proportional weights, uniform when no metric varies
pub fn variance_weights(variances: &[f64]) -> Vec<f64> {
    if variances.is_empty() {
        return Vec::new();
    }
    let total: f64 = variances.iter().sum();
    let raw: Vec<f64> = if total > 0.0 {
        variances.iter().map(|v| v / total).collect()
    } else {
        vec![1.0 / variances.len() as f64; variances.len()]
    };
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

struct MetricColumn {
    metric: Metric,
    values: Vec<Option<f64>>,
    stats: MetricStats,
}

/// Rank companies by composite score, best first
pub fn rank(companies: &[CompanyMetrics], options: &ScoringOptions) -> Vec<ScoredSymbol> {
    if companies.is_empty() {
        return Vec::new();
    }
    let total = companies.len() as f64;

    let mut columns = Vec::new();
    for metric in Metric::ALL {
        let values: Vec<Option<f64>> = companies.iter().map(|c| metric.value(c)).collect();
        let present: Vec<f64> = values.iter().flatten().copied().collect();

        let missing_ratio = 1.0 - present.len() as f64 / total;
        if missing_ratio > options.missing_threshold {
            warn!(
                metric = metric.name(),
                missing_ratio, "Metric excluded from ranking, too many missing values"
            );
            continue;
        }
        let Some(stats) = MetricStats::from_values(&present) else {
            continue;
        };
        columns.push(MetricColumn {
            metric,
            values,
            stats,
        });
    }

    if columns.is_empty() {
        warn!("No metric has enough data to rank companies");
        return Vec::new();
    }

    let variances: Vec<f64> = columns.iter().map(|c| c.stats.variance).collect();
    let weights = variance_weights(&variances);
    let weight_sum: f64 = weights.iter().sum();

    let p75 = columns
        .iter()
        .find(|c| c.metric == Metric::DebtToEquity)
        .and_then(|c| percentile(&c.values.iter().flatten().copied().collect::<Vec<_>>(), 0.75));

    let mut scored: Vec<ScoredSymbol> = companies
        .iter()
        .enumerate()
        .map(|(i, company)| {
            let mut breakdown = BTreeMap::new();
            let mut score = 0.0;
            for (column, weight) in columns.iter().zip(&weights) {
                let raw = column.values[i];
                let value = raw.unwrap_or(column.stats.median);
                let mut normalized = column
                    .stats
                    .normalize(value, column.metric.higher_is_better());
                if column.metric == Metric::DebtToEquity
                    && let (Some(d), Some(p75)) = (raw, p75)
                {
                    normalized *= leverage_penalty(d, p75);
                }
                score += normalized * weight;
                breakdown.insert(column.metric, normalized);
            }
            ScoredSymbol {
                symbol: company.symbol.clone(),
                year_report: company.year_report,
                score: if weight_sum > 0.0 { score / weight_sum } else { 0.0 },
                breakdown,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    for (position, entry) in scored.iter().enumerate() {
        debug!(
            position = position + 1,
            symbol = %entry.symbol,
            year = entry.year_report,
            score = entry.score,
            "Composite score"
        );
    }

    scored.truncate(options.num_stocks);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn company(
        symbol: &str,
        roe: Option<f64>,
        margin: Option<f64>,
        growth: Option<f64>,
        debt_to_equity: Option<f64>,
        traded_value: Option<f64>,
    ) -> CompanyMetrics {
        CompanyMetrics {
            symbol: symbol.to_string(),
            year_report: 2023,
            return_on_equity: roe,
            net_profit_margin: margin,
            revenue_growth: growth,
            total_liabilities: debt_to_equity.map(|d| d * 100.0),
            owner_equity: debt_to_equity.map(|_| 100.0),
            close_price: traded_value.map(|_| 10.0),
            volume: traded_value.map(|v| v / 10.0),
        }
    }

    #[test]
    fn test_stats_even_and_odd() {
        let stats = MetricStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!(approx(stats.median, 2.5));
        assert!(approx(stats.variance, 1.25));

        let stats = MetricStats::from_values(&[7.0]).unwrap();
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.variance, 0.0);

        assert!(MetricStats::from_values(&[]).is_none());
    }

    #[test]
    fn test_normalize_directions() {
        let stats = MetricStats::from_values(&[0.0, 10.0]).unwrap();
        assert!(approx(stats.normalize(2.5, true), 0.25));
        assert!(approx(stats.normalize(2.5, false), 0.75));

        let flat = MetricStats::from_values(&[3.0, 3.0]).unwrap();
        assert_eq!(flat.normalize(3.0, true), 1.0);
        assert_eq!(flat.normalize(3.0, false), 1.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        assert!(approx(percentile(&[0.5, 1.0, 0.75], 0.75).unwrap(), 0.875));
        assert!(approx(percentile(&[1.0, 1.0, 1.0, 10.0], 0.75).unwrap(), 3.25));
        assert_eq!(percentile(&[2.0], 0.75), Some(2.0));
        assert_eq!(percentile(&[], 0.75), None);
    }

    #[test]
    fn test_leverage_penalty() {
        assert_eq!(leverage_penalty(1.4, 1.0), 1.0);
        assert_eq!(leverage_penalty(1.5, 1.0), 1.0);
        assert!(approx(leverage_penalty(1.6, 1.0), 0.4));
        assert_eq!(leverage_penalty(2.5, 1.0), 0.0);
        assert_eq!(leverage_penalty(0.5, 0.0), 0.0);
        assert_eq!(leverage_penalty(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_variance_weights() {
        let weights = variance_weights(&[1.0, 3.0]);
        assert!(approx(weights[0], 0.25));
        assert!(approx(weights[1], 0.75));

        assert_eq!(variance_weights(&[0.0, 0.0]), vec![0.5, 0.5]);
        assert!(variance_weights(&[]).is_empty());
    }

    #[test]
    fn test_derived_metrics() {
        let mut c = company("AAA", None, None, None, Some(0.5), Some(1000.0));
        assert!(approx(Metric::DebtToEquity.value(&c).unwrap(), 0.5));
        assert!(approx(Metric::TotalVolume.value(&c).unwrap(), 1000.0));

        c.owner_equity = Some(0.0);
        assert_eq!(Metric::DebtToEquity.value(&c), None);
        c.volume = None;
        assert_eq!(Metric::TotalVolume.value(&c), None);
    }

    #[test]
    fn test_rank_orders_by_composite() {
        let companies = vec![
            company("BBB", Some(0.1), Some(0.1), Some(0.05), Some(1.0), Some(500.0)),
            company("AAA", Some(0.3), Some(0.2), Some(0.1), Some(0.5), Some(1000.0)),
            company("CCC", Some(0.2), Some(0.15), Some(0.075), Some(0.75), Some(750.0)),
        ];

        let ranked = rank(&companies, &ScoringOptions::default());
        let symbols: Vec<_> = ranked.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAA", "CCC", "BBB"]);
        assert!(approx(ranked[0].score, 1.0));
        assert!(approx(ranked[1].score, 0.5));
        assert!(approx(ranked[2].score, 0.0));
        assert_eq!(ranked[0].breakdown.len(), 5);
    }

    #[test]
    fn test_rank_truncates_and_keeps_tie_order() {
        let companies = vec![
            company("AAA", Some(0.2), None, None, None, None),
            company("BBB", Some(0.2), None, None, None, None),
            company("CCC", Some(0.1), None, None, None, None),
        ];
        let options = ScoringOptions::default().with_num_stocks(2);

        let ranked = rank(&companies, &options);
        let symbols: Vec<_> = ranked.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, ["AAA", "BBB"]);
        assert_eq!(ranked[0].breakdown.keys().collect::<Vec<_>>(), [&Metric::ReturnOnEquity]);
    }

    #[test]
    fn test_missing_value_imputed_with_median() {
        let companies = vec![
            company("AAA", Some(0.1), None, None, None, None),
            company("BBB", None, None, None, None, None),
            company("CCC", Some(0.3), None, None, None, None),
        ];

        let ranked = rank(&companies, &ScoringOptions::default());
        let bbb = ranked.iter().find(|s| s.symbol == "BBB").unwrap();
        assert!(approx(bbb.breakdown[&Metric::ReturnOnEquity], 0.5));
        assert_eq!(ranked[0].symbol, "CCC");
    }

    #[test]
    fn test_sparse_metric_excluded() {
        let companies = vec![
            company("AAA", Some(0.1), Some(0.3), None, None, None),
            company("BBB", Some(0.2), None, None, None, None),
            company("CCC", Some(0.3), None, None, None, None),
        ];

        let ranked = rank(&companies, &ScoringOptions::default());
        assert!(ranked.iter().all(|s| !s.breakdown.contains_key(&Metric::NetProfitMargin)));
        assert_eq!(ranked[0].symbol, "CCC");
    }

    #[test]
    fn test_missing_ratio_at_threshold_is_kept() {
        let companies = vec![
            company("AAA", Some(0.1), Some(0.30), None, None, None),
            company("BBB", Some(0.2), Some(0.10), None, None, None),
            company("CCC", Some(0.3), None, None, None, None),
            company("DDD", Some(0.4), None, None, None, None),
        ];

        // Two of four margins missing is exactly the default threshold
        let ranked = rank(&companies, &ScoringOptions::default());
        assert!(ranked.iter().all(|s| s.breakdown.contains_key(&Metric::NetProfitMargin)));

        let strict = ScoringOptions {
            missing_threshold: 0.25,
            ..ScoringOptions::default()
        };
        let ranked = rank(&companies, &strict);
        assert!(ranked.iter().all(|s| !s.breakdown.contains_key(&Metric::NetProfitMargin)));
        assert_eq!(ranked[0].symbol, "DDD");
    }

    #[test]
    fn test_no_usable_metric() {
        let companies = vec![company("AAA", None, None, None, None, None)];
        assert!(rank(&companies, &ScoringOptions::default()).is_empty());
        assert!(rank(&[], &ScoringOptions::default()).is_empty());
    }

    #[test]
    fn test_leverage_outlier_penalised() {
        let mut companies: Vec<_> = (0..8)
            .map(|i| company(&format!("S{i:02}"), None, None, None, Some(1.0), None))
            .collect();
        companies.push(company("HIGH", None, None, None, Some(1.8), None));
        companies.push(company("MAX", None, None, None, Some(2.0), None));

        let ranked = rank(&companies, &ScoringOptions::default().with_num_stocks(10));
        let high = ranked.iter().find(|s| s.symbol == "HIGH").unwrap();
        // (2.0 - 1.8) / 1.0 scaled by the penalty 1 - 0.8 / 1.0
        assert!(approx(high.breakdown[&Metric::DebtToEquity], 0.04));
        assert!(approx(high.score, 0.04));
    }
}
