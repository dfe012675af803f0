//! Fallback counters.
//!
//! Every degraded path in the engine resolves to a default rather than an
//! error. [`FallbackStats`] counts how often that happened in one analysis so
//! the defaults can be audited against real data.

use serde::{Deserialize, Serialize};
use wealthlens_core::classifier::ClassificationFallback;

/// Per-analysis fallback counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackStats {
    /// Holdings analysed, after wrapper splitting.
    pub total_holdings: usize,
    /// Fund holdings analysed.
    pub total_funds: usize,
    /// Product labels outside the taxonomy, defaulted to Equity.
    pub unknown_product_types: usize,
    /// Funds without a category hint, defaulted to Equity.
    pub default_fund_category: usize,
    /// ULIP/NPS holdings without allocation data, defaulted to Hybrid.
    pub wrapper_without_allocation: usize,
    /// Funds split by policy heuristic instead of factsheet data.
    pub heuristic_fund_splits: usize,
    /// Factsheet compositions rescaled to 100%.
    pub renormalized_factsheets: usize,
    /// Funds whose geography came from name detection.
    pub name_based_geography: usize,
    /// Geography entries that needed renormalization or clamping.
    pub normalized_geography: usize,
    /// Funds absent from the sector map.
    pub missing_sector_data: usize,
    /// Funds absent from the market-cap map.
    pub missing_market_cap_data: usize,
}

impl FallbackStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one classification outcome.
    pub fn record_classification(&mut self, fallback: Option<ClassificationFallback>) {
        self.total_holdings += 1;
        match fallback {
            Some(ClassificationFallback::UnknownProductType) => self.unknown_product_types += 1,
            Some(ClassificationFallback::DefaultFundCategory) => self.default_fund_category += 1,
            Some(ClassificationFallback::WrapperWithoutAllocation) => {
                self.wrapper_without_allocation += 1;
            }
            None => {}
        }
    }

    /// Classification fallbacks of any kind.
    #[must_use]
    pub fn classification_fallbacks(&self) -> usize {
        self.unknown_product_types + self.default_fund_category + self.wrapper_without_allocation
    }

    /// Share of holdings classified by a default (0-1).
    #[must_use]
    pub fn classification_fallback_rate(&self) -> f64 {
        ratio(self.classification_fallbacks(), self.total_holdings)
    }

    /// Share of funds split by heuristic (0-1).
    #[must_use]
    pub fn fund_fallback_rate(&self) -> f64 {
        ratio(self.heuristic_fund_splits, self.total_funds)
    }

    /// Returns true if no fallback of any kind was used.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.classification_fallbacks() == 0
            && self.heuristic_fund_splits == 0
            && self.renormalized_factsheets == 0
            && self.name_based_geography == 0
            && self.normalized_geography == 0
            && self.missing_sector_data == 0
            && self.missing_market_cap_data == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_classification() {
        let mut stats = FallbackStats::new();
        stats.record_classification(None);
        stats.record_classification(Some(ClassificationFallback::UnknownProductType));
        stats.record_classification(Some(ClassificationFallback::DefaultFundCategory));
        stats.record_classification(Some(ClassificationFallback::DefaultFundCategory));

        assert_eq!(stats.total_holdings, 4);
        assert_eq!(stats.unknown_product_types, 1);
        assert_eq!(stats.default_fund_category, 2);
        assert_eq!(stats.classification_fallbacks(), 3);
        assert!((stats.classification_fallback_rate() - 0.75).abs() < 1e-12);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_rates_with_zero_denominator() {
        let stats = FallbackStats::new();
        assert_eq!(stats.fund_fallback_rate(), 0.0);
        assert_eq!(stats.classification_fallback_rate(), 0.0);
        assert!(stats.is_clean());
    }

    #[test]
    fn test_fund_fallback_rate() {
        let stats = FallbackStats {
            total_funds: 4,
            heuristic_fund_splits: 1,
            ..FallbackStats::default()
        };
        assert!((stats.fund_fallback_rate() - 0.25).abs() < 1e-12);
    }
}
