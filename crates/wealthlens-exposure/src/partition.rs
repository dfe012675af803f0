//! Splitting classified holdings into look-through partitions.

use serde::{Deserialize, Serialize};
use wealthlens_core::classifier::ClassifiedHolding;
use wealthlens_core::types::{AssetClass, NormalizedHolding};

use crate::parallel::classify_holdings;
use crate::types::ExposureConfig;

/// Holdings split by how their exposure is computed.
///
/// Each partition keeps input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedHoldings {
    /// Equity held directly: stocks, unknown-type fallbacks, equity wrapper legs.
    pub direct_equity: Vec<NormalizedHolding>,
    /// Pooled funds subject to look-through.
    pub funds: Vec<NormalizedHolding>,
    /// Everything else.
    pub other: Vec<NormalizedHolding>,
    /// Classification of every input holding, in input order.
    pub classified: Vec<ClassifiedHolding>,
}

/// Classifies holdings and partitions them.
///
/// Mutual funds, index funds and ETFs go to `funds` unless they classify as
/// Commodity or Cash; an equity ETF is looked through like any other fund.
/// Non-fund holdings classified as Equity go to `direct_equity`.
#[must_use]
pub fn partition_holdings(
    holdings: &[NormalizedHolding],
    config: &ExposureConfig,
) -> PartitionedHoldings {
    let classified = classify_holdings(holdings, config);

    let mut partitioned = PartitionedHoldings::default();
    for (holding, c) in holdings.iter().zip(&classified) {
        let class = c.asset_class();
        if c.product.is_pooled_fund() {
            if matches!(class, AssetClass::Commodity | AssetClass::Cash) {
                partitioned.other.push(holding.clone());
            } else {
                partitioned.funds.push(holding.clone());
            }
        } else if class == AssetClass::Equity {
            partitioned.direct_equity.push(holding.clone());
        } else {
            partitioned.other.push(holding.clone());
        }
    }
    partitioned.classified = classified;
    partitioned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use wealthlens_core::types::ClassificationHints;

    fn holding(id: &str, product: &str, value: Decimal) -> NormalizedHolding {
        NormalizedHolding::builder()
            .id(id)
            .product_type(product)
            .current_value(value)
            .build()
            .unwrap()
    }

    fn ids(holdings: &[NormalizedHolding]) -> Vec<&str> {
        holdings.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_partition() {
        let gold_etf = NormalizedHolding::builder()
            .id("GETF")
            .product_type("ETF")
            .current_value(dec!(10))
            .hints(ClassificationHints::new().gold())
            .build()
            .unwrap();
        let holdings = vec![
            holding("S1", "Stock", dec!(100)),
            holding("MF1", "Mutual Fund", dec!(200)),
            holding("FD1", "FD", dec!(50)),
            gold_etf,
            holding("X1", "Vintage Cars", dec!(5)),
            holding("IDX", "Index Fund", dec!(30)),
            holding("LQ", "Liquid Fund", dec!(20)),
        ];
        let p = partition_holdings(&holdings, &ExposureConfig::default());

        assert_eq!(ids(&p.direct_equity), vec!["S1", "X1"]);
        assert_eq!(ids(&p.funds), vec!["MF1", "IDX"]);
        assert_eq!(ids(&p.other), vec!["FD1", "GETF", "LQ"]);
        assert_eq!(p.classified.len(), holdings.len());
        assert_eq!(p.classified[2].holding_id, "FD1");
    }

    #[test]
    fn test_partition_empty() {
        let p = partition_holdings(&[], &ExposureConfig::default());
        assert!(p.direct_equity.is_empty());
        assert!(p.funds.is_empty());
        assert!(p.classified.is_empty());
    }
}
