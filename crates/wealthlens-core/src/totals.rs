//! Net-worth and allocation totals.
//!
//! These are the canonical consumers of the two inclusion predicates: insurance
//! never counts, liabilities reduce net worth but never appear in allocation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classifier::ClassifiedHolding;
use crate::types::AssetClass;

/// One slice of the allocation chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Asset class.
    pub asset_class: AssetClass,
    /// Total value in this class.
    pub value: Decimal,
    /// Share of the allocation total (0-100).
    pub percentage: f64,
}

/// Portfolio-level totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of assets counted in net worth.
    pub gross_assets: Decimal,
    /// Sum of liabilities.
    pub liabilities: Decimal,
    /// Gross assets minus liabilities.
    pub net_worth: Decimal,
    /// Sum of values whose class is included in allocation.
    pub allocation_total: Decimal,
    /// Insurance value held outside both totals.
    pub excluded_insurance: Decimal,
    /// Allocation slices in asset-class order, non-zero classes only.
    pub allocation: Vec<AllocationSlice>,
}

impl PortfolioTotals {
    /// Computes totals from classified holdings.
    #[must_use]
    pub fn from_classified(holdings: &[ClassifiedHolding]) -> Self {
        let mut totals = Self::default();
        let mut by_class: Vec<(AssetClass, Decimal)> =
            AssetClass::all().iter().map(|c| (*c, Decimal::ZERO)).collect();

        for h in holdings {
            let class = h.asset_class();
            let value = h.current_value;

            if class == AssetClass::Liability {
                totals.liabilities += value;
            } else if class.is_included_in_net_worth() {
                totals.gross_assets += value;
            } else {
                totals.excluded_insurance += value;
            }

            if class.is_included_in_allocation() {
                totals.allocation_total += value;
                if let Some(slot) = by_class.iter_mut().find(|(c, _)| *c == class) {
                    slot.1 += value;
                }
            }
        }

        totals.net_worth = totals.gross_assets - totals.liabilities;
        totals.allocation = by_class
            .into_iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(asset_class, value)| AllocationSlice {
                asset_class,
                value,
                percentage: percentage_of(value, totals.allocation_total),
            })
            .collect();
        totals
    }

    /// Value allocated to a given class.
    #[must_use]
    pub fn allocated_to(&self, asset_class: AssetClass) -> Decimal {
        self.allocation
            .iter()
            .find(|s| s.asset_class == asset_class)
            .map_or(Decimal::ZERO, |s| s.value)
    }
}

/// `part / whole * 100` as `f64`, or 0 when `whole` is zero.
#[must_use]
pub fn percentage_of(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NormalizedHolding;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn classified(id: &str, product: &str, value: Decimal) -> ClassifiedHolding {
        let holding = NormalizedHolding::builder()
            .id(id)
            .product_type(product)
            .current_value(value)
            .build()
            .unwrap();
        ClassifiedHolding::from_holding(&holding)
    }

    #[test]
    fn test_totals() {
        let holdings = vec![
            classified("S1", "Stock", dec!(600_000)),
            classified("FD1", "FD", dec!(300_000)),
            classified("SAV", "Savings", dec!(100_000)),
            classified("INS", "Term Insurance", dec!(5_000_000)),
            classified("LOAN", "Home Loan", dec!(400_000)),
        ];
        let totals = PortfolioTotals::from_classified(&holdings);

        assert_eq!(totals.gross_assets, dec!(1_000_000));
        assert_eq!(totals.liabilities, dec!(400_000));
        assert_eq!(totals.net_worth, dec!(600_000));
        assert_eq!(totals.allocation_total, dec!(1_000_000));
        assert_eq!(totals.excluded_insurance, dec!(5_000_000));

        assert_eq!(totals.allocation.len(), 3);
        assert_eq!(totals.allocation[0].asset_class, AssetClass::Equity);
        assert_relative_eq!(totals.allocation[0].percentage, 60.0, epsilon = 1e-9);
        assert_eq!(totals.allocated_to(AssetClass::Cash), dec!(100_000));
        assert_eq!(totals.allocated_to(AssetClass::Insurance), Decimal::ZERO);
    }

    #[test]
    fn test_allocation_closure() {
        let holdings = vec![
            classified("A", "Stock", dec!(1)),
            classified("B", "Gold", dec!(1)),
            classified("C", "Bond", dec!(1)),
        ];
        let totals = PortfolioTotals::from_classified(&holdings);
        let sum: f64 = totals.allocation.iter().map(|s| s.percentage).sum();
        assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty() {
        let totals = PortfolioTotals::from_classified(&[]);
        assert!(totals.net_worth.is_zero());
        assert!(totals.allocation.is_empty());
    }

    #[test]
    fn test_percentage_of_zero_whole() {
        assert_eq!(percentage_of(dec!(10), Decimal::ZERO), 0.0);
        assert_relative_eq!(percentage_of(dec!(26), dec!(100)), 26.0);
    }
}
