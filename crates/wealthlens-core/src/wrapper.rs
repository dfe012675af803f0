//! Splitting ULIP / NPS wrappers into component holdings.
//!
//! A wrapper is not an asset class; its internal fund split is. The classifier
//! handles one component at a time, so callers split a wrapper first and then
//! classify each component.

use rust_decimal::Decimal;

use crate::error::{LensError, LensResult};
use crate::types::{ClassificationHints, NormalizedHolding, UlipNpsAllocation};

/// Splits a wrapper holding into equity, debt and cash components.
///
/// Component values are proportional to the allocation shares (rescaled when
/// the shares do not add up to 100) and always sum to the original value.
/// Zero-share components are omitted. The cash component is typed as cash.
///
/// # Errors
///
/// Returns an error if the holding is not a ULIP/NPS wrapper, or the
/// allocation has a negative share, totals above 100, or has no non-zero share.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wealthlens_core::types::{NormalizedHolding, UlipNpsAllocation};
/// use wealthlens_core::wrapper::split_wrapper_holding;
///
/// let nps = NormalizedHolding::builder()
///     .id("NPS-1")
///     .product_type("NPS")
///     .current_value(dec!(1_000_000))
///     .build()
///     .unwrap();
/// let allocation = UlipNpsAllocation::new(dec!(75), dec!(25), dec!(0)).unwrap();
///
/// let parts = split_wrapper_holding(&nps, &allocation).unwrap();
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[0].current_value, dec!(750_000));
/// assert_eq!(parts[1].current_value, dec!(250_000));
/// ```
pub fn split_wrapper_holding(
    holding: &NormalizedHolding,
    allocation: &UlipNpsAllocation,
) -> LensResult<Vec<NormalizedHolding>> {
    if !holding.product().is_wrapper() {
        return Err(LensError::invalid_holding(
            &holding.id,
            "only ULIP and NPS holdings can be split",
        ));
    }

    // Fields are public, so a hand-built allocation may skip `new`.
    let allocation =
        UlipNpsAllocation::new(allocation.equity_pct, allocation.debt_pct, allocation.cash_pct)?;
    let total = allocation.total();
    if total.is_zero() {
        return Err(LensError::invalid_allocation("all shares are zero"));
    }

    let legs = [
        (Component::Equity, allocation.equity_pct),
        (Component::Debt, allocation.debt_pct),
        (Component::Cash, allocation.cash_pct),
    ];
    let live: Vec<(Component, Decimal)> = legs
        .into_iter()
        .filter(|(_, pct)| !pct.is_zero())
        .collect();

    let mut parts = Vec::with_capacity(live.len());
    let mut assigned = Decimal::ZERO;
    for (i, (component, pct)) in live.iter().enumerate() {
        // The last leg absorbs rounding so the parts reconcile exactly.
        let value = if i + 1 == live.len() {
            holding.current_value - assigned
        } else {
            holding.current_value * *pct / total
        };
        assigned += value;
        parts.push(component.holding(holding, value));
    }
    Ok(parts)
}

#[derive(Debug, Clone, Copy)]
enum Component {
    Equity,
    Debt,
    Cash,
}

impl Component {
    fn holding(self, parent: &NormalizedHolding, value: Decimal) -> NormalizedHolding {
        let (suffix, label, asset_class, product_type, hints) = match self {
            Self::Equity => (
                "equity",
                "Equity",
                "equity",
                parent.product_type.clone(),
                Some(component_hints(parent, Decimal::ONE_HUNDRED, Decimal::ZERO)),
            ),
            Self::Debt => (
                "debt",
                "Debt",
                "debt",
                parent.product_type.clone(),
                Some(component_hints(parent, Decimal::ZERO, Decimal::ONE_HUNDRED)),
            ),
            Self::Cash => ("cash", "Cash", "cash", "Cash".to_string(), None),
        };

        NormalizedHolding {
            id: format!("{}:{}", parent.id, suffix),
            name: format!("{} ({})", parent.name, label),
            product_type,
            asset_class: asset_class.to_string(),
            current_value: value,
            sector: None,
            isin: parent.isin.clone(),
            market_cap: None,
            hints,
        }
    }
}

fn component_hints(parent: &NormalizedHolding, equity: Decimal, debt: Decimal) -> ClassificationHints {
    let base = parent.hints.clone().unwrap_or_default();
    ClassificationHints {
        ulip_nps_allocation: Some(UlipNpsAllocation {
            equity_pct: equity,
            debt_pct: debt,
            cash_pct: Decimal::ZERO,
        }),
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_holding;
    use crate::types::AssetClass;
    use rust_decimal_macros::dec;

    fn ulip(value: Decimal) -> NormalizedHolding {
        NormalizedHolding::builder()
            .id("U1")
            .name("Growth ULIP")
            .product_type("ULIP")
            .current_value(value)
            .build()
            .unwrap()
    }

    #[test]
    fn test_split_three_ways() {
        let allocation = UlipNpsAllocation::new(dec!(60), dec!(30), dec!(10)).unwrap();
        let parts = split_wrapper_holding(&ulip(dec!(100_000)), &allocation).unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].id, "U1:equity");
        assert_eq!(parts[0].current_value, dec!(60_000));
        assert_eq!(parts[1].current_value, dec!(30_000));
        assert_eq!(parts[2].current_value, dec!(10_000));

        let classes: Vec<AssetClass> = parts
            .iter()
            .map(|p| classify_holding(p).classification.asset_class)
            .collect();
        assert_eq!(
            classes,
            vec![AssetClass::Equity, AssetClass::FixedIncome, AssetClass::Cash]
        );
    }

    #[test]
    fn test_split_rescales_partial_allocation() {
        let allocation = UlipNpsAllocation::new(dec!(30), dec!(30), dec!(0)).unwrap();
        let parts = split_wrapper_holding(&ulip(dec!(1000)), &allocation).unwrap();

        assert_eq!(parts.len(), 2);
        let total: Decimal = parts.iter().map(|p| p.current_value).sum();
        assert_eq!(total, dec!(1000));
        assert_eq!(parts[0].current_value, dec!(500));
    }

    #[test]
    fn test_split_reconciles_with_repeating_fractions() {
        let allocation = UlipNpsAllocation::new(dec!(1), dec!(1), dec!(1)).unwrap();
        let parts = split_wrapper_holding(&ulip(dec!(100)), &allocation).unwrap();
        let total: Decimal = parts.iter().map(|p| p.current_value).sum();
        assert_eq!(total, dec!(100));
    }

    #[test]
    fn test_split_rejects_non_wrapper() {
        let stock = NormalizedHolding::builder()
            .id("S1")
            .product_type("Stock")
            .current_value(dec!(10))
            .build()
            .unwrap();
        let allocation = UlipNpsAllocation::new(dec!(100), dec!(0), dec!(0)).unwrap();
        assert!(split_wrapper_holding(&stock, &allocation).is_err());
    }

    #[test]
    fn test_split_rejects_malformed_allocation() {
        let allocation = UlipNpsAllocation {
            equity_pct: dec!(150),
            debt_pct: dec!(-50),
            cash_pct: Decimal::ZERO,
        };
        let err = split_wrapper_holding(&ulip(dec!(100_000)), &allocation).unwrap_err();
        assert!(matches!(err, LensError::InvalidAllocation { .. }));
    }

    #[test]
    fn test_split_rejects_empty_allocation() {
        let allocation = UlipNpsAllocation::default();
        assert!(split_wrapper_holding(&ulip(dec!(10)), &allocation).is_err());
    }
}
