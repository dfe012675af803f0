//! Fund look-through calculator.

use rust_decimal::Decimal;
use tracing::debug;
use wealthlens_core::types::NormalizedHolding;

use crate::types::{
    find_by_isin, CompositionMap, ExposureConfig, FundComposition, FundExposureBreakdown,
    FundExposureSummary, FundLookThrough, FundProfile, FundSplit, LookThroughSource,
};

/// Splits each fund into equity, debt and other exposure.
///
/// A fund whose ISIN appears in `factsheets` is split by its composition.
/// Any other fund is split by the policy heuristic for its profile (see
/// [`fund_profile`]). The total always equals the sum of the funds' values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wealthlens_core::types::NormalizedHolding;
/// use wealthlens_exposure::lookthrough::compute_fund_exposure;
/// use wealthlens_exposure::ExposureConfig;
///
/// let debt_fund = NormalizedHolding::builder()
///     .id("B")
///     .product_type("Mutual Fund")
///     .asset_class("debt")
///     .current_value(dec!(50_000))
///     .build()
///     .unwrap();
///
/// let summary = compute_fund_exposure(&[debt_fund], None, &ExposureConfig::default());
/// assert_eq!(summary.total.equity, dec!(5_000));
/// assert_eq!(summary.total.debt, dec!(42_500));
/// assert_eq!(summary.total.other, dec!(2_500));
/// ```
#[must_use]
pub fn compute_fund_exposure(
    funds: &[NormalizedHolding],
    factsheets: Option<&CompositionMap>,
    config: &ExposureConfig,
) -> FundExposureSummary {
    let per_fund: Vec<FundLookThrough> = funds
        .iter()
        .map(|fund| look_through_fund(fund, factsheets, config))
        .collect();
    let total = per_fund.iter().map(|f| f.breakdown).sum();
    FundExposureSummary { total, per_fund }
}

/// Look-through for a single fund.
#[must_use]
pub fn look_through_fund(
    fund: &NormalizedHolding,
    factsheets: Option<&CompositionMap>,
    config: &ExposureConfig,
) -> FundLookThrough {
    let isin = fund.isin_key();
    let composition = factsheets
        .zip(isin.as_deref())
        .and_then(|(map, key)| find_by_isin(map, key));

    let (breakdown, source, renormalized) =
        match composition.and_then(|c| split_by_composition(fund, c)) {
            Some((breakdown, renormalized)) => (breakdown, LookThroughSource::Factsheet, renormalized),
            None => {
                let profile = fund_profile(fund);
                debug!(
                    holding_id = %fund.id,
                    profile = profile.name(),
                    "no factsheet composition, using heuristic split"
                );
                let split = heuristic_split(profile, config);
                (
                    FundExposureBreakdown::from_split(fund.current_value, split),
                    LookThroughSource::Heuristic(profile),
                    false,
                )
            }
        };

    FundLookThrough {
        holding_id: fund.id.clone(),
        name: fund.name.clone(),
        isin,
        current_value: fund.current_value,
        breakdown,
        source,
        renormalized,
    }
}

/// Heuristic profile of a fund.
///
/// Keyed on the holding's asset-class hint: `debt` and `hybrid` select their
/// profiles, any other non-empty hint is equity-oriented. With no hint, the
/// fund-category flags decide, and the default is equity-oriented.
#[must_use]
pub fn fund_profile(fund: &NormalizedHolding) -> FundProfile {
    match fund.asset_class_hint().as_str() {
        "debt" => FundProfile::Debt,
        "hybrid" => FundProfile::Hybrid,
        "" => match &fund.hints {
            Some(h) if h.is_debt_mf => FundProfile::Debt,
            Some(h) if h.is_hybrid_mf => FundProfile::Hybrid,
            _ => FundProfile::EquityOriented,
        },
        _ => FundProfile::EquityOriented,
    }
}

fn heuristic_split(profile: FundProfile, config: &ExposureConfig) -> &FundSplit {
    match profile {
        FundProfile::EquityOriented => &config.equity_fund_split,
        FundProfile::Debt => &config.debt_fund_split,
        FundProfile::Hybrid => &config.hybrid_fund_split,
    }
}

/// Returns `None` when the composition carries no usable percentage.
fn split_by_composition(
    fund: &NormalizedHolding,
    composition: &FundComposition,
) -> Option<(FundExposureBreakdown, bool)> {
    let clamped = composition.clamped();
    let total = clamped.total();
    if total.is_zero() {
        debug!(holding_id = %fund.id, "factsheet composition sums to zero, ignoring");
        return None;
    }

    let renormalized = total != Decimal::ONE_HUNDRED || clamped != *composition;
    if renormalized {
        debug!(
            holding_id = %fund.id,
            total = %total,
            "factsheet composition rescaled to 100%"
        );
    }

    let breakdown = FundExposureBreakdown::from_ratios(
        fund.current_value,
        clamped.equity_pct / total,
        clamped.debt_pct / total,
    );
    Some((breakdown, renormalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wealthlens_core::types::ClassificationHints;

    fn fund(id: &str, asset_class: &str, value: Decimal) -> NormalizedHolding {
        NormalizedHolding::builder()
            .id(id)
            .product_type("Mutual Fund")
            .asset_class(asset_class)
            .current_value(value)
            .isin(format!("inf{id}"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_heuristic_splits() {
        let config = ExposureConfig::default();
        let funds = vec![
            fund("B", "debt", dec!(50_000)),
            fund("C", "equity", dec!(200_000)),
        ];
        let summary = compute_fund_exposure(&funds, None, &config);

        let b = &summary.per_fund[0];
        assert_eq!(b.breakdown.equity, dec!(5_000));
        assert_eq!(b.breakdown.debt, dec!(42_500));
        assert_eq!(b.breakdown.other, dec!(2_500));
        assert_eq!(b.source, LookThroughSource::Heuristic(FundProfile::Debt));

        let c = &summary.per_fund[1];
        assert_eq!(c.breakdown.equity, dec!(170_000));
        assert_eq!(c.breakdown.debt, dec!(24_000));
        assert_eq!(c.breakdown.other, dec!(6_000));

        assert_eq!(summary.total.equity, dec!(175_000));
        assert_eq!(summary.total.total(), dec!(250_000));
        assert_eq!(summary.heuristic_count(), 2);
    }

    #[test]
    fn test_hybrid_and_unknown_hint() {
        let config = ExposureConfig::default();
        let hybrid = look_through_fund(&fund("H", "Hybrid", dec!(1000)), None, &config);
        assert_eq!(hybrid.breakdown.equity, dec!(500));
        assert_eq!(hybrid.breakdown.debt, dec!(450));

        let other = look_through_fund(&fund("G", "gold", dec!(1000)), None, &config);
        assert_eq!(other.source, LookThroughSource::Heuristic(FundProfile::EquityOriented));
        assert_eq!(other.breakdown.equity, dec!(850));
    }

    #[test]
    fn test_equity_etf_without_factsheet_uses_fund_heuristic() {
        let etf = NormalizedHolding::builder()
            .id("NIFTYBEES")
            .product_type("ETF")
            .asset_class("equity")
            .current_value(dec!(1000))
            .build()
            .unwrap();
        let result = look_through_fund(&etf, None, &ExposureConfig::default());
        assert_eq!(result.source, LookThroughSource::Heuristic(FundProfile::EquityOriented));
        assert_eq!(result.breakdown.equity, dec!(850));
        assert_eq!(result.breakdown.debt, dec!(120));
    }

    #[test]
    fn test_empty_hint_uses_category_flags() {
        let holding = NormalizedHolding::builder()
            .id("D")
            .product_type("Mutual Fund")
            .current_value(dec!(100))
            .hints(ClassificationHints::new().debt_fund())
            .build()
            .unwrap();
        assert_eq!(fund_profile(&holding), FundProfile::Debt);
    }

    #[test]
    fn test_factsheet_case_insensitive() {
        let mut map = CompositionMap::new();
        map.insert("INFF".into(), FundComposition::new(dec!(70), dec!(25), dec!(5)));

        let result = look_through_fund(&fund("F", "debt", dec!(10_000)), Some(&map), &ExposureConfig::default());
        assert_eq!(result.source, LookThroughSource::Factsheet);
        assert_eq!(result.breakdown.equity, dec!(7_000));
        assert_eq!(result.breakdown.debt, dec!(2_500));
        assert_eq!(result.breakdown.other, dec!(500));
        assert!(!result.renormalized);
    }

    #[test]
    fn test_factsheet_rescaled() {
        let mut map = CompositionMap::new();
        map.insert("INFF".into(), FundComposition::new(dec!(45), dec!(45), dec!(0)));

        let result = look_through_fund(&fund("F", "", dec!(1_000)), Some(&map), &ExposureConfig::default());
        assert!(result.renormalized);
        assert_eq!(result.breakdown.equity, dec!(500));
        assert_eq!(result.breakdown.debt, dec!(500));
        assert_eq!(result.breakdown.total(), dec!(1_000));
    }

    #[test]
    fn test_zero_factsheet_falls_back() {
        let mut map = CompositionMap::new();
        map.insert("INFF".into(), FundComposition::default());

        let result = look_through_fund(&fund("F", "hybrid", dec!(1_000)), Some(&map), &ExposureConfig::default());
        assert_eq!(result.source, LookThroughSource::Heuristic(FundProfile::Hybrid));
    }

    #[test]
    fn test_fund_without_isin_uses_heuristic() {
        let holding = NormalizedHolding::builder()
            .id("N")
            .product_type("Mutual Fund")
            .current_value(dec!(100))
            .build()
            .unwrap();
        let mut map = CompositionMap::new();
        map.insert("INFN".into(), FundComposition::new(dec!(100), dec!(0), dec!(0)));

        let result = look_through_fund(&holding, Some(&map), &ExposureConfig::default());
        assert!(result.source.is_heuristic());
        assert!(result.isin.is_none());
    }

    #[test]
    fn test_empty_input() {
        let summary = compute_fund_exposure(&[], None, &ExposureConfig::default());
        assert_eq!(summary.total, FundExposureBreakdown::default());
        assert!(summary.per_fund.is_empty());
    }
}
