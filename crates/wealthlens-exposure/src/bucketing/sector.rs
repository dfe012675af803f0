//! Sector exposure.

use rust_decimal::Decimal;
use tracing::debug;
use wealthlens_core::types::NormalizedHolding;

use super::ledger::{Contribution, ExposureLedger};
use crate::types::{find_by_isin, DimensionMap, FundLookThrough, SectorExposure};

/// Key for value whose sector is not known.
pub const UNCLASSIFIED_SECTOR: &str = "Unclassified";

/// Aggregates sector exposure across direct equity and funds.
///
/// Direct equity is keyed by the holding's own sector. A fund found in
/// `sector_map` contributes the map's values; a fund missing from it (or every
/// fund, when no map is given) contributes its equity exposure under
/// [`UNCLASSIFIED_SECTOR`]. Rows are sorted descending by total.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wealthlens_core::types::NormalizedHolding;
/// use wealthlens_exposure::bucketing::sector_exposure;
///
/// let bank = NormalizedHolding::builder()
///     .id("HDFCBANK")
///     .product_type("Stock")
///     .sector("Banking")
///     .current_value(dec!(260_000))
///     .build()
///     .unwrap();
///
/// let rows = sector_exposure(&[bank], &[], None, dec!(1_000_000));
/// assert_eq!(rows[0].dimension, "Banking");
/// assert!((rows[0].percentage - 26.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn sector_exposure(
    direct_equity: &[NormalizedHolding],
    funds: &[FundLookThrough],
    sector_map: Option<&DimensionMap>,
    total_market_value: Decimal,
) -> Vec<SectorExposure> {
    let direct = direct_equity.iter().map(|h| {
        let sector = h
            .sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNCLASSIFIED_SECTOR);
        Contribution::Direct(sector.to_string(), h.current_value)
    });

    let via_funds = funds.iter().flat_map(|fund| fund_contributions(fund, sector_map));

    ExposureLedger::from_contributions(direct.chain(via_funds))
        .into_exposures(total_market_value)
}

fn fund_contributions(
    fund: &FundLookThrough,
    sector_map: Option<&DimensionMap>,
) -> Vec<Contribution<String>> {
    let entry = sector_map
        .zip(fund.isin.as_deref())
        .and_then(|(map, isin)| find_by_isin(map, isin));

    match entry {
        Some(sectors) => sectors
            .iter()
            .map(|(sector, value)| Contribution::ViaFund(sector.clone(), (*value).max(Decimal::ZERO)))
            .collect(),
        None => {
            debug!(holding_id = %fund.holding_id, "no sector data for fund");
            vec![Contribution::ViaFund(
                UNCLASSIFIED_SECTOR.to_string(),
                fund.breakdown.equity,
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FundExposureBreakdown, FundSplit, LookThroughSource};
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn stock(id: &str, sector: Option<&str>, value: Decimal) -> NormalizedHolding {
        let mut b = NormalizedHolding::builder()
            .id(id)
            .product_type("Stock")
            .current_value(value);
        if let Some(s) = sector {
            b = b.sector(s);
        }
        b.build().unwrap()
    }

    fn fund(isin: &str, value: Decimal) -> FundLookThrough {
        FundLookThrough {
            holding_id: isin.to_string(),
            name: format!("Fund {isin}"),
            isin: Some(isin.to_string()),
            current_value: value,
            breakdown: FundExposureBreakdown::from_split(value, &FundSplit::EQUITY_ORIENTED),
            source: LookThroughSource::Factsheet,
            renormalized: false,
        }
    }

    #[test]
    fn test_direct_only() {
        let holdings = vec![
            stock("A", Some("Banking"), dec!(260_000)),
            stock("B", Some("IT"), dec!(140_000)),
        ];
        let rows = sector_exposure(&holdings, &[], None, dec!(1_000_000));
        assert_eq!(rows.len(), 2);
        assert_relative_eq!(rows[0].percentage, 26.0, epsilon = 1e-9);
        assert_relative_eq!(rows[1].percentage, 14.0, epsilon = 1e-9);
    }

    #[test]
    fn test_direct_and_fund_map() {
        let holdings = vec![stock("A", Some("Banking"), dec!(100))];
        let mut map: DimensionMap = BTreeMap::new();
        map.entry("INF1".into())
            .or_default()
            .extend([("Banking".to_string(), dec!(50)), ("Pharma".to_string(), dec!(200))]);

        let rows = sector_exposure(&holdings, &[fund("INF1", dec!(300))], Some(&map), dec!(350));
        assert_eq!(rows[0].dimension, "Pharma");
        assert_eq!(rows[0].via_mf, dec!(200));
        assert_eq!(rows[1].dimension, "Banking");
        assert_eq!(rows[1].direct_equity, dec!(100));
        assert_eq!(rows[1].via_mf, dec!(50));
        assert_eq!(rows[1].total, dec!(150));
    }

    #[test]
    fn test_missing_sector_and_uncovered_fund() {
        let holdings = vec![stock("A", None, dec!(100)), stock("B", Some("  "), dec!(50))];
        let rows = sector_exposure(&holdings, &[fund("INF9", dec!(100))], Some(&BTreeMap::new()), dec!(235));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dimension, UNCLASSIFIED_SECTOR);
        assert_eq!(rows[0].direct_equity, dec!(150));
        assert_eq!(rows[0].via_mf, dec!(85));
        assert_relative_eq!(rows[0].percentage, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_map_value_clamped() {
        let mut map: DimensionMap = BTreeMap::new();
        map.entry("INF1".into())
            .or_default()
            .insert("Energy".to_string(), dec!(-10));
        let rows = sector_exposure(&[], &[fund("INF1", dec!(100))], Some(&map), dec!(100));
        assert_eq!(rows[0].total, Decimal::ZERO);
    }

    #[test]
    fn test_idempotent() {
        let holdings = vec![
            stock("A", Some("Banking"), dec!(10)),
            stock("B", Some("Auto"), dec!(10)),
        ];
        let a = sector_exposure(&holdings, &[], None, dec!(20));
        let b = sector_exposure(&holdings, &[], None, dec!(20));
        assert_eq!(a, b);
    }
}
