//! Market-cap exposure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wealthlens_core::types::{MarketCapBand, NormalizedHolding};

use super::ledger::{Contribution, ExposureLedger};
use crate::types::{
    find_by_isin, DimensionMap, DimensionalExposure, FundLookThrough, MarketCapExposure,
};

/// Market-cap rows plus whether any source data backed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapBreakdown {
    /// Rows sorted descending by total.
    pub rows: Vec<MarketCapExposure>,
    /// False when the rows are zero-filled placeholders.
    pub data_available: bool,
}

/// Aggregates market-cap exposure across direct equity and funds.
///
/// With no band on any direct holding and no market-cap map, there is nothing
/// to aggregate: the result holds zero Large, Mid and Small rows annotated
/// with their recommended ranges, and `data_available` is false. Values are
/// never estimated.
///
/// Otherwise the three standard bands are always present; direct equity
/// without a band, fund map keys that do not parse as a band, and funds
/// missing from the map go to an `Unclassified` row, shown only when
/// non-zero.
#[must_use]
pub fn market_cap_exposure(
    direct_equity: &[NormalizedHolding],
    funds: &[FundLookThrough],
    market_cap_map: Option<&DimensionMap>,
    total_market_value: Decimal,
) -> MarketCapBreakdown {
    let data_available = direct_equity.iter().any(|h| h.market_cap.is_some())
        || market_cap_map.is_some_and(|m| !m.is_empty());

    if !data_available {
        debug!("no market-cap data, returning placeholder rows");
        return MarketCapBreakdown {
            rows: placeholder_rows(),
            data_available: false,
        };
    }

    let seed = MarketCapBand::standard()
        .iter()
        .map(|&band| Contribution::Direct(band, Decimal::ZERO));

    let direct = direct_equity.iter().map(|h| {
        Contribution::Direct(
            h.market_cap.unwrap_or(MarketCapBand::Unclassified),
            h.current_value,
        )
    });

    let via_funds = funds.iter().flat_map(|fund| fund_contributions(fund, market_cap_map));

    let rows = ExposureLedger::from_contributions(seed.chain(direct).chain(via_funds))
        .into_exposures(total_market_value)
        .into_iter()
        .filter(|row| row.dimension != MarketCapBand::Unclassified || !row.total.is_zero())
        .map(annotate)
        .collect();

    MarketCapBreakdown {
        rows,
        data_available: true,
    }
}

fn fund_contributions(
    fund: &FundLookThrough,
    market_cap_map: Option<&DimensionMap>,
) -> Vec<Contribution<MarketCapBand>> {
    let entry = market_cap_map
        .zip(fund.isin.as_deref())
        .and_then(|(map, isin)| find_by_isin(map, isin));

    match entry {
        Some(bands) => bands
            .iter()
            .map(|(label, value)| {
                let band = MarketCapBand::parse(label).unwrap_or(MarketCapBand::Unclassified);
                Contribution::ViaFund(band, (*value).max(Decimal::ZERO))
            })
            .collect(),
        None => {
            debug!(holding_id = %fund.holding_id, "no market-cap data for fund");
            vec![Contribution::ViaFund(
                MarketCapBand::Unclassified,
                fund.breakdown.equity,
            )]
        }
    }
}

fn annotate(exposure: DimensionalExposure<MarketCapBand>) -> MarketCapExposure {
    MarketCapExposure {
        recommended_range: exposure.dimension.recommended_range(),
        exposure,
    }
}

fn placeholder_rows() -> Vec<MarketCapExposure> {
    MarketCapBand::standard()
        .iter()
        .map(|&band| {
            annotate(DimensionalExposure {
                dimension: band,
                direct_equity: Decimal::ZERO,
                via_mf: Decimal::ZERO,
                total: Decimal::ZERO,
                percentage: 0.0,
            })
        })
        .collect()
}
