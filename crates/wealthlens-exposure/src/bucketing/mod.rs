//! Dimensional exposure bucketing.
//!
//! This module combines direct equity with look-through fund exposure along
//! one dimension at a time:
//!
//! - **Sector**: keyed by each holding's sector and a fund sector map
//! - **Market cap**: Large / Mid / Small bands with policy ranges
//! - **Geography**: India / International, with fund-name detection when
//!   factsheet geography is missing
//! - **Concentration**: flags rows above a policy threshold
//!
//! Every aggregator takes an explicit `total_market_value` as the percentage
//! denominator and returns rows sorted descending by total. All functions are
//! pure.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use wealthlens_core::types::NormalizedHolding;
//! use wealthlens_exposure::bucketing::*;
//!
//! let holdings = vec![
//!     NormalizedHolding::builder()
//!         .id("ICICIBANK")
//!         .product_type("Stock")
//!         .sector("Banking")
//!         .current_value(dec!(260_000))
//!         .build()
//!         .unwrap(),
//! ];
//!
//! let by_sector = sector_exposure(&holdings, &[], None, dec!(1_000_000));
//! let flagged = flag_concentration(&by_sector, DEFAULT_CONCENTRATION_THRESHOLD);
//! assert_eq!(flagged.len(), 1);
//! ```

mod concentration;
mod geography;
mod ledger;
mod market_cap;
mod sector;

pub use concentration::*;
pub use geography::*;
pub use market_cap::*;
pub use sector::*;

pub(crate) use ledger::rebase_to_row_total;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use wealthlens_core::types::NormalizedHolding;

use crate::types::{find_by_isin, FundLookThrough};

/// Number of funds with no entry in `map`; every fund when `map` is `None`.
#[must_use]
pub fn count_uncovered_funds<V>(
    funds: &[FundLookThrough],
    map: Option<&BTreeMap<String, V>>,
) -> usize {
    funds
        .iter()
        .filter(|fund| {
            map.zip(fund.isin.as_deref())
                .and_then(|(m, isin)| find_by_isin(m, isin))
                .is_none()
        })
        .count()
}

/// Direct equity plus fund equity exposure.
///
/// Sector and market-cap totals add up to this when fund map entries match
/// each fund's equity exposure.
#[must_use]
pub fn equity_universe(
    direct_equity: &[NormalizedHolding],
    funds: &[FundLookThrough],
) -> Decimal {
    direct_equity.iter().map(|h| h.current_value).sum::<Decimal>()
        + funds.iter().map(|f| f.breakdown.equity).sum::<Decimal>()
}
