//! Combined direct + look-through asset view.

use rust_decimal::Decimal;
use wealthlens_core::totals::percentage_of;
use wealthlens_core::types::NormalizedHolding;

use crate::types::{CombinedExposureView, ExposureAssetType, FundExposureBreakdown};

/// Merges direct equity with fund look-through into exactly three rows:
/// Equity, Debt, Cash/Other.
///
/// Only the Equity row carries direct holdings. Nothing is filtered; zero
/// rows are kept.
#[must_use]
pub fn combine_exposure(
    direct_equity: &[NormalizedHolding],
    fund_exposure: &FundExposureBreakdown,
    total_portfolio_value: Decimal,
) -> Vec<CombinedExposureView> {
    let direct: Decimal = direct_equity.iter().map(|h| h.current_value).sum();

    ExposureAssetType::all()
        .iter()
        .map(|&asset_type| {
            let (direct_holdings, via_mf) = match asset_type {
                ExposureAssetType::Equity => (direct, fund_exposure.equity),
                ExposureAssetType::Debt => (Decimal::ZERO, fund_exposure.debt),
                ExposureAssetType::CashOther => (Decimal::ZERO, fund_exposure.other),
            };
            let combined = direct_holdings + via_mf;
            CombinedExposureView {
                asset_type,
                direct_holdings,
                exposure_via_mf: via_mf,
                combined_view: combined,
                percentage_of_portfolio: percentage_of(combined, total_portfolio_value),
            }
        })
        .collect()
}
