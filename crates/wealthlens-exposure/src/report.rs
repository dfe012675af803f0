//! One-call exposure analysis.
//!
//! [`ExposureAnalyzer`] runs the whole pipeline: validate, split wrappers,
//! classify and partition, look through funds, aggregate every dimension,
//! flag concentration and count fallbacks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wealthlens_core::classifier::ClassifiedHolding;
use wealthlens_core::totals::PortfolioTotals;
use wealthlens_core::types::NormalizedHolding;
use wealthlens_core::wrapper::split_wrapper_holding;

use crate::bucketing::{
    count_uncovered_funds, flag_concentration, geography_exposure, market_cap_exposure,
    rebase_to_row_total, sector_exposure, GeographyBreakdown, MarketCapBreakdown,
};
use crate::diagnostics::FallbackStats;
use crate::error::ExposureResult;
use crate::lookthrough::{combine_exposure, compute_fund_exposure};
use crate::partition::partition_holdings;
use crate::types::{
    CombinedExposureView, ExposureAssetType, ExposureConfig, FactsheetBundle,
    FundExposureSummary, PercentageBase, SectorExposure,
};

/// Everything one analysis produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureReport {
    /// Classification of every holding (after wrapper splitting), input order.
    pub classifications: Vec<ClassifiedHolding>,
    /// Net-worth and allocation totals.
    pub totals: PortfolioTotals,
    /// Fund look-through, aggregate and per fund.
    pub fund_exposure: FundExposureSummary,
    /// Equity, Debt, Cash/Other rows.
    pub combined: Vec<CombinedExposureView>,
    /// Sector rows, largest first.
    pub sector: Vec<SectorExposure>,
    /// Market-cap rows.
    pub market_cap: MarketCapBreakdown,
    /// Geography rows and international sources.
    pub geography: GeographyBreakdown,
    /// Sector rows above the concentration threshold.
    pub sector_concentration: Vec<SectorExposure>,
    /// Fallback counters.
    pub stats: FallbackStats,
}

impl ExposureReport {
    /// Portfolio value used for the combined view: the allocation total.
    #[must_use]
    pub fn portfolio_value(&self) -> Decimal {
        self.totals.allocation_total
    }

    /// Combined row for an asset type.
    #[must_use]
    pub fn combined_row(&self, asset_type: ExposureAssetType) -> Option<&CombinedExposureView> {
        self.combined.iter().find(|r| r.asset_type == asset_type)
    }
}

/// Runs exposure analysis with a fixed configuration.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wealthlens_core::types::NormalizedHolding;
/// use wealthlens_exposure::{ExposureAnalyzer, ExposureConfig, FactsheetBundle};
///
/// let holdings = vec![
///     NormalizedHolding::builder()
///         .id("A")
///         .product_type("Stock")
///         .sector("Banking")
///         .current_value(dec!(100_000))
///         .build()
///         .unwrap(),
///     NormalizedHolding::builder()
///         .id("C")
///         .product_type("Mutual Fund")
///         .asset_class("equity")
///         .current_value(dec!(200_000))
///         .build()
///         .unwrap(),
/// ];
///
/// let report = ExposureAnalyzer::new(ExposureConfig::default())
///     .analyze(&holdings, &FactsheetBundle::new())
///     .unwrap();
/// assert_eq!(report.combined[0].combined_view, dec!(270_000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExposureAnalyzer {
    config: ExposureConfig,
}

impl ExposureAnalyzer {
    /// Creates an analyzer.
    #[must_use]
    pub fn new(config: ExposureConfig) -> Self {
        Self { config }
    }

    /// The analyzer's configuration.
    #[must_use]
    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Analyzes a portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a holding has an
    /// empty id or a negative value, or a wrapper allocation cannot be split.
    /// Missing or malformed factsheet data is never an error.
    pub fn analyze(
        &self,
        holdings: &[NormalizedHolding],
        factsheets: &FactsheetBundle,
    ) -> ExposureResult<ExposureReport> {
        let config = &self.config;
        config.validate()?;
        for holding in holdings {
            holding.validate()?;
        }

        let holdings = expand_wrappers(holdings)?;
        let factsheets = factsheets.clone().normalized();
        let partitioned = partition_holdings(&holdings, config);

        let mut stats = FallbackStats::new();
        for c in &partitioned.classified {
            stats.record_classification(c.fallback);
        }

        let totals = PortfolioTotals::from_classified(&partitioned.classified);
        let portfolio_value = totals.allocation_total;

        let fund_exposure =
            compute_fund_exposure(&partitioned.funds, Some(&factsheets.composition), config);
        let combined =
            combine_exposure(&partitioned.direct_equity, &fund_exposure.total, portfolio_value);

        let mut sector = sector_exposure(
            &partitioned.direct_equity,
            &fund_exposure.per_fund,
            factsheets.sector.as_ref(),
            portfolio_value,
        );
        let mut market_cap = market_cap_exposure(
            &partitioned.direct_equity,
            &fund_exposure.per_fund,
            factsheets.market_cap.as_ref(),
            portfolio_value,
        );
        let mut geography = geography_exposure(
            &partitioned.direct_equity,
            &partitioned.funds,
            factsheets.geography.as_ref(),
            portfolio_value,
            config,
        );

        if config.percentage_base == PercentageBase::DimensionTotal {
            rebase_to_row_total(sector.iter_mut());
            rebase_to_row_total(market_cap.rows.iter_mut().map(|r| &mut r.exposure));
            rebase_to_row_total(geography.exposures.iter_mut());
        }

        let sector_concentration = flag_concentration(&sector, config.concentration_threshold);

        stats.total_funds = fund_exposure.per_fund.len();
        stats.heuristic_fund_splits = fund_exposure.heuristic_count();
        stats.renormalized_factsheets = fund_exposure.renormalized_count();
        stats.name_based_geography = geography.name_based_funds;
        stats.normalized_geography = geography.normalized_entries;
        stats.missing_sector_data =
            count_uncovered_funds(&fund_exposure.per_fund, factsheets.sector.as_ref());
        stats.missing_market_cap_data =
            count_uncovered_funds(&fund_exposure.per_fund, factsheets.market_cap.as_ref());

        debug!(
            holdings = stats.total_holdings,
            funds = stats.total_funds,
            classification_fallbacks = stats.classification_fallbacks(),
            heuristic_fund_splits = stats.heuristic_fund_splits,
            flagged_sectors = sector_concentration.len(),
            "exposure analysis complete"
        );

        Ok(ExposureReport {
            classifications: partitioned.classified,
            totals,
            fund_exposure,
            combined,
            sector,
            market_cap,
            geography,
            sector_concentration,
            stats,
        })
    }
}

/// Splits every wrapper whose allocation spans more than one leg.
///
/// Single-leg wrappers, including components a caller already split, are
/// kept as they are.
fn expand_wrappers(holdings: &[NormalizedHolding]) -> ExposureResult<Vec<NormalizedHolding>> {
    let mut expanded = Vec::with_capacity(holdings.len());
    for holding in holdings {
        let allocation = holding
            .hints
            .as_ref()
            .and_then(|h| h.ulip_nps_allocation)
            .filter(|a| {
                [a.equity_pct, a.debt_pct, a.cash_pct]
                    .iter()
                    .filter(|pct| !pct.is_zero())
                    .count()
                    > 1
            });

        match allocation {
            Some(allocation) if holding.product().is_wrapper() => {
                expanded.extend(split_wrapper_holding(holding, &allocation)?);
            }
            _ => expanded.push(holding.clone()),
        }
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExposureError;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use wealthlens_core::types::{AssetClass, ClassificationHints, UlipNpsAllocation};

    fn stock(id: &str, sector: &str, value: Decimal) -> NormalizedHolding {
        NormalizedHolding::builder()
            .id(id)
            .product_type("Stock")
            .sector(sector)
            .current_value(value)
            .build()
            .unwrap()
    }

    fn nps(value: Decimal, equity: Decimal, debt: Decimal) -> NormalizedHolding {
        NormalizedHolding::builder()
            .id("NPS")
            .product_type("NPS")
            .current_value(value)
            .hints(ClassificationHints::new().with_allocation(
                UlipNpsAllocation::new(equity, debt, Decimal::ZERO).unwrap(),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_wrapper_is_split_before_classification() {
        let holdings = vec![nps(dec!(1000), dec!(75), dec!(25))];
        let report = ExposureAnalyzer::default()
            .analyze(&holdings, &FactsheetBundle::new())
            .unwrap();

        assert_eq!(report.classifications.len(), 2);
        assert_eq!(report.classifications[0].asset_class(), AssetClass::Equity);
        assert_eq!(report.classifications[1].asset_class(), AssetClass::FixedIncome);
        assert_eq!(report.combined[0].direct_holdings, dec!(750));
        assert_eq!(report.totals.allocated_to(AssetClass::FixedIncome), dec!(250));
    }

    #[test]
    fn test_single_leg_wrapper_not_split() {
        let holdings = vec![nps(dec!(1000), dec!(100), dec!(0))];
        let expanded = expand_wrappers(&holdings).unwrap();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].id, "NPS");
    }

    #[test]
    fn test_dimension_total_base() {
        let holdings = vec![
            stock("A", "Banking", dec!(300)),
            stock("B", "IT", dec!(100)),
            NormalizedHolding::builder()
                .id("FD")
                .product_type("FD")
                .current_value(dec!(600))
                .build()
                .unwrap(),
        ];

        let report = ExposureAnalyzer::default()
            .analyze(&holdings, &FactsheetBundle::new())
            .unwrap();
        assert_relative_eq!(report.sector[0].percentage, 75.0, epsilon = 1e-9);
        assert_eq!(report.sector_concentration.len(), 1);

        let report = ExposureAnalyzer::new(
            ExposureConfig::default().with_percentage_base(PercentageBase::PortfolioValue),
        )
        .analyze(&holdings, &FactsheetBundle::new())
        .unwrap();
        assert_relative_eq!(report.sector[0].percentage, 30.0, epsilon = 1e-9);
        assert_eq!(report.sector_concentration.len(), 1);
    }

    #[test]
    fn test_rejects_negative_value() {
        let mut bad = stock("A", "Banking", dec!(10));
        bad.current_value = dec!(-1);
        let err = ExposureAnalyzer::default()
            .analyze(&[bad], &FactsheetBundle::new())
            .unwrap_err();
        assert!(matches!(err, ExposureError::Holding(_)));
    }

    #[test]
    fn test_rejects_malformed_allocation() {
        let mut bad = nps(dec!(100_000), dec!(60), dec!(40));
        bad.hints = Some(ClassificationHints::new().with_allocation(UlipNpsAllocation {
            equity_pct: dec!(150),
            debt_pct: dec!(-50),
            cash_pct: Decimal::ZERO,
        }));
        let err = ExposureAnalyzer::default()
            .analyze(&[bad], &FactsheetBundle::new())
            .unwrap_err();
        assert!(matches!(err, ExposureError::Holding(_)));

        let json = r#"[{
            "id": "NPS1",
            "name": "NPS Tier 1",
            "product_type": "NPS",
            "current_value": 100000,
            "hints": {"ulip_nps_allocation": {"equity_pct": 150, "debt_pct": -50}}
        }]"#;
        assert!(serde_json::from_str::<Vec<NormalizedHolding>>(json).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let analyzer = ExposureAnalyzer::new(ExposureConfig::default().with_concentration_threshold(-1.0));
        let err = analyzer.analyze(&[], &FactsheetBundle::new()).unwrap_err();
        assert!(matches!(err, ExposureError::InvalidConfig { .. }));
    }

    #[test]
    fn test_empty_portfolio() {
        let report = ExposureAnalyzer::default()
            .analyze(&[], &FactsheetBundle::new())
            .unwrap();
        assert!(report.sector.is_empty());
        assert_eq!(report.combined.len(), 3);
        assert!(!report.market_cap.data_available);
        assert_eq!(report.geography.exposures.len(), 2);
        assert!(report.stats.is_clean());
    }

    #[test]
    fn test_stats_counted() {
        let holdings = vec![
            NormalizedHolding::builder()
                .id("MF")
                .product_type("Mutual Fund")
                .name("Nippon US Equity Fund")
                .isin("INF1")
                .current_value(dec!(100))
                .build()
                .unwrap(),
            NormalizedHolding::builder()
                .id("X")
                .product_type("Crypto")
                .current_value(dec!(5))
                .build()
                .unwrap(),
        ];
        let report = ExposureAnalyzer::default()
            .analyze(&holdings, &FactsheetBundle::new())
            .unwrap();
        let stats = report.stats;
        assert_eq!(stats.total_holdings, 2);
        assert_eq!(stats.unknown_product_types, 1);
        assert_eq!(stats.default_fund_category, 1);
        assert_eq!(stats.heuristic_fund_splits, 1);
        assert_eq!(stats.name_based_geography, 1);
        assert_eq!(stats.missing_sector_data, 1);
        assert_eq!(report.geography.international_sources.len(), 1);
    }
}
