//! Exposure output types.
//!
//! Everything here is plain data: serializable, owning, and safe to hand
//! across a process boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wealthlens_core::types::{MarketCapBand, RecommendedRange};

use super::config::FundSplit;

/// Equity / debt / other decomposition of one fund or of many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundExposureBreakdown {
    /// Equity exposure.
    pub equity: Decimal,
    /// Debt exposure.
    pub debt: Decimal,
    /// Other exposure.
    pub other: Decimal,
}

impl FundExposureBreakdown {
    /// Splits `value` by ratios. The `other` leg takes the remainder, so the
    /// three legs always sum to `value`.
    #[must_use]
    pub fn from_ratios(value: Decimal, equity: Decimal, debt: Decimal) -> Self {
        let equity = value * equity;
        let debt = value * debt;
        Self {
            equity,
            debt,
            other: value - equity - debt,
        }
    }

    /// Applies a heuristic split to `value`.
    #[must_use]
    pub fn from_split(value: Decimal, split: &FundSplit) -> Self {
        Self::from_ratios(value, split.equity, split.debt)
    }

    /// Sum of the three legs.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.equity + self.debt + self.other
    }
}

impl std::ops::Add for FundExposureBreakdown {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            equity: self.equity + rhs.equity,
            debt: self.debt + rhs.debt,
            other: self.other + rhs.other,
        }
    }
}

impl std::ops::AddAssign for FundExposureBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for FundExposureBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, b| acc + b)
    }
}

/// Heuristic profile chosen for a fund without factsheet data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundProfile {
    /// Equity-oriented (also the default).
    EquityOriented,
    /// Debt fund.
    Debt,
    /// Hybrid fund.
    Hybrid,
}

impl FundProfile {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::EquityOriented => "Equity-oriented",
            Self::Debt => "Debt",
            Self::Hybrid => "Hybrid",
        }
    }
}

/// Where a fund's breakdown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookThroughSource {
    /// Factsheet composition.
    Factsheet,
    /// Policy heuristic for the given profile.
    Heuristic(FundProfile),
}

impl LookThroughSource {
    /// Returns true for a heuristic breakdown.
    #[must_use]
    pub fn is_heuristic(&self) -> bool {
        matches!(self, Self::Heuristic(_))
    }
}

impl std::fmt::Display for LookThroughSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Factsheet => write!(f, "Factsheet"),
            Self::Heuristic(profile) => write!(f, "Heuristic ({})", profile.name()),
        }
    }
}

/// Look-through result for one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundLookThrough {
    /// Holding ID.
    pub holding_id: String,
    /// Fund name.
    pub name: String,
    /// Upper-cased ISIN, if known.
    pub isin: Option<String>,
    /// Current value of the fund holding.
    pub current_value: Decimal,
    /// Decomposed value.
    pub breakdown: FundExposureBreakdown,
    /// Data source.
    pub source: LookThroughSource,
    /// True if factsheet percentages were rescaled to 100.
    pub renormalized: bool,
}

/// Aggregate and per-fund look-through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundExposureSummary {
    /// Sum over all funds.
    pub total: FundExposureBreakdown,
    /// One row per fund, in input order.
    pub per_fund: Vec<FundLookThrough>,
}

impl FundExposureSummary {
    /// Number of funds resolved by heuristic.
    #[must_use]
    pub fn heuristic_count(&self) -> usize {
        self.per_fund.iter().filter(|f| f.source.is_heuristic()).count()
    }

    /// Number of factsheet entries that were rescaled.
    #[must_use]
    pub fn renormalized_count(&self) -> usize {
        self.per_fund.iter().filter(|f| f.renormalized).count()
    }
}

/// Row label of the combined view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureAssetType {
    /// Equity.
    Equity,
    /// Debt.
    Debt,
    /// Cash and everything else.
    CashOther,
}

impl ExposureAssetType {
    /// The three rows, in output order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Equity, Self::Debt, Self::CashOther]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::Debt => "Debt",
            Self::CashOther => "Cash/Other",
        }
    }
}

impl std::fmt::Display for ExposureAssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One row of the combined direct + look-through view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedExposureView {
    /// Row label.
    pub asset_type: ExposureAssetType,
    /// Direct holdings (Equity row only).
    pub direct_holdings: Decimal,
    /// Exposure via funds.
    pub exposure_via_mf: Decimal,
    /// Direct plus via funds.
    pub combined_view: Decimal,
    /// Share of the portfolio total (0-100).
    pub percentage_of_portfolio: f64,
}

/// Exposure to one key of a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionalExposure<K> {
    /// Dimension key.
    pub dimension: K,
    /// Value held directly.
    pub direct_equity: Decimal,
    /// Value held through funds.
    pub via_mf: Decimal,
    /// Direct plus via funds.
    pub total: Decimal,
    /// `total / total_market_value * 100`.
    pub percentage: f64,
}

/// Sector exposure row.
pub type SectorExposure = DimensionalExposure<String>;

/// Geography exposure row.
pub type GeographyExposure = DimensionalExposure<Region>;

/// Geographic region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// India.
    India,
    /// Everything outside India.
    International,
}

impl Region {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::India => "India",
            Self::International => "International",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Market-cap exposure row, annotated with its policy range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapExposure {
    /// Exposure figures.
    #[serde(flatten)]
    pub exposure: DimensionalExposure<MarketCapBand>,
    /// Recommended range for UI comparison.
    pub recommended_range: Option<RecommendedRange>,
}

/// Rows that carry a percentage and can be concentration-flagged.
pub trait HasPercentage {
    /// Percentage of the total (0-100).
    fn percentage(&self) -> f64;
}

impl<K> HasPercentage for DimensionalExposure<K> {
    fn percentage(&self) -> f64 {
        self.percentage
    }
}

impl HasPercentage for MarketCapExposure {
    fn percentage(&self) -> f64 {
        self.exposure.percentage
    }
}
