//! Configuration for exposure analytics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{ExposureError, ExposureResult};

/// Default concentration threshold, in percent.
pub const DEFAULT_CONCENTRATION_THRESHOLD: f64 = 25.0;

/// Equity / debt / other ratios applied to a fund without factsheet data.
///
/// These are policy constants, not estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundSplit {
    /// Equity ratio (0-1).
    pub equity: Decimal,
    /// Debt ratio (0-1).
    pub debt: Decimal,
    /// Other ratio (0-1).
    pub other: Decimal,
}

impl FundSplit {
    /// 85% equity / 12% debt / 3% other.
    pub const EQUITY_ORIENTED: Self = Self {
        equity: dec!(0.85),
        debt: dec!(0.12),
        other: dec!(0.03),
    };

    /// 10% equity / 85% debt / 5% other.
    pub const DEBT: Self = Self {
        equity: dec!(0.10),
        debt: dec!(0.85),
        other: dec!(0.05),
    };

    /// 50% equity / 45% debt / 5% other.
    pub const HYBRID: Self = Self {
        equity: dec!(0.50),
        debt: dec!(0.45),
        other: dec!(0.05),
    };

    /// Sum of the three ratios.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.equity + self.debt + self.other
    }

    fn validate(&self, label: &str) -> ExposureResult<()> {
        if self.equity < Decimal::ZERO || self.debt < Decimal::ZERO || self.other < Decimal::ZERO {
            return Err(ExposureError::invalid_config(format!(
                "{label} split has a negative ratio"
            )));
        }
        if self.total() != Decimal::ONE {
            return Err(ExposureError::invalid_config(format!(
                "{label} split sums to {}, expected 1",
                self.total()
            )));
        }
        Ok(())
    }
}

/// Denominator used for dimensional percentages in a full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PercentageBase {
    /// Sum of the dimension's own rows; percentages close to 100.
    #[default]
    DimensionTotal,
    /// The portfolio's allocation total.
    PortfolioValue,
}

/// Configuration for exposure analytics.
///
/// # Examples
///
/// ```
/// use wealthlens_exposure::ExposureConfig;
///
/// let config = ExposureConfig::new().with_concentration_threshold(30.0);
/// assert!(config.validate().is_ok());
/// assert!(ExposureConfig::new().with_concentration_threshold(130.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Concentration threshold in percent.
    pub concentration_threshold: f64,

    /// Heuristic for equity-oriented (and unrecognized) funds.
    pub equity_fund_split: FundSplit,

    /// Heuristic for funds hinted as `debt`.
    pub debt_fund_split: FundSplit,

    /// Heuristic for funds hinted as `hybrid`.
    pub hybrid_fund_split: FundSplit,

    /// Geography pairs summing to at most this are read as percentages.
    pub percent_sum_ceiling: Decimal,

    /// International share assumed for a medium-confidence name match (0-1).
    pub medium_confidence_international: Decimal,

    /// Denominator for dimensional percentages in a report.
    pub percentage_base: PercentageBase,

    /// Enable parallel classification (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum holdings count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            concentration_threshold: DEFAULT_CONCENTRATION_THRESHOLD,
            equity_fund_split: FundSplit::EQUITY_ORIENTED,
            debt_fund_split: FundSplit::DEBT,
            hybrid_fund_split: FundSplit::HYBRID,
            percent_sum_ceiling: dec!(110),
            medium_confidence_international: dec!(0.80),
            percentage_base: PercentageBase::DimensionTotal,
            parallel: true,
            parallel_threshold: 100,
        }
    }
}

impl ExposureConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always classifies sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the concentration threshold.
    #[must_use]
    pub fn with_concentration_threshold(mut self, threshold: f64) -> Self {
        self.concentration_threshold = threshold;
        self
    }

    /// Sets the percentage base.
    #[must_use]
    pub fn with_percentage_base(mut self, base: PercentageBase) -> Self {
        self.percentage_base = base;
        self
    }

    /// Sets the medium-confidence international share.
    #[must_use]
    pub fn with_medium_confidence_international(mut self, share: Decimal) -> Self {
        self.medium_confidence_international = share;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks that every policy value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ExposureError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> ExposureResult<()> {
        if !(0.0..=100.0).contains(&self.concentration_threshold) {
            return Err(ExposureError::invalid_config(format!(
                "concentration threshold {} outside 0..=100",
                self.concentration_threshold
            )));
        }
        self.equity_fund_split.validate("equity fund")?;
        self.debt_fund_split.validate("debt fund")?;
        self.hybrid_fund_split.validate("hybrid fund")?;
        if self.percent_sum_ceiling <= Decimal::ZERO {
            return Err(ExposureError::invalid_config(
                "percent sum ceiling must be positive",
            ));
        }
        if self.medium_confidence_international < Decimal::ZERO
            || self.medium_confidence_international > Decimal::ONE
        {
            return Err(ExposureError::invalid_config(format!(
                "medium-confidence international share {} outside 0..=1",
                self.medium_confidence_international
            )));
        }
        Ok(())
    }
}
