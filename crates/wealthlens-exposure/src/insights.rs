//! Stability insights.
//!
//! [`derive_insights`] turns a report into plain observations;
//! [`enrich_insights`] attaches an explanation and a 0-100 impact score.
//! Impact is the category's base score plus a weighted severity (how far the
//! observed metric is past its trigger), clamped to 0-100.

use serde::{Deserialize, Serialize};
use wealthlens_core::types::AssetClass;

use crate::bucketing::GeographySource;
use crate::report::ExposureReport;
use crate::types::{ExposureAssetType, ExposureConfig};

/// Combined equity share above which the allocation is called equity-heavy.
pub const EQUITY_HEAVY_PCT: f64 = 80.0;

/// International share below which geography is called undiversified.
pub const LOW_INTERNATIONAL_PCT: f64 = 5.0;

/// Cash share above which idle cash is called out.
pub const CASH_DRAG_PCT: f64 = 20.0;

/// Share of funds on heuristic splits above which data quality is called out.
pub const FUND_FALLBACK_PCT: f64 = 50.0;

/// Insight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsightCategory {
    /// Single-sector overexposure.
    Concentration,
    /// Asset allocation balance.
    Allocation,
    /// Domestic versus foreign exposure.
    Geography,
    /// Idle cash.
    Liquidity,
    /// Insurance cover.
    Protection,
    /// Reliance on estimated data.
    DataQuality,
}

impl InsightCategory {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Concentration => "Concentration",
            Self::Allocation => "Allocation",
            Self::Geography => "Geography",
            Self::Liquidity => "Liquidity",
            Self::Protection => "Protection",
            Self::DataQuality => "Data quality",
        }
    }

    /// Impact before severity is added.
    #[must_use]
    pub fn base_score(&self) -> f64 {
        match self {
            Self::Concentration => 40.0,
            Self::Allocation => 30.0,
            Self::Geography | Self::Liquidity => 20.0,
            Self::DataQuality => 15.0,
            Self::Protection => 10.0,
        }
    }

    /// Impact points per point of severity.
    #[must_use]
    pub fn severity_weight(&self) -> f64 {
        match self {
            Self::Concentration => 2.0,
            Self::Allocation => 1.5,
            Self::Geography => 4.0,
            Self::Liquidity => 1.0,
            Self::DataQuality => 0.5,
            Self::Protection => 0.0,
        }
    }

    fn explanation(&self) -> &'static str {
        match self {
            Self::Concentration => {
                "A single sector above the concentration threshold ties a large part of the \
                 portfolio to one set of business conditions, counting both stocks held \
                 directly and the same sector inside mutual funds."
            }
            Self::Allocation => {
                "Once fund holdings are looked through, most of the portfolio moves with the \
                 equity market, so drawdowns hit a larger share of wealth than product labels \
                 suggest."
            }
            Self::Geography => {
                "Nearly all equity exposure is domestic, so returns depend on one economy and \
                 one currency."
            }
            Self::Liquidity => {
                "A large cash balance is safe and liquid but tends to lose value to inflation \
                 over long horizons."
            }
            Self::Protection => {
                "Insurance value is kept out of net worth and allocation totals because it \
                 protects against loss rather than growing wealth."
            }
            Self::DataQuality => {
                "Several funds were split with standard ratios because factsheet data was \
                 unavailable, so fund-level figures are estimates."
            }
        }
    }
}

impl std::fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A plain observation about a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityInsight {
    /// Observation text.
    pub text: String,
    /// Category.
    pub category: InsightCategory,
    /// Percentage points past the trigger (0 for informational insights).
    pub severity: f64,
}

impl StabilityInsight {
    /// Creates an insight.
    #[must_use]
    pub fn new(text: impl Into<String>, category: InsightCategory, severity: f64) -> Self {
        Self {
            text: text.into(),
            category,
            severity,
        }
    }
}

/// An observation with its explanation and impact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedStabilityInsight {
    /// Observation text.
    pub text: String,
    /// Why it matters.
    pub explanation: String,
    /// Impact score, 0-100.
    pub impact: u8,
    /// Category.
    pub category: InsightCategory,
}

/// Impact score for a category and severity, clamped to 0-100.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn impact_score(category: InsightCategory, severity: f64) -> u8 {
    let raw = category.base_score() + category.severity_weight() * severity.max(0.0);
    raw.round().clamp(0.0, 100.0) as u8
}

/// Derives observations from a report.
#[must_use]
pub fn derive_insights(report: &ExposureReport, config: &ExposureConfig) -> Vec<StabilityInsight> {
    let mut insights = Vec::new();

    for row in &report.sector_concentration {
        insights.push(StabilityInsight::new(
            format!(
                "{} makes up {:.1}% of equity exposure, above the {:.0}% threshold",
                row.dimension, row.percentage, config.concentration_threshold
            ),
            InsightCategory::Concentration,
            row.percentage - config.concentration_threshold,
        ));
    }

    if let Some(equity) = report.combined_row(ExposureAssetType::Equity) {
        if equity.percentage_of_portfolio > EQUITY_HEAVY_PCT {
            insights.push(StabilityInsight::new(
                format!(
                    "Equity is {:.1}% of the portfolio after looking through funds",
                    equity.percentage_of_portfolio
                ),
                InsightCategory::Allocation,
                equity.percentage_of_portfolio - EQUITY_HEAVY_PCT,
            ));
        }
    }

    let has_equity = report
        .geography
        .exposures
        .iter()
        .any(|row| !row.total.is_zero());
    let international = report.geography.international_percentage();
    if has_equity && international < LOW_INTERNATIONAL_PCT {
        let basis = match report.geography.source {
            GeographySource::NameHeuristic | GeographySource::Mixed
                if report.geography.name_based_funds > 0 =>
            {
                " (estimated from fund names)"
            }
            _ => "",
        };
        insights.push(StabilityInsight::new(
            format!("International exposure is {international:.1}%{basis}"),
            InsightCategory::Geography,
            LOW_INTERNATIONAL_PCT - international,
        ));
    }

    if let Some(cash) = report
        .totals
        .allocation
        .iter()
        .find(|slice| slice.asset_class == AssetClass::Cash)
    {
        if cash.percentage > CASH_DRAG_PCT {
            insights.push(StabilityInsight::new(
                format!("Cash is {:.1}% of the allocation", cash.percentage),
                InsightCategory::Liquidity,
                cash.percentage - CASH_DRAG_PCT,
            ));
        }
    }

    if !report.totals.excluded_insurance.is_zero() {
        insights.push(StabilityInsight::new(
            format!(
                "Insurance worth {} is held outside net worth",
                report.totals.excluded_insurance.round_dp(2)
            ),
            InsightCategory::Protection,
            0.0,
        ));
    }

    let fallback_pct = report.stats.fund_fallback_rate() * 100.0;
    if report.stats.total_funds > 0 && fallback_pct > FUND_FALLBACK_PCT {
        insights.push(StabilityInsight::new(
            format!(
                "{} of {} funds use estimated splits",
                report.stats.heuristic_fund_splits, report.stats.total_funds
            ),
            InsightCategory::DataQuality,
            fallback_pct - FUND_FALLBACK_PCT,
        ));
    }

    insights
}

/// Attaches an explanation and impact score to one observation.
#[must_use]
pub fn enrich_insight(insight: &StabilityInsight) -> EnhancedStabilityInsight {
    EnhancedStabilityInsight {
        text: insight.text.clone(),
        explanation: insight.category.explanation().to_string(),
        impact: impact_score(insight.category, insight.severity),
        category: insight.category,
    }
}

/// Enriches observations, highest impact first. Ties keep input order.
#[must_use]
pub fn enrich_insights(insights: &[StabilityInsight]) -> Vec<EnhancedStabilityInsight> {
    let mut enriched: Vec<EnhancedStabilityInsight> = insights.iter().map(enrich_insight).collect();
    enriched.sort_by(|a, b| b.impact.cmp(&a.impact));
    enriched
}
