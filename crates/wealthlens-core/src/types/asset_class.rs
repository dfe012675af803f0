//! The four-field classification every holding resolves to.

use serde::{Deserialize, Serialize};

/// Economic asset class of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    /// Listed or pooled equity.
    Equity,
    /// Interest-bearing instruments and debt funds.
    FixedIncome,
    /// Mixed equity/debt wrappers whose split is unknown.
    Hybrid,
    /// Gold, silver and commodity funds.
    Commodity,
    /// Property, land and REITs.
    RealAsset,
    /// Bank balances and cash-like funds.
    Cash,
    /// Protection products. Excluded from net worth and allocation.
    Insurance,
    /// Loans and dues. Subtracted from net worth, excluded from allocation.
    Liability,
}

impl AssetClass {
    /// Returns all asset classes in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Equity,
            Self::FixedIncome,
            Self::Hybrid,
            Self::Commodity,
            Self::RealAsset,
            Self::Cash,
            Self::Insurance,
            Self::Liability,
        ]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::FixedIncome => "Fixed Income",
            Self::Hybrid => "Hybrid",
            Self::Commodity => "Commodity",
            Self::RealAsset => "Real Asset",
            Self::Cash => "Cash",
            Self::Insurance => "Insurance",
            Self::Liability => "Liability",
        }
    }

    /// Returns false only for insurance.
    ///
    /// Liabilities are part of net worth (with a negative sign).
    #[must_use]
    pub fn is_included_in_net_worth(&self) -> bool {
        !matches!(self, Self::Insurance)
    }

    /// Returns false for insurance and liabilities.
    #[must_use]
    pub fn is_included_in_allocation(&self) -> bool {
        !matches!(self, Self::Insurance | Self::Liability)
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns false only for insurance.
#[must_use]
pub fn is_included_in_net_worth(asset_class: AssetClass) -> bool {
    asset_class.is_included_in_net_worth()
}

/// Returns false for insurance and liabilities.
#[must_use]
pub fn is_included_in_allocation(asset_class: AssetClass) -> bool {
    asset_class.is_included_in_allocation()
}

/// Top-level allocation bucket shown in allocation charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TopLevelBucket {
    /// Growth assets.
    Growth,
    /// Income and capital-preservation assets.
    IncomeAllocation,
    /// Commodities.
    Commodity,
    /// Real assets.
    RealAsset,
    /// Cash.
    Cash,
    /// Insurance.
    Insurance,
    /// Liabilities.
    Liability,
}

impl TopLevelBucket {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Growth => "Growth",
            Self::IncomeAllocation => "Income Allocation",
            Self::Commodity => "Commodity",
            Self::RealAsset => "Real Asset",
            Self::Cash => "Cash",
            Self::Insurance => "Insurance",
            Self::Liability => "Liability",
        }
    }
}

impl std::fmt::Display for TopLevelBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a holding behaves inside a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskBehavior {
    /// Drives long-run returns, volatile.
    Growth,
    /// Dampens volatility.
    Defensive,
    /// Diversifies against inflation or currency shocks.
    Hedge,
    /// Available on demand.
    Liquidity,
    /// Pays out on an insured event.
    Protection,
    /// Money owed.
    Obligation,
}

impl RiskBehavior {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Growth => "Growth",
            Self::Defensive => "Defensive",
            Self::Hedge => "Hedge",
            Self::Liquidity => "Liquidity",
            Self::Protection => "Protection",
            Self::Obligation => "Obligation",
        }
    }
}

impl std::fmt::Display for RiskBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the upstream valuation layer prices a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationMethod {
    /// Exchange price.
    MarketLinked,
    /// Principal plus accrued interest.
    InterestBased,
    /// Published net asset value.
    #[serde(rename = "NAVBased")]
    NavBased,
    /// Entered by the user.
    Manual,
}

impl ValuationMethod {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketLinked => "Market Linked",
            Self::InterestBased => "Interest Based",
            Self::NavBased => "NAV Based",
            Self::Manual => "Manual",
        }
    }
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Canonical classification of a single holding.
///
/// # Examples
///
/// ```
/// use wealthlens_core::types::{AssetClass, AssetClassification};
///
/// let c = AssetClassification::equity_growth_market_linked();
/// assert_eq!(c.asset_class, AssetClass::Equity);
/// assert!(c.is_included_in_allocation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetClassification {
    /// Asset class.
    pub asset_class: AssetClass,
    /// Allocation bucket.
    pub top_level_bucket: TopLevelBucket,
    /// Portfolio role.
    pub risk_behavior: RiskBehavior,
    /// Valuation source.
    pub valuation_method: ValuationMethod,
}

impl AssetClassification {
    /// Creates a classification from its four fields.
    #[must_use]
    pub const fn new(
        asset_class: AssetClass,
        top_level_bucket: TopLevelBucket,
        risk_behavior: RiskBehavior,
        valuation_method: ValuationMethod,
    ) -> Self {
        Self {
            asset_class,
            top_level_bucket,
            risk_behavior,
            valuation_method,
        }
    }

    /// Equity/Growth/Growth/MarketLinked: stocks and the unknown-type fallback.
    #[must_use]
    pub const fn equity_growth_market_linked() -> Self {
        Self::new(
            AssetClass::Equity,
            TopLevelBucket::Growth,
            RiskBehavior::Growth,
            ValuationMethod::MarketLinked,
        )
    }

    /// Shorthand for the asset-class inclusion predicate.
    #[must_use]
    pub fn is_included_in_net_worth(&self) -> bool {
        self.asset_class.is_included_in_net_worth()
    }

    /// Shorthand for the asset-class inclusion predicate.
    #[must_use]
    pub fn is_included_in_allocation(&self) -> bool {
        self.asset_class.is_included_in_allocation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusion_predicates() {
        for class in AssetClass::all() {
            let in_net_worth = is_included_in_net_worth(*class);
            let in_allocation = is_included_in_allocation(*class);
            match class {
                AssetClass::Insurance => {
                    assert!(!in_net_worth);
                    assert!(!in_allocation);
                }
                AssetClass::Liability => {
                    assert!(in_net_worth);
                    assert!(!in_allocation);
                }
                _ => {
                    assert!(in_net_worth);
                    assert!(in_allocation);
                }
            }
        }
    }

    #[test]
    fn test_asset_class_all() {
        let all = AssetClass::all();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], AssetClass::Equity);
        assert_eq!(all[7], AssetClass::Liability);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", AssetClass::FixedIncome), "Fixed Income");
        assert_eq!(format!("{}", TopLevelBucket::IncomeAllocation), "Income Allocation");
        assert_eq!(format!("{}", ValuationMethod::NavBased), "NAV Based");
    }

    #[test]
    fn test_serde_names() {
        let c = AssetClassification::new(
            AssetClass::Hybrid,
            TopLevelBucket::IncomeAllocation,
            RiskBehavior::Defensive,
            ValuationMethod::NavBased,
        );
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"NAVBased\""));
        assert!(json.contains("\"IncomeAllocation\""));

        let parsed: AssetClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }
}
