//! Asset classifier.
//!
//! Maps a product label plus optional hints to an [`AssetClassification`].
//! Resolution is a single ordered `match` over [`ProductType`]; the first arm
//! that applies wins:
//!
//! 1. Stocks
//! 2. Mutual funds and index funds (category hint, else Equity)
//! 3. ETFs (Commodity if gold-hinted, else Equity)
//! 4. Interest-bearing instruments (FD, bonds, PPF, EPF)
//! 5. ULIP / NPS wrappers (allocation data, else Hybrid)
//! 6. Commodities
//! 7. Real assets
//! 8. Cash-like balances and funds
//! 9. Insurance
//! 10. Liabilities
//! 11. Anything else: Equity, with a warning
//!
//! Classification never fails. Every degraded path is tagged with a
//! [`ClassificationFallback`] so callers can count how often it happens.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    AssetClass, AssetClassification, ClassificationHints, NormalizedHolding, ProductType,
    RiskBehavior, TopLevelBucket, ValuationMethod,
};

const STOCK: AssetClassification = AssetClassification::equity_growth_market_linked();

const EQUITY_FUND: AssetClassification = AssetClassification::new(
    AssetClass::Equity,
    TopLevelBucket::Growth,
    RiskBehavior::Growth,
    ValuationMethod::NavBased,
);

const DEBT_FUND: AssetClassification = AssetClassification::new(
    AssetClass::FixedIncome,
    TopLevelBucket::IncomeAllocation,
    RiskBehavior::Defensive,
    ValuationMethod::NavBased,
);

const HYBRID_FUND: AssetClassification = AssetClassification::new(
    AssetClass::Hybrid,
    TopLevelBucket::IncomeAllocation,
    RiskBehavior::Defensive,
    ValuationMethod::NavBased,
);

const GOLD_FUND: AssetClassification = AssetClassification::new(
    AssetClass::Commodity,
    TopLevelBucket::Commodity,
    RiskBehavior::Hedge,
    ValuationMethod::NavBased,
);

const REAL_ESTATE_FUND: AssetClassification = AssetClassification::new(
    AssetClass::RealAsset,
    TopLevelBucket::RealAsset,
    RiskBehavior::Hedge,
    ValuationMethod::NavBased,
);

const GOLD_ETF: AssetClassification = AssetClassification::new(
    AssetClass::Commodity,
    TopLevelBucket::Commodity,
    RiskBehavior::Hedge,
    ValuationMethod::MarketLinked,
);

const INTEREST_BEARING: AssetClassification = AssetClassification::new(
    AssetClass::FixedIncome,
    TopLevelBucket::IncomeAllocation,
    RiskBehavior::Defensive,
    ValuationMethod::InterestBased,
);

const COMMODITY: AssetClassification = AssetClassification::new(
    AssetClass::Commodity,
    TopLevelBucket::Commodity,
    RiskBehavior::Hedge,
    ValuationMethod::MarketLinked,
);

const PHYSICAL_REAL_ASSET: AssetClassification = AssetClassification::new(
    AssetClass::RealAsset,
    TopLevelBucket::RealAsset,
    RiskBehavior::Hedge,
    ValuationMethod::Manual,
);

const REIT: AssetClassification = AssetClassification::new(
    AssetClass::RealAsset,
    TopLevelBucket::RealAsset,
    RiskBehavior::Hedge,
    ValuationMethod::MarketLinked,
);

const BANK_CASH: AssetClassification = AssetClassification::new(
    AssetClass::Cash,
    TopLevelBucket::Cash,
    RiskBehavior::Liquidity,
    ValuationMethod::InterestBased,
);

const LIQUID_FUND: AssetClassification = AssetClassification::new(
    AssetClass::Cash,
    TopLevelBucket::Cash,
    RiskBehavior::Liquidity,
    ValuationMethod::NavBased,
);

const INSURANCE: AssetClassification = AssetClassification::new(
    AssetClass::Insurance,
    TopLevelBucket::Insurance,
    RiskBehavior::Protection,
    ValuationMethod::Manual,
);

const LIABILITY: AssetClassification = AssetClassification::new(
    AssetClass::Liability,
    TopLevelBucket::Liability,
    RiskBehavior::Obligation,
    ValuationMethod::Manual,
);

/// Why a classification used a default instead of a specific rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationFallback {
    /// The product label is not in the taxonomy; defaulted to Equity.
    UnknownProductType,
    /// A fund carried no category hint; defaulted to Equity.
    DefaultFundCategory,
    /// A ULIP/NPS wrapper had no usable allocation; defaulted to Hybrid.
    WrapperWithoutAllocation,
}

impl ClassificationFallback {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnknownProductType => "Unknown product type",
            Self::DefaultFundCategory => "Default fund category",
            Self::WrapperWithoutAllocation => "Wrapper without allocation",
        }
    }
}

impl std::fmt::Display for ClassificationFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classification together with the fallback, if any, that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// The resolved classification.
    pub classification: AssetClassification,
    /// Set when a default was used.
    pub fallback: Option<ClassificationFallback>,
}

impl ClassificationOutcome {
    const fn rule(classification: AssetClassification) -> Self {
        Self {
            classification,
            fallback: None,
        }
    }

    const fn fallback(classification: AssetClassification, why: ClassificationFallback) -> Self {
        Self {
            classification,
            fallback: Some(why),
        }
    }

    /// Returns true if a default was used.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Classifies a free-text product label.
///
/// # Examples
///
/// ```
/// use wealthlens_core::classifier::classify;
/// use wealthlens_core::types::{AssetClass, ValuationMethod};
///
/// let fd = classify("Fixed Deposit", None);
/// assert_eq!(fd.asset_class, AssetClass::FixedIncome);
/// assert_eq!(fd.valuation_method, ValuationMethod::InterestBased);
///
/// // Unknown labels fall back to Equity rather than failing.
/// assert_eq!(classify("Vintage Watches", None).asset_class, AssetClass::Equity);
/// ```
#[must_use]
pub fn classify(product_type: &str, hints: Option<&ClassificationHints>) -> AssetClassification {
    classify_detailed(product_type, hints).classification
}

/// Classifies a free-text product label and reports any fallback used.
#[must_use]
pub fn classify_detailed(
    product_type: &str,
    hints: Option<&ClassificationHints>,
) -> ClassificationOutcome {
    classify_product(&ProductType::parse(product_type), hints)
}

/// Classifies a holding using its product label and hints.
///
/// See [`NormalizedHolding::classification_hints`] for how a fund's
/// asset-class hint stands in for a missing category flag.
#[must_use]
pub fn classify_holding(holding: &NormalizedHolding) -> ClassificationOutcome {
    classify_product(&holding.product(), holding.classification_hints().as_ref())
}

/// Classifies an already-parsed product type.
#[must_use]
pub fn classify_product(
    product: &ProductType,
    hints: Option<&ClassificationHints>,
) -> ClassificationOutcome {
    match product {
        ProductType::Stock => ClassificationOutcome::rule(STOCK),

        ProductType::MutualFund | ProductType::IndexFund => classify_fund(product, hints),

        ProductType::Etf => {
            if hints.is_some_and(|h| h.is_gold_etf) {
                ClassificationOutcome::rule(GOLD_ETF)
            } else {
                ClassificationOutcome::rule(STOCK)
            }
        }

        ProductType::FixedDeposit | ProductType::Bond | ProductType::Ppf | ProductType::Epf => {
            ClassificationOutcome::rule(INTEREST_BEARING)
        }

        ProductType::Ulip | ProductType::Nps => classify_wrapper(product, hints),

        ProductType::Gold | ProductType::Silver => ClassificationOutcome::rule(COMMODITY),

        ProductType::RealEstate | ProductType::Land => {
            ClassificationOutcome::rule(PHYSICAL_REAL_ASSET)
        }
        ProductType::Reit => ClassificationOutcome::rule(REIT),

        ProductType::BankAccount => ClassificationOutcome::rule(BANK_CASH),
        ProductType::LiquidFund => ClassificationOutcome::rule(LIQUID_FUND),

        ProductType::Insurance => ClassificationOutcome::rule(INSURANCE),

        ProductType::Loan | ProductType::CreditCard => ClassificationOutcome::rule(LIABILITY),

        ProductType::Unknown(label) => {
            tracing::warn!(
                product_type = %label,
                "unrecognized product type, defaulting to Equity"
            );
            ClassificationOutcome::fallback(STOCK, ClassificationFallback::UnknownProductType)
        }
    }
}

fn classify_fund(product: &ProductType, hints: Option<&ClassificationHints>) -> ClassificationOutcome {
    match hints {
        Some(h) if h.is_gold_etf => ClassificationOutcome::rule(GOLD_FUND),
        Some(h) if h.is_real_estate => ClassificationOutcome::rule(REAL_ESTATE_FUND),
        Some(h) if h.is_debt_mf => ClassificationOutcome::rule(DEBT_FUND),
        Some(h) if h.is_hybrid_mf => ClassificationOutcome::rule(HYBRID_FUND),
        Some(h) if h.is_equity_mf => ClassificationOutcome::rule(EQUITY_FUND),
        _ => {
            tracing::debug!(
                product_type = %product,
                "fund without category hint, assuming equity-oriented"
            );
            ClassificationOutcome::fallback(EQUITY_FUND, ClassificationFallback::DefaultFundCategory)
        }
    }
}

fn classify_wrapper(
    product: &ProductType,
    hints: Option<&ClassificationHints>,
) -> ClassificationOutcome {
    // Each call classifies one component of an already-split wrapper.
    if let Some(allocation) = hints
        .and_then(|h| h.ulip_nps_allocation)
        .filter(|a| a.has_equity_or_debt())
    {
        return if allocation.equity_pct > Decimal::ZERO {
            ClassificationOutcome::rule(EQUITY_FUND)
        } else {
            ClassificationOutcome::rule(DEBT_FUND)
        };
    }

    tracing::debug!(
        product_type = %product,
        "wrapper without allocation data, classifying as Hybrid"
    );
    ClassificationOutcome::fallback(HYBRID_FUND, ClassificationFallback::WrapperWithoutAllocation)
}

/// A holding paired with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedHolding {
    /// Holding ID.
    pub holding_id: String,
    /// Display name.
    pub name: String,
    /// Parsed product type.
    pub product: ProductType,
    /// Current value.
    pub current_value: Decimal,
    /// Resolved classification.
    pub classification: AssetClassification,
    /// Fallback used, if any.
    pub fallback: Option<ClassificationFallback>,
}

impl ClassifiedHolding {
    /// Classifies a holding.
    #[must_use]
    pub fn from_holding(holding: &NormalizedHolding) -> Self {
        let outcome = classify_holding(holding);
        Self {
            holding_id: holding.id.clone(),
            name: holding.name.clone(),
            product: holding.product(),
            current_value: holding.current_value,
            classification: outcome.classification,
            fallback: outcome.fallback,
        }
    }

    /// Shorthand for the classification's asset class.
    #[must_use]
    pub fn asset_class(&self) -> AssetClass {
        self.classification.asset_class
    }
}
