//! Optional metadata that refines classification of wrapper and fund products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LensError, LensResult};

/// Known internal split of a ULIP or NPS wrapper, in percent.
///
/// Deserialization goes through [`UlipNpsAllocation::new`], so a parsed
/// allocation never carries a negative share or a total above 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAllocation")]
pub struct UlipNpsAllocation {
    /// Equity share (0-100).
    pub equity_pct: Decimal,
    /// Debt share (0-100).
    pub debt_pct: Decimal,
    /// Cash / money-market share (0-100).
    pub cash_pct: Decimal,
}

#[derive(Deserialize)]
struct RawAllocation {
    equity_pct: Decimal,
    debt_pct: Decimal,
    #[serde(default)]
    cash_pct: Decimal,
}

impl TryFrom<RawAllocation> for UlipNpsAllocation {
    type Error = LensError;

    fn try_from(raw: RawAllocation) -> LensResult<Self> {
        Self::new(raw.equity_pct, raw.debt_pct, raw.cash_pct)
    }
}

impl UlipNpsAllocation {
    /// Creates an allocation, rejecting negative shares or a total above 100.
    pub fn new(equity_pct: Decimal, debt_pct: Decimal, cash_pct: Decimal) -> LensResult<Self> {
        if equity_pct < Decimal::ZERO || debt_pct < Decimal::ZERO || cash_pct < Decimal::ZERO {
            return Err(LensError::invalid_allocation("negative share"));
        }
        let total = equity_pct + debt_pct + cash_pct;
        if total > Decimal::ONE_HUNDRED {
            return Err(LensError::invalid_allocation(format!("shares sum to {total}")));
        }
        Ok(Self {
            equity_pct,
            debt_pct,
            cash_pct,
        })
    }

    /// Sum of all three shares.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.equity_pct + self.debt_pct + self.cash_pct
    }

    /// True when either the equity or the debt share is non-zero.
    #[must_use]
    pub fn has_equity_or_debt(&self) -> bool {
        !self.equity_pct.is_zero() || !self.debt_pct.is_zero()
    }
}

/// Category hints carried alongside a holding.
///
/// # Examples
///
/// ```
/// use wealthlens_core::types::ClassificationHints;
///
/// let hints = ClassificationHints::new().debt_fund();
/// assert!(hints.is_debt_mf);
/// assert!(hints.has_fund_category());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationHints {
    /// Known wrapper split.
    pub ulip_nps_allocation: Option<UlipNpsAllocation>,
    /// Fund invests mainly in equity.
    pub is_equity_mf: bool,
    /// Fund invests mainly in debt.
    pub is_debt_mf: bool,
    /// Fund is a hybrid / balanced fund.
    pub is_hybrid_mf: bool,
    /// Fund or ETF tracks gold.
    pub is_gold_etf: bool,
    /// Fund invests in real estate.
    pub is_real_estate: bool,
}

impl ClassificationHints {
    /// Creates empty hints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wrapper allocation.
    #[must_use]
    pub fn with_allocation(mut self, allocation: UlipNpsAllocation) -> Self {
        self.ulip_nps_allocation = Some(allocation);
        self
    }

    /// Marks the fund as equity-oriented.
    #[must_use]
    pub fn equity_fund(mut self) -> Self {
        self.is_equity_mf = true;
        self
    }

    /// Marks the fund as debt-oriented.
    #[must_use]
    pub fn debt_fund(mut self) -> Self {
        self.is_debt_mf = true;
        self
    }

    /// Marks the fund as hybrid.
    #[must_use]
    pub fn hybrid_fund(mut self) -> Self {
        self.is_hybrid_mf = true;
        self
    }

    /// Marks the fund or ETF as gold-tracking.
    #[must_use]
    pub fn gold(mut self) -> Self {
        self.is_gold_etf = true;
        self
    }

    /// Marks the fund as a real-estate fund.
    #[must_use]
    pub fn real_estate(mut self) -> Self {
        self.is_real_estate = true;
        self
    }

    /// True when any fund category flag is set.
    #[must_use]
    pub fn has_fund_category(&self) -> bool {
        self.is_equity_mf
            || self.is_debt_mf
            || self.is_hybrid_mf
            || self.is_gold_etf
            || self.is_real_estate
    }
}
