//! Closed taxonomy of product types.
//!
//! Free-text product labels from the ingestion layer are normalized and parsed
//! into a [`ProductType`]. Anything not in the taxonomy becomes
//! [`ProductType::Unknown`] carrying the normalized label.

use serde::{Deserialize, Serialize};

/// A recognized product type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// Directly held listed shares.
    Stock,
    /// Actively managed mutual fund.
    MutualFund,
    /// Passive index mutual fund.
    IndexFund,
    /// Exchange-traded fund.
    Etf,
    /// Bank fixed or recurring deposit.
    FixedDeposit,
    /// Government or corporate bond.
    Bond,
    /// Public Provident Fund.
    Ppf,
    /// Employees' Provident Fund.
    Epf,
    /// Unit-linked insurance plan.
    Ulip,
    /// National Pension System account or tier.
    Nps,
    /// Gold, physical or paper.
    Gold,
    /// Silver.
    Silver,
    /// Residential or commercial property.
    RealEstate,
    /// Land.
    Land,
    /// Listed real-estate investment trust.
    Reit,
    /// Savings or current account balance.
    BankAccount,
    /// Liquid or overnight fund.
    LiquidFund,
    /// Insurance policy.
    Insurance,
    /// Loan outstanding.
    Loan,
    /// Credit card dues.
    CreditCard,
    /// Not in the taxonomy. Holds the normalized label.
    Unknown(String),
}

impl ProductType {
    /// Returns every recognized product type in resolution order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Stock,
            Self::MutualFund,
            Self::IndexFund,
            Self::Etf,
            Self::FixedDeposit,
            Self::Bond,
            Self::Ppf,
            Self::Epf,
            Self::Ulip,
            Self::Nps,
            Self::Gold,
            Self::Silver,
            Self::RealEstate,
            Self::Land,
            Self::Reit,
            Self::BankAccount,
            Self::LiquidFund,
            Self::Insurance,
            Self::Loan,
            Self::CreditCard,
        ]
    }

    /// Parses a free-text label. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use wealthlens_core::types::ProductType;
    ///
    /// assert_eq!(ProductType::parse("  Mutual_Fund "), ProductType::MutualFund);
    /// assert_eq!(ProductType::parse("NPS Tier-1"), ProductType::Nps);
    /// assert_eq!(
    ///     ProductType::parse("Crypto Wallet"),
    ///     ProductType::Unknown("crypto wallet".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let normalized = normalize_label(label);
        match normalized.as_str() {
            "stock" | "stocks" | "share" | "shares" | "equity" | "direct equity" | "equity share"
            | "equity shares" => Self::Stock,
            "mutual fund" | "mutual funds" | "mf" => Self::MutualFund,
            "index fund" | "index funds" => Self::IndexFund,
            "etf" | "etfs" | "exchange traded fund" => Self::Etf,
            "fd" | "fixed deposit" | "rd" | "recurring deposit" => Self::FixedDeposit,
            "bond" | "bonds" | "debenture" | "ncd" => Self::Bond,
            "ppf" | "public provident fund" => Self::Ppf,
            "epf" | "pf" | "provident fund" | "employee provident fund" => Self::Epf,
            "ulip" | "unit linked insurance plan" => Self::Ulip,
            "nps" | "nps tier 1" | "nps tier 2" | "national pension system" => Self::Nps,
            "gold" | "sgb" | "sovereign gold bond" | "digital gold" | "physical gold" => Self::Gold,
            "silver" => Self::Silver,
            "real estate" | "property" => Self::RealEstate,
            "land" | "plot" => Self::Land,
            "reit" | "reits" => Self::Reit,
            "savings" | "savings account" | "current" | "current account" | "cash"
            | "bank account" => Self::BankAccount,
            "liquid fund" | "overnight fund" | "liquid" | "overnight" => Self::LiquidFund,
            "insurance" | "term insurance" | "life insurance" | "health insurance"
            | "endowment" => Self::Insurance,
            "loan" | "home loan" | "personal loan" | "car loan" | "education loan" => Self::Loan,
            "credit card" | "credit card dues" => Self::CreditCard,
            _ => Self::Unknown(normalized),
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Stock => "Stock",
            Self::MutualFund => "Mutual Fund",
            Self::IndexFund => "Index Fund",
            Self::Etf => "ETF",
            Self::FixedDeposit => "Fixed Deposit",
            Self::Bond => "Bond",
            Self::Ppf => "PPF",
            Self::Epf => "EPF",
            Self::Ulip => "ULIP",
            Self::Nps => "NPS",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::RealEstate => "Real Estate",
            Self::Land => "Land",
            Self::Reit => "REIT",
            Self::BankAccount => "Bank Account",
            Self::LiquidFund => "Liquid Fund",
            Self::Insurance => "Insurance",
            Self::Loan => "Loan",
            Self::CreditCard => "Credit Card",
            Self::Unknown(label) => label,
        }
    }

    /// Returns true for pooled vehicles whose value can be looked through.
    #[must_use]
    pub fn is_pooled_fund(&self) -> bool {
        matches!(self, Self::MutualFund | Self::IndexFund | Self::Etf)
    }

    /// Returns true for ULIP and NPS wrappers.
    #[must_use]
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::Ulip | Self::Nps)
    }

    /// Returns true if the label was not recognized.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for ProductType {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

/// Lower-cases, trims and collapses runs of whitespace, `_` and `-` to one space.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Mutual   Fund "), "mutual fund");
        assert_eq!(normalize_label("NPS_Tier-1"), "nps tier 1");
        assert_eq!(normalize_label(""), "");
    }

    #[test]
    fn test_parse_round_trips_names() {
        for product in ProductType::all() {
            assert_eq!(
                &ProductType::parse(product.name()),
                product,
                "name {} should parse back",
                product.name()
            );
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ProductType::parse("FD"), ProductType::FixedDeposit);
        assert_eq!(ProductType::parse("Savings Account"), ProductType::BankAccount);
        assert_eq!(ProductType::parse("overnight-fund"), ProductType::LiquidFund);
        assert_eq!(ProductType::parse("Credit Card Dues"), ProductType::CreditCard);
        assert_eq!(ProductType::parse("Home Loan"), ProductType::Loan);
        assert_eq!(ProductType::parse("SGB"), ProductType::Gold);
    }

    #[test]
    fn test_unknown_keeps_normalized_label() {
        let product = ProductType::parse("  P2P  Lending ");
        assert!(product.is_unknown());
        assert_eq!(product.name(), "p2p lending");
    }

    #[test]
    fn test_fund_and_wrapper_flags() {
        assert!(ProductType::MutualFund.is_pooled_fund());
        assert!(ProductType::Etf.is_pooled_fund());
        assert!(!ProductType::LiquidFund.is_pooled_fund());
        assert!(ProductType::Ulip.is_wrapper());
        assert!(ProductType::Nps.is_wrapper());
        assert!(!ProductType::Stock.is_wrapper());
    }

    proptest::proptest! {
        #[test]
        fn prop_normalize_is_idempotent(label in "[ A-Za-z0-9_-]{0,40}") {
            let once = normalize_label(&label);
            proptest::prop_assert_eq!(normalize_label(&once), once.clone());
            proptest::prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        }

        #[test]
        fn prop_parse_ignores_case_and_separators(idx in 0usize..20, upper in proptest::bool::ANY) {
            let product = &ProductType::all()[idx];
            let label = product.name().replace(' ', "_");
            let label = if upper { label.to_uppercase() } else { label.to_lowercase() };
            proptest::prop_assert_eq!(&ProductType::parse(&format!("  {label} ")), product);
        }
    }
}
