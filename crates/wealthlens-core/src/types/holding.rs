//! Valued holdings as produced by the upstream ingestion layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClassificationHints, MarketCapBand, ProductType, UlipNpsAllocation};
use crate::error::{LensError, LensResult};

/// A single valued position.
///
/// The engine treats holdings as immutable input: nothing in this workspace
/// mutates a holding it was handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedHolding {
    /// Unique identifier for this position.
    pub id: String,

    /// Display name. Also the key for name-based heuristics.
    pub name: String,

    /// Free-text product label ("Stock", "Mutual Fund", "ULIP", ...).
    pub product_type: String,

    /// Free-text asset-class hint ("equity", "debt", "hybrid", ...).
    #[serde(default)]
    pub asset_class: String,

    /// Current value in the portfolio base currency. Never negative.
    pub current_value: Decimal,

    /// Sector of a direct equity.
    #[serde(default)]
    pub sector: Option<String>,

    /// ISIN, used as the fund identity key.
    #[serde(default)]
    pub isin: Option<String>,

    /// Market-cap band of a direct equity.
    #[serde(default)]
    pub market_cap: Option<MarketCapBand>,

    /// Wrapper allocation and fund category hints.
    #[serde(default)]
    pub hints: Option<ClassificationHints>,
}

impl NormalizedHolding {
    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> NormalizedHoldingBuilder {
        NormalizedHoldingBuilder::new()
    }

    /// Parses the product label.
    #[must_use]
    pub fn product(&self) -> ProductType {
        ProductType::parse(&self.product_type)
    }

    /// Upper-cased, trimmed ISIN, if present and non-empty.
    #[must_use]
    pub fn isin_key(&self) -> Option<String> {
        self.isin
            .as_deref()
            .map(str::trim)
            .filter(|isin| !isin.is_empty())
            .map(str::to_uppercase)
    }

    /// Lower-cased, trimmed asset-class hint.
    #[must_use]
    pub fn asset_class_hint(&self) -> String {
        self.asset_class.trim().to_lowercase()
    }

    /// Hints used for classification.
    ///
    /// A pooled fund without a category flag takes its category from the
    /// asset-class hint (`equity`, `debt` or `hybrid`), the same key the
    /// heuristic look-through uses. Explicit flags always win.
    #[must_use]
    pub fn classification_hints(&self) -> Option<ClassificationHints> {
        let has_category = self
            .hints
            .as_ref()
            .is_some_and(ClassificationHints::has_fund_category);
        if has_category || !self.product().is_pooled_fund() {
            return self.hints.clone();
        }

        let hints = self.hints.clone().unwrap_or_default();
        match self.asset_class_hint().as_str() {
            "equity" => Some(hints.equity_fund()),
            "debt" => Some(hints.debt_fund()),
            "hybrid" => Some(hints.hybrid_fund()),
            _ => self.hints.clone(),
        }
    }

    /// Checks the invariants a deserialized holding may have skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty id, a negative value, or a wrapper
    /// allocation with a negative share or a total above 100.
    pub fn validate(&self) -> LensResult<()> {
        if self.id.trim().is_empty() {
            return Err(LensError::invalid_holding(&self.name, "id cannot be empty"));
        }
        if self.current_value < Decimal::ZERO {
            return Err(LensError::NegativeValue {
                id: self.id.clone(),
                value: self.current_value,
            });
        }
        if let Some(a) = self.hints.as_ref().and_then(|h| h.ulip_nps_allocation) {
            UlipNpsAllocation::new(a.equity_pct, a.debt_pct, a.cash_pct).map_err(|e| {
                LensError::invalid_holding(&self.id, e.to_string())
            })?;
        }
        Ok(())
    }
}

/// Builder for constructing a [`NormalizedHolding`].
#[derive(Debug, Clone, Default)]
pub struct NormalizedHoldingBuilder {
    id: Option<String>,
    name: Option<String>,
    product_type: Option<String>,
    asset_class: String,
    current_value: Option<Decimal>,
    sector: Option<String>,
    isin: Option<String>,
    market_cap: Option<MarketCapBand>,
    hints: Option<ClassificationHints>,
}

impl NormalizedHoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the holding ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the product label.
    #[must_use]
    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Sets the asset-class hint.
    #[must_use]
    pub fn asset_class(mut self, asset_class: impl Into<String>) -> Self {
        self.asset_class = asset_class.into();
        self
    }

    /// Sets the current value.
    #[must_use]
    pub fn current_value(mut self, value: Decimal) -> Self {
        self.current_value = Some(value);
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the ISIN.
    #[must_use]
    pub fn isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Sets the market-cap band.
    #[must_use]
    pub fn market_cap(mut self, band: MarketCapBand) -> Self {
        self.market_cap = Some(band);
        self
    }

    /// Sets the classification hints.
    #[must_use]
    pub fn hints(mut self, hints: ClassificationHints) -> Self {
        self.hints = Some(hints);
        self
    }

    /// Builds the holding.
    ///
    /// The name defaults to the id.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the value is negative.
    pub fn build(self) -> LensResult<NormalizedHolding> {
        let id = self.id.ok_or_else(|| LensError::missing_field("id"))?;
        let product_type = self
            .product_type
            .ok_or_else(|| LensError::missing_field("product_type"))?;
        let current_value = self
            .current_value
            .ok_or_else(|| LensError::missing_field("current_value"))?;

        let holding = NormalizedHolding {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            product_type,
            asset_class: self.asset_class,
            current_value,
            sector: self.sector,
            isin: self.isin,
            market_cap: self.market_cap,
            hints: self.hints,
        };
        holding.validate()?;
        Ok(holding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stock() -> NormalizedHoldingBuilder {
        NormalizedHolding::builder()
            .id("H1")
            .name("Infosys Ltd")
            .product_type("Stock")
            .asset_class("equity")
            .current_value(dec!(100_000))
    }

    #[test]
    fn test_build() {
        let holding = stock().sector("IT").isin(" ine009a01021 ").build().unwrap();
        assert_eq!(holding.product(), ProductType::Stock);
        assert_eq!(holding.isin_key(), Some("INE009A01021".to_string()));
        assert_eq!(holding.sector.as_deref(), Some("IT"));
    }

    #[test]
    fn test_name_defaults_to_id() {
        let holding = NormalizedHolding::builder()
            .id("FD-1")
            .product_type("FD")
            .current_value(dec!(5000))
            .build()
            .unwrap();
        assert_eq!(holding.name, "FD-1");
    }

    #[test]
    fn test_missing_fields() {
        let err = NormalizedHolding::builder()
            .id("H1")
            .current_value(dec!(1))
            .build()
            .unwrap_err();
        assert_eq!(err, LensError::missing_field("product_type"));

        let err = NormalizedHolding::builder()
            .id("H1")
            .product_type("Stock")
            .build()
            .unwrap_err();
        assert_eq!(err, LensError::missing_field("current_value"));
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = stock().current_value(dec!(-1)).build().unwrap_err();
        assert!(matches!(err, LensError::NegativeValue { .. }));
    }

    #[test]
    fn test_validate_rejects_hand_built_allocation() {
        let mut holding = NormalizedHolding::builder()
            .id("NPS1")
            .product_type("NPS")
            .current_value(dec!(100_000))
            .build()
            .unwrap();
        holding.hints = Some(ClassificationHints::new().with_allocation(UlipNpsAllocation {
            equity_pct: dec!(150),
            debt_pct: dec!(-50),
            cash_pct: dec!(0),
        }));
        let err = holding.validate().unwrap_err();
        assert!(matches!(err, LensError::InvalidHolding { ref id, .. } if id == "NPS1"));
    }

    #[test]
    fn test_deserialize_rejects_malformed_allocation() {
        let json = r#"{
            "id": "NPS1",
            "name": "NPS Tier 1",
            "product_type": "NPS",
            "current_value": 100000,
            "hints": {"ulip_nps_allocation": {"equity_pct": 150, "debt_pct": -50}}
        }"#;
        assert!(serde_json::from_str::<NormalizedHolding>(json).is_err());
    }

    #[test]
    fn test_fund_category_from_asset_class() {
        let debt = NormalizedHolding::builder()
            .id("B")
            .product_type("Mutual Fund")
            .asset_class(" Debt ")
            .current_value(dec!(50_000))
            .build()
            .unwrap();
        let hints = debt.classification_hints().unwrap();
        assert!(hints.is_debt_mf);
        assert!(!hints.is_equity_mf);

        let flagged = NormalizedHolding {
            hints: Some(ClassificationHints::new().gold()),
            ..debt.clone()
        };
        assert_eq!(flagged.classification_hints(), flagged.hints);

        let unhinted = NormalizedHolding {
            asset_class: String::new(),
            ..debt.clone()
        };
        assert_eq!(unhinted.classification_hints(), None);

        let deposit = NormalizedHolding {
            product_type: "FD".to_string(),
            ..debt
        };
        assert_eq!(deposit.classification_hints(), None);
    }

    #[test]
    fn test_blank_isin_is_none() {
        let holding = stock().isin("   ").build().unwrap();
        assert_eq!(holding.isin_key(), None);
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{
            "id": "MF1",
            "name": "Parag Parikh Flexi Cap",
            "product_type": "Mutual Fund",
            "current_value": 250000
        }"#;
        let holding: NormalizedHolding = serde_json::from_str(json).unwrap();
        assert_eq!(holding.current_value, dec!(250000));
        assert_eq!(holding.asset_class_hint(), "");
        assert!(holding.validate().is_ok());
    }
}
