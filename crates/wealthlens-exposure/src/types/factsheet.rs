//! Factsheet data supplied by the caller.
//!
//! Every map is keyed by ISIN. Lookups are case-insensitive; the bundle's
//! builder methods store keys upper-cased.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISIN -> dimension key -> absolute value.
pub type DimensionMap = BTreeMap<String, BTreeMap<String, Decimal>>;

/// ISIN -> asset-class composition.
pub type CompositionMap = BTreeMap<String, FundComposition>;

/// ISIN -> India / international split.
pub type GeographyMap = BTreeMap<String, GeographySplit>;

/// Asset-class composition of a fund, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundComposition {
    /// Equity percentage.
    pub equity_pct: Decimal,
    /// Debt percentage.
    pub debt_pct: Decimal,
    /// Other percentage.
    pub other_pct: Decimal,
}

impl FundComposition {
    /// Creates a composition.
    #[must_use]
    pub fn new(equity_pct: Decimal, debt_pct: Decimal, other_pct: Decimal) -> Self {
        Self {
            equity_pct,
            debt_pct,
            other_pct,
        }
    }

    /// Composition with negative entries clamped to zero.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            equity_pct: self.equity_pct.max(Decimal::ZERO),
            debt_pct: self.debt_pct.max(Decimal::ZERO),
            other_pct: self.other_pct.max(Decimal::ZERO),
        }
    }

    /// Sum of the three percentages.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.equity_pct + self.debt_pct + self.other_pct
    }
}

/// India / international split of a fund.
///
/// Either percentages or absolute amounts; see
/// [`geography_exposure`](crate::bucketing::geography_exposure) for how the two
/// are told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographySplit {
    /// India share or amount.
    pub india: Decimal,
    /// International share or amount.
    pub international: Decimal,
}

impl GeographySplit {
    /// Creates a split.
    #[must_use]
    pub fn new(india: Decimal, international: Decimal) -> Self {
        Self {
            india,
            international,
        }
    }
}

/// All optional factsheet maps for one analysis.
///
/// `geography`, `sector` and `market_cap` distinguish "no map supplied"
/// (`None`) from "map supplied but fund missing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactsheetBundle {
    /// Fund asset-class compositions.
    pub composition: CompositionMap,
    /// Fund geography splits.
    pub geography: Option<GeographyMap>,
    /// Fund sector values.
    pub sector: Option<DimensionMap>,
    /// Fund market-cap values.
    pub market_cap: Option<DimensionMap>,
}

impl FactsheetBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fund composition.
    #[must_use]
    pub fn with_composition(mut self, isin: &str, composition: FundComposition) -> Self {
        self.composition.insert(isin_key(isin), composition);
        self
    }

    /// Adds a fund geography split.
    #[must_use]
    pub fn with_geography(mut self, isin: &str, split: GeographySplit) -> Self {
        self.geography
            .get_or_insert_with(BTreeMap::new)
            .insert(isin_key(isin), split);
        self
    }

    /// Adds a fund's value in one sector.
    #[must_use]
    pub fn with_sector(mut self, isin: &str, sector: &str, value: Decimal) -> Self {
        insert_dimension(&mut self.sector, isin, sector, value);
        self
    }

    /// Adds a fund's value in one market-cap band.
    #[must_use]
    pub fn with_market_cap(mut self, isin: &str, band: &str, value: Decimal) -> Self {
        insert_dimension(&mut self.market_cap, isin, band, value);
        self
    }

    /// Returns the bundle with every ISIN key trimmed and upper-cased.
    ///
    /// Entries whose keys collide after normalization keep the last one in
    /// key order.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            composition: normalize_keys(self.composition),
            geography: self.geography.map(normalize_keys),
            sector: self.sector.map(normalize_keys),
            market_cap: self.market_cap.map(normalize_keys),
        }
    }

    /// Returns true if no map carries any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
            && self.geography.as_ref().map_or(true, BTreeMap::is_empty)
            && self.sector.as_ref().map_or(true, BTreeMap::is_empty)
            && self.market_cap.as_ref().map_or(true, BTreeMap::is_empty)
    }
}

/// Looks up an ISIN, falling back to a case-insensitive scan.
pub fn find_by_isin<'a, V>(map: &'a BTreeMap<String, V>, isin: &str) -> Option<&'a V> {
    map.get(isin).or_else(|| {
        map.iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(isin))
            .map(|(_, value)| value)
    })
}

fn isin_key(isin: &str) -> String {
    isin.trim().to_uppercase()
}

fn normalize_keys<V>(map: BTreeMap<String, V>) -> BTreeMap<String, V> {
    map.into_iter().map(|(k, v)| (isin_key(&k), v)).collect()
}

fn insert_dimension(map: &mut Option<DimensionMap>, isin: &str, key: &str, value: Decimal) {
    map.get_or_insert_with(BTreeMap::new)
        .entry(isin_key(isin))
        .or_default()
        .insert(key.to_string(), value);
}
