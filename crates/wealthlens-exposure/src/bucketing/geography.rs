//! Geography exposure.
//!
//! Direct equity is India-listed by construction. Funds are split by factsheet
//! data when the caller supplies a geography map, and by fund-name detection
//! otherwise. Ambiguous names are never reported as foreign.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wealthlens_core::types::NormalizedHolding;

use super::ledger::{Contribution, ExposureLedger};
use crate::types::{
    find_by_isin, ExposureConfig, GeographyExposure, GeographyMap, GeographySplit, Region,
};

/// Phrases that mark a fund as international outright.
const HIGH_CONFIDENCE_PATTERNS: &[&str] = &[
    "global",
    "international",
    "world",
    "overseas",
    "foreign",
    "nyse",
    "nasdaq",
    "s&p",
    "us",
    "usa",
    "u s",
    "america",
    "american",
    "emerging markets",
    "emerging market",
    "developed markets",
    "europe",
    "european",
    "greater china",
    "china",
    "hang seng",
    "japan",
    "taiwan",
    "brazil",
    "asia pacific",
    "asean",
];

/// Phrases that suggest partial foreign exposure.
const MEDIUM_CONFIDENCE_PATTERNS: &[&str] = &[
    "fund of funds",
    "fund of fund",
    "fof",
    "technology etf",
    "tech etf",
    "ai",
    "artificial intelligence",
];

/// How confidently a fund name indicates foreign exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionConfidence {
    /// Assume the whole fund is international.
    High,
    /// Assume a configured international share (80% by default).
    Medium,
    /// Assume the whole fund is domestic.
    Low,
}

impl DetectionConfidence {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for DetectionConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of fund-name detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalDetection {
    /// Confidence tier.
    pub confidence: DetectionConfidence,
    /// The phrase that matched, if any.
    pub matched_pattern: Option<String>,
}

impl InternationalDetection {
    /// International share of the fund's value (0-1).
    #[must_use]
    pub fn international_share(&self, medium_share: Decimal) -> Decimal {
        match self.confidence {
            DetectionConfidence::High => Decimal::ONE,
            DetectionConfidence::Medium => medium_share,
            DetectionConfidence::Low => Decimal::ZERO,
        }
    }
}

/// Detects foreign exposure from a fund name.
///
/// Patterns match whole words, so "US" matches "Nasdaq US Equity" but not
/// "Focus". High-confidence patterns are tried before medium ones.
///
/// # Examples
///
/// ```
/// use wealthlens_exposure::bucketing::{detect_international_exposure, DetectionConfidence};
///
/// let high = detect_international_exposure("ABC Global Technology Fund");
/// assert_eq!(high.confidence, DetectionConfidence::High);
///
/// let medium = detect_international_exposure("XYZ AI Opportunities Fund");
/// assert_eq!(medium.confidence, DetectionConfidence::Medium);
///
/// let low = detect_international_exposure("HDFC Flexi Cap Fund");
/// assert_eq!(low.confidence, DetectionConfidence::Low);
/// ```
#[must_use]
pub fn detect_international_exposure(name: &str) -> InternationalDetection {
    let tokens = tokenize(name);
    let tiers = [
        (DetectionConfidence::High, HIGH_CONFIDENCE_PATTERNS),
        (DetectionConfidence::Medium, MEDIUM_CONFIDENCE_PATTERNS),
    ];

    for (confidence, patterns) in tiers {
        if let Some(pattern) = patterns.iter().find(|p| contains_phrase(&tokens, p)) {
            return InternationalDetection {
                confidence,
                matched_pattern: Some((*pattern).to_string()),
            };
        }
    }

    InternationalDetection {
        confidence: DetectionConfidence::Low,
        matched_pattern: None,
    }
}

fn tokenize(name: &str) -> Vec<String> {
    name.split(|c: char| !(c.is_alphanumeric() || c == '&'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split(' ').collect();
    tokens
        .windows(words.len())
        .any(|window| window.iter().zip(&words).all(|(t, w)| t == w))
}

/// Which data produced the fund side of a geography breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeographySource {
    /// Every fund was covered by the geography map.
    Factsheet,
    /// No map was used; every fund was split by name detection.
    NameHeuristic,
    /// A map was supplied but some funds fell back to name detection.
    Mixed,
}

impl GeographySource {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Factsheet => "Factsheet",
            Self::NameHeuristic => "Fund names",
            Self::Mixed => "Factsheet + fund names",
        }
    }
}

impl std::fmt::Display for GeographySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One fund contributing international exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalSource {
    /// Holding ID.
    pub holding_id: String,
    /// Fund name.
    pub name: String,
    /// International value contributed.
    pub international_value: Decimal,
    /// Detection tier, for name-based sources; `None` for factsheet data.
    pub confidence: Option<DetectionConfidence>,
}

/// India / International rows plus their provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographyBreakdown {
    /// Always two rows, sorted descending by total.
    pub exposures: Vec<GeographyExposure>,
    /// Funds with international value above zero, largest first.
    pub international_sources: Vec<InternationalSource>,
    /// Data source of the fund side.
    pub source: GeographySource,
    /// Funds split by name detection.
    pub name_based_funds: usize,
    /// Map entries that were renormalized or clamped.
    pub normalized_entries: usize,
}

impl GeographyBreakdown {
    /// Row for a region.
    #[must_use]
    pub fn region(&self, region: Region) -> Option<&GeographyExposure> {
        self.exposures.iter().find(|e| e.dimension == region)
    }

    /// International percentage (0-100).
    #[must_use]
    pub fn international_percentage(&self) -> f64 {
        self.region(Region::International)
            .map_or(0.0, |e| e.percentage)
    }
}

/// A fund's resolved split.
struct FundGeography {
    india: Decimal,
    international: Decimal,
    confidence: Option<DetectionConfidence>,
    normalized: bool,
}

/// Aggregates India / International exposure.
///
/// All direct equity counts as India. Each fund is split by its geography map
/// entry (see [`normalize_geography`]) when `geography_map` has one, otherwise
/// by [`detect_international_exposure`] on its name. When the combined
/// exposure is zero, India is reported at 100%.
#[must_use]
pub fn geography_exposure(
    direct_equity: &[NormalizedHolding],
    funds: &[NormalizedHolding],
    geography_map: Option<&GeographyMap>,
    total_market_value: Decimal,
    config: &ExposureConfig,
) -> GeographyBreakdown {
    let resolved: Vec<(&NormalizedHolding, FundGeography)> = funds
        .iter()
        .map(|fund| (fund, resolve_fund(fund, geography_map, config)))
        .collect();

    let seed = [
        Contribution::Direct(Region::India, Decimal::ZERO),
        Contribution::Direct(Region::International, Decimal::ZERO),
    ];
    let direct = direct_equity
        .iter()
        .map(|h| Contribution::Direct(Region::India, h.current_value));
    let via_funds = resolved.iter().flat_map(|(_, g)| {
        [
            Contribution::ViaFund(Region::India, g.india),
            Contribution::ViaFund(Region::International, g.international),
        ]
    });

    let ledger = ExposureLedger::from_contributions(seed.into_iter().chain(direct).chain(via_funds));
    let exposure_is_zero = ledger.grand_total().is_zero();
    let mut exposures = ledger.into_exposures(total_market_value);
    if exposure_is_zero {
        for row in &mut exposures {
            row.percentage = if row.dimension == Region::India { 100.0 } else { 0.0 };
        }
    }

    let mut international_sources: Vec<InternationalSource> = resolved
        .iter()
        .filter(|(_, g)| g.international > Decimal::ZERO)
        .map(|(fund, g)| InternationalSource {
            holding_id: fund.id.clone(),
            name: fund.name.clone(),
            international_value: g.international,
            confidence: g.confidence,
        })
        .collect();
    international_sources.sort_by(|a, b| b.international_value.cmp(&a.international_value));

    let name_based_funds = resolved.iter().filter(|(_, g)| g.confidence.is_some()).count();
    let normalized_entries = resolved.iter().filter(|(_, g)| g.normalized).count();
    let source = match geography_map {
        None => GeographySource::NameHeuristic,
        Some(_) if name_based_funds == 0 => GeographySource::Factsheet,
        Some(_) if name_based_funds == funds.len() => GeographySource::NameHeuristic,
        Some(_) => GeographySource::Mixed,
    };

    GeographyBreakdown {
        exposures,
        international_sources,
        source,
        name_based_funds,
        normalized_entries,
    }
}

fn resolve_fund(
    fund: &NormalizedHolding,
    geography_map: Option<&GeographyMap>,
    config: &ExposureConfig,
) -> FundGeography {
    let value = fund.current_value;
    let entry = geography_map
        .zip(fund.isin_key())
        .and_then(|(map, isin)| find_by_isin(map, &isin));

    if let Some(split) = entry {
        let (india, international, normalized) =
            normalize_geography(split, value, config.percent_sum_ceiling);
        if normalized {
            debug!(holding_id = %fund.id, "geography entry normalized");
        }
        return FundGeography {
            india,
            international,
            confidence: None,
            normalized,
        };
    }

    let detection = detect_international_exposure(&fund.name);
    debug!(
        holding_id = %fund.id,
        confidence = detection.confidence.name(),
        "geography from fund name"
    );
    let international = value * detection.international_share(config.medium_confidence_international);
    FundGeography {
        india: value - international,
        international,
        confidence: Some(detection.confidence),
        normalized: false,
    }
}

/// Turns a geography entry into India / international amounts for a fund.
///
/// Negative entries are clamped to zero. A pair summing to at most `ceiling`
/// is read as percentages and rescaled to exactly 100 before being applied to
/// `fund_value`; a pair summing to zero means 100% India. A larger pair is read
/// as absolute amounts: scaled down if it exceeds `fund_value`, otherwise the
/// unassigned remainder is booked as India. The two amounts always add up to
/// `fund_value`.
///
/// The third element is true when the entry had to be adjusted.
#[must_use]
pub fn normalize_geography(
    split: &GeographySplit,
    fund_value: Decimal,
    ceiling: Decimal,
) -> (Decimal, Decimal, bool) {
    let india = split.india.max(Decimal::ZERO);
    let international = split.international.max(Decimal::ZERO);
    let clamped = india != split.india || international != split.international;
    let sum = india + international;

    if sum.is_zero() {
        return (fund_value, Decimal::ZERO, true);
    }

    if sum <= ceiling {
        let international_amount = fund_value * international / sum;
        return (
            fund_value - international_amount,
            international_amount,
            clamped || sum != Decimal::ONE_HUNDRED,
        );
    }

    if sum > fund_value {
        let international_amount = fund_value * international / sum;
        return (fund_value - international_amount, international_amount, true);
    }

    (
        fund_value - international,
        international,
        clamped || sum != fund_value,
    )
}
