//! Market-capitalisation bands.

use serde::{Deserialize, Serialize};

/// Market-cap band of an equity or of a fund's equity sleeve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketCapBand {
    /// Large cap.
    Large,
    /// Mid cap.
    Mid,
    /// Small cap.
    Small,
    /// Band not known.
    Unclassified,
}

/// Policy range a band's weight is compared against, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendedRange {
    /// Lower bound.
    pub min_pct: f64,
    /// Upper bound.
    pub max_pct: f64,
}

impl RecommendedRange {
    /// Returns true if `pct` lies inside the range (inclusive).
    #[must_use]
    pub fn contains(&self, pct: f64) -> bool {
        pct >= self.min_pct && pct <= self.max_pct
    }
}

impl MarketCapBand {
    /// The three reportable bands, largest first.
    #[must_use]
    pub fn standard() -> &'static [Self] {
        &[Self::Large, Self::Mid, Self::Small]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Large => "Large Cap",
            Self::Mid => "Mid Cap",
            Self::Small => "Small Cap",
            Self::Unclassified => "Unclassified",
        }
    }

    /// Parses common labels ("large", "Large Cap", "largecap", ...).
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let compact: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match compact.as_str() {
            "large" | "largecap" => Some(Self::Large),
            "mid" | "midcap" => Some(Self::Mid),
            "small" | "smallcap" => Some(Self::Small),
            _ => None,
        }
    }

    /// UI comparison band. Not used to compute any value.
    #[must_use]
    pub fn recommended_range(&self) -> Option<RecommendedRange> {
        match self {
            Self::Large => Some(RecommendedRange {
                min_pct: 50.0,
                max_pct: 60.0,
            }),
            Self::Mid => Some(RecommendedRange {
                min_pct: 25.0,
                max_pct: 35.0,
            }),
            Self::Small => Some(RecommendedRange {
                min_pct: 10.0,
                max_pct: 20.0,
            }),
            Self::Unclassified => None,
        }
    }
}

impl std::fmt::Display for MarketCapBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(MarketCapBand::parse("Large Cap"), Some(MarketCapBand::Large));
        assert_eq!(MarketCapBand::parse("mid-cap"), Some(MarketCapBand::Mid));
        assert_eq!(MarketCapBand::parse("SMALL"), Some(MarketCapBand::Small));
        assert_eq!(MarketCapBand::parse("micro"), None);
    }

    #[test]
    fn test_recommended_ranges() {
        let large = MarketCapBand::Large.recommended_range().unwrap();
        assert_eq!(large.min_pct, 50.0);
        assert_eq!(large.max_pct, 60.0);
        assert!(large.contains(55.0));
        assert!(!large.contains(61.0));

        let small = MarketCapBand::Small.recommended_range().unwrap();
        assert_eq!((small.min_pct, small.max_pct), (10.0, 20.0));
        assert!(MarketCapBand::Unclassified.recommended_range().is_none());
    }
}
