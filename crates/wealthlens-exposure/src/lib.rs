//! # WealthLens Exposure
//!
//! Look-through exposure analytics for retail portfolios.
//!
//! Owning a mutual fund is not the same as being exposed to its label: ten
//! lakh in an equity fund is roughly 8.5 lakh of equity, 1.2 lakh of debt and
//! 0.3 lakh of other assets. This crate decomposes funds, merges the result
//! with directly held equity, and reports exposure by asset type, sector,
//! market-cap band and geography.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every input explicit, no I/O, no caching
//! - **Graceful degradation**: missing factsheet data falls back to policy
//!   heuristics, never to an error
//! - **Auditable fallbacks**: every heuristic path is counted in
//!   [`FallbackStats`] and logged via `tracing`
//! - **Config-driven parallelism**: optional rayon support for classification
//!
//! ## Quick Start
//!
//! ```rust
//! use wealthlens_exposure::prelude::*;
//!
//! let holdings = vec![
//!     NormalizedHolding::builder()
//!         .id("A")
//!         .product_type("Stock")
//!         .sector("Banking")
//!         .current_value(dec!(100_000))
//!         .build()
//!         .unwrap(),
//!     NormalizedHolding::builder()
//!         .id("B")
//!         .product_type("Mutual Fund")
//!         .asset_class("debt")
//!         .current_value(dec!(50_000))
//!         .build()
//!         .unwrap(),
//! ];
//!
//! let config = ExposureConfig::default();
//! let report = ExposureAnalyzer::new(config.clone())
//!     .analyze(&holdings, &FactsheetBundle::new())
//!     .unwrap();
//!
//! assert_eq!(report.fund_exposure.total.debt, dec!(42_500));
//! let insights = enrich_insights(&derive_insights(&report, &config));
//! assert!(insights.iter().all(|i| i.impact <= 100));
//! ```
//!
//! ## Module Overview
//!
//! - [`lookthrough`] - Fund look-through and the combined view
//! - [`bucketing`] - Sector, market-cap and geography exposure, concentration flags
//! - [`insights`] - Observations with explanations and impact scores
//! - [`partition`] - Classification and partitioning of holdings
//! - [`report`] - One-call analyzer
//! - [`types`] - Config, factsheet inputs and exposure outputs
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel classification for large portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod bucketing;
pub mod diagnostics;
pub mod error;
pub mod insights;
pub mod lookthrough;
pub mod parallel;
pub mod partition;
pub mod report;
pub mod types;

pub use diagnostics::FallbackStats;
pub use error::{ExposureError, ExposureResult};
pub use report::{ExposureAnalyzer, ExposureReport};
pub use types::{ExposureConfig, FactsheetBundle};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bucketing::{
        detect_international_exposure, flag_concentration, geography_exposure,
        market_cap_exposure, sector_exposure, DetectionConfidence, GeographyBreakdown,
        GeographySource, InternationalDetection, InternationalSource, MarketCapBreakdown,
        DEFAULT_CONCENTRATION_THRESHOLD, UNCLASSIFIED_SECTOR,
    };
    pub use crate::diagnostics::FallbackStats;
    pub use crate::error::{ExposureError, ExposureResult};
    pub use crate::insights::{
        derive_insights, enrich_insight, enrich_insights, impact_score,
        EnhancedStabilityInsight, InsightCategory, StabilityInsight,
    };
    pub use crate::lookthrough::{combine_exposure, compute_fund_exposure, look_through_fund};
    pub use crate::partition::{partition_holdings, PartitionedHoldings};
    pub use crate::report::{ExposureAnalyzer, ExposureReport};
    pub use crate::types::*;

    pub use wealthlens_core::prelude::*;
}
