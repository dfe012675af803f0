//! # WealthLens Core
//!
//! Asset classification for heterogeneous retail holdings.
//!
//! Financial products are often wrappers: a ULIP or an NPS account is not an
//! asset class, its underlying split is. This crate resolves every product
//! label to a four-field [`AssetClassification`](types::AssetClassification)
//! through an ordered rule cascade with logged fallbacks, and provides the
//! inclusion predicates every net-worth or allocation total must use.
//!
//! ## Design Philosophy
//!
//! - **Never fails on data**: unknown labels resolve to a documented default
//! - **Observable fallbacks**: every default is tagged and logged via `tracing`
//! - **Pure functions**: no I/O, no caching, no shared state
//!
//! ## Example
//!
//! ```rust
//! use wealthlens_core::prelude::*;
//!
//! let c = classify("Mutual Fund", Some(&ClassificationHints::new().debt_fund()));
//! assert_eq!(c.asset_class, AssetClass::FixedIncome);
//! assert!(is_included_in_allocation(c.asset_class));
//! assert!(!is_included_in_net_worth(AssetClass::Insurance));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod classifier;
pub mod error;
pub mod totals;
pub mod types;
pub mod wrapper;

pub use error::{LensError, LensResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::classifier::{
        classify, classify_detailed, classify_holding, classify_product, ClassificationFallback,
        ClassificationOutcome, ClassifiedHolding,
    };
    pub use crate::error::{LensError, LensResult};
    pub use crate::totals::{percentage_of, AllocationSlice, PortfolioTotals};
    pub use crate::types::{
        is_included_in_allocation, is_included_in_net_worth, AssetClass, AssetClassification,
        ClassificationHints, MarketCapBand, NormalizedHolding, NormalizedHoldingBuilder,
        ProductType, RecommendedRange, RiskBehavior, TopLevelBucket, UlipNpsAllocation,
        ValuationMethod,
    };
    pub use crate::wrapper::split_wrapper_holding;

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
