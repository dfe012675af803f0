//! Domain types for asset classification.
//!
//! - [`ProductType`]: Closed taxonomy of product labels
//! - [`AssetClassification`]: Asset class, bucket, risk behavior, valuation method
//! - [`ClassificationHints`]: Fund category flags and wrapper allocations
//! - [`NormalizedHolding`]: A valued position from the ingestion layer
//! - [`MarketCapBand`]: Market-cap band with its recommended range

mod asset_class;
mod hints;
mod holding;
mod market_cap;
mod product;

pub use asset_class::{
    is_included_in_allocation, is_included_in_net_worth, AssetClass, AssetClassification,
    RiskBehavior, TopLevelBucket, ValuationMethod,
};
pub use hints::{ClassificationHints, UlipNpsAllocation};
pub use holding::{NormalizedHolding, NormalizedHoldingBuilder};
pub use market_cap::{MarketCapBand, RecommendedRange};
pub use product::{normalize_label, ProductType};
