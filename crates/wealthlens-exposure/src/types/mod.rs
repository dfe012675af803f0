//! Exposure input and output types.
//!
//! - [`ExposureConfig`]: Policy constants and processing switches
//! - [`FactsheetBundle`]: Optional per-fund factsheet maps
//! - [`FundExposureBreakdown`]: Equity / debt / other decomposition
//! - [`DimensionalExposure`]: Sector, market-cap and geography rows

mod config;
mod exposure;
mod factsheet;

pub use config::{ExposureConfig, FundSplit, PercentageBase, DEFAULT_CONCENTRATION_THRESHOLD};
pub use exposure::{
    CombinedExposureView, DimensionalExposure, ExposureAssetType, FundExposureBreakdown,
    FundExposureSummary, FundLookThrough, FundProfile, GeographyExposure, HasPercentage,
    LookThroughSource, MarketCapExposure, Region, SectorExposure,
};
pub use factsheet::{
    find_by_isin, CompositionMap, DimensionMap, FactsheetBundle, FundComposition, GeographyMap,
    GeographySplit,
};
