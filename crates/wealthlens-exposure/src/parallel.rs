//! Holding classification, fanned out over rayon for large portfolios.

use wealthlens_core::classifier::ClassifiedHolding;
use wealthlens_core::types::NormalizedHolding;

use crate::types::ExposureConfig;

/// Classifies every holding, keeping input order.
///
/// Runs on the rayon pool when the `parallel` feature is compiled in and
/// [`ExposureConfig::should_parallelize`] holds for the portfolio size.
#[must_use]
pub fn classify_holdings(
    holdings: &[NormalizedHolding],
    config: &ExposureConfig,
) -> Vec<ClassifiedHolding> {
    if config.should_parallelize(holdings.len()) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            tracing::trace!(holdings = holdings.len(), "classifying on rayon pool");
            return holdings.par_iter().map(ClassifiedHolding::from_holding).collect();
        }
    }

    holdings.iter().map(ClassifiedHolding::from_holding).collect()
}
