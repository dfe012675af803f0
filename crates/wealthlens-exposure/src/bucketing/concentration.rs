//! Concentration flagging.

use crate::types::HasPercentage;

pub use crate::types::DEFAULT_CONCENTRATION_THRESHOLD;

/// Returns the rows whose percentage is strictly above `threshold`.
///
/// A pure filter: rows are cloned unchanged and keep their input order.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use wealthlens_exposure::bucketing::{flag_concentration, DEFAULT_CONCENTRATION_THRESHOLD};
/// use wealthlens_exposure::types::DimensionalExposure;
///
/// let row = |name: &str, pct: f64| DimensionalExposure {
///     dimension: name.to_string(),
///     direct_equity: dec!(0),
///     via_mf: dec!(0),
///     total: dec!(0),
///     percentage: pct,
/// };
/// let rows = vec![row("Banking", 26.0), row("IT", 25.0), row("Auto", 10.0)];
///
/// let flagged = flag_concentration(&rows, DEFAULT_CONCENTRATION_THRESHOLD);
/// assert_eq!(flagged.len(), 1);
/// assert_eq!(flagged[0].dimension, "Banking");
/// ```
#[must_use]
pub fn flag_concentration<T>(exposures: &[T], threshold: f64) -> Vec<T>
where
    T: HasPercentage + Clone,
{
    exposures
        .iter()
        .filter(|row| row.percentage() > threshold)
        .cloned()
        .collect()
}
