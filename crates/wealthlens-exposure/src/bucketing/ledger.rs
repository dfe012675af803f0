//! Insertion-ordered accumulation of dimensional exposure.

use rust_decimal::Decimal;
use wealthlens_core::totals::percentage_of;

use crate::types::DimensionalExposure;

/// One value attributed to a dimension key.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Contribution<K> {
    /// Held directly.
    Direct(K, Decimal),
    /// Held through a fund.
    ViaFund(K, Decimal),
}

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    direct: Decimal,
    via_mf: Decimal,
}

/// Keys in first-seen order with running direct and via-fund totals.
#[derive(Debug, Clone)]
pub(crate) struct ExposureLedger<K> {
    entries: Vec<Entry<K>>,
}

impl<K: PartialEq> ExposureLedger<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Folds contributions into a ledger.
    pub(crate) fn from_contributions<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = Contribution<K>>,
    {
        contributions.into_iter().fold(Self::new(), Self::record)
    }

    /// Adds a contribution, creating the key on first sight.
    pub(crate) fn record(mut self, contribution: Contribution<K>) -> Self {
        let (key, value, direct) = match contribution {
            Contribution::Direct(k, v) => (k, v, true),
            Contribution::ViaFund(k, v) => (k, v, false),
        };
        let idx = match self.entries.iter().position(|e| e.key == key) {
            Some(idx) => idx,
            None => {
                self.entries.push(Entry {
                    key,
                    direct: Decimal::ZERO,
                    via_mf: Decimal::ZERO,
                });
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[idx];
        if direct {
            entry.direct += value;
        } else {
            entry.via_mf += value;
        }
        self
    }

    /// Sum of every entry's total.
    pub(crate) fn grand_total(&self) -> Decimal {
        self.entries.iter().map(|e| e.direct + e.via_mf).sum()
    }

    /// Rows sorted descending by total; ties keep first-seen order.
    pub(crate) fn into_exposures(self, total_market_value: Decimal) -> Vec<DimensionalExposure<K>> {
        let mut rows: Vec<DimensionalExposure<K>> = self
            .entries
            .into_iter()
            .map(|e| {
                let total = e.direct + e.via_mf;
                DimensionalExposure {
                    dimension: e.key,
                    direct_equity: e.direct,
                    via_mf: e.via_mf,
                    total,
                    percentage: percentage_of(total, total_market_value),
                }
            })
            .collect();
        sort_descending(&mut rows);
        rows
    }
}

/// Recomputes percentages against the rows' own total.
///
/// Leaves rows untouched when that total is zero.
pub(crate) fn rebase_to_row_total<'a, K: 'a>(
    rows: impl IntoIterator<Item = &'a mut DimensionalExposure<K>>,
) {
    let mut rows: Vec<&mut DimensionalExposure<K>> = rows.into_iter().collect();
    let total: Decimal = rows.iter().map(|r| r.total).sum();
    if total.is_zero() {
        return;
    }
    for row in &mut rows {
        row.percentage = percentage_of(row.total, total);
    }
}

/// Stable sort, largest total first.
pub(crate) fn sort_descending<K>(rows: &mut [DimensionalExposure<K>]) {
    rows.sort_by(|a, b| b.total.cmp(&a.total));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fold_merges_keys() {
        let ledger = ExposureLedger::from_contributions(vec![
            Contribution::Direct("Banking", dec!(100)),
            Contribution::Direct("IT", dec!(300)),
            Contribution::ViaFund("Banking", dec!(250)),
        ]);
        assert_eq!(ledger.grand_total(), dec!(650));

        let rows = ledger.into_exposures(dec!(650));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dimension, "Banking");
        assert_eq!(rows[0].direct_equity, dec!(100));
        assert_eq!(rows[0].via_mf, dec!(250));
        assert_eq!(rows[0].total, dec!(350));
        assert_eq!(rows[1].dimension, "IT");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let ledger = ExposureLedger::from_contributions(vec![
            Contribution::Direct("B", dec!(10)),
            Contribution::Direct("A", dec!(10)),
            Contribution::Direct("C", dec!(20)),
        ]);
        let keys: Vec<&str> = ledger
            .into_exposures(dec!(40))
            .into_iter()
            .map(|r| r.dimension)
            .collect();
        assert_eq!(keys, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_zero_market_value() {
        let ledger = ExposureLedger::from_contributions(vec![Contribution::Direct("X", dec!(5))]);
        let rows = ledger.into_exposures(Decimal::ZERO);
        assert_eq!(rows[0].percentage, 0.0);
    }

    #[test]
    fn test_rebase_to_row_total() {
        let mut rows = ExposureLedger::from_contributions(vec![
            Contribution::Direct("A", dec!(30)),
            Contribution::ViaFund("B", dec!(10)),
        ])
        .into_exposures(dec!(1000));
        assert!((rows[0].percentage - 3.0).abs() < 1e-9);

        rebase_to_row_total(rows.iter_mut());
        assert!((rows[0].percentage - 75.0).abs() < 1e-9);
        assert!((rows[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        let ledger: ExposureLedger<&str> = ExposureLedger::new();
        assert!(ledger.grand_total().is_zero());
        assert!(ledger.into_exposures(dec!(1)).is_empty());
    }
}
