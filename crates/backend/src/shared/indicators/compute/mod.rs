//! Reducers over range-filtered sales.
//!
//! Each aggregator owns its accumulators for the duration of one call, so
//! concurrent computations never share state.

pub mod clients;
pub mod comprobante;
pub mod daily;
pub mod establishment;
pub mod ranking;

use std::collections::HashMap;

use super::currency::{CurrencyNormalizer, MoneyField};
use super::period::FilteredSale;

/// Group accumulator that remembers first-insertion order, keeping output
/// deterministic and ties in encounter order.
pub(crate) struct OrderedGroups<T> {
    index: HashMap<String, usize>,
    groups: Vec<(String, T)>,
}

impl<T> OrderedGroups<T> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn entry_with(&mut self, key: &str, init: impl FnOnce() -> T) -> &mut T {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                self.groups.push((key.to_string(), init()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[position].1
    }

    pub(crate) fn get(&self, key: &str) -> Option<&T> {
        let position = *self.index.get(key)?;
        Some(&self.groups[position].1)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        let position = *self.index.get(key)?;
        Some(&mut self.groups[position].1)
    }

    pub(crate) fn into_vec(self) -> Vec<(String, T)> {
        self.groups
    }
}

/// Sum of normalized record totals.
pub fn total_sales(sales: &[FilteredSale<'_>], normalizer: &CurrencyNormalizer) -> f64 {
    sales
        .iter()
        .map(|s| normalizer.normalize(s.record, MoneyField::Total))
        .sum()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_groups_keep_insertion_order() {
        let mut groups: OrderedGroups<f64> = OrderedGroups::new();
        *groups.entry_with("b", || 0.0) += 1.0;
        *groups.entry_with("a", || 0.0) += 2.0;
        *groups.entry_with("b", || 0.0) += 3.0;
        assert!(groups.get("c").is_none());
        assert_eq!(groups.get("a"), Some(&2.0));

        let result = groups.into_vec();
        assert_eq!(result, vec![("b".to_string(), 4.0), ("a".to_string(), 2.0)]);
    }
}
