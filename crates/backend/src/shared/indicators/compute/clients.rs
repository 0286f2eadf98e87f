use std::collections::HashSet;

use crate::shared::indicators::period::FilteredSale;

/// New and recurring client counts of one window against its predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientFlow {
    pub new_clients: u64,
    pub recurring_clients: u64,
}

/// Identity of the buyer: identifier first, name otherwise. Anonymous sales
/// have no identity.
fn client_key(sale: &FilteredSale<'_>) -> Option<String> {
    let identifier = sale.record.client_identifier.trim();
    if !identifier.is_empty() {
        return Some(identifier.to_string());
    }
    let name = sale.record.client_name.trim();
    if !name.is_empty() {
        return Some(name.to_lowercase());
    }
    None
}

pub fn distinct_clients(sales: &[FilteredSale<'_>]) -> HashSet<String> {
    sales.iter().filter_map(client_key).collect()
}

pub fn client_flow(window: &HashSet<String>, predecessor: &HashSet<String>) -> ClientFlow {
    let recurring = window.intersection(predecessor).count() as u64;
    ClientFlow {
        new_clients: window.len() as u64 - recurring,
        recurring_clients: recurring,
    }
}
