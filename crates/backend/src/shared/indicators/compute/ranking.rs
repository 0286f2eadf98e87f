use contracts::dashboards::d400_sales_indicators::RankingItem;

use super::OrderedGroups;
use crate::shared::indicators::currency::{CurrencyNormalizer, MoneyField};
use crate::shared::indicators::metadata::key_or_sin_registro;
use crate::shared::indicators::period::FilteredSale;
use crate::shared::indicators::trend::{change_percent, direction, round1};

pub const RANKING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingDimension {
    Sellers,
    Products,
    Clients,
}

impl RankingDimension {
    fn info(&self, count: u64) -> String {
        let (one, many) = match self {
            RankingDimension::Sellers => ("comprobante", "comprobantes"),
            RankingDimension::Products => ("venta", "ventas"),
            RankingDimension::Clients => ("compra", "compras"),
        };
        format!("{} {}", count, if count == 1 { one } else { many })
    }
}

/// A sale's contribution to one ranking group.
struct Contribution {
    key: String,
    id: String,
    amount: f64,
}

fn contributions(
    sale: &FilteredSale<'_>,
    dimension: RankingDimension,
    normalizer: &CurrencyNormalizer,
) -> Vec<Contribution> {
    let record = sale.record;
    match dimension {
        RankingDimension::Sellers => {
            let key = key_or_sin_registro(&record.seller_name);
            vec![Contribution {
                id: key.clone(),
                key,
                amount: normalizer.normalize(record, MoneyField::Total),
            }]
        }
        RankingDimension::Clients => {
            let key = key_or_sin_registro(&record.client_name);
            vec![Contribution {
                id: record.client_identifier.trim().to_string(),
                key,
                amount: normalizer.normalize(record, MoneyField::Total),
            }]
        }
        RankingDimension::Products => record
            .line_items
            .iter()
            .map(|item| {
                let key = key_or_sin_registro(&item.name);
                Contribution {
                    id: key.clone(),
                    key,
                    amount: normalizer.normalize_amount(record, item.subtotal),
                }
            })
            .collect(),
    }
}

struct RankTotals {
    id: String,
    current: f64,
    previous: f64,
    count: u64,
}

/// Top [`RANKING_LIMIT`] keys of the current period by normalized amount,
/// each with its change against the previous period. Equal amounts keep
/// the order in which keys were first seen.
pub fn ranking(
    dimension: RankingDimension,
    current: &[FilteredSale<'_>],
    previous: &[FilteredSale<'_>],
    normalizer: &CurrencyNormalizer,
) -> Vec<RankingItem> {
    let mut groups: OrderedGroups<RankTotals> = OrderedGroups::new();

    for sale in current {
        for c in contributions(sale, dimension, normalizer) {
            let totals = groups.entry_with(&c.key, || RankTotals {
                id: String::new(),
                current: 0.0,
                previous: 0.0,
                count: 0,
            });
            if totals.id.is_empty() {
                totals.id = c.id;
            }
            totals.current += c.amount;
            totals.count += 1;
        }
    }

    for sale in previous {
        for c in contributions(sale, dimension, normalizer) {
            if let Some(totals) = groups.get_mut(&c.key) {
                totals.previous += c.amount;
            }
        }
    }

    let mut items: Vec<RankingItem> = groups
        .into_vec()
        .into_iter()
        .map(|(key, totals)| {
            let change = round1(change_percent(totals.current, totals.previous));
            RankingItem {
                id: if totals.id.is_empty() { key.clone() } else { totals.id },
                name: key,
                amount: totals.current,
                info: dimension.info(totals.count),
                change_percent: change,
                trend: direction(change),
            }
        })
        .collect();

    items.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    items.truncate(RANKING_LIMIT);
    items
}
