use contracts::dashboards::d400_sales_indicators::VentasPorEstablecimientoItem;

use super::OrderedGroups;
use crate::shared::indicators::currency::{CurrencyNormalizer, MoneyField};
use crate::shared::indicators::metadata::{establishment_color_tokens, key_or_sin_registro};
use crate::shared::indicators::period::FilteredSale;
use crate::shared::indicators::trend::trend_label;

struct EstablishmentTotals {
    name: String,
    amount: f64,
}

/// Sales per establishment in the current period with each one's share of
/// the total. Trends compare against the same establishment's previous sum.
pub fn ventas_por_establecimiento(
    current: &[FilteredSale<'_>],
    previous: &[FilteredSale<'_>],
    normalizer: &CurrencyNormalizer,
) -> Vec<VentasPorEstablecimientoItem> {
    let mut groups: OrderedGroups<EstablishmentTotals> = OrderedGroups::new();
    for sale in current {
        let id = key_or_sin_registro(&sale.record.establishment_id);
        let totals = groups.entry_with(&id, || EstablishmentTotals {
            name: String::new(),
            amount: 0.0,
        });
        if totals.name.is_empty() {
            totals.name = sale.record.establishment_name.trim().to_string();
        }
        totals.amount += normalizer.normalize(sale.record, MoneyField::Total);
    }

    let mut previous_totals: OrderedGroups<f64> = OrderedGroups::new();
    for sale in previous {
        let id = key_or_sin_registro(&sale.record.establishment_id);
        *previous_totals.entry_with(&id, || 0.0) += normalizer.normalize(sale.record, MoneyField::Total);
    }

    let groups = groups.into_vec();
    let grand_total: f64 = groups.iter().map(|(_, t)| t.amount).sum();

    let mut items: Vec<VentasPorEstablecimientoItem> = groups
        .into_iter()
        .map(|(id, totals)| {
            let previous = previous_totals.get(&id).copied().unwrap_or(0.0);
            let percent_of_total = if grand_total == 0.0 {
                0.0
            } else {
                totals.amount / grand_total * 100.0
            };
            VentasPorEstablecimientoItem {
                name: if totals.name.is_empty() {
                    id.clone()
                } else {
                    totals.name
                },
                id,
                amount: totals.amount,
                percent_of_total,
                trend_label: trend_label(totals.amount, previous),
                color_tokens: establishment_color_tokens(0),
            }
        })
        .collect();

    items.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    for (rank, item) in items.iter_mut().enumerate() {
        item.color_tokens = establishment_color_tokens(rank);
    }
    items
}
