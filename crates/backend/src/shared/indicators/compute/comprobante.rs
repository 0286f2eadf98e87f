use contracts::dashboards::d400_sales_indicators::VentasPorComprobanteItem;

use super::OrderedGroups;
use crate::shared::indicators::currency::{CurrencyNormalizer, MoneyField};
use crate::shared::indicators::metadata::{comprobante_color, key_or_sin_registro};
use crate::shared::indicators::period::FilteredSale;
use crate::shared::indicators::trend::trend_label;

struct TypeTotals {
    label: String,
    current: f64,
    previous: f64,
}

/// Sales per comprobante type, current period against the previous one.
///
/// Types match case-insensitively; the first spelling seen becomes the label.
/// A type seen only in the previous period still gets an item with amount 0.
pub fn ventas_por_comprobante(
    current: &[FilteredSale<'_>],
    previous: &[FilteredSale<'_>],
    normalizer: &CurrencyNormalizer,
) -> Vec<VentasPorComprobanteItem> {
    let mut groups: OrderedGroups<TypeTotals> = OrderedGroups::new();

    let periods = [(current, true), (previous, false)];
    for (sales, is_current) in periods {
        for sale in sales {
            let label = key_or_sin_registro(&sale.record.comprobante_type);
            let key = label.to_lowercase();
            let amount = normalizer.normalize(sale.record, MoneyField::Total);
            let totals = groups.entry_with(&key, || TypeTotals {
                label,
                current: 0.0,
                previous: 0.0,
            });
            if is_current {
                totals.current += amount;
            } else {
                totals.previous += amount;
            }
        }
    }

    let mut items: Vec<VentasPorComprobanteItem> = groups
        .into_vec()
        .into_iter()
        .enumerate()
        .map(|(position, (key, totals))| VentasPorComprobanteItem {
            label: totals.label,
            amount: totals.current,
            color: comprobante_color(&key, position),
            trend_label: trend_label(totals.current, totals.previous),
        })
        .collect();

    items.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    items
}
