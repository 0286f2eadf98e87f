use chrono::NaiveDate;
use contracts::dashboards::d400_sales_indicators::VentaDiaria;
use std::collections::BTreeMap;

use crate::shared::indicators::currency::{CurrencyNormalizer, MoneyField};
use crate::shared::indicators::period::FilteredSale;

#[derive(Default)]
struct DayTotals {
    total_sales: f64,
    tax: f64,
    comprobante_count: u64,
    boleta_count: u64,
    factura_count: u64,
}

/// One entry per calendar day present in `current`, ascending by date.
pub fn ventas_diarias(current: &[FilteredSale<'_>], normalizer: &CurrencyNormalizer) -> Vec<VentaDiaria> {
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();

    for sale in current {
        let day = days.entry(sale.day()).or_default();
        day.total_sales += normalizer.normalize(sale.record, MoneyField::Total);
        day.tax += normalizer.normalize(sale.record, MoneyField::Tax);
        day.comprobante_count += 1;

        let kind = sale.record.comprobante_type.to_lowercase();
        if kind.contains("boleta") {
            day.boleta_count += 1;
        }
        if kind.contains("factura") {
            day.factura_count += 1;
        }
    }

    days.into_iter()
        .map(|(date, totals)| VentaDiaria {
            date: date.format("%Y-%m-%d").to_string(),
            average_ticket: if totals.comprobante_count == 0 {
                0.0
            } else {
                totals.total_sales / totals.comprobante_count as f64
            },
            total_sales: totals.total_sales,
            tax: totals.tax,
            comprobante_count: totals.comprobante_count,
            boleta_count: totals.boleta_count,
            factura_count: totals.factura_count,
        })
        .collect()
}
