use contracts::dashboards::d400_sales_indicators::{
    ComparativePoint, CrecimientoDetalle, IndicadoresData, KpiSummary, RankingItem, VentaDiaria,
    VentasPorComprobanteItem, VentasPorEstablecimientoItem, CRECIMIENTO_ESTABLE,
};
use contracts::domain::a001_sale_record::SaleRecord;
use contracts::shared::indicators::IndicadoresFilters;
use std::sync::Arc;

use crate::shared::data::sale_store::SaleSnapshotStore;
use crate::shared::format::{format_money, format_percent_label};
use crate::shared::indicators::compute::clients::{client_flow, distinct_clients, ClientFlow};
use crate::shared::indicators::compute::comprobante::ventas_por_comprobante;
use crate::shared::indicators::compute::daily::ventas_diarias;
use crate::shared::indicators::compute::establishment::ventas_por_establecimiento;
use crate::shared::indicators::compute::ranking::{ranking, RankingDimension};
use crate::shared::indicators::compute::total_sales;
use crate::shared::indicators::currency::CurrencyNormalizer;
use crate::shared::indicators::period::{filter_by_range, previous_period};
use crate::shared::indicators::trend::{change_percent, round1, trend_label};

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Local indicators engine over an injected sales store.
#[derive(Clone)]
pub struct IndicatorsEngine {
    store: Arc<dyn SaleSnapshotStore>,
    normalizer: CurrencyNormalizer,
}

impl IndicatorsEngine {
    pub fn new(store: Arc<dyn SaleSnapshotStore>, base_currency: &str) -> Self {
        Self {
            store,
            normalizer: CurrencyNormalizer::new(base_currency),
        }
    }

    pub fn base_currency(&self) -> &str {
        self.normalizer.base_currency()
    }

    /// Computes a fresh snapshot from the store's current contents.
    pub fn compute(&self, filters: &IndicadoresFilters) -> IndicadoresData {
        let snapshot = self.store.snapshot();
        compute_indicadores(&snapshot, filters, &self.normalizer)
    }
}

/// Full indicators snapshot for `records` under `filters`.
///
/// Never fails: empty or malformed input yields a zero-valued snapshot.
pub fn compute_indicadores(
    records: &[SaleRecord],
    filters: &IndicadoresFilters,
    normalizer: &CurrencyNormalizer,
) -> IndicadoresData {
    let scope = filters.establishment_scope();
    let current_range = filters.date_range;
    let previous_range = previous_period(&current_range);

    let current = filter_by_range(records, &current_range, scope);
    if current.is_empty() {
        tracing::debug!(
            "Indicators: no sales between {} and {}",
            current_range.start,
            current_range.end
        );
    }

    let previous = filter_by_range(records, &previous_range, scope);
    // only needed to classify the previous window's clients
    let before_previous = filter_by_range(records, &previous_period(&previous_range), scope);

    let current_clients = distinct_clients(&current);
    let previous_clients = distinct_clients(&previous);
    let before_previous_clients = distinct_clients(&before_previous);

    let parts = SnapshotParts {
        current_total: total_sales(&current, normalizer),
        previous_total: total_sales(&previous, normalizer),
        current_count: current.len() as u64,
        previous_count: previous.len() as u64,
        current_clients: client_flow(&current_clients, &previous_clients),
        previous_clients: client_flow(&previous_clients, &before_previous_clients),
        por_comprobante: ventas_por_comprobante(&current, &previous, normalizer),
        por_establecimiento: ventas_por_establecimiento(&current, &previous, normalizer),
        diarias: ventas_diarias(&current, normalizer),
        ranking_vendedores: ranking(RankingDimension::Sellers, &current, &previous, normalizer),
        ranking_productos: ranking(RankingDimension::Products, &current, &previous, normalizer),
        ranking_clientes: ranking(RankingDimension::Clients, &current, &previous, normalizer),
    };

    tracing::debug!(
        "Indicators: {} sales, total {}, previous {} sales",
        parts.current_count,
        format_money(normalizer.base_currency(), parts.current_total),
        parts.previous_count
    );

    assemble(parts, normalizer.base_currency())
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Aggregates feeding the snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotParts {
    pub current_total: f64,
    pub previous_total: f64,
    pub current_count: u64,
    pub previous_count: u64,
    pub current_clients: ClientFlow,
    pub previous_clients: ClientFlow,
    pub por_comprobante: Vec<VentasPorComprobanteItem>,
    pub por_establecimiento: Vec<VentasPorEstablecimientoItem>,
    pub diarias: Vec<VentaDiaria>,
    pub ranking_vendedores: Vec<RankingItem>,
    pub ranking_productos: Vec<RankingItem>,
    pub ranking_clientes: Vec<RankingItem>,
}

pub fn growth_description(variation_percent: f64) -> String {
    if variation_percent > 0.0 {
        format!(
            "Las ventas crecieron {:.1}% respecto al periodo anterior",
            variation_percent
        )
    } else if variation_percent < 0.0 {
        format!(
            "Las ventas disminuyeron {:.1}% respecto al periodo anterior",
            variation_percent.abs()
        )
    } else {
        CRECIMIENTO_ESTABLE.to_string()
    }
}

/// Composes the output snapshot. Performs no aggregation of its own.
pub fn assemble(parts: SnapshotParts, base_currency: &str) -> IndicadoresData {
    let variation_percent = round1(change_percent(parts.current_total, parts.previous_total));
    let description = growth_description(variation_percent);

    let comparative_points = parts
        .diarias
        .iter()
        .map(|d| ComparativePoint {
            label: d.date.clone(),
            amount: d.total_sales,
        })
        .collect();

    let kpis = KpiSummary {
        total_sales: parts.current_total,
        total_sales_trend: trend_label(parts.current_total, parts.previous_total),
        new_clients: parts.current_clients.new_clients,
        new_clients_delta: trend_label(
            parts.current_clients.new_clients as f64,
            parts.previous_clients.new_clients as f64,
        ),
        recurring_clients: parts.current_clients.recurring_clients,
        recurring_clients_delta: trend_label(
            parts.current_clients.recurring_clients as f64,
            parts.previous_clients.recurring_clients as f64,
        ),
        comprobantes_emitted: parts.current_count,
        comprobantes_delta: trend_label(parts.current_count as f64, parts.previous_count as f64),
        growth_label: format_percent_label(variation_percent),
        crecimiento_descripcion: description.clone(),
    };

    IndicadoresData {
        kpis,
        ventas_por_comprobante: parts.por_comprobante,
        ventas_por_establecimiento: parts.por_establecimiento,
        ventas_diarias: parts.diarias,
        ranking_vendedores: parts.ranking_vendedores,
        ranking_productos: parts.ranking_productos,
        ranking_clientes: parts.ranking_clientes,
        crecimiento: CrecimientoDetalle {
            description,
            variation_percent,
            comparative_points,
        },
        base_currency: base_currency.to_string(),
    }
}
