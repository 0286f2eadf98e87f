use serde::{Deserialize, Serialize};

use crate::shared::indicators::TrendDirection;

/// Snapshot of the sales indicators dashboard.
///
/// Field names are the contract with the dashboard widgets; renaming one
/// requires updating its consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicadoresData {
    pub kpis: KpiSummary,
    pub ventas_por_comprobante: Vec<VentasPorComprobanteItem>,
    pub ventas_por_establecimiento: Vec<VentasPorEstablecimientoItem>,
    pub ventas_diarias: Vec<VentaDiaria>,
    pub ranking_vendedores: Vec<RankingItem>,
    pub ranking_productos: Vec<RankingItem>,
    pub ranking_clientes: Vec<RankingItem>,
    pub crecimiento: CrecimientoDetalle,
    /// Currency every amount in this snapshot is expressed in.
    pub base_currency: String,
}

/// Growth description when sales did not change.
pub const CRECIMIENTO_ESTABLE: &str = "Las ventas se mantuvieron estables respecto al periodo anterior";

impl IndicadoresData {
    /// All-zero snapshot with every collection empty, as computed for a
    /// period without sales on either side.
    pub fn empty(base_currency: &str) -> Self {
        Self {
            kpis: KpiSummary {
                crecimiento_descripcion: CRECIMIENTO_ESTABLE.to_string(),
                ..KpiSummary::default()
            },
            ventas_por_comprobante: Vec::new(),
            ventas_por_establecimiento: Vec::new(),
            ventas_diarias: Vec::new(),
            ranking_vendedores: Vec::new(),
            ranking_productos: Vec::new(),
            ranking_clientes: Vec::new(),
            crecimiento: CrecimientoDetalle {
                description: CRECIMIENTO_ESTABLE.to_string(),
                ..CrecimientoDetalle::default()
            },
            base_currency: base_currency.to_string(),
        }
    }
}

/// Headline cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_sales: f64,
    pub total_sales_trend: String,
    pub new_clients: u64,
    pub new_clients_delta: String,
    pub recurring_clients: u64,
    pub recurring_clients_delta: String,
    pub comprobantes_emitted: u64,
    pub comprobantes_delta: String,
    pub growth_label: String,
    pub crecimiento_descripcion: String,
}

impl Default for KpiSummary {
    fn default() -> Self {
        Self {
            total_sales: 0.0,
            total_sales_trend: "0.0%".to_string(),
            new_clients: 0,
            new_clients_delta: "0.0%".to_string(),
            recurring_clients: 0,
            recurring_clients_delta: "0.0%".to_string(),
            comprobantes_emitted: 0,
            comprobantes_delta: "0.0%".to_string(),
            growth_label: "0.0%".to_string(),
            crecimiento_descripcion: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentasPorComprobanteItem {
    pub label: String,
    pub amount: f64,
    /// CSS colour for the chart slice.
    pub color: String,
    pub trend_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTokens {
    pub background: String,
    pub text: String,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentasPorEstablecimientoItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Share of the period total, 0..=100.
    pub percent_of_total: f64,
    pub trend_label: String,
    pub color_tokens: ColorTokens,
}

/// One calendar day of the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaDiaria {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_sales: f64,
    pub tax: f64,
    pub comprobante_count: u64,
    pub average_ticket: f64,
    pub boleta_count: u64,
    pub factura_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Secondary text under the name.
    pub info: String,
    pub change_percent: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativePoint {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrecimientoDetalle {
    pub description: String,
    pub variation_percent: f64,
    pub comparative_points: Vec<ComparativePoint>,
}

/// Query string of `GET /api/d400/indicadores`. Dates are `YYYY-MM-DD`;
/// a missing `endDate` means the same day as `startDate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicadoresRequest {
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub establishment_id: Option<String>,
}

/// Response of `POST /api/d400/sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendSalesResponse {
    pub appended: usize,
    pub ledger_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_serializes_every_field() {
        let value = serde_json::to_value(IndicadoresData::empty("PEN")).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "kpis",
            "ventasPorComprobante",
            "ventasPorEstablecimiento",
            "ventasDiarias",
            "rankingVendedores",
            "rankingProductos",
            "rankingClientes",
            "crecimiento",
            "baseCurrency",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
            assert!(!obj[key].is_null(), "null {key}");
        }
        assert_eq!(value["kpis"]["totalSalesTrend"], "0.0%");
        assert_eq!(value["crecimiento"]["comparativePoints"], serde_json::json!([]));
        assert_eq!(value["crecimiento"]["description"], CRECIMIENTO_ESTABLE);
        assert_eq!(value["kpis"]["crecimientoDescripcion"], CRECIMIENTO_ESTABLE);
    }
}
