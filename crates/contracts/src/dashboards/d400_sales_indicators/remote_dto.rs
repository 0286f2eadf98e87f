//! Response body of the remote indicators API.
//!
//! Mirrors [`super::IndicadoresData`] but every field is optional and
//! numbers may arrive either as JSON numbers or as numeric strings.

use serde::{Deserialize, Serialize};

use crate::shared::indicators::TrendDirection;

/// A number that may be sent as `12.5` or `"12.5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    /// `None` when the text form is not a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberLike::Number(n) if n.is_finite() => Some(*n),
            NumberLike::Number(_) => None,
            NumberLike::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
        }
    }
}

impl From<f64> for NumberLike {
    fn from(value: f64) -> Self {
        NumberLike::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicadoresDto {
    pub kpis: Option<KpiSummaryDto>,
    pub ventas_por_comprobante: Option<Vec<VentasPorComprobanteDto>>,
    pub ventas_por_establecimiento: Option<Vec<VentasPorEstablecimientoDto>>,
    pub ventas_diarias: Option<Vec<VentaDiariaDto>>,
    pub ranking_vendedores: Option<Vec<RankingItemDto>>,
    pub ranking_productos: Option<Vec<RankingItemDto>>,
    pub ranking_clientes: Option<Vec<RankingItemDto>>,
    pub crecimiento: Option<CrecimientoDetalleDto>,
    pub base_currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KpiSummaryDto {
    pub total_sales: Option<NumberLike>,
    pub total_sales_trend: Option<String>,
    pub new_clients: Option<NumberLike>,
    pub new_clients_delta: Option<String>,
    pub recurring_clients: Option<NumberLike>,
    pub recurring_clients_delta: Option<String>,
    pub comprobantes_emitted: Option<NumberLike>,
    pub comprobantes_delta: Option<String>,
    pub growth_label: Option<String>,
    pub crecimiento_descripcion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VentasPorComprobanteDto {
    pub label: Option<String>,
    pub amount: Option<NumberLike>,
    pub color: Option<String>,
    pub trend_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorTokensDto {
    pub background: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VentasPorEstablecimientoDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub amount: Option<NumberLike>,
    pub percent_of_total: Option<NumberLike>,
    pub trend_label: Option<String>,
    pub color_tokens: Option<ColorTokensDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VentaDiariaDto {
    pub date: Option<String>,
    pub total_sales: Option<NumberLike>,
    pub tax: Option<NumberLike>,
    pub comprobante_count: Option<NumberLike>,
    pub average_ticket: Option<NumberLike>,
    pub boleta_count: Option<NumberLike>,
    pub factura_count: Option<NumberLike>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingItemDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub amount: Option<NumberLike>,
    pub info: Option<String>,
    pub change_percent: Option<NumberLike>,
    pub trend: Option<TrendDirection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparativePointDto {
    pub label: Option<String>,
    pub amount: Option<NumberLike>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrecimientoDetalleDto {
    pub description: Option<String>,
    pub variation_percent: Option<NumberLike>,
    pub comparative_points: Option<Vec<ComparativePointDto>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_like_accepts_both_forms() {
        let dto: VentaDiariaDto = serde_json::from_str(
            r#"{"date": "2024-03-01", "totalSales": "350.50", "tax": 12, "comprobanteCount": "3"}"#,
        )
        .unwrap();
        assert_eq!(dto.total_sales.unwrap().as_f64(), Some(350.5));
        assert_eq!(dto.tax.unwrap().as_f64(), Some(12.0));
        assert_eq!(dto.comprobante_count.unwrap().as_f64(), Some(3.0));
        assert!(dto.average_ticket.is_none());
    }

    #[test]
    fn test_number_like_rejects_garbage_text() {
        assert_eq!(NumberLike::Text("12,5 soles".into()).as_f64(), None);
        assert_eq!(NumberLike::Text("NaN".into()).as_f64(), None);
        assert_eq!(NumberLike::Text(" 7 ".into()).as_f64(), Some(7.0));
    }

    #[test]
    fn test_empty_object_decodes() {
        let dto: IndicadoresDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto, IndicadoresDto::default());
    }
}
