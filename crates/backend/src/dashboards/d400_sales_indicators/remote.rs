use async_trait::async_trait;
use contracts::dashboards::d400_sales_indicators::*;
use contracts::shared::indicators::{IndicadoresFilters, IndicadoresQuery, TrendDirection};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndicadoresSourceError {
    #[error("request to indicators API failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("indicators API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed indicators payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("indicators payload field `{0}` is not a valid number")]
    InvalidNumber(String),
}

/// Anything that can produce an indicators snapshot asynchronously.
#[async_trait]
pub trait IndicadoresSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, filters: &IndicadoresFilters) -> Result<IndicadoresData, IndicadoresSourceError>;
}

/// Client of the remote `GET <endpoint>?startDate&endDate&establishmentId` API.
pub struct RemoteIndicadoresClient {
    endpoint: String,
    base_currency: String,
    client: reqwest::Client,
}

impl RemoteIndicadoresClient {
    pub fn new(endpoint: &str, timeout: Duration, base_currency: &str) -> Result<Self, IndicadoresSourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            base_currency: base_currency.to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IndicadoresSource for RemoteIndicadoresClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn fetch(&self, filters: &IndicadoresFilters) -> Result<IndicadoresData, IndicadoresSourceError> {
        let query = IndicadoresQuery::from_filters(filters);
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndicadoresSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let dto: IndicadoresDto = serde_json::from_str(&body)?;
        dto_into_data(dto, &self.base_currency)
    }
}

// ---------------------------------------------------------------------------
// DTO conversion
// ---------------------------------------------------------------------------

fn number(value: Option<NumberLike>, field: &str) -> Result<f64, IndicadoresSourceError> {
    match value {
        None => Ok(0.0),
        Some(n) => n
            .as_f64()
            .ok_or_else(|| IndicadoresSourceError::InvalidNumber(field.to_string())),
    }
}

/// Counts must be non-negative whole numbers.
fn count(value: Option<NumberLike>, field: &str) -> Result<u64, IndicadoresSourceError> {
    let n = number(value, field)?;
    if n < 0.0 || n.fract() != 0.0 || n > u64::MAX as f64 {
        return Err(IndicadoresSourceError::InvalidNumber(field.to_string()));
    }
    Ok(n as u64)
}

fn label(value: Option<String>) -> String {
    value.unwrap_or_else(|| "0.0%".to_string())
}

/// Converts the lenient remote payload into a complete snapshot. Missing
/// values become zero or empty; a value that is present but not numeric
/// fails the whole conversion.
pub fn dto_into_data(dto: IndicadoresDto, default_currency: &str) -> Result<IndicadoresData, IndicadoresSourceError> {
    let k = dto.kpis.unwrap_or_default();
    let kpis = KpiSummary {
        total_sales: number(k.total_sales, "kpis.totalSales")?,
        total_sales_trend: label(k.total_sales_trend),
        new_clients: count(k.new_clients, "kpis.newClients")?,
        new_clients_delta: label(k.new_clients_delta),
        recurring_clients: count(k.recurring_clients, "kpis.recurringClients")?,
        recurring_clients_delta: label(k.recurring_clients_delta),
        comprobantes_emitted: count(k.comprobantes_emitted, "kpis.comprobantesEmitted")?,
        comprobantes_delta: label(k.comprobantes_delta),
        growth_label: label(k.growth_label),
        crecimiento_descripcion: k.crecimiento_descripcion.unwrap_or_default(),
    };

    let ventas_por_comprobante = dto
        .ventas_por_comprobante
        .unwrap_or_default()
        .into_iter()
        .map(|i| {
            Ok(VentasPorComprobanteItem {
                label: i.label.unwrap_or_default(),
                amount: number(i.amount, "ventasPorComprobante.amount")?,
                color: i.color.unwrap_or_default(),
                trend_label: label(i.trend_label),
            })
        })
        .collect::<Result<Vec<_>, IndicadoresSourceError>>()?;

    let ventas_por_establecimiento = dto
        .ventas_por_establecimiento
        .unwrap_or_default()
        .into_iter()
        .map(|i| {
            let tokens = i.color_tokens.unwrap_or_default();
            Ok(VentasPorEstablecimientoItem {
                id: i.id.unwrap_or_default(),
                name: i.name.unwrap_or_default(),
                amount: number(i.amount, "ventasPorEstablecimiento.amount")?,
                percent_of_total: number(i.percent_of_total, "ventasPorEstablecimiento.percentOfTotal")?,
                trend_label: label(i.trend_label),
                color_tokens: ColorTokens {
                    background: tokens.background.unwrap_or_default(),
                    text: tokens.text.unwrap_or_default(),
                    accent: tokens.accent.unwrap_or_default(),
                },
            })
        })
        .collect::<Result<Vec<_>, IndicadoresSourceError>>()?;

    let ventas_diarias = dto
        .ventas_diarias
        .unwrap_or_default()
        .into_iter()
        .map(|d| {
            Ok(VentaDiaria {
                date: d.date.unwrap_or_default(),
                total_sales: number(d.total_sales, "ventasDiarias.totalSales")?,
                tax: number(d.tax, "ventasDiarias.tax")?,
                comprobante_count: count(d.comprobante_count, "ventasDiarias.comprobanteCount")?,
                average_ticket: number(d.average_ticket, "ventasDiarias.averageTicket")?,
                boleta_count: count(d.boleta_count, "ventasDiarias.boletaCount")?,
                factura_count: count(d.factura_count, "ventasDiarias.facturaCount")?,
            })
        })
        .collect::<Result<Vec<_>, IndicadoresSourceError>>()?;

    let c = dto.crecimiento.unwrap_or_default();
    let crecimiento = CrecimientoDetalle {
        description: c.description.unwrap_or_default(),
        variation_percent: number(c.variation_percent, "crecimiento.variationPercent")?,
        comparative_points: c
            .comparative_points
            .unwrap_or_default()
            .into_iter()
            .map(|p| {
                Ok(ComparativePoint {
                    label: p.label.unwrap_or_default(),
                    amount: number(p.amount, "crecimiento.comparativePoints.amount")?,
                })
            })
            .collect::<Result<Vec<_>, IndicadoresSourceError>>()?,
    };

    Ok(IndicadoresData {
        kpis,
        ventas_por_comprobante,
        ventas_por_establecimiento,
        ventas_diarias,
        ranking_vendedores: ranking_items(dto.ranking_vendedores, "rankingVendedores")?,
        ranking_productos: ranking_items(dto.ranking_productos, "rankingProductos")?,
        ranking_clientes: ranking_items(dto.ranking_clientes, "rankingClientes")?,
        crecimiento,
        base_currency: dto
            .base_currency
            .unwrap_or_else(|| default_currency.to_string()),
    })
}

fn ranking_items(items: Option<Vec<RankingItemDto>>, field: &str) -> Result<Vec<RankingItem>, IndicadoresSourceError> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|i| {
            let change_percent = number(i.change_percent, &format!("{field}.changePercent"))?;
            Ok(RankingItem {
                id: i.id.unwrap_or_default(),
                name: i.name.unwrap_or_default(),
                amount: number(i.amount, &format!("{field}.amount"))?,
                info: i.info.unwrap_or_default(),
                change_percent,
                trend: i.trend.unwrap_or(if change_percent >= 0.0 {
                    TrendDirection::Up
                } else {
                    TrendDirection::Down
                }),
            })
        })
        .collect()
}
