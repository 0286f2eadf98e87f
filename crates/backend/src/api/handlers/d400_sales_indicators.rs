use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d400_sales_indicators::{
    AppendSalesResponse, IndicadoresData, IndicadoresRequest,
};
use contracts::domain::a001_sale_record::SaleRecord;
use contracts::shared::indicators::{DateRange, IndicadoresFilters};

use crate::api::AppState;
use crate::shared::data::sale_store::SaleSnapshotStore;
use crate::shared::indicators::period::parse_date_param;

/// Turns the raw query into engine filters. `None` when a date is not ISO
/// or the range is reversed.
pub fn filters_from_request(request: &IndicadoresRequest) -> Option<IndicadoresFilters> {
    let start = parse_date_param(&request.start_date)?;
    let end = match request.end_date.as_deref().map(str::trim) {
        None | Some("") => start,
        Some(raw) => parse_date_param(raw)?,
    };
    if end < start {
        return None;
    }
    Some(IndicadoresFilters::new(
        DateRange::new(start, end),
        request.establishment_id.as_deref(),
    ))
}

fn parse_request(request: &IndicadoresRequest) -> Result<IndicadoresFilters, StatusCode> {
    filters_from_request(request).ok_or_else(|| {
        tracing::error!(
            "D400 Indicators: invalid period {}..{}",
            request.start_date,
            request.end_date.as_deref().unwrap_or("")
        );
        StatusCode::BAD_REQUEST
    })
}

/// GET /api/d400/indicadores?startDate=2024-05-01&endDate=2024-05-31&establishmentId=Todos
pub async fn get_indicadores(
    State(state): State<AppState>,
    Query(request): Query<IndicadoresRequest>,
) -> Result<Json<IndicadoresData>, StatusCode> {
    let filters = parse_request(&request)?;
    tracing::info!(
        "D400 Indicators: Getting snapshot for {}..{} (establishment: {})",
        filters.date_range.start,
        filters.date_range.end,
        filters.establishment_scope().unwrap_or("all")
    );

    let (data, source) = state.provider.fetch_with_source(&filters).await;
    tracing::info!(
        "D400 Indicators: Returning {} daily rows from {} source",
        data.ventas_diarias.len(),
        source.as_str()
    );
    Ok(Json(data))
}

/// GET /api/d400/indicadores/local
///
/// Same as [`get_indicadores`] but always computed from the local ledger.
pub async fn get_indicadores_local(
    State(state): State<AppState>,
    Query(request): Query<IndicadoresRequest>,
) -> Result<Json<IndicadoresData>, StatusCode> {
    let filters = parse_request(&request)?;
    Ok(Json(state.provider.engine().compute(&filters)))
}

/// GET /api/d400/sales
pub async fn list_sales(State(state): State<AppState>) -> Json<Vec<SaleRecord>> {
    let snapshot = state.store.snapshot();
    tracing::info!("D400 Indicators: Returning {} ledger records", snapshot.len());
    Json(snapshot.as_ref().clone())
}

/// POST /api/d400/sales
pub async fn append_sales(
    State(state): State<AppState>,
    Json(records): Json<Vec<SaleRecord>>,
) -> Json<AppendSalesResponse> {
    let appended = records.len();
    let ledger_size = state.store.extend(records);
    tracing::info!(
        "D400 Indicators: Appended {} records, ledger size {}",
        appended,
        ledger_size
    );
    Json(AppendSalesResponse {
        appended,
        ledger_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(start: &str, end: Option<&str>, establishment: Option<&str>) -> IndicadoresRequest {
        IndicadoresRequest {
            start_date: start.to_string(),
            end_date: end.map(str::to_string),
            establishment_id: establishment.map(str::to_string),
        }
    }

    #[test]
    fn test_filters_from_request() {
        let filters =
            filters_from_request(&request("2024-05-01", Some("2024-05-31"), Some("EST-1"))).unwrap();
        assert_eq!(filters.date_range.start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(filters.date_range.end, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(filters.establishment_scope(), Some("EST-1"));
    }

    #[test]
    fn test_missing_end_date_means_single_day() {
        let filters = filters_from_request(&request("2024-05-10T08:30:00", None, None)).unwrap();
        assert_eq!(filters.date_range.start, filters.date_range.end);
        assert_eq!(filters.establishment_scope(), None);
    }

    #[test]
    fn test_invalid_requests_are_rejected() {
        assert!(filters_from_request(&request("10/05/2024", None, None)).is_none());
        assert!(filters_from_request(&request("2024-05-10", Some("mañana"), None)).is_none());
        assert!(filters_from_request(&request("2024-05-10", Some("2024-05-01"), None)).is_none());
    }
}
