use axum::{routing::get, Router};

use crate::api::{handlers, AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D400 Sales Indicators Dashboard
        .route(
            "/api/d400/indicadores",
            get(handlers::d400_sales_indicators::get_indicadores),
        )
        .route(
            "/api/d400/indicadores/local",
            get(handlers::d400_sales_indicators::get_indicadores_local),
        )
        .route(
            "/api/d400/sales",
            get(handlers::d400_sales_indicators::list_sales)
                .post(handlers::d400_sales_indicators::append_sales),
        )
        .with_state(state)
}
