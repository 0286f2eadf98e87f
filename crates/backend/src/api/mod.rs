pub mod handlers;

use std::sync::Arc;

use crate::dashboards::d400_sales_indicators::provider::IndicadoresProvider;
use crate::shared::data::sale_store::InMemorySaleStore;

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemorySaleStore>,
    pub provider: Arc<IndicadoresProvider>,
}
