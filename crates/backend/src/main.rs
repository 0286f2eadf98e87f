use backend::api::AppState;
use backend::dashboards::d400_sales_indicators::provider::IndicadoresProvider;
use backend::dashboards::d400_sales_indicators::remote::{
    IndicadoresSource, RemoteIndicadoresClient,
};
use backend::dashboards::d400_sales_indicators::service::IndicatorsEngine;
use backend::routes;
use backend::shared::config;
use backend::shared::data::sale_store::{InMemorySaleStore, SaleSnapshotStore};
use backend::shared::format::format_number;
use contracts::domain::a001_sale_record::SaleRecord;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::middleware::{self, Next};
    use axum::response::Response;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hyper=warn,reqwest=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Простой middleware для логирования запросов
    async fn request_logger(req: Request<Body>, next: Next) -> Response {
        use axum::body::to_bytes;
        use chrono::Local;

        let start = std::time::Instant::now();
        let method = req.method().clone();
        let uri = req.uri().clone();

        let response = next.run(req).await;

        let (parts, body) = response.into_parts();

        // Читаем тело ответа, чтобы узнать реальный размер
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(b) => b,
            Err(_) => {
                let duration = start.elapsed();
                println!(
                    "\x1b[33m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
                    Local::now().format("%H:%M:%S"),
                    duration.as_millis(),
                    "error",
                    parts.status.as_u16(),
                    method,
                    uri.path()
                );
                return Response::from_parts(parts, Body::default());
            }
        };

        let size = bytes.len();
        let duration = start.elapsed();

        // голубой для 200, коричневый для остальных
        let color_code = if parts.status.as_u16() == 200 {
            "36"
        } else {
            "33"
        };

        println!(
            "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
            color_code,
            Local::now().format("%H:%M:%S"),
            duration.as_millis(),
            format_number(size),
            parts.status.as_u16(),
            method,
            uri.path()
        );

        Response::from_parts(parts, Body::from(bytes))
    }

    let config = config::load_config()?;

    // Sales ledger
    let store = Arc::new(InMemorySaleStore::new());
    if let Some(ledger_path) = config::get_ledger_path(&config) {
        if let Err(e) = store.load_json_file(&ledger_path) {
            tracing::warn!("Starting with an empty ledger: {}", e);
        }
    } else {
        tracing::info!("No ledger configured, starting with an empty ledger");
    }

    // Ledger changes are only logged; the engine reads a fresh snapshot per request
    let ledger_subscription = store.subscribe(Arc::new(|records: &[SaleRecord]| {
        tracing::debug!("Ledger updated: {} records", format_number(records.len()));
    }));
    tracing::debug!("Ledger listener {} registered", ledger_subscription.id());

    let base_currency = config.indicators.base_currency.clone();
    let engine = IndicatorsEngine::new(store.clone(), &base_currency);

    let remote: Option<Arc<dyn IndicadoresSource>> = match config.indicators.remote_endpoint.as_deref() {
        Some(endpoint) if !endpoint.trim().is_empty() => {
            let timeout = Duration::from_secs(config.indicators.remote_timeout_secs);
            match RemoteIndicadoresClient::new(endpoint.trim(), timeout, &base_currency) {
                Ok(client) => {
                    tracing::info!("Indicators: remote source at {}", client.endpoint());
                    Some(Arc::new(client) as Arc<dyn IndicadoresSource>)
                }
                Err(e) => {
                    tracing::error!("Indicators: remote client disabled: {}", e);
                    None
                }
            }
        }
        _ => None,
    };

    let state = AppState {
        store,
        provider: Arc::new(IndicadoresProvider::new(engine, remote)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let port = config.server.port;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
