use crate::cli::ServeArgs;
use crate::infra::{load_directory, AppState};
use crate::routes::with_club_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use club_matcher::config::AppConfig;
use club_matcher::error::AppError;
use club_matcher::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(load_directory(config.directory.catalog_csv.as_deref())?);

    let app = with_club_routes(directory, config.matcher.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "club matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
