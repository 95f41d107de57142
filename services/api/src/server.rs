use crate::cli::ServeArgs;
use crate::infra::{build_store, AppState};
use crate::routes::with_share_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use sugoi::config::AppConfig;
use sugoi::error::AppError;
use sugoi::share::ShareService;
use sugoi::telemetry;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = build_store(&config.store).await?;
    let share_service = Arc::new(ShareService::new(store));

    let app = with_share_routes(share_service, config.site.url.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        store = config.store.backend_name(),
        site = %config.site.url,
        "{} share service ready",
        config.site.name
    );

    axum::serve(listener, app).await?;
    Ok(())
}
