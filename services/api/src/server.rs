use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateRepository, WebhookNotifier};
use crate::routes::with_candidate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fitscore::assessment::CandidateService;
use fitscore::config::AppConfig;
use fitscore::error::AppError;
use fitscore::telemetry;
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

    let webhook_enabled = config.notifications.webhook_url.is_some();
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let notifier = Arc::new(WebhookNotifier::new(config.notifications.webhook_url.clone()));
    let service = Arc::new(CandidateService::new(repository, notifier));

    let app = with_candidate_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, webhook_enabled, "fitscore service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
