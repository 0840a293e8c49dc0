use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_prequalification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_prequal::config::AppConfig;
use loan_prequal::error::AppError;
use loan_prequal::telemetry;
use loan_prequal::workflows::prequalification::PrequalificationService;
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

    let policy = config.eligibility.clone();
    info!(
        minimum_monthly_income = policy.minimum_monthly_income,
        max_loan_to_income_multiple = policy.max_loan_to_income_multiple,
        minimum_age = policy.minimum_age,
        maximum_age = policy.maximum_age,
        "eligibility policy loaded"
    );
    let service = Arc::new(PrequalificationService::new(policy));

    let app = with_prequalification_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan pre-qualification service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
