use crate::cli::ServeArgs;
use crate::infra::{
    sample_suburb_signals, AppState, InMemoryDecisionRepository, InMemoryZoningRepository,
};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use zone_underwriter::config::AppConfig;
use zone_underwriter::error::AppError;
use zone_underwriter::telemetry;
use zone_underwriter::underwriting::{FundParameterStore, UnderwritingService};
use zone_underwriter::zoning::ZoningService;

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

    let parameters = config.fund.load_parameters()?;
    let parameter_store = Arc::new(FundParameterStore::new(parameters));
    let underwriting_service = Arc::new(UnderwritingService::new(
        Arc::new(InMemoryDecisionRepository::default()),
        parameter_store,
    ));

    let zoning_service = Arc::new(ZoningService::new(Arc::new(
        InMemoryZoningRepository::default(),
    )));
    zoning_service.ingest_batch(sample_suburb_signals())?;
    let classified = zoning_service.refresh_all()?;
    info!(suburbs = classified.len(), "sample suburbs classified");

    let app = with_service_routes(zoning_service, underwriting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "zone underwriter ready");

    axum::serve(listener, app).await?;
    Ok(())
}
