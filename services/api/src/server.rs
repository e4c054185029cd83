use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_developer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use devroster::config::AppConfig;
use devroster::developers::{
    DeveloperLifecycleService, DeveloperStore, InMemoryDeveloperStore, SqliteDeveloperStore,
};
use devroster::error::AppError;
use devroster::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    match config.storage.database_path.clone() {
        Some(path) => {
            let store = SqliteDeveloperStore::open(&path)?;
            info!(path = %path.display(), "developer records stored in sqlite");
            serve(config, store).await
        }
        None => {
            warn!("APP_DATABASE_PATH not set; developer records are kept in memory");
            serve(config, InMemoryDeveloperStore::new()).await
        }
    }
}

async fn serve<S>(config: AppConfig, store: S) -> Result<(), AppError>
where
    S: DeveloperStore + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(DeveloperLifecycleService::new(
        Arc::new(store),
        config.levels.clone(),
    ));

    let app = with_developer_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "developer roster ready");

    axum::serve(listener, app).await?;
    Ok(())
}
