use super::cli::ServeArgs;
use super::routes::router;
use super::state::AppState;
use crate::config::{AppConfig, ConfigError};
use crate::error::AppError;
use crate::maps::StaticMapBuilder;
use crate::rentals::{HttpRentalSource, StaticRentalSource};
use crate::telemetry;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
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

    if config.map.access_token.is_empty() {
        warn!("MAPBOX_ACCESS_TOKEN is not set; map images will be rejected by the provider");
    }

    let origin = config.rentals_origin()?;
    let rentals = HttpRentalSource::new(&origin).map_err(|source| {
        ConfigError::InvalidOrigin {
            value: origin.to_string(),
            source,
        }
    })?;
    let rentals_url = rentals.url().to_string();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let state = AppState::new(
        prometheus_handle,
        StaticMapBuilder::new(config.map.access_token.clone()),
        rentals,
        StaticRentalSource::bundled(),
    );
    let readiness_flag = state.readiness.clone();

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, rentals = %rentals_url, "super rentals ready");

    axum::serve(listener, app).await?;
    Ok(())
}
