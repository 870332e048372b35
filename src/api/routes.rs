use super::state::AppState;
use crate::error::AppError;
use crate::maps::{ImageAttributes, MapImageDescriptor, MapRequest};
use crate::rentals::{load_rentals, RentalSource, RentalViewModel, RENTALS_PATH};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::Ordering;

pub fn router<S>(state: AppState<S>) -> Router
where
    S: RentalSource + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint::<S>))
        .route("/metrics", get(metrics_endpoint::<S>))
        .route(RENTALS_PATH, get(catalogue_endpoint::<S>))
        .route("/api/rentals", get(rentals_endpoint::<S>))
        .route("/api/map", get(map_endpoint::<S>))
        .with_state(state)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint<S>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint<S>(State(state): State<AppState<S>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Raw catalogue, byte-for-byte as bundled.
async fn catalogue_endpoint<S>(State(state): State<AppState<S>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        state.catalogue.body().to_string(),
    )
}

async fn rentals_endpoint<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<RentalViewModel>>, AppError>
where
    S: RentalSource,
{
    let rentals = load_rentals(state.rentals.as_ref()).await?;
    Ok(Json(rentals))
}

async fn map_endpoint<S>(
    State(state): State<AppState<S>>,
    Query(request): Query<MapRequest>,
) -> Json<MapImageDescriptor> {
    Json(state.maps.image(&request, &ImageAttributes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::{AccessToken, StaticMapBuilder};
    use crate::rentals::{RentalType, StaticRentalSource};
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn state(body: &str) -> AppState<StaticRentalSource> {
        let metrics = PrometheusBuilder::new().build_recorder().handle();
        AppState::new(
            metrics,
            StaticMapBuilder::new(AccessToken::new("pk.test")),
            StaticRentalSource::new(body),
            StaticRentalSource::bundled(),
        )
    }

    #[tokio::test]
    async fn rentals_endpoint_returns_classified_listings() {
        let state = state(
            r#"{"data":[{"id":"a","attributes":{"category":"Townhouse"}},{"id":"b","attributes":{"category":"Cabin"}}]}"#,
        );

        let Json(rentals) = rentals_endpoint(State(state))
            .await
            .expect("rentals load");

        let kinds: Vec<_> = rentals.iter().map(|rental| rental.kind).collect();
        assert_eq!(kinds, vec![RentalType::Community, RentalType::Standalone]);
    }

    #[tokio::test]
    async fn rentals_endpoint_propagates_decode_failures() {
        let err = rentals_endpoint(State(state("not json")))
            .await
            .expect_err("malformed body fails");

        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn map_endpoint_derives_descriptor() {
        let request = MapRequest::new(37.7797, -122.4184, 10, 150, 120);
        let Json(image) = map_endpoint(State(state("{}")), Query(request)).await;

        assert_eq!(image.alt, "Map image at coordinates 37.7797, -122.4184");
        assert!(image.url.contains("-122.4184,37.7797,10/150x120@2x"));
        assert!(image.url.ends_with("access_token=pk.test"));
    }
}
