use crate::maps::StaticMapBuilder;
use crate::rentals::StaticRentalSource;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Shared handles for every route. `S` is where listings are fetched from.
pub struct AppState<S> {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
    pub maps: StaticMapBuilder,
    pub rentals: Arc<S>,
    pub catalogue: StaticRentalSource,
}

impl<S> AppState<S> {
    pub fn new(
        metrics: PrometheusHandle,
        maps: StaticMapBuilder,
        rentals: S,
        catalogue: StaticRentalSource,
    ) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            maps,
            rentals: Arc::new(rentals),
            catalogue,
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            readiness: self.readiness.clone(),
            metrics: self.metrics.clone(),
            maps: self.maps.clone(),
            rentals: self.rentals.clone(),
            catalogue: self.catalogue.clone(),
        }
    }
}
