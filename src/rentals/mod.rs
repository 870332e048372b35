//! Rental catalogue loading and classification.

mod model;
mod source;

pub use model::{
    parse_document, reshape, RentalAttributes, RentalDocument, RentalRecord, RentalType,
    RentalViewModel, COMMUNITY_CATEGORIES,
};
pub use source::{HttpRentalSource, RentalSource, StaticRentalSource, RENTALS_PATH};

use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum RentalLoadError {
    #[error("failed to fetch rentals from {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("rentals request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed rentals document: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Fetches the catalogue once and classifies every listing.
pub async fn load_rentals<S>(source: &S) -> Result<Vec<RentalViewModel>, RentalLoadError>
where
    S: RentalSource,
{
    match source.fetch().await {
        Ok(document) => {
            let rentals = reshape(document);
            debug!(count = rentals.len(), "rentals loaded");
            Ok(rentals)
        }
        Err(err) => {
            warn!(error = %err, "rentals unavailable");
            Err(err)
        }
    }
}
