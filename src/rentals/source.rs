use super::model::{parse_document, RentalDocument};
use super::RentalLoadError;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// Fixed path of the rental catalogue relative to its origin.
pub const RENTALS_PATH: &str = "/api/rentals.json";

const BUNDLED_RENTALS: &str = include_str!("../../data/api/rentals.json");

/// Anything able to produce the raw rental catalogue.
pub trait RentalSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<RentalDocument, RentalLoadError>> + Send;
}

/// Reads the catalogue with a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpRentalSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpRentalSource {
    pub fn new(origin: &Url) -> Result<Self, url::ParseError> {
        Self::with_client(reqwest::Client::new(), origin)
    }

    pub fn with_client(client: reqwest::Client, origin: &Url) -> Result<Self, url::ParseError> {
        let url = origin.join(RENTALS_PATH)?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl RentalSource for HttpRentalSource {
    async fn fetch(&self) -> Result<RentalDocument, RentalLoadError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|source| RentalLoadError::Request {
                url: self.url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RentalLoadError::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| RentalLoadError::Request {
                url: self.url.to_string(),
                source,
            })?;

        parse_document(&body)
    }
}

/// Serves a catalogue held in memory.
#[derive(Debug, Clone)]
pub struct StaticRentalSource {
    body: Arc<str>,
}

impl StaticRentalSource {
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self { body: body.into() }
    }

    /// The catalogue shipped with the service.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_RENTALS)
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl RentalSource for StaticRentalSource {
    async fn fetch(&self) -> Result<RentalDocument, RentalLoadError> {
        parse_document(self.body.as_bytes())
    }
}
