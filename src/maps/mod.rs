//! Static map image URLs and the image descriptors built from them.

mod image;
mod token;

pub use image::{default_alt, ImageAttributes, MapImageDescriptor};
pub use token::AccessToken;

use serde::{Deserialize, Serialize};

pub const MAPBOX_API: &str = "https://api.mapbox.com/styles/v1/mapbox/streets-v11/static";

/// Inputs for one map image. Values are passed to the provider uninterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRequest {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "zoom")]
    pub zoom_level: u32,
    #[serde(rename = "width")]
    pub pixel_width: u32,
    #[serde(rename = "height")]
    pub pixel_height: u32,
    #[serde(rename = "alt", default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl MapRequest {
    pub fn new(
        latitude: f64,
        longitude: f64,
        zoom_level: u32,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Self {
        Self {
            latitude,
            longitude,
            zoom_level,
            pixel_width,
            pixel_height,
            alt_text: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }
}

/// Builds the high-DPI static map URL: `{lng},{lat},{zoom}/{width}x{height}@2x`.
pub fn static_map_url(request: &MapRequest, token: &AccessToken) -> String {
    let coordinates = format!(
        "{},{},{}",
        request.longitude, request.latitude, request.zoom_level
    );
    let dimensions = format!("{}x{}", request.pixel_width, request.pixel_height);

    format!(
        "{MAPBOX_API}/{coordinates}/{dimensions}@2x?access_token={}",
        token.encoded()
    )
}

/// Map image factory bound to the configured access token.
#[derive(Debug, Clone)]
pub struct StaticMapBuilder {
    token: AccessToken,
}

impl StaticMapBuilder {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn url(&self, request: &MapRequest) -> String {
        static_map_url(request, &self.token)
    }

    pub fn image(&self, request: &MapRequest, attributes: &ImageAttributes) -> MapImageDescriptor {
        MapImageDescriptor::build(self.url(request), request, attributes)
    }
}
