use super::MapRequest;
use serde::Serialize;
use std::collections::BTreeMap;

/// Names the descriptor emits itself; caller values never pass through under these.
const RESERVED_ATTRIBUTES: [&str; 5] = ["src", "url", "width", "height", "alt"];

/// Plain attributes a caller attaches to the rendered image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttributes(BTreeMap<String, String>);

impl ImageAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ImageAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Everything needed to emit the map `<img>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapImageDescriptor {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl MapImageDescriptor {
    pub(crate) fn build(url: String, request: &MapRequest, attributes: &ImageAttributes) -> Self {
        let alt = attributes
            .get("alt")
            .map(str::to_string)
            .or_else(|| request.alt_text.clone())
            .unwrap_or_else(|| default_alt(request));

        let passthrough = attributes
            .iter()
            .filter(|(name, _)| !RESERVED_ATTRIBUTES.contains(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            url,
            width: request.pixel_width,
            height: request.pixel_height,
            alt,
            attributes: passthrough,
        }
    }
}

pub fn default_alt(request: &MapRequest) -> String {
    format!(
        "Map image at coordinates {}, {}",
        request.latitude, request.longitude
    )
}

#[cfg(test)]
mod tests {
    use crate::maps::{AccessToken, StaticMapBuilder};
    use super::*;

    fn request() -> MapRequest {
        MapRequest::new(37.7797, -122.4184, 10, 150, 120)
    }

    fn builder() -> StaticMapBuilder {
        StaticMapBuilder::new(AccessToken::new("pk.test"))
    }

    #[test]
    fn defaults_alt_to_coordinates() {
        let image = builder().image(&request(), &ImageAttributes::new());

        assert_eq!(image.alt, "Map image at coordinates 37.7797, -122.4184");
        assert_eq!(image.width, 150);
        assert_eq!(image.height, 120);
        assert!(image.url.contains("-122.4184,37.7797,10"));
        assert!(image.attributes.is_empty());
    }

    #[test]
    fn alt_attribute_overrides_default() {
        let attributes = ImageAttributes::new().with("alt", "A map of Phnom Penh Cambodia");
        let image = builder().image(&request(), &attributes);

        assert_eq!(image.alt, "A map of Phnom Penh Cambodia");
    }

    #[test]
    fn alt_attribute_wins_over_request_alt() {
        let request = request().with_alt("from request");
        assert_eq!(
            builder().image(&request, &ImageAttributes::new()).alt,
            "from request"
        );

        let attributes = ImageAttributes::new().with("alt", "from caller");
        assert_eq!(builder().image(&request, &attributes).alt, "from caller");
    }

    #[test]
    fn src_width_and_height_cannot_be_overridden() {
        let attributes: ImageAttributes = [
            ("src", "/assets/images/teaching-tomster.png"),
            ("width", "50"),
            ("height", "50"),
            ("class", "rounded"),
        ]
        .into_iter()
        .collect();

        let image = builder().image(&request(), &attributes);

        assert!(image.url.starts_with("https://api.mapbox.com/"));
        assert_eq!(image.width, 150);
        assert_eq!(image.height, 120);
        assert_eq!(image.attributes.len(), 1);
        assert_eq!(image.attributes.get("class").map(String::as_str), Some("rounded"));
    }

    #[test]
    fn caller_url_never_replaces_derived_url() {
        let attributes = ImageAttributes::new()
            .with("url", "/assets/images/teaching-tomster.png")
            .with("src", "/assets/images/teaching-tomster.png");
        let image = builder().image(&request(), &attributes);

        assert!(image.attributes.is_empty());

        let rendered = serde_json::to_string(&image).expect("descriptor serializes");
        assert_eq!(rendered.matches("\"url\"").count(), 1);
        assert!(!rendered.contains("teaching-tomster"));

        let json = serde_json::to_value(&image).expect("descriptor serializes");
        let url = json["url"].as_str().expect("url string");
        assert!(url.starts_with("https://api.mapbox.com/"));
        assert!(url.contains("-122.4184,37.7797,10/150x120@2x"));
    }

    #[test]
    fn serializes_passthrough_attributes_inline() {
        let attributes = ImageAttributes::new().with("loading", "lazy");
        let image = builder().image(&request(), &attributes);
        let json = serde_json::to_value(&image).expect("descriptor serializes");

        assert_eq!(json["width"], 150);
        assert_eq!(json["loading"], "lazy");
        assert!(json.get("attributes").is_none());
    }
}
