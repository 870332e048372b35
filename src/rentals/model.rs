use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::RentalLoadError;

/// Categories presented as part of a shared community.
pub const COMMUNITY_CATEGORIES: [&str; 3] = ["Condo", "Townhouse", "Apartment"];

/// JSON envelope served at `/api/rentals.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RentalDocument {
    pub data: Vec<RentalRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RentalRecord {
    #[serde(default)]
    pub id: Option<Value>,
    pub attributes: RentalAttributes,
}

/// Listing attributes, carried as-is. Only `category` is read, and only when it is a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentalAttributes {
    pub details: Map<String, Value>,
}

impl RentalAttributes {
    pub fn category(&self) -> Option<&str> {
        self.details.get("category").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentalType {
    Community,
    Standalone,
}

impl RentalType {
    pub fn classify(category: &str) -> Self {
        if COMMUNITY_CATEGORIES.contains(&category) {
            Self::Community
        } else {
            Self::Standalone
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Community => "Community",
            Self::Standalone => "Standalone",
        }
    }
}

impl fmt::Display for RentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flat listing shape handed to the page layer: `{ type, ...attributes }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalViewModel {
    #[serde(rename = "type")]
    pub kind: RentalType,
    #[serde(flatten)]
    pub attributes: RentalAttributes,
}

impl RentalViewModel {
    pub fn from_record(record: RentalRecord) -> Self {
        let mut attributes = record.attributes;
        // the derived type is authoritative
        attributes.details.remove("type");

        let kind = attributes
            .category()
            .map_or(RentalType::Standalone, RentalType::classify);

        Self { kind, attributes }
    }

    pub fn category(&self) -> Option<&str> {
        self.attributes.category()
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.attributes.details.get(key)
    }
}

pub fn parse_document(body: &[u8]) -> Result<RentalDocument, RentalLoadError> {
    serde_json::from_slice(body).map_err(RentalLoadError::Decode)
}

/// Classifies every record, keeping source order.
pub fn reshape(document: RentalDocument) -> Vec<RentalViewModel> {
    document
        .data
        .into_iter()
        .map(RentalViewModel::from_record)
        .collect()
}
