//! Remote item source
//!
//! Each item's metadata lives at `{base_url}/{collection_name}/{id}.json`
//! as a flat JSON object of string values:
//!
//! ```json
//! { "Background": "Red", "Eyes": "Closed" }
//! ```
//!
//! Any failure (network, non-2xx status, unreadable body, malformed JSON)
//! is returned as a [`FetchError`] carrying the requested identifier. The
//! caller decides how to continue; the collection loader stores a
//! placeholder for the identifier and keeps going.

use crate::error::{RankerError, Result};
use crate::models::{Attributes, Item, ItemId};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("rarity-ranker/", env!("CARGO_PKG_VERSION"));

/// Per-item fetch failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request could not be sent or no response arrived
    #[error("Network error fetching item {id}: {message}")]
    Network { id: ItemId, message: String },

    /// Source answered with a non-2xx status
    #[error("HTTP {status} fetching item {id}")]
    Status { id: ItemId, status: u16 },

    /// Response body could not be read
    #[error("Failed to read body of item {id}: {message}")]
    Body { id: ItemId, message: String },

    /// Body is not a JSON object
    #[error("Failed to parse item {id}: {message}")]
    Parse { id: ItemId, message: String },
}

impl FetchError {
    /// Identifier whose fetch failed
    pub fn item_id(&self) -> ItemId {
        match self {
            FetchError::Network { id, .. }
            | FetchError::Status { id, .. }
            | FetchError::Body { id, .. }
            | FetchError::Parse { id, .. } => *id,
        }
    }
}

/// Source of collection items
pub trait ItemSource: Send + Sync {
    /// Retrieve one item by identifier
    ///
    /// # Errors
    /// Returns `FetchError` for the identifier (per-item error isolation)
    async fn fetch(&self, id: ItemId) -> std::result::Result<Item, FetchError>;
}

/// HTTP item source backed by a shared `reqwest` client
pub struct HttpItemSource {
    http_client: reqwest::Client,
    base_url: String,
    collection_name: String,
}

impl HttpItemSource {
    /// Create HTTP source
    ///
    /// Without `timeout` a request may wait indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        collection_name: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| RankerError::HttpClient(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection_name: collection_name.into(),
        })
    }

    /// Address of one item's metadata document
    pub fn item_url(&self, id: ItemId) -> String {
        format!("{}/{}/{}.json", self.base_url, self.collection_name, id)
    }
}

impl ItemSource for HttpItemSource {
    async fn fetch(&self, id: ItemId) -> std::result::Result<Item, FetchError> {
        let url = self.item_url(id);

        debug!(item_id = id, url = %url, "Fetching item");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                id,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                id,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Body {
            id,
            message: e.to_string(),
        })?;

        let attributes =
            parse_attributes(&body).map_err(|message| FetchError::Parse { id, message })?;

        Ok(Item::new(id, attributes))
    }
}

/// Parse a flat JSON object into attributes
///
/// String values are kept. Other values (numbers, booleans, null, nested
/// objects or arrays) are dropped.
pub fn parse_attributes(body: &[u8]) -> std::result::Result<Attributes, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;

    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))
        }
    };

    let mut attributes = Attributes::new();
    for (trait_name, value) in map {
        match value {
            Value::String(trait_value) => {
                attributes.insert(trait_name, trait_value);
            }
            other => {
                debug!(
                    trait_name = %trait_name,
                    kind = json_kind(&other),
                    "Dropping non-string trait value"
                );
            }
        }
    }

    Ok(attributes)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// In-memory source for tests
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_url_layout() {
        let source = HttpItemSource::new("https://example.com", "azuki1", None).unwrap();
        assert_eq!(source.item_url(17), "https://example.com/azuki1/17.json");
    }

    #[test]
    fn test_item_url_trailing_slash() {
        let source = HttpItemSource::new("https://example.com/", "azuki1", None).unwrap();
        assert_eq!(source.item_url(0), "https://example.com/azuki1/0.json");
    }

    #[test]
    fn test_parse_flat_object() {
        let attributes = parse_attributes(br#"{"Background": "Red", "Eyes": "Closed"}"#).unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes["Background"], "Red");
        assert_eq!(attributes["Eyes"], "Closed");
    }

    #[test]
    fn test_parse_drops_non_string_values() {
        let attributes = parse_attributes(
            br#"{"Background": "Red", "Level": 3, "Tags": ["a"], "Extra": null, "Nested": {"x": "y"}}"#,
        )
        .unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes["Background"], "Red");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_attributes(b"{\"Background\": ").is_err());
        assert!(parse_attributes(b"").is_err());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse_attributes(br#"["Red", "Blue"]"#).unwrap_err();
        assert!(err.contains("array"), "{}", err);
    }

    #[test]
    fn test_fetch_error_carries_identifier() {
        let errors = [
            FetchError::Network { id: 4, message: "refused".to_string() },
            FetchError::Status { id: 5, status: 500 },
            FetchError::Body { id: 6, message: "eof".to_string() },
            FetchError::Parse { id: 7, message: "bad".to_string() },
        ];
        let ids: Vec<_> = errors.iter().map(FetchError::item_id).collect();
        assert_eq!(ids, vec![4, 5, 6, 7]);
        assert_eq!(errors[1].to_string(), "HTTP 500 fetching item 5");
    }
}
