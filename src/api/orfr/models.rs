use serde::Deserialize;
use serde_json::Value;

/// Top-level document returned by the spot-prices endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotPricesResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
}

/// `_embedded` section of the response.
/// `items` is kept loose so a non-array value reads as "no items" rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub items: Option<Value>,
}

/// A raw quote as published by the feed.
///
/// Fields stay untyped here; the normalizer decides what counts as a date or a number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPriceRecord {
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub ask: Option<Value>,
    #[serde(default)]
    pub mid: Option<Value>,
    #[serde(default)]
    pub bid: Option<Value>,
    #[serde(default)]
    pub performance: Option<Value>,
}

impl SpotPricesResponse {
    /// Records found at `_embedded.items`.
    /// Missing sections, a non-array `items` and entries that are not objects all yield nothing.
    pub fn into_items(self) -> Vec<RawPriceRecord> {
        match self.embedded.and_then(|e| e.items) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<RawPriceRecord>(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Error type for spot price API calls
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// 429 Too Many Requests
    #[error("Rate Limited. Retry after {retry_after:?} s")]
    RateLimited { retry_after: Option<u64> },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-2xx responses
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not valid JSON for the expected document
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// Upstream or proxy URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
