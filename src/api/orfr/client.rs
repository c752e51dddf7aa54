use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode, Url};
use tracing::{debug, warn};

use super::models::{ApiError, RawPriceRecord, SpotPricesResponse};

/// Client for the or.fr spot price feed, optionally routed through a raw-passthrough proxy
pub struct SpotPriceClient {
    http_client: HttpClient,
    request_url: Url,
}

impl SpotPriceClient {
    /// XAU in XOF per troy ounce, with the day's boundaries
    pub const DEFAULT_API_URL: &'static str =
        "https://or.fr/api/spot-prices?metal=XAU&currency=XOF&weight_unit=oz&boundaries=1";
    /// AllOrigins raw endpoint, relays the upstream body untouched
    pub const DEFAULT_PROXY_URL: &'static str = "https://api.allorigins.win/raw";

    /// Create a client. With `proxy_url` the upstream URL is passed as the proxy's `url` parameter.
    pub fn new(api_url: &str, proxy_url: Option<&str>, timeout: Duration) -> Result<Self, ApiError> {
        let request_url = build_request_url(api_url, proxy_url)?;
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            request_url,
        })
    }

    pub fn request_url(&self) -> &Url {
        &self.request_url
    }

    /// Classify a non-2xx response
    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let status_code = status.as_u16();
        let retry_after: Option<u64> = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            429 => {
                warn!("Rate limited by spot price feed, retry after {:?} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET the spot price document and return the raw records at `_embedded.items`.
    ///
    /// # Returns
    /// * `Ok(records)` - possibly empty when the document carries no items
    /// * `Err(ApiError)` - transport failure, non-2xx status or malformed JSON
    pub async fn get_spot_prices(&self) -> Result<Vec<RawPriceRecord>, ApiError> {
        debug!("Fetching spot prices from {}", self.request_url);

        let response = self
            .http_client
            .get(self.request_url.clone())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read body: {}", e)))?;

        parse_spot_prices(&body)
    }
}

/// Wrap the upstream URL into the proxy URL, or use it directly when no proxy is set
pub fn build_request_url(api_url: &str, proxy_url: Option<&str>) -> Result<Url, ApiError> {
    let upstream = Url::parse(api_url)
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", api_url, e)))?;

    match proxy_url {
        Some(proxy) => Url::parse_with_params(proxy, &[("url", upstream.as_str())])
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", proxy, e))),
        None => Ok(upstream),
    }
}

/// Decode a response body into raw records
pub fn parse_spot_prices(body: &str) -> Result<Vec<RawPriceRecord>, ApiError> {
    serde_json::from_str::<SpotPricesResponse>(body)
        .map(SpotPricesResponse::into_items)
        .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
}
