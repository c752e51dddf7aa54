//! Runtime settings read from the environment (and `.env`)

use std::time::Duration;

use crate::api::orfr::SpotPriceClient;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream spot price endpoint
    pub api_url: String,
    /// Raw-passthrough proxy, `None` to call the upstream directly
    pub proxy_url: Option<String>,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    /// Where the chart PNG is written after each successful cycle
    pub chart_path: String,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Config {
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

    /// Load settings from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("GOLDSPOT_API_URL")
            .unwrap_or_else(|| SpotPriceClient::DEFAULT_API_URL.to_string());

        // Set but empty means "no proxy"
        let proxy_url = match lookup("GOLDSPOT_PROXY_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url),
            None => Some(SpotPriceClient::DEFAULT_PROXY_URL.to_string()),
        };

        let poll_secs = positive(&lookup, "GOLDSPOT_POLL_INTERVAL_SECS", Self::DEFAULT_POLL_INTERVAL_SECS)?;
        let timeout_secs = positive(&lookup, "GOLDSPOT_HTTP_TIMEOUT_SECS", Self::DEFAULT_HTTP_TIMEOUT_SECS)?;
        let chart_width = positive(&lookup, "GOLDSPOT_CHART_WIDTH", 1024)?;
        let chart_height = positive(&lookup, "GOLDSPOT_CHART_HEIGHT", 576)?;

        let chart_path = lookup("GOLDSPOT_CHART_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "goldspot_chart.png".to_string());

        Ok(Self {
            api_url,
            proxy_url,
            poll_interval: Duration::from_secs(poll_secs),
            http_timeout: Duration::from_secs(timeout_secs),
            chart_path,
            chart_width: chart_width as u32,
            chart_height: chart_height as u32,
        })
    }
}

/// Parse a strictly positive integer setting, falling back to `default` when unset
fn positive<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n as u64),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, SpotPriceClient::DEFAULT_API_URL);
        assert_eq!(config.proxy_url.as_deref(), Some(SpotPriceClient::DEFAULT_PROXY_URL));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.chart_path, "goldspot_chart.png");
        assert_eq!((config.chart_width, config.chart_height), (1024, 576));
    }

    #[test]
    fn test_empty_proxy_disables_it() {
        let config = load(&[("GOLDSPOT_PROXY_URL", "")]).unwrap();
        assert!(config.proxy_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GOLDSPOT_POLL_INTERVAL_SECS", "15"),
            ("GOLDSPOT_CHART_PATH", "/tmp/gold.png"),
            ("GOLDSPOT_API_URL", "http://localhost:8080/spot"),
        ])
        .unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.chart_path, "/tmp/gold.png");
        assert_eq!(config.api_url, "http://localhost:8080/spot");
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(load(&[("GOLDSPOT_POLL_INTERVAL_SECS", "0")]).is_err());
        assert!(load(&[("GOLDSPOT_POLL_INTERVAL_SECS", "-5")]).is_err());
        assert!(load(&[("GOLDSPOT_CHART_WIDTH", "wide")]).is_err());
    }
}
