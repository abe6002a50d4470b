//! IP geolocation client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::LatLng;

use super::IpLocator;
use super::error::GeolocationError;

/// Default base URL for the IP lookup service.
pub const DEFAULT_BASE_URL: &str = "https://ipapi.co";

/// The subset of the ipapi.co response we use.
#[derive(Debug, Clone, Deserialize)]
pub struct IpLookupResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub country_name: Option<String>,
    /// Set to `true` by the service on failures such as rate limiting.
    #[serde(default)]
    pub error: bool,
    pub reason: Option<String>,
}

impl IpLookupResponse {
    /// Extract a validated position.
    pub fn position(&self) -> Result<LatLng, GeolocationError> {
        if self.error {
            return Err(GeolocationError::NoPosition {
                reason: self.reason.clone().unwrap_or_else(|| "unknown".to_string()),
            });
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Ok(LatLng::new(lat, lng)?),
            _ => Err(GeolocationError::NoPosition {
                reason: "response has no coordinates".to_string(),
            }),
        }
    }
}

/// Configuration for the IP geolocation client.
#[derive(Debug, Clone)]
pub struct IpGeolocationConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl IpGeolocationConfig {
    /// Create a config with default URL and timeout.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for IpGeolocationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the IP geolocation service.
#[derive(Debug, Clone)]
pub struct IpGeolocationClient {
    http: reqwest::Client,
    base_url: String,
}

impl IpGeolocationClient {
    /// Create a new client.
    pub fn new(config: IpGeolocationConfig) -> Result<Self, GeolocationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the position of the caller's public IP.
    pub async fn lookup(&self) -> Result<IpLookupResponse, GeolocationError> {
        let url = format!("{}/json/", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeolocationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GeolocationError::Json {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl IpLocator for IpGeolocationClient {
    async fn locate(&self) -> Result<LatLng, GeolocationError> {
        self.lookup().await?.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = IpGeolocationConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_with_base_url() {
        let config = IpGeolocationConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(1);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 1);
    }

    #[test]
    fn parse_success() {
        let json = r#"{"ip":"1.2.3.4","city":"New Delhi","country_name":"India",
            "latitude":28.6519,"longitude":77.2315}"#;
        let response: IpLookupResponse = serde_json::from_str(json).unwrap();
        let position = response.position().unwrap();
        assert_eq!(position.lat, 28.6519);
        assert_eq!(position.lng, 77.2315);
        assert_eq!(response.city.as_deref(), Some("New Delhi"));
    }

    #[test]
    fn parse_rate_limited() {
        let json = r#"{"error":true,"reason":"RateLimited","message":"slow down"}"#;
        let response: IpLookupResponse = serde_json::from_str(json).unwrap();
        let err = response.position().unwrap_err();
        assert!(err.to_string().contains("RateLimited"));
    }

    #[test]
    fn missing_coordinates() {
        let response: IpLookupResponse = serde_json::from_str(r#"{"ip":"10.0.0.1"}"#).unwrap();
        assert!(matches!(
            response.position(),
            Err(GeolocationError::NoPosition { .. })
        ));
    }

    #[test]
    fn out_of_range_coordinates() {
        let response: IpLookupResponse =
            serde_json::from_str(r#"{"latitude":123.0,"longitude":0.0}"#).unwrap();
        assert!(matches!(
            response.position(),
            Err(GeolocationError::Coordinates(_))
        ));
    }
}
