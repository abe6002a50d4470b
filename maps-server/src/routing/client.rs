//! OSRM HTTP client.
//!
//! Issues a single Route service request per call, asking for full
//! GeoJSON geometry and alternatives.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::LatLng;

use super::RouteProvider;
use super::error::RoutingError;
use super::types::{OsrmRoute, RouteResponse};

/// Default base URL: the public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = concat!("maps-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the service (defaults to the public demo server)
    pub base_url: String,
    /// Routing profile; the public server only serves `driving`
    pub profile: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: "driving".to_string(),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OsrmConfig {
    /// Create a config pointing at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
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

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// OSRM Route API client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(RoutingError::NotConfigured(format!(
                "OSRM base URL must be http(s): {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            profile: config.profile,
        })
    }

    /// Build the Route service URL (without query string).
    ///
    /// The format is `{base_url}/route/v1/{profile}/{lng,lat};{lng,lat}`.
    pub fn route_url(&self, origin: LatLng, destination: LatLng) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.base_url,
            self.profile,
            origin.to_lng_lat(),
            destination.to_lng_lat()
        )
    }

    /// Fetch driving routes between two points, best first.
    ///
    /// A successful response with no routes yields an empty vector; the
    /// caller decides whether that is an error.
    pub async fn fetch_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        let url = self.route_url(origin, destination);
        debug!(%url, "requesting routes");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("alternatives", "true"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }

        let body = response.text().await?;

        if !status.is_success() {
            // OSRM reports NoRoute/InvalidQuery as 400 with a JSON body.
            if let Ok(parsed) = serde_json::from_str::<RouteResponse>(&body) {
                return Err(RoutingError::Service {
                    code: parsed.code,
                    message: parsed.message.unwrap_or_default(),
                });
            }
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_route_response(&body)
    }
}

/// Parse a Route service body, turning non-`Ok` codes into errors.
pub(crate) fn parse_route_response(body: &str) -> Result<Vec<OsrmRoute>, RoutingError> {
    let parsed: RouteResponse = serde_json::from_str(body).map_err(|e| RoutingError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })?;

    if !parsed.is_ok() {
        return Err(RoutingError::Service {
            code: parsed.code,
            message: parsed.message.unwrap_or_default(),
        });
    }

    Ok(parsed.routes)
}

#[async_trait]
impl RouteProvider for OsrmClient {
    async fn driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        self.fetch_routes(origin, destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OsrmConfig::new("http://localhost:5000")
            .with_timeout(5)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.profile, "driving");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("maps-server/"));
    }

    #[test]
    fn client_creation() {
        assert!(OsrmClient::new(OsrmConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = OsrmClient::new(OsrmConfig::new("ftp://example.com"));
        assert!(matches!(result, Err(RoutingError::NotConfigured(_))));
    }

    #[test]
    fn route_url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmConfig::new("http://localhost:5000/")).unwrap();
        let origin = LatLng::new(28.6, 77.2).unwrap();
        let destination = LatLng::new(28.65, 77.25).unwrap();

        assert_eq!(
            client.route_url(origin, destination),
            "http://localhost:5000/route/v1/driving/77.2,28.6;77.25,28.65"
        );
    }

    #[test]
    fn parse_ok_body() {
        let body = r#"{"code":"Ok","routes":[{"distance":10.0,"duration":2.0,
            "geometry":{"type":"LineString","coordinates":[[1.0,2.0]]}}]}"#;
        let routes = parse_route_response(body).unwrap();
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn parse_error_code() {
        let body = r#"{"code":"NoRoute","message":"Impossible route between points"}"#;
        let err = parse_route_response(body).unwrap_err();
        assert!(matches!(err, RoutingError::Service { ref code, .. } if code == "NoRoute"));
    }

    #[test]
    fn parse_malformed_body() {
        let err = parse_route_response("<html>busy</html>").unwrap_err();
        match err {
            RoutingError::Json { body, .. } => assert_eq!(body.as_deref(), Some("<html>busy</html>")),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    // Live requests against OSRM are left out; the estimator and store
    // tests run against `MockRouteProvider`.
}
