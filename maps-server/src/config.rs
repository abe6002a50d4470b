//! Server configuration from `MAPS_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::geolocation::IpGeolocationConfig;
use crate::routing::OsrmConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default outbound HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Error for an environment variable with an unusable value.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({message})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub message: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub osrm: OsrmConfig,
    pub ip_geolocation: IpGeolocationConfig,
    /// Catalogue file; the built-in sample is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Recorded OSRM response to serve instead of calling the network.
    pub mock_routes: Option<PathBuf>,
    pub route_cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            osrm: OsrmConfig::default().with_timeout(DEFAULT_HTTP_TIMEOUT_SECS),
            ip_geolocation: IpGeolocationConfig::new(),
            catalog_path: None,
            mock_routes: None,
            route_cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("MAPS_BIND_ADDR") {
            config.bind_addr = parse("MAPS_BIND_ADDR", &value)?;
        }
        if let Some(value) = get("MAPS_OSRM_URL") {
            config.osrm = config.osrm.with_base_url(value);
        }
        if let Some(value) = get("MAPS_IP_GEO_URL") {
            config.ip_geolocation = config.ip_geolocation.with_base_url(value);
        }
        if let Some(value) = get("MAPS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse("MAPS_HTTP_TIMEOUT_SECS", &value)?;
            config.osrm = config.osrm.with_timeout(secs);
            config.ip_geolocation = config.ip_geolocation.with_timeout(secs);
        }
        if let Some(value) = get("MAPS_ROUTE_CACHE_TTL_SECS") {
            let secs: u64 = parse("MAPS_ROUTE_CACHE_TTL_SECS", &value)?;
            config.route_cache.ttl = Duration::from_secs(secs);
        }
        config.catalog_path = get("MAPS_CATALOG_PATH").map(PathBuf::from);
        config.mock_routes = get("MAPS_MOCK_ROUTES").map(PathBuf::from);

        Ok(config)
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        message: e.to_string(),
    })
}
