//! Caching layer for routing responses.
//!
//! Toggling the transport mode or safety mode re-runs the estimator, but
//! the underlying driving routes are the same. We cache the raw routes per
//! origin/destination pair so those toggles do not hit the network again.
//!
//! An explicit refresh skips the lookup, asks the wrapped provider and
//! replaces the cached entry with the answer.
//!
//! Coordinates are bucketed to 1e-5 degrees (about a metre) so GPS jitter
//! does not defeat the cache while distinct places stay distinct.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::LatLng;
use crate::routing::{OsrmRoute, RouteProvider, RoutingError};

/// Cache key: bucketed (origin lat, origin lng, destination lat, destination lng).
type RouteKey = (i64, i64, i64, i64);

/// Cached route list.
type RouteEntry = Arc<Vec<OsrmRoute>>;

/// Buckets per degree.
const BUCKETS_PER_DEGREE: f64 = 100_000.0;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

fn bucket(value: f64) -> i64 {
    (value * BUCKETS_PER_DEGREE).round() as i64
}

/// Compute the cache key for an origin/destination pair.
fn route_key(origin: LatLng, destination: LatLng) -> RouteKey {
    (
        bucket(origin.lat),
        bucket(origin.lng),
        bucket(destination.lat),
        bucket(destination.lng),
    )
}

/// Route provider with caching.
///
/// Wraps any [`RouteProvider`] and caches successful, non-empty responses.
/// Errors and empty responses are never cached.
pub struct CachedRouteProvider<P> {
    inner: P,
    routes: MokaCache<RouteKey, RouteEntry>,
}

impl<P: RouteProvider> CachedRouteProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }

    async fn fetch_and_store(
        &self,
        key: RouteKey,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        let routes = self.inner.driving_routes(origin, destination).await?;

        if !routes.is_empty() {
            self.routes.insert(key, Arc::new(routes.clone())).await;
        }

        Ok(routes)
    }
}

#[async_trait]
impl<P: RouteProvider> RouteProvider for CachedRouteProvider<P> {
    async fn driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        let key = route_key(origin, destination);

        if let Some(cached) = self.routes.get(&key).await {
            debug!(?key, "route cache hit");
            return Ok(cached.as_ref().clone());
        }

        self.fetch_and_store(key, origin, destination).await
    }

    async fn fresh_driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        let key = route_key(origin, destination);
        debug!(?key, "route cache bypassed");
        self.fetch_and_store(key, origin, destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{MockRouteProvider, straight_route};

    fn points() -> (LatLng, LatLng) {
        (
            LatLng::new(28.6139, 77.209).unwrap(),
            LatLng::new(28.6562, 77.241).unwrap(),
        )
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn key_buckets_nearby_points_together() {
        let a = LatLng::new(28.613_900_1, 77.209_000_2).unwrap();
        let b = LatLng::new(28.613_900_4, 77.208_999_9).unwrap();
        let dest = LatLng::new(28.6562, 77.241).unwrap();
        assert_eq!(route_key(a, dest), route_key(b, dest));

        let far = LatLng::new(28.6140, 77.209).unwrap();
        assert_ne!(route_key(a, dest), route_key(far, dest));
    }

    #[test]
    fn key_is_directional() {
        let (a, b) = points();
        assert_ne!(route_key(a, b), route_key(b, a));
    }

    #[tokio::test]
    async fn second_request_served_from_cache() {
        let (a, b) = points();
        let mock = MockRouteProvider::with_routes(vec![straight_route(a, b, 5000.0, 600.0)]);
        let cached = CachedRouteProvider::new(mock.clone(), &CacheConfig::default());

        let first = cached.driving_routes(a, b).await.unwrap();
        let second = cached.driving_routes(a, b).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let (a, b) = points();
        let mock = MockRouteProvider::failing("offline");
        let cached = CachedRouteProvider::new(mock.clone(), &CacheConfig::default());

        assert!(cached.driving_routes(a, b).await.is_err());

        mock.set_routes(vec![straight_route(a, b, 5000.0, 600.0)])
            .await;
        assert!(cached.driving_routes(a, b).await.is_ok());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_responses_are_not_cached() {
        let (a, b) = points();
        let mock = MockRouteProvider::with_routes(Vec::new());
        let cached = CachedRouteProvider::new(mock.clone(), &CacheConfig::default());

        assert!(cached.driving_routes(a, b).await.unwrap().is_empty());
        assert!(cached.driving_routes(a, b).await.unwrap().is_empty());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn fresh_request_refetches_and_replaces_entry() {
        let (a, b) = points();
        let mock = MockRouteProvider::with_routes(vec![straight_route(a, b, 5000.0, 600.0)]);
        let cached = CachedRouteProvider::new(mock.clone(), &CacheConfig::default());
        cached.driving_routes(a, b).await.unwrap();

        mock.set_routes(vec![straight_route(a, b, 4000.0, 500.0)])
            .await;
        let fresh = cached.fresh_driving_routes(a, b).await.unwrap();
        assert_eq!(fresh[0].distance, 4000.0);
        assert_eq!(mock.call_count(), 2);

        // Later lookups see the refreshed routes without another call.
        let again = cached.driving_routes(a, b).await.unwrap();
        assert_eq!(again[0].distance, 4000.0);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn failed_fresh_request_keeps_cached_entry() {
        let (a, b) = points();
        let mock = MockRouteProvider::with_routes(vec![straight_route(a, b, 5000.0, 600.0)]);
        let cached = CachedRouteProvider::new(mock.clone(), &CacheConfig::default());
        cached.driving_routes(a, b).await.unwrap();

        mock.set_failure("offline").await;
        assert!(cached.fresh_driving_routes(a, b).await.is_err());

        let again = cached.driving_routes(a, b).await.unwrap();
        assert_eq!(again[0].distance, 5000.0);
        assert_eq!(mock.call_count(), 2);
    }
}
