//! Routing service client.
//!
//! The dashboard has no routing algorithm of its own: driving routes come
//! from an OSRM Route service. This module provides the HTTP client, a
//! mock for tests and offline development, and the [`RouteProvider`]
//! trait the estimator is written against.

mod client;
mod error;
mod mock;
mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::LatLng;

pub use client::{DEFAULT_BASE_URL, OsrmClient, OsrmConfig};
pub use error::RoutingError;
pub use mock::{MockRouteProvider, straight_route};
pub use types::{LineString, OsrmRoute, RouteResponse};

/// Source of driving routes.
///
/// This abstraction allows the estimator to be tested with mock data and
/// the HTTP client to be wrapped by a cache.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Driving routes from `origin` to `destination`, best first.
    async fn driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError>;

    /// Like [`driving_routes`](Self::driving_routes), but never answered
    /// from a cache.
    async fn fresh_driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        self.driving_routes(origin, destination).await
    }
}

#[async_trait]
impl<T: RouteProvider + ?Sized> RouteProvider for Arc<T> {
    async fn driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        (**self).driving_routes(origin, destination).await
    }

    async fn fresh_driving_routes(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        (**self).fresh_driving_routes(origin, destination).await
    }
}
