//! Mock routing provider for testing without network access.
//!
//! Serves a canned OSRM Route response loaded from a JSON file or built
//! in code, optionally delaying individual calls so tests can reproduce
//! out-of-order responses.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::LatLng;

use super::RouteProvider;
use super::client::parse_route_response;
use super::error::RoutingError;
use super::types::{LineString, OsrmRoute};

#[derive(Debug, Clone)]
enum Behaviour {
    Routes(Vec<OsrmRoute>),
    Fail(String),
}

/// Mock provider that answers every request with the same routes.
#[derive(Debug, Clone)]
pub struct MockRouteProvider {
    behaviour: Arc<RwLock<Behaviour>>,
    /// Per-call delays, consumed front to back.
    delays: Arc<Mutex<VecDeque<Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl MockRouteProvider {
    /// Serve the given routes.
    pub fn with_routes(routes: Vec<OsrmRoute>) -> Self {
        Self::from_behaviour(Behaviour::Routes(routes))
    }

    /// Fail every request with a service error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_behaviour(Behaviour::Fail(message.into()))
    }

    /// Load a recorded OSRM Route response body from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RoutingError::NotConfigured(format!("failed to read {}: {e}", path.display()))
        })?;
        let routes = parse_route_response(&json)?;
        if routes.is_empty() {
            return Err(RoutingError::NotConfigured(format!(
                "no routes in mock file {}",
                path.display()
            )));
        }
        Ok(Self::with_routes(routes))
    }

    fn from_behaviour(behaviour: Behaviour) -> Self {
        Self {
            behaviour: Arc::new(RwLock::new(behaviour)),
            delays: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the served routes.
    pub async fn set_routes(&self, routes: Vec<OsrmRoute>) {
        *self.behaviour.write().await = Behaviour::Routes(routes);
    }

    /// Make subsequent calls fail.
    pub async fn set_failure(&self, message: impl Into<String>) {
        *self.behaviour.write().await = Behaviour::Fail(message.into());
    }

    /// Queue a delay for the next call that has none queued yet.
    pub async fn push_delay(&self, delay: Duration) {
        self.delays.lock().await.push_back(delay);
    }

    /// Number of requests served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
    async fn driving_routes(
        &self,
        _origin: LatLng,
        _destination: LatLng,
    ) -> Result<Vec<OsrmRoute>, RoutingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Snapshot before sleeping so a later `set_*` does not affect an
        // in-flight request.
        let behaviour = self.behaviour.read().await.clone();
        let delay = self.delays.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match behaviour {
            Behaviour::Routes(routes) => Ok(routes),
            Behaviour::Fail(message) => Err(RoutingError::Service {
                code: "MockFailure".to_string(),
                message,
            }),
        }
    }
}

/// Build a straight-line route between two points, for tests and demos.
pub fn straight_route(from: LatLng, to: LatLng, distance_m: f64, duration_secs: f64) -> OsrmRoute {
    OsrmRoute {
        distance: distance_m,
        duration: duration_secs,
        geometry: LineString {
            kind: "LineString".to_string(),
            coordinates: vec![from.to_lng_lat_pair(), to.to_lng_lat_pair()],
        },
    }
}
