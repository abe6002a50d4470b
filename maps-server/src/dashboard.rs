//! Dashboard service.
//!
//! Owns the [`MapsStore`] behind a lock and runs route estimation when an
//! event asks for it. The routing request runs with the lock released;
//! results are applied afterwards only if no newer request was issued, so
//! rapid mode toggles cannot leave an outdated estimate on screen.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::estimator::{EstimatorConfig, RouteEstimator};
use crate::geolocation::{DevicePosition, IpLocator, ResolvedLocation, resolve_user_location};
use crate::routing::RouteProvider;
use crate::store::{Catalog, EstimateOutcome, MapsStore, UiEvent};

/// Shared route provider handle.
pub type SharedRouteProvider = Arc<dyn RouteProvider>;

/// Shared IP locator handle.
pub type SharedIpLocator = Arc<dyn IpLocator>;

/// Result of a geolocation attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeolocateOutcome {
    /// The position applied to the store, if any.
    pub resolved: Option<ResolvedLocation>,
    /// Route re-estimation triggered by the new position.
    pub estimate: Option<EstimateOutcome>,
}

/// UI state plus the services that update it.
pub struct Dashboard {
    store: RwLock<MapsStore>,
    estimator: RouteEstimator<SharedRouteProvider>,
    locator: SharedIpLocator,
}

impl Dashboard {
    pub fn new(
        catalog: Arc<Catalog>,
        routes: SharedRouteProvider,
        locator: SharedIpLocator,
        config: EstimatorConfig,
    ) -> Self {
        Self {
            store: RwLock::new(MapsStore::new(catalog)),
            estimator: RouteEstimator::new(routes, config),
            locator,
        }
    }

    /// Read access to the current state.
    pub async fn state(&self) -> RwLockReadGuard<'_, MapsStore> {
        self.store.read().await
    }

    /// Apply a UI event, re-estimating the route when needed.
    ///
    /// Returns the estimation outcome, or `None` if the event did not call
    /// for one.
    pub async fn dispatch(&self, event: UiEvent) -> Result<Option<EstimateOutcome>, DomainError> {
        let needs_estimate = self.store.write().await.dispatch(event)?;
        if !needs_estimate {
            return Ok(None);
        }
        Ok(Some(self.reestimate(false).await))
    }

    /// Re-run estimation for the current destination, mode and safety
    /// setting, asking the routing service again for new routes.
    pub async fn refresh_route(&self) -> EstimateOutcome {
        self.reestimate(true).await
    }

    async fn reestimate(&self, fresh: bool) -> EstimateOutcome {
        let Some(mut request) = self.store.write().await.begin_estimate() else {
            debug!("route not ready, skipping estimate");
            return EstimateOutcome::Skipped;
        };
        request.fresh = fresh;

        let result = self.estimator.estimate(&request).await;

        let outcome = self
            .store
            .write()
            .await
            .complete_estimate(request.sequence, result);
        debug!(sequence = request.sequence, ?outcome, "estimate finished");
        outcome
    }

    /// Resolve the user's position from the device report, falling back to
    /// IP geolocation, and store it.
    pub async fn geolocate(&self, device: DevicePosition) -> GeolocateOutcome {
        let Some(resolved) = resolve_user_location(device, self.locator.as_ref()).await else {
            return GeolocateOutcome {
                resolved: None,
                estimate: None,
            };
        };

        info!(position = %resolved.position, source = ?resolved.source, "user location");

        let needs_estimate = {
            let mut store = self.store.write().await;
            let changed = store.apply_user_location(resolved.position);
            changed && store.route_ready()
        };

        let estimate = if needs_estimate {
            Some(self.reestimate(false).await)
        } else {
            None
        };

        GeolocateOutcome {
            resolved: Some(resolved),
            estimate,
        }
    }
}
