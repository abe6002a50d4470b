//! Route estimation: one routing request, then per-mode derivation.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::domain::{
    InvalidCoordinates, LatLng, RouteAlternative, RouteEstimate, RouteId, TransportMode,
    fare_for_distance,
};
use crate::routing::{OsrmRoute, RouteProvider, RoutingError};

use super::config::EstimatorConfig;
use super::safety::SafetyScorer;

/// Error from route estimation.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// Routing service request failed
    #[error("routing request failed: {0}")]
    Routing(#[from] RoutingError),

    /// Routing service answered with no candidate routes
    #[error("routing service returned no routes")]
    NoRoutes,

    /// A route geometry contained an invalid position
    #[error("invalid route geometry: {0}")]
    InvalidGeometry(#[from] InvalidCoordinates),
}

/// Inputs for one estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateRequest {
    /// The user's position.
    pub origin: LatLng,

    /// The selected destination.
    pub destination: LatLng,

    pub mode: TransportMode,

    pub safety_mode: bool,

    /// Sequence number stamped onto the resulting estimate.
    pub sequence: u64,

    /// Ask the routing service again instead of reusing cached routes.
    pub fresh: bool,
}

/// Turns driving routes into mode-specific estimates.
#[derive(Debug, Clone)]
pub struct RouteEstimator<P> {
    provider: P,
    config: EstimatorConfig,
    scorer: SafetyScorer,
}

impl<P: RouteProvider> RouteEstimator<P> {
    /// Create an estimator with the given provider and configuration.
    pub fn new(provider: P, config: EstimatorConfig) -> Self {
        let scorer = SafetyScorer::new(&config);
        Self {
            provider,
            config,
            scorer,
        }
    }

    /// Fetch routes once and derive estimates for every alternative.
    ///
    /// No retries; the provider's transport timeout is the only deadline.
    #[instrument(skip(self), fields(mode = %request.mode, safety = request.safety_mode, fresh = request.fresh))]
    pub async fn estimate(&self, request: &EstimateRequest) -> Result<RouteEstimate, EstimateError> {
        let routes = if request.fresh {
            self.provider
                .fresh_driving_routes(request.origin, request.destination)
                .await?
        } else {
            self.provider
                .driving_routes(request.origin, request.destination)
                .await?
        };

        debug!(candidates = routes.len(), "routing service answered");

        derive_estimate(&routes, request, &self.config, &self.scorer)
    }
}

/// Derive an estimate from raw driving routes.
///
/// Pure apart from the timestamp: the same routes and request always give
/// the same alternatives in the same order, the first being primary.
pub fn derive_estimate(
    routes: &[OsrmRoute],
    request: &EstimateRequest,
    config: &EstimatorConfig,
    scorer: &SafetyScorer,
) -> Result<RouteEstimate, EstimateError> {
    if routes.is_empty() {
        return Err(EstimateError::NoRoutes);
    }

    let mut seen = HashSet::with_capacity(routes.len());
    let mut alternatives = Vec::with_capacity(routes.len());

    for route in routes {
        let mut alternative =
            derive_alternative(route, request.mode, request.safety_mode, config, scorer)?;
        // Identical candidates would otherwise share an id.
        while !seen.insert(alternative.id) {
            alternative.id = RouteId(alternative.id.0.wrapping_add(1));
        }
        alternatives.push(alternative);
    }

    fill_time_saved(&mut alternatives);

    Ok(RouteEstimate {
        sequence: request.sequence,
        alternatives,
        computed_at: Utc::now(),
    })
}

/// Derive duration, fare and safety score for one driving route.
pub fn derive_alternative(
    route: &OsrmRoute,
    mode: TransportMode,
    safety_mode: bool,
    config: &EstimatorConfig,
    scorer: &SafetyScorer,
) -> Result<RouteAlternative, EstimateError> {
    let coordinates = route
        .geometry
        .coordinates
        .iter()
        .map(|pair| LatLng::from_lng_lat(*pair))
        .collect::<Result<Vec<_>, _>>()?;

    let id = RouteId::from_geometry(&coordinates, route.distance, route.duration);

    let mut duration = route.duration.max(0.0) * config.duration_factor(mode);
    if safety_mode && mode.slowed_by_safety_mode() {
        duration *= config.safety_duration_factor;
    }

    Ok(RouteAlternative {
        id,
        coordinates,
        duration_secs: duration.round() as u64,
        distance_m: route.distance,
        cost: fare_for_distance(mode, route.distance),
        safety_score: scorer.score(id, safety_mode),
        mode,
        time_saved_secs: None,
    })
}

/// Set each alternative's time saved relative to the slowest one.
fn fill_time_saved(alternatives: &mut [RouteAlternative]) {
    let Some(slowest) = alternatives.iter().map(|r| r.duration_secs).max() else {
        return;
    };
    for alternative in alternatives {
        let saved = slowest - alternative.duration_secs;
        alternative.time_saved_secs = (saved > 0).then_some(saved);
    }
}
