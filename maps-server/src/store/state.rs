//! Dashboard UI state and its reducer.
//!
//! All mutations go through [`MapsStore::dispatch`] or the estimate
//! lifecycle pair [`MapsStore::begin_estimate`] /
//! [`MapsStore::complete_estimate`]. The latter is split in two so the
//! routing request can run without holding the store lock.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    DomainError, LatLng, Location, LocationId, RouteAlternative, RouteEstimate, RouteId,
    TransportMode,
};
use crate::estimator::{EstimateError, EstimateRequest};

use super::{Catalog, LocationFilter, MapStyle, UiEvent};

/// Zoom level used before the user moves the map.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Highest zoom level the basemaps support.
pub const MAX_ZOOM: f64 = 22.0;

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: LatLng::DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Current route estimate and the highlighted alternative.
///
/// When `estimate` is present, `selected` is one of its alternative ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteState {
    pub estimate: Option<RouteEstimate>,
    pub selected: Option<RouteId>,
    /// An estimation request is in flight.
    pub loading: bool,
}

/// What happened to a finished estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateOutcome {
    /// Estimate stored as the current route state.
    Applied,
    /// A newer request was issued meanwhile; the result was discarded.
    Stale,
    /// Estimation failed; previous route state kept.
    Failed,
    /// No destination or user position, nothing was requested.
    Skipped,
}

/// Explicit owner of the dashboard's UI state.
#[derive(Debug, Clone)]
pub struct MapsStore {
    catalog: Arc<Catalog>,
    filter: LocationFilter,
    selected_location: Option<LocationId>,
    route_destination: Option<LocationId>,
    transport_mode: TransportMode,
    safety_mode: bool,
    user_location: Option<LatLng>,
    viewport: Viewport,
    map_style: MapStyle,
    route: RouteState,
    /// Sequence number of the latest issued estimation request.
    latest_sequence: u64,
}

impl MapsStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            filter: LocationFilter::default(),
            selected_location: None,
            route_destination: None,
            transport_mode: TransportMode::default(),
            safety_mode: false,
            user_location: None,
            viewport: Viewport::default(),
            map_style: MapStyle::default(),
            route: RouteState::default(),
            latest_sequence: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &LocationFilter {
        &self.filter
    }

    pub fn selected_location(&self) -> Option<&LocationId> {
        self.selected_location.as_ref()
    }

    pub fn route_destination(&self) -> Option<&LocationId> {
        self.route_destination.as_ref()
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn safety_mode(&self) -> bool {
        self.safety_mode
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn map_style(&self) -> MapStyle {
        self.map_style
    }

    pub fn route(&self) -> &RouteState {
        &self.route
    }

    /// The highlighted alternative of the current estimate.
    pub fn selected_route(&self) -> Option<&RouteAlternative> {
        let estimate = self.route.estimate.as_ref()?;
        estimate.get(self.route.selected?)
    }

    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence
    }

    /// Catalogue locations passing the active filters, in catalogue order.
    pub fn filtered_locations(&self) -> Vec<&Location> {
        self.filter.apply(self.catalog.locations())
    }

    /// Whether both ends of a route are known.
    pub fn route_ready(&self) -> bool {
        self.user_location.is_some() && self.route_destination.is_some()
    }

    /// Apply one UI event.
    ///
    /// Returns `true` when the route should be re-estimated. Events naming
    /// unknown ids are rejected and leave the state unchanged.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<bool, DomainError> {
        debug!(event = event.name(), "dispatch");

        match event {
            UiEvent::SelectLocation { id } => {
                if let Some(id) = &id {
                    self.require_location(id)?;
                }
                self.selected_location = id;
                Ok(false)
            }
            UiEvent::StartRoute { destination } => {
                self.require_location(&destination)?;
                let changed = self.route_destination.as_ref() != Some(&destination);
                if changed {
                    self.route = RouteState::default();
                    self.invalidate_in_flight();
                }
                self.route_destination = Some(destination);
                self.selected_location = None;
                Ok(changed && self.route_ready())
            }
            UiEvent::ClearRoute => {
                self.route_destination = None;
                self.route = RouteState::default();
                self.invalidate_in_flight();
                Ok(false)
            }
            UiEvent::SetTransportMode { mode } => {
                let changed = self.transport_mode != mode;
                self.transport_mode = mode;
                Ok(changed && self.route_ready())
            }
            UiEvent::SetSafetyMode { enabled } => {
                let changed = self.safety_mode != enabled;
                self.safety_mode = enabled;
                Ok(changed && self.route_ready())
            }
            UiEvent::SelectRoute { route } => {
                let known = self
                    .route
                    .estimate
                    .as_ref()
                    .is_some_and(|e| e.contains(route));
                if !known {
                    return Err(DomainError::UnknownRoute(route));
                }
                self.route.selected = Some(route);
                Ok(false)
            }
            UiEvent::SetUserLocation { position } => {
                let changed = self.apply_user_location(position);
                Ok(changed && self.route_destination.is_some())
            }
            UiEvent::SetViewport { center, zoom } => {
                if !zoom.is_finite() || !(0.0..=MAX_ZOOM).contains(&zoom) {
                    return Err(DomainError::InvalidZoom(zoom));
                }
                self.viewport = Viewport { center, zoom };
                Ok(false)
            }
            UiEvent::SetMapStyle { style } => {
                self.map_style = style;
                Ok(false)
            }
            UiEvent::ToggleCategory { id } => {
                if self.catalog.category(&id).is_none() {
                    return Err(DomainError::UnknownCategory(id));
                }
                self.filter.toggle_category(id);
                Ok(false)
            }
            UiEvent::ToggleTag { id } => {
                if self.catalog.tag(&id).is_none() {
                    return Err(DomainError::UnknownTag(id));
                }
                self.filter.toggle_tag(id);
                Ok(false)
            }
            UiEvent::SetSearch { text } => {
                self.filter.set_search(text);
                Ok(false)
            }
            UiEvent::ClearFilters => {
                self.filter.clear();
                Ok(false)
            }
        }
    }

    /// Record the user's position.
    ///
    /// The map is recentred on it only while the viewport is still at the
    /// default centre, so a map the user already moved stays put. Returns
    /// whether the position changed.
    pub fn apply_user_location(&mut self, position: LatLng) -> bool {
        if self.viewport.center.is_default_center() {
            self.viewport.center = position;
        }
        let changed = self.user_location != Some(position);
        self.user_location = Some(position);
        changed
    }

    /// Issue a new estimation request, or `None` when the route is not
    /// ready.
    ///
    /// Marks the route state as loading. Any request issued earlier becomes
    /// stale.
    pub fn begin_estimate(&mut self) -> Option<EstimateRequest> {
        let origin = self.user_location?;
        let destination = self
            .route_destination
            .as_ref()
            .and_then(|id| self.catalog.location(id))?
            .coordinates;

        self.latest_sequence += 1;
        self.route.loading = true;

        Some(EstimateRequest {
            origin,
            destination,
            mode: self.transport_mode,
            safety_mode: self.safety_mode,
            sequence: self.latest_sequence,
            fresh: false,
        })
    }

    /// Apply the result of the request numbered `sequence`.
    ///
    /// Only the latest issued request may change the route state. A failure
    /// clears the loading flag and keeps the previous estimate.
    pub fn complete_estimate(
        &mut self,
        sequence: u64,
        result: Result<RouteEstimate, EstimateError>,
    ) -> EstimateOutcome {
        if sequence != self.latest_sequence {
            debug!(
                sequence,
                latest = self.latest_sequence,
                "discarding stale estimate"
            );
            return EstimateOutcome::Stale;
        }

        self.route.loading = false;

        match result {
            Ok(estimate) => {
                self.route.selected = estimate.primary().map(|r| r.id);
                self.route.estimate = Some(estimate);
                EstimateOutcome::Applied
            }
            Err(error) => {
                warn!(sequence, %error, "route estimation failed, keeping previous route");
                EstimateOutcome::Failed
            }
        }
    }

    fn require_location(&self, id: &LocationId) -> Result<(), DomainError> {
        match self.catalog.location(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::UnknownLocation(id.clone())),
        }
    }

    fn invalidate_in_flight(&mut self) {
        self.latest_sequence += 1;
    }
}
