//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, LatLng, Location, RouteAlternative, RouteId, Tag, TransportMode,
};
use crate::format::{format_distance, format_duration};
use crate::geolocation::{DevicePosition, ResolvedLocation};
use crate::store::{
    Catalog, EstimateOutcome, LocationFilter, MapStyle, MapsStore, Theme, Viewport,
};

/// Ad-hoc location filter from query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    /// Comma-separated category ids
    pub category: Option<String>,

    /// Comma-separated tag ids
    pub tag: Option<String>,

    /// Free-text search on name and address
    pub q: Option<String>,
}

/// Query parameters for state reads.
#[derive(Debug, Default, Deserialize)]
pub struct StateQuery {
    /// Colour scheme used to resolve the default map style
    pub theme: Option<Theme>,
}

/// Request body for `POST /api/geolocate`.
#[derive(Debug, Deserialize)]
pub struct GeolocateRequest {
    /// What the browser's geolocation API reported
    pub device: DevicePosition,
}

/// Tag id with its display name.
#[derive(Debug, Serialize)]
pub struct TagResult {
    pub id: String,
    pub name: String,
}

/// A location marker.
#[derive(Debug, Serialize)]
pub struct LocationResult {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinates: LatLng,

    /// Category id
    pub category: String,

    /// Marker colour
    pub color: String,

    pub tags: Vec<TagResult>,
    pub description: Option<String>,

    /// Date added, e.g. "Mar 5, 2024"
    pub added_at: Option<String>,
}

/// Response listing locations.
#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationResult>,
}

/// Response for `GET /api/catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,

    /// Modes offered by the route panel, in panel order
    pub transport_modes: Vec<TransportMode>,

    pub map_styles: Vec<MapStyle>,
}

/// One route alternative as shown in the route panel.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: RouteId,
    pub mode: TransportMode,

    /// Polyline as `[lng, lat]` pairs, ready for GeoJSON
    pub coordinates: Vec<[f64; 2]>,

    pub duration_secs: u64,

    /// Formatted duration, e.g. "12 min"
    pub duration: String,

    pub distance_m: f64,

    /// Formatted distance, e.g. "6.4 km"
    pub distance: String,

    /// Fare in rupees
    pub cost: u32,

    pub safety_score: u8,
    pub time_saved_secs: Option<u64>,

    /// Formatted time saved, e.g. "5 min"
    pub time_saved: Option<String>,

    /// First route returned by the routing service
    pub is_fastest: bool,

    /// Currently highlighted route
    pub is_selected: bool,
}

/// Current route state.
#[derive(Debug, Serialize)]
pub struct RouteView {
    /// Destination location, if a route was started
    pub destination: Option<LocationResult>,

    /// Whether an estimation request is in flight
    pub loading: bool,

    /// Sequence number of the displayed estimate
    pub sequence: Option<u64>,

    pub computed_at: Option<DateTime<Utc>>,

    /// The highlighted alternative
    pub selected: Option<RouteResult>,

    pub alternatives: Vec<RouteResult>,
}

/// Full dashboard state for the rendering collaborator.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub selected_location: Option<LocationResult>,
    pub transport_mode: TransportMode,
    pub safety_mode: bool,
    pub user_location: Option<LatLng>,
    pub viewport: Viewport,
    pub map_style: MapStyle,

    /// Style document URL for the current style and theme
    pub map_style_url: String,

    pub filter: LocationFilter,

    /// Number of locations passing the filter
    pub visible_locations: usize,

    pub route: RouteView,
}

/// Response for `POST /api/events`.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// Outcome of the estimation the event triggered, if any
    pub estimate: Option<EstimateOutcome>,
    pub state: StateResponse,
}

/// Response for `POST /api/route/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub estimate: EstimateOutcome,
    pub route: RouteView,
}

/// Response for `POST /api/geolocate`.
#[derive(Debug, Serialize)]
pub struct GeolocateResponse {
    pub resolved: Option<ResolvedLocation>,
    pub estimate: Option<EstimateOutcome>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LocationResult {
    /// Create from a catalogue location, resolving colour and tag names.
    pub fn from_location(location: &Location, catalog: &Catalog) -> Self {
        let tags = location
            .tags
            .iter()
            .map(|t| TagResult {
                id: t.to_string(),
                name: catalog.tag_name(t).to_string(),
            })
            .collect();

        Self {
            id: location.id.to_string(),
            name: location.name.clone(),
            address: location.address.clone(),
            coordinates: location.coordinates,
            category: location.category_id.to_string(),
            color: catalog.category_color(&location.category_id).to_string(),
            tags,
            description: location.description.clone(),
            added_at: location.added_at_label(),
        }
    }
}

impl LocationsResponse {
    pub fn from_locations<'a>(
        locations: impl IntoIterator<Item = &'a Location>,
        catalog: &Catalog,
    ) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|l| LocationResult::from_location(l, catalog))
                .collect(),
        }
    }
}

impl CatalogResponse {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            categories: catalog.categories().to_vec(),
            tags: catalog.tags().to_vec(),
            transport_modes: TransportMode::ALL.to_vec(),
            map_styles: MapStyle::ALL.to_vec(),
        }
    }
}

impl RouteResult {
    /// Create from a route alternative at `index` in its estimate.
    pub fn from_alternative(
        route: &RouteAlternative,
        index: usize,
        selected: Option<RouteId>,
    ) -> Self {
        Self {
            id: route.id,
            mode: route.mode,
            coordinates: route.coordinates.iter().map(|c| c.to_lng_lat_pair()).collect(),
            duration_secs: route.duration_secs,
            duration: format_duration(route.duration_secs),
            distance_m: route.distance_m,
            distance: format_distance(route.distance_m),
            cost: route.cost,
            safety_score: route.safety_score,
            time_saved_secs: route.time_saved_secs,
            time_saved: route.time_saved_secs.map(format_duration),
            is_fastest: index == 0,
            is_selected: selected == Some(route.id),
        }
    }
}

impl RouteView {
    pub fn from_store(store: &MapsStore) -> Self {
        let catalog = store.catalog();
        let destination = store
            .route_destination()
            .and_then(|id| catalog.location(id))
            .map(|l| LocationResult::from_location(l, catalog));

        let route = store.route();
        let selected_id = route.selected;

        let (sequence, computed_at, alternatives) = match &route.estimate {
            Some(estimate) => (
                Some(estimate.sequence),
                Some(estimate.computed_at),
                estimate
                    .alternatives
                    .iter()
                    .enumerate()
                    .map(|(i, r)| RouteResult::from_alternative(r, i, selected_id))
                    .collect(),
            ),
            None => (None, None, Vec::new()),
        };

        let selected = route.estimate.as_ref().and_then(|estimate| {
            let id = selected_id?;
            let index = estimate.alternatives.iter().position(|r| r.id == id)?;
            Some(RouteResult::from_alternative(
                &estimate.alternatives[index],
                index,
                selected_id,
            ))
        });

        Self {
            destination,
            loading: route.loading,
            sequence,
            computed_at,
            selected,
            alternatives,
        }
    }
}

impl StateResponse {
    pub fn from_store(store: &MapsStore, theme: Theme) -> Self {
        let catalog = store.catalog();
        let selected_location = store
            .selected_location()
            .and_then(|id| catalog.location(id))
            .map(|l| LocationResult::from_location(l, catalog));

        Self {
            selected_location,
            transport_mode: store.transport_mode(),
            safety_mode: store.safety_mode(),
            user_location: store.user_location(),
            viewport: store.viewport(),
            map_style: store.map_style(),
            map_style_url: store.map_style().style_url(theme).to_string(),
            filter: store.filter().clone(),
            visible_locations: store.filtered_locations().len(),
            route: RouteView::from_store(store),
        }
    }
}
