//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::warn;

use crate::domain::{CategoryId, DomainError, TagId};
use crate::store::{LocationFilter, UiEvent};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/catalog", get(catalog))
        .route("/api/locations", get(search_locations))
        .route("/api/locations/filtered", get(filtered_locations))
        .route("/api/state", get(dashboard_state))
        .route("/api/events", post(post_event))
        .route("/api/route", get(current_route))
        .route("/api/route/refresh", post(refresh_route))
        .route("/api/geolocate", post(geolocate))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Categories and tags.
async fn catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from_catalog(&state.catalog))
}

/// Filter locations by query parameters, independent of the store's filters.
async fn search_locations(
    State(state): State<AppState>,
    Query(req): Query<LocationQuery>,
) -> Result<Json<LocationsResponse>, AppError> {
    let mut filter = LocationFilter::default();

    for id in split_ids(req.category.as_deref()) {
        let id = CategoryId::new(id);
        if state.catalog.category(&id).is_none() {
            return Err(DomainError::UnknownCategory(id).into());
        }
        filter.categories.insert(id);
    }
    for id in split_ids(req.tag.as_deref()) {
        let id = TagId::new(id);
        if state.catalog.tag(&id).is_none() {
            return Err(DomainError::UnknownTag(id).into());
        }
        filter.tags.insert(id);
    }
    if let Some(q) = req.q {
        filter.set_search(q);
    }

    let matches = filter.apply(state.catalog.locations());
    Ok(Json(LocationsResponse::from_locations(
        matches,
        &state.catalog,
    )))
}

/// Locations passing the store's active filters.
async fn filtered_locations(State(state): State<AppState>) -> Json<LocationsResponse> {
    let store = state.dashboard.state().await;
    Json(LocationsResponse::from_locations(
        store.filtered_locations(),
        store.catalog(),
    ))
}

/// Full dashboard state.
async fn dashboard_state(
    State(state): State<AppState>,
    Query(req): Query<StateQuery>,
) -> Json<StateResponse> {
    let store = state.dashboard.state().await;
    Json(StateResponse::from_store(
        &store,
        req.theme.unwrap_or_default(),
    ))
}

/// Apply one UI event; runs route estimation when the event calls for it.
async fn post_event(
    State(state): State<AppState>,
    Query(query): Query<StateQuery>,
    body: Bytes,
) -> Result<Json<EventResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let event: UiEvent = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid event JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let estimate = state.dashboard.dispatch(event).await?;

    let store = state.dashboard.state().await;
    Ok(Json(EventResponse {
        estimate,
        state: StateResponse::from_store(&store, query.theme.unwrap_or_default()),
    }))
}

/// Current route state.
async fn current_route(State(state): State<AppState>) -> Json<RouteView> {
    let store = state.dashboard.state().await;
    Json(RouteView::from_store(&store))
}

/// Re-run estimation for the current route.
async fn refresh_route(State(state): State<AppState>) -> Json<RefreshResponse> {
    let estimate = state.dashboard.refresh_route().await;
    let store = state.dashboard.state().await;
    Json(RefreshResponse {
        estimate,
        route: RouteView::from_store(&store),
    })
}

/// Record the device position report, falling back to IP geolocation.
async fn geolocate(
    State(state): State<AppState>,
    Json(req): Json<GeolocateRequest>,
) -> Json<GeolocateResponse> {
    let outcome = state.dashboard.geolocate(req.device).await;
    Json(GeolocateResponse {
        resolved: outcome.resolved,
        estimate: outcome.estimate,
    })
}

/// Split a comma-separated id list, skipping blanks.
fn split_ids(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownLocation(_)
            | DomainError::UnknownCategory(_)
            | DomainError::UnknownTag(_)
            | DomainError::UnknownRoute(_) => AppError::NotFound {
                message: e.to_string(),
            },
            DomainError::InvalidZoom(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
