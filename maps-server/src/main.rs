use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use maps_server::cache::CachedRouteProvider;
use maps_server::config::ServerConfig;
use maps_server::dashboard::{Dashboard, SharedRouteProvider};
use maps_server::estimator::EstimatorConfig;
use maps_server::geolocation::IpGeolocationClient;
use maps_server::routing::{MockRouteProvider, OsrmClient};
use maps_server::store::Catalog;
use maps_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("maps_server=info")),
        )
        .init();

    if let Err(message) = run().await {
        error!("{message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|e| e.to_string())?;

    // Load the catalogue (fail fast if it is invalid)
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_file(path),
        None => Catalog::sample(),
    }
    .map_err(|e| format!("failed to load catalogue: {e}"))?;
    info!(
        locations = catalog.locations().len(),
        categories = catalog.categories().len(),
        "loaded catalogue"
    );
    let catalog = Arc::new(catalog);

    // Route provider: canned responses or the OSRM server, behind the cache
    let routes: SharedRouteProvider = match &config.mock_routes {
        Some(path) => {
            warn!(path = %path.display(), "serving mock routes, OSRM will not be called");
            let mock = MockRouteProvider::from_file(path).map_err(|e| e.to_string())?;
            Arc::new(CachedRouteProvider::new(mock, &config.route_cache))
        }
        None => {
            info!(url = %config.osrm.base_url, "using OSRM server");
            let client = OsrmClient::new(config.osrm.clone()).map_err(|e| e.to_string())?;
            Arc::new(CachedRouteProvider::new(client, &config.route_cache))
        }
    };

    let locator = IpGeolocationClient::new(config.ip_geolocation.clone())
        .map_err(|e| format!("failed to create IP geolocation client: {e}"))?;

    let dashboard = Dashboard::new(
        catalog.clone(),
        routes,
        Arc::new(locator),
        EstimatorConfig::default(),
    );
    let app = create_router(AppState::new(dashboard, catalog));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("failed to bind {}: {e}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "maps dashboard listening");
    info!("  GET  /health                 - Health check");
    info!("  GET  /api/catalog            - Categories and tags");
    info!("  GET  /api/locations          - Filter locations by query");
    info!("  GET  /api/locations/filtered - Locations passing the active filters");
    info!("  GET  /api/state              - Dashboard state");
    info!("  POST /api/events             - Apply a UI event");
    info!("  GET  /api/route              - Current route estimate");
    info!("  POST /api/route/refresh      - Re-estimate the current route");
    info!("  POST /api/geolocate          - Report device position");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {e}"))
}
