//! Application state for the web layer.

use std::sync::Arc;

use crate::dashboard::Dashboard;
use crate::store::Catalog;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// UI state and route estimation
    pub dashboard: Arc<Dashboard>,

    /// Static location catalogue
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(dashboard: Dashboard, catalog: Arc<Catalog>) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            catalog,
        }
    }
}
