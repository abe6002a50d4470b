//! Location and filter store.
//!
//! Holds the static catalogue plus the mutable UI state: filters,
//! selection, viewport, map style and the current route estimate.

mod catalog;
mod event;
mod filter;
mod state;
mod style;

pub use catalog::{Catalog, CatalogData, CatalogError, FALLBACK_COLOR};
pub use event::UiEvent;
pub use filter::LocationFilter;
pub use state::{
    DEFAULT_ZOOM, EstimateOutcome, MAX_ZOOM, MapsStore, RouteState, Viewport,
};
pub use style::{MapStyle, Theme};
