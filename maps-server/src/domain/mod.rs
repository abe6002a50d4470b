//! Domain types for the maps dashboard.
//!
//! This module contains the core model: coordinates, the location
//! catalogue types, transport modes with their fare formulas, and route
//! alternatives. Types enforce their invariants at construction time.

mod coords;
mod error;
mod fare;
mod location;
mod route;
mod transport;

pub use coords::{InvalidCoordinates, LatLng};
pub use error::DomainError;
pub use fare::{fare_for_distance, raw_fare};
pub use location::{Category, CategoryId, Location, LocationId, Tag, TagId};
pub use route::{InvalidRouteId, RouteAlternative, RouteEstimate, RouteId};
pub use transport::TransportMode;
