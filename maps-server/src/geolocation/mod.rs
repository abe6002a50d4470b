//! User geolocation.
//!
//! The collaborator reports what the browser's geolocation API returned;
//! when that is missing or denied we fall back to an IP lookup.

mod client;
mod error;
mod resolve;

use async_trait::async_trait;

use crate::domain::LatLng;

pub use client::{IpGeolocationClient, IpGeolocationConfig, IpLookupResponse};
pub use error::GeolocationError;
pub use resolve::{DevicePosition, LocationSource, ResolvedLocation, resolve_user_location};

/// Source of an approximate position for the current user.
#[async_trait]
pub trait IpLocator: Send + Sync {
    async fn locate(&self) -> Result<LatLng, GeolocationError>;
}
