//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinates {
    lat: f64,
    lng: f64,
    reason: &'static str,
}

/// A WGS84 position in decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]. Values
/// built through [`LatLng::new`] are guaranteed finite and in range; the
/// serde path goes through the same check.
///
/// # Examples
///
/// ```
/// use maps_server::domain::LatLng;
///
/// let delhi = LatLng::new(28.6139, 77.209).unwrap();
/// assert_eq!(delhi.to_lng_lat(), "77.209,28.6139");
///
/// assert!(LatLng::new(91.0, 0.0).is_err());
/// assert!(LatLng::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLatLng")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawLatLng> for LatLng {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawLatLng) -> Result<Self, Self::Error> {
        LatLng::new(raw.lat, raw.lng)
    }
}

impl LatLng {
    /// Default map centre used before any user position is known.
    pub const DEFAULT_CENTER: LatLng = LatLng { lat: 20.0, lng: 0.0 };

    /// Create a coordinate pair, validating the ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lng })
    }

    /// Build from a GeoJSON `[lng, lat]` position.
    pub fn from_lng_lat(pair: [f64; 2]) -> Result<Self, InvalidCoordinates> {
        Self::new(pair[1], pair[0])
    }

    /// GeoJSON `[lng, lat]` position.
    pub fn to_lng_lat_pair(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// `lng,lat` text as used in OSRM request paths.
    ///
    /// Uses the shortest representation that round-trips, so `77.209`
    /// stays `77.209` rather than gaining trailing digits.
    pub fn to_lng_lat(self) -> String {
        format!("{},{}", self.lng, self.lat)
    }

    /// Whether this is the untouched default map centre.
    pub fn is_default_center(self) -> bool {
        self == Self::DEFAULT_CENTER
    }
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LatLng({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Anything inside the ranges is accepted and survives the GeoJSON pair round trip.
        #[test]
        fn in_range_accepted(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let p = LatLng::new(lat, lng).unwrap();
            prop_assert_eq!(LatLng::from_lng_lat(p.to_lng_lat_pair()).unwrap(), p);
        }

        /// Latitudes beyond the poles are always rejected.
        #[test]
        fn beyond_poles_rejected(lat in 90.0001f64..1000.0, lng in -180.0f64..=180.0) {
            prop_assert!(LatLng::new(lat, lng).is_err());
            prop_assert!(LatLng::new(-lat, lng).is_err());
        }
    }
}
