//! Estimated route alternatives.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LatLng, TransportMode};

/// Stable identifier of a route alternative.
///
/// Derived from the route geometry, so the same physical route keeps its
/// id when it is re-estimated for another mode or safety setting.
///
/// Serialised as 16 hex digits so JavaScript clients do not lose precision.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RouteId(pub u64);

/// Error for a malformed route id string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {0:?}")]
pub struct InvalidRouteId(pub String);

impl RouteId {
    /// Fingerprint a route from its geometry and driving metrics.
    pub fn from_geometry(coordinates: &[LatLng], distance_m: f64, driving_secs: f64) -> Self {
        let mut hasher = DefaultHasher::new();
        coordinates.len().hash(&mut hasher);
        for c in coordinates {
            c.lat.to_bits().hash(&mut hasher);
            c.lng.to_bits().hash(&mut hasher);
        }
        distance_m.to_bits().hash(&mut hasher);
        driving_secs.to_bits().hash(&mut hasher);
        RouteId(hasher.finish())
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({:016x})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for RouteId {
    type Err = InvalidRouteId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > 16 {
            return Err(InvalidRouteId(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(RouteId)
            .map_err(|_| InvalidRouteId(s.to_string()))
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidRouteId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One candidate route with mode-specific estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub id: RouteId,
    /// Polyline from origin to destination.
    pub coordinates: Vec<LatLng>,
    pub duration_secs: u64,
    pub distance_m: f64,
    /// Fare in whole rupees.
    pub cost: u32,
    /// 0 (unsafe) to 100 (safest).
    pub safety_score: u8,
    pub mode: TransportMode,
    /// How much quicker this is than the slowest alternative.
    pub time_saved_secs: Option<u64>,
}

/// Result of one estimation request.
///
/// The first alternative is the primary route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    /// Sequence number of the request that produced this estimate.
    pub sequence: u64,
    pub alternatives: Vec<RouteAlternative>,
    pub computed_at: DateTime<Utc>,
}

impl RouteEstimate {
    /// The first alternative returned by the routing service.
    pub fn primary(&self) -> Option<&RouteAlternative> {
        self.alternatives.first()
    }

    /// Look up an alternative by id.
    pub fn get(&self, id: RouteId) -> Option<&RouteAlternative> {
        self.alternatives.iter().find(|r| r.id == id)
    }

    /// Whether `id` belongs to this estimate.
    pub fn contains(&self, id: RouteId) -> bool {
        self.get(id).is_some()
    }
}
