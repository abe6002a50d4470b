//! OSRM API response types for the Route service.
//!
//! Only the fields the estimator needs are modelled; OSRM sends legs,
//! weights and waypoints as well, which serde ignores.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::{Deserialize, Serialize};

/// OSRM Route API response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the points
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"TooBig"` - Request too large
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first. Absent on errors.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// A single driving route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OsrmRoute {
    /// Distance in metres.
    pub distance: f64,

    /// Driving duration in seconds.
    pub duration: f64,

    /// Full-overview GeoJSON geometry.
    pub geometry: LineString,
}

/// GeoJSON LineString with `[lng, lat]` positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineString {
    #[serde(rename = "type", default = "line_string_type")]
    pub kind: String,

    pub coordinates: Vec<[f64; 2]>,
}

fn line_string_type() -> String {
    "LineString".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                {
                    "distance": 2000.5,
                    "duration": 300.2,
                    "weight": 300.2,
                    "weight_name": "routability",
                    "legs": [],
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[77.2, 28.6], [77.21, 28.61]]
                    }
                }
            ],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert_eq!(response.routes.len(), 1);
        assert_eq!(response.routes[0].distance, 2000.5);
        assert_eq!(response.routes[0].geometry.coordinates[1], [77.21, 28.61]);
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoRoute",
            "message": "Impossible route between points"
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.routes.is_empty());
        assert_eq!(
            response.message.as_deref(),
            Some("Impossible route between points")
        );
    }

    #[test]
    fn missing_geometry_is_an_error() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 1.0, "duration": 1.0}]}"#;
        assert!(serde_json::from_str::<RouteResponse>(json).is_err());
    }
}
