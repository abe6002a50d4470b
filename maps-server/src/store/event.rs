//! UI intent events.

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, LatLng, LocationId, RouteId, TagId, TransportMode};

use super::MapStyle;

/// One user intent emitted by the rendering collaborator.
///
/// Serialised with a `type` tag, e.g.
/// `{"type": "set_transport_mode", "mode": "bus"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Open (or close, with `None`) a location's popup.
    SelectLocation { id: Option<LocationId> },
    /// Plan a route to a catalogue location.
    StartRoute { destination: LocationId },
    ClearRoute,
    SetTransportMode { mode: TransportMode },
    SetSafetyMode { enabled: bool },
    /// Highlight one of the current alternatives.
    SelectRoute { route: RouteId },
    SetUserLocation { position: LatLng },
    SetViewport { center: LatLng, zoom: f64 },
    SetMapStyle { style: MapStyle },
    ToggleCategory { id: CategoryId },
    ToggleTag { id: TagId },
    SetSearch { text: String },
    ClearFilters,
}

impl UiEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::SelectLocation { .. } => "select_location",
            UiEvent::StartRoute { .. } => "start_route",
            UiEvent::ClearRoute => "clear_route",
            UiEvent::SetTransportMode { .. } => "set_transport_mode",
            UiEvent::SetSafetyMode { .. } => "set_safety_mode",
            UiEvent::SelectRoute { .. } => "select_route",
            UiEvent::SetUserLocation { .. } => "set_user_location",
            UiEvent::SetViewport { .. } => "set_viewport",
            UiEvent::SetMapStyle { .. } => "set_map_style",
            UiEvent::ToggleCategory { .. } => "toggle_category",
            UiEvent::ToggleTag { .. } => "toggle_tag",
            UiEvent::SetSearch { .. } => "set_search",
            UiEvent::ClearFilters => "clear_filters",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_tagged_events() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type": "set_transport_mode", "mode": "rickshaw"}"#).unwrap();
        assert_eq!(
            event,
            UiEvent::SetTransportMode {
                mode: TransportMode::Rickshaw
            }
        );

        let event: UiEvent = serde_json::from_str(r#"{"type": "clear_route"}"#).unwrap();
        assert_eq!(event, UiEvent::ClearRoute);

        let event: UiEvent =
            serde_json::from_str(r#"{"type": "select_location", "id": null}"#).unwrap();
        assert_eq!(event, UiEvent::SelectLocation { id: None });
    }

    #[test]
    fn viewport_coordinates_validated() {
        let result: Result<UiEvent, _> = serde_json::from_str(
            r#"{"type": "set_viewport", "center": {"lat": 95.0, "lng": 0.0}, "zoom": 3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn name_matches_tag() {
        let event = UiEvent::SetSearch {
            text: "fort".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
    }
}
