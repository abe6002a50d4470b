//! Transport modes offered by the route panel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the user intends to travel.
///
/// The routing service only knows the driving profile, so every mode is
/// derived from the same driving route by scaling its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Car,
    Bus,
    Train,
    Rickshaw,
}

impl TransportMode {
    /// All modes in panel order.
    pub const ALL: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Rickshaw,
    ];

    /// Lowercase identifier used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Rickshaw => "rickshaw",
        }
    }

    /// Whether safety mode slows this mode down.
    ///
    /// Buses and rickshaws are assumed to take verified, busier roads when
    /// safety mode is on.
    pub fn slowed_by_safety_mode(self) -> bool {
        matches!(self, TransportMode::Bus | TransportMode::Rickshaw)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_name() {
        for mode in TransportMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&TransportMode::Rickshaw).unwrap();
        assert_eq!(json, "\"rickshaw\"");
        let mode: TransportMode = serde_json::from_str("\"bus\"").unwrap();
        assert_eq!(mode, TransportMode::Bus);
    }

    #[test]
    fn default_is_car() {
        assert_eq!(TransportMode::default(), TransportMode::Car);
    }

    #[test]
    fn safety_slowdown_only_for_bus_and_rickshaw() {
        assert!(!TransportMode::Car.slowed_by_safety_mode());
        assert!(TransportMode::Bus.slowed_by_safety_mode());
        assert!(!TransportMode::Train.slowed_by_safety_mode());
        assert!(TransportMode::Rickshaw.slowed_by_safety_mode());
    }
}
