//! Estimation parameters.

use crate::domain::TransportMode;

/// Assumed average speeds and safety-mode adjustments.
///
/// The routing service only returns driving routes, so non-car durations
/// are the driving duration scaled by `car_speed / mode_speed`.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Average car speed (km/h).
    pub car_kmh: f64,

    /// Average bus speed (km/h).
    pub bus_kmh: f64,

    /// Average train speed (km/h).
    pub train_kmh: f64,

    /// Average rickshaw speed (km/h).
    pub rickshaw_kmh: f64,

    /// Multiplier applied to bus and rickshaw durations in safety mode.
    pub safety_duration_factor: f64,

    /// Points added to the safety score in safety mode (capped at 100).
    pub safety_score_bonus: u8,

    /// Lowest baseline safety score (inclusive).
    pub baseline_score_min: u8,

    /// Upper bound of the baseline safety score (exclusive).
    pub baseline_score_max: u8,
}

impl EstimatorConfig {
    /// Average speed for a mode (km/h).
    pub fn speed_kmh(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Car => self.car_kmh,
            TransportMode::Bus => self.bus_kmh,
            TransportMode::Train => self.train_kmh,
            TransportMode::Rickshaw => self.rickshaw_kmh,
        }
    }

    /// Factor turning a driving duration into a duration for `mode`.
    ///
    /// A non-positive speed falls back to car speed (factor 1).
    pub fn duration_factor(&self, mode: TransportMode) -> f64 {
        let speed = self.speed_kmh(mode);
        if speed > 0.0 {
            self.car_kmh / speed
        } else {
            1.0
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            car_kmh: 40.0,
            bus_kmh: 25.0,
            train_kmh: 60.0,
            rickshaw_kmh: 30.0,
            safety_duration_factor: 1.1,
            safety_score_bonus: 10,
            baseline_score_min: 70,
            baseline_score_max: 100,
        }
    }
}
