//! Flat-rate fare formulas, in rupees.

use super::TransportMode;

/// Rickshaw minimum fare, covering the first [`RICKSHAW_BASE_KM`].
pub const RICKSHAW_BASE_FARE: f64 = 26.0;

/// Distance covered by the rickshaw minimum fare.
pub const RICKSHAW_BASE_KM: f64 = 1.5;

/// Rickshaw rate beyond the base distance.
pub const RICKSHAW_PER_KM: f64 = 15.0;

/// Car (taxi) rate.
pub const CAR_PER_KM: f64 = 20.0;

/// Bus boarding charge.
pub const BUS_BASE_FARE: f64 = 5.0;

/// Bus rate.
pub const BUS_PER_KM: f64 = 2.0;

/// Train flat fare, independent of distance.
pub const TRAIN_FLAT_FARE: f64 = 10.0;

/// Unrounded fare for travelling `distance_km` by `mode`.
pub fn raw_fare(mode: TransportMode, distance_km: f64) -> f64 {
    let distance_km = distance_km.max(0.0);
    match mode {
        TransportMode::Rickshaw => {
            if distance_km <= RICKSHAW_BASE_KM {
                RICKSHAW_BASE_FARE
            } else {
                RICKSHAW_BASE_FARE + (distance_km - RICKSHAW_BASE_KM) * RICKSHAW_PER_KM
            }
        }
        TransportMode::Car => distance_km * CAR_PER_KM,
        TransportMode::Bus => BUS_BASE_FARE + distance_km * BUS_PER_KM,
        TransportMode::Train => TRAIN_FLAT_FARE,
    }
}

/// Fare in whole rupees for a route of `distance_m` metres.
///
/// Halves round away from zero, so 33.5 becomes 34.
///
/// ```
/// use maps_server::domain::{TransportMode, fare_for_distance};
///
/// assert_eq!(fare_for_distance(TransportMode::Rickshaw, 2_000.0), 34);
/// assert_eq!(fare_for_distance(TransportMode::Train, 42_000.0), 10);
/// ```
pub fn fare_for_distance(mode: TransportMode, distance_m: f64) -> u32 {
    raw_fare(mode, distance_m / 1000.0).round() as u32
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Short rickshaw rides always cost exactly the minimum fare.
        #[test]
        fn short_rickshaw_is_26(distance_m in 0.0f64..=1_500.0) {
            prop_assert_eq!(fare_for_distance(TransportMode::Rickshaw, distance_m), 26);
        }

        /// Train fare ignores distance.
        #[test]
        fn train_always_10(distance_m in 0.0f64..1_000_000.0) {
            prop_assert_eq!(fare_for_distance(TransportMode::Train, distance_m), 10);
        }

        /// Distance-based fares never go down as the route gets longer.
        #[test]
        fn fares_monotonic(a in 0.0f64..200_000.0, b in 0.0f64..200_000.0) {
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            for mode in TransportMode::ALL {
                prop_assert!(fare_for_distance(mode, short) <= fare_for_distance(mode, long));
            }
        }
    }
}
