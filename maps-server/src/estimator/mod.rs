//! Route estimator.
//!
//! Given the user's position and a destination, fetches driving routes
//! once and derives, for every alternative, a duration for the chosen
//! transport mode, a flat-rate fare and a safety score.
//!
//! Durations for non-car modes are approximations: the driving duration
//! scaled by a fixed speed ratio, not a mode-specific routing query.

mod config;
mod estimate;
mod safety;

pub use config::EstimatorConfig;
pub use estimate::{
    EstimateError, EstimateRequest, RouteEstimator, derive_alternative, derive_estimate,
};
pub use safety::{MAX_SAFETY_SCORE, SafetyScorer};
