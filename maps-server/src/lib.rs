//! Maps dashboard server.
//!
//! Backs an interactive map: a catalogue of points of interest with
//! category, tag and text filters, user geolocation, and a route panel
//! that turns driving routes from an OSRM server into duration, fare and
//! safety estimates for car, bus, train and rickshaw travel.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod estimator;
pub mod format;
pub mod geolocation;
pub mod routing;
pub mod store;
pub mod web;
