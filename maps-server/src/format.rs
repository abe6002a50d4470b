//! Human-readable durations and distances for the route panel.

/// Format a duration given in seconds.
///
/// Rounds to whole minutes; an hour or more is shown as hours and minutes.
///
/// ```
/// use maps_server::format::format_duration;
///
/// assert_eq!(format_duration(754), "13 min");
/// assert_eq!(format_duration(5_400), "1h 30m");
/// ```
pub fn format_duration(secs: u64) -> String {
    let mins = (secs + 30) / 60;
    if mins < 60 {
        format!("{mins} min")
    } else {
        format!("{}h {}m", mins / 60, mins % 60)
    }
}

/// Format a distance given in metres.
///
/// ```
/// use maps_server::format::format_distance;
///
/// assert_eq!(format_distance(850.4), "850 m");
/// assert_eq!(format_distance(6_412.3), "6.4 km");
/// ```
pub fn format_distance(metres: f64) -> String {
    if metres < 1000.0 {
        format!("{} m", metres.round())
    } else {
        format!("{:.1} km", metres / 1000.0)
    }
}
