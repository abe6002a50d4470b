//! Domain error types.
//!
//! These errors represent validation failures against the location
//! catalogue and the current route state. They are distinct from
//! network errors.

use super::{CategoryId, LocationId, RouteId, TagId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// No location with this id in the catalogue
    #[error("unknown location: {0}")]
    UnknownLocation(LocationId),

    /// No category with this id in the catalogue
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// No tag with this id in the catalogue
    #[error("unknown tag: {0}")]
    UnknownTag(TagId),

    /// Route id not part of the current estimate
    #[error("route {0} is not one of the current alternatives")]
    UnknownRoute(RouteId),

    /// Zoom level outside the map's range
    #[error("zoom level {0} is outside 0..=22")]
    InvalidZoom(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::UnknownLocation(LocationId::new("nowhere"));
        assert_eq!(err.to_string(), "unknown location: nowhere");

        let err = DomainError::UnknownRoute(RouteId(0x10));
        assert_eq!(
            err.to_string(),
            "route 0000000000000010 is not one of the current alternatives"
        );

        let err = DomainError::InvalidZoom(30.0);
        assert_eq!(err.to_string(), "zoom level 30 is outside 0..=22");
    }
}
