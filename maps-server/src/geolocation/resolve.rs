//! Device position first, IP lookup as fallback.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::LatLng;

use super::IpLocator;

/// What the browser's geolocation API reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DevicePosition {
    /// The device supplied a position.
    Available { position: LatLng },
    /// The user refused the permission prompt.
    Denied,
    /// No geolocation support, or it timed out.
    Unavailable,
}

/// Where a resolved position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    Device,
    Ip,
}

/// A user position and its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub position: LatLng,
    pub source: LocationSource,
}

/// Resolve the user's position.
///
/// A device position always wins. Otherwise the IP service is asked once;
/// its failures are logged and yield `None`, leaving the caller's state
/// unchanged.
pub async fn resolve_user_location<L>(device: DevicePosition, ip: &L) -> Option<ResolvedLocation>
where
    L: IpLocator + ?Sized,
{
    if let DevicePosition::Available { position } = device {
        return Some(ResolvedLocation {
            position,
            source: LocationSource::Device,
        });
    }

    match ip.locate().await {
        Ok(position) => {
            info!(%position, ?device, "resolved user location from IP");
            Some(ResolvedLocation {
                position,
                source: LocationSource::Ip,
            })
        }
        Err(e) => {
            warn!(error = %e, "IP geolocation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::geolocation::GeolocationError;

    struct StubLocator {
        position: Option<LatLng>,
        calls: AtomicUsize,
    }

    impl StubLocator {
        fn new(position: Option<LatLng>) -> Self {
            Self {
                position,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IpLocator for StubLocator {
        async fn locate(&self) -> Result<LatLng, GeolocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.position.ok_or_else(|| GeolocationError::NoPosition {
                reason: "stub".to_string(),
            })
        }
    }

    fn mumbai() -> LatLng {
        LatLng::new(19.076, 72.8777).unwrap()
    }

    fn delhi() -> LatLng {
        LatLng::new(28.6139, 77.209).unwrap()
    }

    #[tokio::test]
    async fn device_position_wins_without_lookup() {
        let stub = StubLocator::new(Some(delhi()));
        let resolved = resolve_user_location(
            DevicePosition::Available { position: mumbai() },
            &stub,
        )
        .await
        .unwrap();

        assert_eq!(resolved.position, mumbai());
        assert_eq!(resolved.source, LocationSource::Device);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn denial_falls_back_to_ip() {
        let stub = StubLocator::new(Some(delhi()));
        let resolved = resolve_user_location(DevicePosition::Denied, &stub)
            .await
            .unwrap();

        assert_eq!(resolved.position, delhi());
        assert_eq!(resolved.source, LocationSource::Ip);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ip_failure_yields_none() {
        let stub = StubLocator::new(None);
        assert!(
            resolve_user_location(DevicePosition::Unavailable, &stub)
                .await
                .is_none()
        );
    }

    #[test]
    fn device_position_json_shape() {
        let json = r#"{"status":"available","position":{"lat":19.076,"lng":72.8777}}"#;
        let device: DevicePosition = serde_json::from_str(json).unwrap();
        assert_eq!(device, DevicePosition::Available { position: mumbai() });

        let denied: DevicePosition = serde_json::from_str(r#"{"status":"denied"}"#).unwrap();
        assert_eq!(denied, DevicePosition::Denied);
    }
}
