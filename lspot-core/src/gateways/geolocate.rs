use std::time::Duration;

use thiserror::Error;

use crate::entities::MapPoint;

#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Timeout while acquiring the current position")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Acquisition policy for a single position query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Cached fixes up to this age are acceptable.
    pub maximum_age: Duration,
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

pub trait GeolocationGateway {
    fn current_position(&self, request: &PositionRequest) -> Result<MapPoint, GeolocationError>;
}
