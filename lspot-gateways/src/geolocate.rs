use lspot_core::gateways::geolocate::{GeolocationError, GeolocationGateway, PositionRequest};
use lspot_entities::geo::MapPoint;

/// Position source fed from configuration.
///
/// There is no browser geolocation capability in this stack; deployments
/// provide the device position (if any) through the environment. A fixed
/// position trivially satisfies any accuracy/age policy, so the request
/// parameters are not consulted.
#[derive(Debug, Clone, Copy)]
pub struct DevicePosition {
    pos: Option<MapPoint>,
}

impl DevicePosition {
    pub const fn from_config(pos: Option<MapPoint>) -> Self {
        Self { pos }
    }

    pub const fn unsupported() -> Self {
        Self { pos: None }
    }
}

impl GeolocationGateway for DevicePosition {
    fn current_position(&self, _request: &PositionRequest) -> Result<MapPoint, GeolocationError> {
        self.pos.ok_or(GeolocationError::Unsupported)
    }
}
