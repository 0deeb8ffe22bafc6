use lspot_gateways::{
    auth::RestAuth, geolocate::DevicePosition, opencage::OpenCage, postgrest::PostgrestGateway,
};

use crate::cfg::Cfg;

pub fn backend_gateway(cfg: &Cfg) -> PostgrestGateway {
    let gw = PostgrestGateway::new(cfg.backend_url.clone(), cfg.backend_api_key.clone());
    gw.set_access_token(cfg.backend_access_token.clone());
    gw
}

pub fn auth_gateway(cfg: &Cfg) -> RestAuth {
    let gw = RestAuth::new(cfg.backend_url.clone(), cfg.backend_api_key.clone());
    gw.restore_access_token(cfg.backend_access_token.clone());
    gw
}

pub fn geocoding_gateway(cfg: &Cfg) -> OpenCage {
    OpenCage::new(cfg.opencage_api_key.clone())
}

pub fn geolocation_gateway(cfg: &Cfg) -> DevicePosition {
    DevicePosition::from_config(cfg.device_pos)
}
