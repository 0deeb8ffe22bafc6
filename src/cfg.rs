use std::env;

use lspot_entities::geo::MapPoint;

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";

#[derive(Debug, Clone)]
pub struct Cfg {
    pub backend_url: String,
    pub backend_api_key: String,
    pub backend_access_token: Option<String>,
    pub opencage_api_key: Option<String>,
    /// Fixed device position, used in place of a geolocation service.
    pub device_pos: Option<MapPoint>,
}

impl Cfg {
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = env::var("BACKEND_URL") {
            cfg.backend_url = url;
        }
        match env::var("BACKEND_API_KEY") {
            Ok(key) => {
                cfg.backend_api_key = key;
            }
            Err(_) => {
                log::warn!("No backend API key found");
            }
        }
        cfg.backend_access_token = env::var("BACKEND_ACCESS_TOKEN").ok();
        match env::var("OPENCAGE_API_KEY") {
            Ok(key) => {
                cfg.opencage_api_key = Some(key);
            }
            Err(_) => {
                log::warn!("No OpenCage API key found");
            }
        }
        cfg.device_pos = device_pos_from_env();
        cfg
    }
}

fn device_pos_from_env() -> Option<MapPoint> {
    let lat = env::var("DEVICE_LAT").ok()?.parse().ok()?;
    let lng = env::var("DEVICE_LNG").ok()?.parse().ok()?;
    let pos = MapPoint::try_from_lat_lng_deg(lat, lng);
    if pos.is_none() {
        log::warn!("Ignoring out-of-range device position {lat},{lng}");
    }
    pos
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            backend_api_key: String::new(),
            backend_access_token: None,
            opencage_api_key: None,
            device_pos: None,
        }
    }
}
