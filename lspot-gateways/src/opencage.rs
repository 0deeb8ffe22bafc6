use serde::Deserialize;

use lspot_core::gateways::geocode::{
    AddressComponents, GeoCodingGateway, GeocodeError, GeocodedPlace,
};
use lspot_entities::geo::MapPoint;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

// Forward geocoding is restricted to a single country.
const COUNTRY_CODE: &str = "us";

const FORWARD_RESULT_LIMIT: u8 = 5;
const REVERSE_RESULT_LIMIT: u8 = 1;

/// Geocoding gateway backed by the OpenCage JSON API.
#[derive(Debug)]
pub struct OpenCage {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl OpenCage {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(
        &self,
        query: &str,
        limit: u8,
        country_code: Option<&str>,
    ) -> Result<Vec<GeocodedPlace>, GeocodeError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GeocodeError::MissingApiKey);
        };
        let mut params = vec![
            ("q", query.to_string()),
            ("key", api_key.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(country_code) = country_code {
            params.push(("countrycode", country_code.to_string()));
        }
        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(
                anyhow::anyhow!("Geocoding request failed: {}", response.status()).into(),
            );
        }
        let response: OcResponse = response.json().map_err(anyhow::Error::from)?;
        if response.results.is_empty() {
            return Err(GeocodeError::NoResults);
        }
        Ok(response.results.into_iter().map(Into::into).collect())
    }
}

impl GeoCodingGateway for OpenCage {
    fn geocode_address(&self, address: &str) -> Result<Vec<GeocodedPlace>, GeocodeError> {
        let results = self.request(address, FORWARD_RESULT_LIMIT, Some(COUNTRY_CODE))?;
        log::debug!("Resolved '{}' to {} candidate(s)", address, results.len());
        Ok(results)
    }

    fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<GeocodedPlace, GeocodeError> {
        let query = format!("{lat}+{lng}");
        let mut results = self.request(&query, REVERSE_RESULT_LIMIT, None)?;
        Ok(results.remove(0))
    }
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    results: Vec<OcResult>,
}

#[derive(Debug, Deserialize)]
struct OcResult {
    geometry: OcGeometry,
    formatted: String,
    confidence: u8,
    #[serde(default)]
    components: OcComponents,
}

#[derive(Debug, Deserialize)]
struct OcGeometry {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OcComponents {
    country: Option<String>,
    state: Option<String>,
    city: Option<String>,
    postcode: Option<String>,
    road: Option<String>,
    house_number: Option<String>,
}

impl From<OcResult> for GeocodedPlace {
    fn from(from: OcResult) -> Self {
        let OcResult {
            geometry,
            formatted,
            confidence,
            components,
        } = from;
        let OcComponents {
            country,
            state,
            city,
            postcode,
            road,
            house_number,
        } = components;
        Self {
            pos: MapPoint::from_lat_lng_deg(geometry.lat, geometry.lng),
            formatted_address: formatted,
            confidence,
            components: AddressComponents {
                country,
                state,
                city,
                postcode,
                road,
                house_number,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key() {
        let gw = OpenCage::new(None).with_base_url("http://localhost:1");
        assert!(matches!(
            gw.geocode_address("123 Main St"),
            Err(GeocodeError::MissingApiKey)
        ));
        assert!(matches!(
            gw.reverse_geocode(39.78, -89.65),
            Err(GeocodeError::MissingApiKey)
        ));
    }

    #[test]
    fn deserialize_result() {
        let json = r#"{
            "results": [{
                "geometry": { "lat": 39.799, "lng": -89.644 },
                "formatted": "123 Main St, Springfield, IL, United States",
                "confidence": 9,
                "components": {
                    "country": "United States",
                    "state": "Illinois",
                    "city": "Springfield",
                    "postcode": "62701",
                    "road": "Main St",
                    "house_number": "123"
                }
            }]
        }"#;
        let response: OcResponse = serde_json::from_str(json).unwrap();
        let place = GeocodedPlace::from(response.results.into_iter().next().unwrap());
        assert_eq!(place.pos, MapPoint::from_lat_lng_deg(39.799, -89.644));
        assert_eq!(place.confidence, 9);
        assert_eq!(place.components.city.as_deref(), Some("Springfield"));
    }
}
