use thiserror::Error;

use crate::entities::MapPoint;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoding API key not configured")]
    MissingApiKey,
    #[error("No results found")]
    NoResults,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Structured parts of a resolved address, as far as the provider knows them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressComponents {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub road: Option<String>,
    pub house_number: Option<String>,
}

/// A single geocoding candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub pos: MapPoint,
    pub formatted_address: String,
    /// Provider confidence, higher is better.
    pub confidence: u8,
    pub components: AddressComponents,
}

pub trait GeoCodingGateway {
    /// Resolves a free-text address to candidates ordered by provider
    /// confidence.
    fn geocode_address(&self, address: &str) -> Result<Vec<GeocodedPlace>, GeocodeError>;

    /// Resolves coordinates to the single best-matching address.
    fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<GeocodedPlace, GeocodeError>;
}
