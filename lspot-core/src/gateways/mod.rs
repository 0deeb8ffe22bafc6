pub mod auth;
pub mod geocode;
pub mod geolocate;
