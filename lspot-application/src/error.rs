use thiserror::Error;

use lspot_core::{
    gateways::{auth::AuthError, geocode::GeocodeError, geolocate::GeolocationError},
    repositories::Error as RepoError,
    usecases::Error as UsecaseError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] UsecaseError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        Self::Business(err.into())
    }
}

impl AppError {
    /// True if the error is the "sign in first" precondition.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Business(UsecaseError::Unauthorized))
    }
}
