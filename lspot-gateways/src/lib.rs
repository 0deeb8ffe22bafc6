//! # lspot-gateways
//!
//! Concrete adapters for the external collaborators of localspot: the hosted
//! relational backend, the auth provider, the OpenCage geocoding API, and the
//! device position source.

pub mod auth;
pub mod geolocate;
pub mod opencage;
pub mod postgrest;
