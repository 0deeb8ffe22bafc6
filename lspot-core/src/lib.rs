#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # lspot-core
//!
//! Business contracts of localspot: the repository traits implemented by the
//! remote data gateway, the traits of the external gateways (geocoding,
//! geolocation, authentication), and the pure use cases that operate on them.

pub mod db;
pub mod gateways;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use lspot_entities::{
        admin::*, city::*, favorite::*, geo::*, id::*, invitation::*, location::*, review::*,
        settings::*, time::*, user::*, vote::*,
    };
}
