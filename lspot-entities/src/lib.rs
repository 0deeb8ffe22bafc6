#![deny(missing_debug_implementations)]
#![cfg_attr(test, deny(warnings))]

//! # lspot-entities
//!
//! Reusable, agnostic domain entities for localspot.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod admin;
pub mod city;
pub mod favorite;
pub mod geo;
pub mod id;
pub mod invitation;
pub mod location;
pub mod review;
pub mod settings;
pub mod time;
pub mod user;
pub mod vote;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
