//! Stateful application layer on top of the core use cases.
//!
//! The stores wrap the blocking gateways with mutex-guarded state so that a
//! UI layer can drive them from its own threads. No store retries or queues
//! anything; every method maps to at most a handful of backend calls.

#[macro_use]
extern crate log;

pub mod error;
pub mod guard;
pub mod locations;
pub mod session;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use lspot_core::{db::Db, entities::*, repositories, usecases};

#[cfg(test)]
pub(crate) mod tests;
