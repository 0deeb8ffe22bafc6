use crate::{id::Id, time::Timestamp};

/// Reference data: a city with its geographic bounds.
///
/// The shape of `bounds` is defined by the backend (e.g. a GeoJSON polygon)
/// and is passed through without interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: Id,
    pub name: String,
    pub state: String,
    pub country: String,
    pub bounds: serde_json::Value,
    pub created_at: Timestamp,
}
