use crate::{id::Id, time::Timestamp};

/// A user's bookmark of a location.
///
/// Existence of the row implies "favorited"; unfavoriting deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub id: Id,
    pub user_id: Id,
    pub location_id: Id,
    pub created_at: Timestamp,
}
