use crate::{geo::MapPoint, id::Id, time::Timestamp};

/// A business entry pinned to coordinates within a city.
///
/// `upvotes`/`downvotes` are cached counters derived from the vote rows of
/// this location; they are maintained by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Id,
    pub business_name: String,
    pub address: String,
    pub pos: MapPoint,
    /// Separately pinned position, if the creator adjusted the map marker.
    pub pin_pos: Option<MapPoint>,
    pub city_id: Id,
    pub created_by: Id,
    pub created_at: Timestamp,
    pub hidden: bool,
    pub upvotes: u32,
    pub downvotes: u32,
}

impl Location {
    /// Upvotes minus downvotes.
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}
