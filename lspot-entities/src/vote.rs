use strum::{Display, EnumString};

use crate::{id::Id, time::Timestamp};

/// The direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

/// The entity class a vote may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VoteTargetKind {
    Location,
    Review,
}

/// The entity a vote refers to.
///
/// Votes on locations and reviews share one backend table discriminated by a
/// (`target_type`, `target_id`) pair; the sum type makes the "target type
/// matches entity class" invariant structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteTarget {
    Location(Id),
    Review(Id),
}

impl VoteTarget {
    pub const fn kind(&self) -> VoteTargetKind {
        match self {
            Self::Location(_) => VoteTargetKind::Location,
            Self::Review(_) => VoteTargetKind::Review,
        }
    }

    pub const fn id(&self) -> &Id {
        match self {
            Self::Location(id) | Self::Review(id) => id,
        }
    }
}

/// A directional endorsement of a location or review by a user.
///
/// At most one vote exists per (user, target); replacing an existing vote is
/// expressed as an upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Id,
    pub user_id: Id,
    pub target: VoteTarget,
    pub direction: VoteDirection,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings() {
        assert_eq!(VoteDirection::Up.to_string(), "up");
        assert_eq!("down".parse::<VoteDirection>().unwrap(), VoteDirection::Down);
        assert_eq!(VoteTargetKind::Review.to_string(), "review");
        assert_eq!(
            "location".parse::<VoteTargetKind>().unwrap(),
            VoteTargetKind::Location
        );
    }

    #[test]
    fn target_kind_matches_entity_class() {
        let target = VoteTarget::Location(Id::new());
        assert_eq!(target.kind(), VoteTargetKind::Location);
        let target = VoteTarget::Review(Id::new());
        assert_eq!(target.kind(), VoteTargetKind::Review);
    }
}
