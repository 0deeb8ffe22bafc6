use thiserror::Error;

use crate::{id::Id, time::Timestamp};

/// A user-submitted rating/comment attached to a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Id,
    pub location_id: Id,
    pub user_id: Id,
    pub title: Option<String>,
    pub address_note: Option<String>,
    pub star_rating: StarRating,
    pub review_text: Option<String>,
    pub photos: Option<Vec<String>>,
    pub created_at: Timestamp,
    pub hidden: bool,
    pub upvotes: u32,
    pub downvotes: u32,
}

/// A star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StarRating(u8);

impl StarRating {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }
}

#[derive(Debug, Error)]
#[error("Star rating out of range: {0}")]
pub struct InvalidStarRating(u8);

impl TryFrom<u8> for StarRating {
    type Error = InvalidStarRating;
    fn try_from(from: u8) -> Result<Self, Self::Error> {
        let rating = Self(from);
        (rating >= Self::min() && rating <= Self::max())
            .then_some(rating)
            .ok_or(InvalidStarRating(from))
    }
}

impl From<StarRating> for u8 {
    fn from(from: StarRating) -> Self {
        from.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_rating_range() {
        assert!(StarRating::try_from(0).is_err());
        assert!(StarRating::try_from(1).is_ok());
        assert!(StarRating::try_from(5).is_ok());
        assert!(StarRating::try_from(6).is_err());
        let err = StarRating::try_from(6).unwrap_err();
        assert_eq!(err.to_string(), "Star rating out of range: 6");
    }
}
