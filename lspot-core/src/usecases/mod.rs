use crate::entities::*;

mod duplicates;
mod error;
mod filter_locations;
mod invitations;
mod moderation;
mod settings;
mod vote;

pub use self::{
    duplicates::*, error::Error, filter_locations::*, invitations::*, moderation::*, settings::*,
    vote::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}

/// A review annotated with the current user's vote on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewView {
    pub review: Review,
    pub user_vote: Option<VoteDirection>,
}

/// A location aggregate as displayed to the current user: the row itself,
/// its city and reviews, and the per-user vote/favorite annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationView {
    pub location: Location,
    pub city: City,
    pub reviews: Vec<ReviewView>,
    pub user_vote: Option<VoteDirection>,
    pub is_favorited: bool,
}

impl From<crate::repositories::PopulatedLocation> for LocationView {
    fn from(from: crate::repositories::PopulatedLocation) -> Self {
        let crate::repositories::PopulatedLocation {
            location,
            city,
            reviews,
        } = from;
        Self {
            location,
            city,
            reviews: reviews
                .into_iter()
                .map(|review| ReviewView {
                    review,
                    user_vote: None,
                })
                .collect(),
            user_vote: None,
            is_favorited: false,
        }
    }
}
