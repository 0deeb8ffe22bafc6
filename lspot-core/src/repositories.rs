// Low-level data access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id, except where the backend expands nested
// relations in a single read (see `PopulatedLocation`).

use std::io;

use thiserror::Error;

use crate::entities::*;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The backend denied the operation")]
    Forbidden,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// A location row together with its eagerly loaded relations.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedLocation {
    pub location: Location,
    pub city: City,
    pub reviews: Vec<Review>,
}

pub trait UserRepo {
    fn get_user(&self, id: &Id) -> Result<User>;

    /// Applies a partial update and returns the updated row.
    fn update_user(&self, id: &Id, update: &UserUpdate) -> Result<User>;
}

pub trait CityRepo {
    // Ordered by name
    fn all_cities(&self) -> Result<Vec<City>>;
}

pub trait LocationRepo {
    // Only locations that are not hidden, with city and reviews expanded
    fn visible_locations(&self, city_id: Option<&Id>) -> Result<Vec<PopulatedLocation>>;

    /// Case-insensitive substring match against the address column,
    /// restricted to visible locations.
    fn visible_locations_with_similar_address(
        &self,
        fragment: &str,
    ) -> Result<Vec<PopulatedLocation>>;

    /// Returns the created row.
    fn create_location(&self, location: Location) -> Result<Location>;

    fn delete_location(&self, id: &Id) -> Result<()>;

    fn set_location_hidden(&self, id: &Id, hidden: bool) -> Result<()>;
}

pub trait ReviewRepo {
    /// Returns the created row.
    fn create_review(&self, review: Review) -> Result<Review>;

    fn review_ids_of_locations(&self, location_ids: &[Id]) -> Result<Vec<Id>>;

    fn set_review_hidden(&self, id: &Id, hidden: bool) -> Result<()>;
}

pub trait VoteRepo {
    /// All votes of one user on the given targets of one entity class.
    fn user_votes(
        &self,
        user_id: &Id,
        kind: VoteTargetKind,
        target_ids: &[Id],
    ) -> Result<Vec<Vote>>;

    /// Insert-or-replace on the (user, target) pair.
    fn upsert_vote(&self, vote: Vote) -> Result<()>;

    fn delete_vote(&self, user_id: &Id, target: &VoteTarget) -> Result<()>;
}

pub trait FavoriteRepo {
    /// This user's favorites among the given locations.
    fn user_favorites(&self, user_id: &Id, location_ids: &[Id]) -> Result<Vec<Favorite>>;

    fn create_favorite(&self, favorite: Favorite) -> Result<()>;

    fn delete_favorite(&self, user_id: &Id, location_id: &Id) -> Result<()>;
}

pub trait InvitationRepo {
    fn create_invitation(&self, invitation: Invitation) -> Result<Invitation>;

    fn get_invitation_by_code(&self, access_code: &str) -> Result<Invitation>;

    fn update_invitation(&self, invitation: &Invitation) -> Result<()>;
}

pub trait AdminActionRepo {
    fn log_admin_action(&self, action: AdminAction) -> Result<()>;
}

pub trait AppSettingRepo {
    fn get_setting(&self, key: &str) -> Result<AppSetting>;

    /// Insert-or-replace on the key.
    fn put_setting(&self, setting: AppSetting) -> Result<()>;
}
