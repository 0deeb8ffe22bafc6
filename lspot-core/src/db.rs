use crate::repositories::*;

/// The complete remote data gateway contract.
pub trait Db:
    UserRepo
    + CityRepo
    + LocationRepo
    + ReviewRepo
    + VoteRepo
    + FavoriteRepo
    + InvitationRepo
    + AdminActionRepo
    + AppSettingRepo
{
}

impl<T> Db for T where
    T: UserRepo
        + CityRepo
        + LocationRepo
        + ReviewRepo
        + VoteRepo
        + FavoriteRepo
        + InvitationRepo
        + AdminActionRepo
        + AppSettingRepo
{
}
