use crate::{id::Id, time::Timestamp};

/// Profile row of a registered user.
///
/// Created on first sign-in and never hard-deleted.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id                       : Id,
    pub email                    : String,
    pub created_at               : Timestamp,
    pub is_admin                 : bool,
    pub daily_review_limit       : u32,
    pub pending_invitations      : u32,
    pub last_invitation_received : Option<Timestamp>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub daily_review_limit: Option<u32>,
    pub pending_invitations: Option<u32>,
    pub last_invitation_received: Option<Option<Timestamp>>,
}
