use strum::{Display, EnumString};

use crate::{id::Id, time::Timestamp};

/// Audit record of a moderation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAction {
    pub id: Id,
    pub admin_user_id: Id,
    pub action: AdminActionKind,
    pub target_id: Id,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AdminActionKind {
    HideLocation,
    UnhideLocation,
    HideReview,
    UnhideReview,
}
