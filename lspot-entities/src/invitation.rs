use crate::{id::Id, time::Timestamp};

/// A single-use access code granting sign-up eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Id,
    pub access_code: String,
    pub created_by: Id,
    pub sent_to_email: String,
    pub redeemed: Option<Redemption>,
    pub created_at: Timestamp,
}

impl Invitation {
    pub const fn is_redeemed(&self) -> bool {
        self.redeemed.is_some()
    }
}

/// Who redeemed an invitation, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub used_by: Id,
    pub used_at: Timestamp,
}
