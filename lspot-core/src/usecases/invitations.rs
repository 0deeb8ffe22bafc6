use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub created_by: Id,
    pub sent_to_email: String,
}

/// Issues a fresh single-use access code for the given recipient.
pub fn issue_invitation<R: InvitationRepo>(repo: &R, new: NewInvitation) -> Result<Invitation> {
    let NewInvitation {
        created_by,
        sent_to_email,
    } = new;
    let invitation = Invitation {
        id: Id::new(),
        access_code: Id::new().to_string(),
        created_by,
        sent_to_email,
        redeemed: None,
        created_at: Timestamp::now(),
    };
    log::debug!(
        "Issuing invitation {} for {}",
        invitation.access_code,
        invitation.sent_to_email
    );
    Ok(repo.create_invitation(invitation)?)
}

/// Redeems an access code for the given user.
///
/// A code can only be used once; redeeming an already used code fails.
pub fn redeem_invitation<R: InvitationRepo>(
    repo: &R,
    access_code: &str,
    user_id: &Id,
) -> Result<Invitation> {
    let mut invitation = repo.get_invitation_by_code(access_code)?;
    if invitation.is_redeemed() {
        return Err(Error::AccessCodeUsed);
    }
    invitation.redeemed = Some(Redemption {
        used_by: user_id.clone(),
        used_at: Timestamp::now(),
    });
    repo.update_invitation(&invitation)?;
    Ok(invitation)
}
