use super::prelude::*;

/// Hides or unhides a location and records the moderation action.
pub fn set_location_visibility<R>(
    repo: &R,
    admin: &User,
    location_id: &Id,
    hidden: bool,
    reason: Option<String>,
) -> Result<()>
where
    R: LocationRepo + AdminActionRepo,
{
    if !admin.is_admin {
        return Err(Error::Forbidden);
    }
    repo.set_location_hidden(location_id, hidden)?;
    let action = if hidden {
        AdminActionKind::HideLocation
    } else {
        AdminActionKind::UnhideLocation
    };
    audit(repo, admin, action, location_id, reason)
}

/// Hides or unhides a review and records the moderation action.
pub fn set_review_visibility<R>(
    repo: &R,
    admin: &User,
    review_id: &Id,
    hidden: bool,
    reason: Option<String>,
) -> Result<()>
where
    R: ReviewRepo + AdminActionRepo,
{
    if !admin.is_admin {
        return Err(Error::Forbidden);
    }
    repo.set_review_hidden(review_id, hidden)?;
    let action = if hidden {
        AdminActionKind::HideReview
    } else {
        AdminActionKind::UnhideReview
    };
    audit(repo, admin, action, review_id, reason)
}

fn audit<R: AdminActionRepo>(
    repo: &R,
    admin: &User,
    action: AdminActionKind,
    target_id: &Id,
    reason: Option<String>,
) -> Result<()> {
    repo.log_admin_action(AdminAction {
        id: Id::new(),
        admin_user_id: admin.id.clone(),
        action,
        target_id: target_id.clone(),
        reason,
        created_at: Timestamp::now(),
    })?;
    Ok(())
}
