use super::*;

use crate::{
    error::AppError,
    guard::{before_navigation, route_meta, NavOutcome},
    usecases,
};

#[test]
fn anonymous_initialization_completes() {
    let fx = Fixture::anonymous();
    fx.session.wait_until_ready();
    assert!(!fx.session.is_loading());
    assert!(!fx.session.is_logged_in());
    assert!(!fx.session.is_admin());
    assert_eq!(fx.session.profile(), None);
}

#[test]
fn persisted_session_restores_profile() {
    let fx = Fixture::signed_in(member());
    assert!(fx.session.is_logged_in());
    assert!(!fx.session.is_admin());
    let profile = fx.session.profile().unwrap();
    assert_eq!(profile.email, "member@example.com");
}

#[test]
fn failed_session_lookup_still_unblocks_waiters() {
    let db = Arc::new(MockDb::default());
    let auth = Arc::new(MockAuth::default());
    auth.fail_session_lookup.store(true, Ordering::SeqCst);
    let session = SessionStore::new(Arc::clone(&auth), db);
    assert!(session.initialize().is_err());
    session.wait_until_ready();
    assert!(!session.is_loading());
    assert!(!session.is_logged_in());
}

#[test]
fn sign_in_event_updates_the_store() {
    let fx = Fixture::anonymous();
    let user = member();
    fx.db.users.lock().unwrap().push(user.clone());

    fx.auth.emit_sign_in(Session {
        user_id: user.id.clone(),
        email: user.email.clone(),
    });

    assert!(fx.session.is_logged_in());
    assert_eq!(fx.session.profile().unwrap().id, user.id);
}

#[test]
fn sign_out_clears_session_and_profile() {
    let fx = Fixture::signed_in(admin());
    assert!(fx.session.is_admin());

    fx.session.sign_out().unwrap();

    assert!(!fx.session.is_logged_in());
    assert!(!fx.session.is_admin());
    assert_eq!(fx.session.profile(), None);
}

#[test]
fn google_sign_in_url_returns_to_the_callback_route() {
    let fx = Fixture::anonymous();
    let url = fx
        .session
        .sign_in_with_google_url("https://app.example.com")
        .unwrap();
    assert!(url.contains("https://app.example.com/auth/callback"));
}

#[test]
fn update_profile_writes_through() {
    let fx = Fixture::signed_in(member());
    let updated = fx
        .session
        .update_profile(&UserUpdate {
            daily_review_limit: Some(3),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(updated.daily_review_limit, 3);
    assert_eq!(fx.session.profile().unwrap().daily_review_limit, 3);
    assert_eq!(fx.db.users.lock().unwrap()[0].daily_review_limit, 3);
}

#[test]
fn update_profile_failure_leaves_the_cache_untouched() {
    let fx = Fixture::signed_in(member());
    let before = fx.session.profile().unwrap();

    fx.db.fail_next_user_update.store(true, Ordering::SeqCst);
    let result = fx.session.update_profile(&UserUpdate {
        daily_review_limit: Some(3),
        ..Default::default()
    });

    assert!(result.is_err());
    assert_eq!(fx.session.profile().unwrap(), before);
}

#[test]
fn update_profile_requires_sign_in() {
    let fx = Fixture::anonymous();
    let err = fx
        .session
        .update_profile(&UserUpdate::default())
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn invitations_are_single_use() {
    let mut user = member();
    user.pending_invitations = 2;
    let fx = Fixture::signed_in(user);

    let invitation = fx.session.invite("friend@example.com").unwrap();
    assert_eq!(fx.session.profile().unwrap().pending_invitations, 1);
    assert!(fx
        .session
        .profile()
        .unwrap()
        .last_invitation_received
        .is_some());

    let redeemed = fx
        .session
        .redeem_invitation(&invitation.access_code)
        .unwrap();
    assert!(redeemed.is_redeemed());

    let err = fx
        .session
        .redeem_invitation(&invitation.access_code)
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Business(usecases::Error::AccessCodeUsed)
    ));
}

#[test]
fn inviting_without_budget_is_forbidden() {
    let fx = Fixture::signed_in(member());
    let err = fx.session.invite("friend@example.com").unwrap_err();
    assert!(matches!(
        err,
        AppError::Business(usecases::Error::Forbidden)
    ));
    assert!(fx.db.invitations.lock().unwrap().is_empty());
}

#[test]
fn gate_redirects_anonymous_users_from_guarded_routes() {
    let fx = Fixture::anonymous();
    assert_eq!(
        before_navigation(&fx.session, route_meta("/dashboard")),
        NavOutcome::RedirectHome
    );
    assert_eq!(
        before_navigation(&fx.session, route_meta("/add-location")),
        NavOutcome::RedirectHome
    );
    assert_eq!(
        before_navigation(&fx.session, route_meta("/")),
        NavOutcome::Proceed
    );
    assert_eq!(
        before_navigation(&fx.session, route_meta("/location/abc")),
        NavOutcome::Proceed
    );
}

#[test]
fn gate_redirects_non_admins_from_admin_routes() {
    let fx = Fixture::signed_in(member());
    assert_eq!(
        before_navigation(&fx.session, route_meta("/admin")),
        NavOutcome::RedirectHome
    );
    assert_eq!(
        before_navigation(&fx.session, route_meta("/dashboard")),
        NavOutcome::Proceed
    );

    let fx = Fixture::signed_in(admin());
    assert_eq!(
        before_navigation(&fx.session, route_meta("/admin")),
        NavOutcome::Proceed
    );
}

#[test]
fn first_admin_route_is_not_gated_beyond_auth() {
    let fx = Fixture::signed_in(member());
    assert_eq!(
        before_navigation(&fx.session, route_meta("/admin/setup")),
        NavOutcome::Proceed
    );
}
