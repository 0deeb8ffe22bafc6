use std::sync::{Arc, Condvar, Mutex};

use lspot_core::gateways::auth::{AuthGateway, Session, SessionEvent};

use crate::{usecases, Db, Id, Invitation, Timestamp, User, UserUpdate};

/// Holds the authenticated session and the matching profile row.
///
/// `initialize` must be called once before any consumer relies on
/// `is_logged_in`/`is_admin`; until it finishes, readers can block on
/// `wait_until_ready`.
pub struct SessionStore<A, D> {
    auth: Arc<A>,
    db: Arc<D>,
    state: Arc<SessionState>,
}

#[derive(Default)]
struct SessionState {
    inner: Mutex<Inner>,
    ready: Condvar,
}

#[derive(Default)]
struct Inner {
    session: Option<Session>,
    profile: Option<User>,
    loading: bool,
    initialized: bool,
}

impl SessionState {
    fn apply(&self, event: &SessionEvent, profile: Option<User>) {
        let mut inner = self.inner.lock().unwrap();
        match event {
            SessionEvent::SignedIn(session) => {
                inner.session = Some(session.clone());
                inner.profile = profile;
            }
            SessionEvent::SignedOut => {
                inner.session = None;
                inner.profile = None;
            }
        }
    }
}

fn fetch_profile<D: Db>(db: &D, user_id: &Id) -> Option<User> {
    match db.get_user(user_id) {
        Ok(user) => Some(user),
        Err(err) => {
            // The session stays usable without a profile row.
            warn!("Failed to load the profile of user {user_id}: {err}");
            None
        }
    }
}

impl<A, D> SessionStore<A, D>
where
    A: AuthGateway + Send + Sync + 'static,
    D: Db + Send + Sync + 'static,
{
    pub fn new(auth: Arc<A>, db: Arc<D>) -> Self {
        Self {
            auth,
            db,
            state: Arc::new(SessionState::default()),
        }
    }

    /// Restores a persisted session (if any), loads the profile row and
    /// subscribes to future session changes.
    ///
    /// Marks the store as initialized even when the session lookup fails, so
    /// that waiters are never left blocked.
    pub fn initialize(&self) -> crate::Result<()> {
        self.state.inner.lock().unwrap().loading = true;

        let result = self.auth.current_session();
        let session = match result {
            Ok(session) => session,
            Err(err) => {
                self.finish_loading();
                return Err(err.into());
            }
        };

        if let Some(session) = session {
            let profile = fetch_profile(&*self.db, &session.user_id);
            self.state.apply(&SessionEvent::SignedIn(session), profile);
        }

        // Subscribe after the initial check so the listener never races it.
        let state = Arc::clone(&self.state);
        let db = Arc::clone(&self.db);
        self.auth.subscribe(Box::new(move |event| {
            let profile = match event {
                SessionEvent::SignedIn(session) => fetch_profile(&*db, &session.user_id),
                SessionEvent::SignedOut => None,
            };
            state.apply(event, profile);
        }));

        self.finish_loading();
        Ok(())
    }

    fn finish_loading(&self) {
        let mut inner = self.state.inner.lock().unwrap();
        inner.loading = false;
        inner.initialized = true;
        drop(inner);
        self.state.ready.notify_all();
    }

    /// Blocks until `initialize` has completed.
    pub fn wait_until_ready(&self) {
        let mut inner = self.state.inner.lock().unwrap();
        while !inner.initialized {
            inner = self.state.ready.wait(inner).unwrap();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.inner.lock().unwrap().loading
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.inner.lock().unwrap().session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .inner
            .lock()
            .unwrap()
            .profile
            .as_ref()
            .is_some_and(|profile| profile.is_admin)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.inner.lock().unwrap().session.clone()
    }

    pub fn profile(&self) -> Option<User> {
        self.state.inner.lock().unwrap().profile.clone()
    }

    pub(crate) fn current_user_id(&self) -> crate::Result<Id> {
        self.current_session()
            .map(|session| session.user_id)
            .ok_or(usecases::Error::Unauthorized.into())
    }

    /// The provider URL that starts the Google OAuth flow. The flow returns
    /// to `{app_origin}/auth/callback` on completion.
    pub fn sign_in_with_google_url(&self, app_origin: &str) -> crate::Result<String> {
        let redirect_to = format!("{app_origin}/auth/callback");
        Ok(self.auth.google_sign_in_url(&redirect_to)?)
    }

    pub fn sign_out(&self) -> crate::Result<()> {
        self.auth.sign_out()?;
        // The subscribed listener clears the state as well; doing it here
        // keeps the store correct even without a completed `initialize`.
        self.state.apply(&SessionEvent::SignedOut, None);
        Ok(())
    }

    /// Write-through profile update. The cached profile is only replaced
    /// when the backend accepted the change.
    pub fn update_profile(&self, update: &UserUpdate) -> crate::Result<User> {
        let user_id = self.current_user_id()?;
        let updated = self.db.update_user(&user_id, update)?;
        self.state.inner.lock().unwrap().profile = Some(updated.clone());
        Ok(updated)
    }

    /// Issues an invitation on behalf of the signed-in user and deducts it
    /// from the user's remaining invitation budget.
    pub fn invite(&self, sent_to_email: &str) -> crate::Result<Invitation> {
        let user_id = self.current_user_id()?;
        let profile = self
            .profile()
            .ok_or(usecases::Error::Unauthorized)?;
        if profile.pending_invitations == 0 {
            return Err(usecases::Error::Forbidden.into());
        }
        let invitation = usecases::issue_invitation(
            &*self.db,
            usecases::NewInvitation {
                created_by: user_id.clone(),
                sent_to_email: sent_to_email.to_owned(),
            },
        )?;
        let update = UserUpdate {
            pending_invitations: Some(profile.pending_invitations - 1),
            last_invitation_received: Some(Some(Timestamp::now())),
            ..Default::default()
        };
        let updated = self.db.update_user(&user_id, &update)?;
        self.state.inner.lock().unwrap().profile = Some(updated);
        Ok(invitation)
    }

    /// Redeems a single-use access code for the signed-in user.
    pub fn redeem_invitation(&self, access_code: &str) -> crate::Result<Invitation> {
        let user_id = self.current_user_id()?;
        Ok(usecases::redeem_invitation(
            &*self.db,
            access_code,
            &user_id,
        )?)
    }
}
