use thiserror::Error;

use crate::entities::Id;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An authenticated identity as reported by the auth provider.
///
/// The profile row of the user is a separate concern and is loaded through
/// `UserRepo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Id,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

pub type SessionListener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

pub trait AuthGateway {
    /// The currently persisted session, if any.
    fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Builds the provider URL that starts the Google OAuth redirect flow.
    /// The flow returns to `redirect_to` on completion.
    fn google_sign_in_url(&self, redirect_to: &str) -> Result<String, AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;

    /// Registers a listener for future session changes.
    fn subscribe(&self, listener: SessionListener);
}
