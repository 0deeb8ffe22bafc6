//! Gateway to the hosted auth provider (GoTrue-style HTTP API).

use std::sync::Mutex;

use serde::Deserialize;

use lspot_core::gateways::auth::{
    AuthError, AuthGateway, Session, SessionEvent, SessionListener,
};

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: String,
    email: String,
}

/// Auth gateway over the backend's `/auth/v1` endpoints.
///
/// The access token is whatever the OAuth redirect flow handed to the app;
/// persisting it between runs is up to the caller.
pub struct RestAuth {
    base_url: String,
    api_key: String,
    access_token: Mutex<Option<String>>,
    listeners: Mutex<Vec<SessionListener>>,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for RestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestAuth")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestAuth {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Restores a token persisted by an earlier run, without validating it.
    /// A stale token surfaces as an anonymous session on the next lookup.
    pub fn restore_access_token(&self, token: Option<String>) {
        *self.access_token.lock().unwrap() = token;
    }

    /// Stores the access token obtained from a completed OAuth redirect and
    /// notifies subscribers about the new session.
    pub fn accept_access_token(&self, token: String) -> Result<(), AuthError> {
        *self.access_token.lock().unwrap() = Some(token);
        match self.current_session()? {
            Some(session) => {
                self.emit(&SessionEvent::SignedIn(session));
                Ok(())
            }
            None => {
                *self.access_token.lock().unwrap() = None;
                Err(AuthError::NotSignedIn)
            }
        }
    }

    fn emit(&self, event: &SessionEvent) {
        for listener in self.listeners.lock().unwrap().iter() {
            listener(event);
        }
    }
}

impl AuthGateway for RestAuth {
    fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let token = self.access_token.lock().unwrap().clone();
        let Some(token) = token else {
            return Ok(None);
        };
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&token)
            .send()
            .map_err(anyhow::Error::from)?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Stale or revoked token: treat as signed out
            log::debug!("Stored access token was rejected by the auth provider");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Session lookup failed: {}",
                response.status()
            )
            .into());
        }
        let user: AuthUserResponse = response.json().map_err(anyhow::Error::from)?;
        Ok(Some(Session {
            user_id: user.id.into(),
            email: user.email,
        }))
    }

    fn google_sign_in_url(&self, redirect_to: &str) -> Result<String, AuthError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/auth/v1/authorize", self.base_url),
            &[("provider", "google"), ("redirect_to", redirect_to)],
        )
        .map_err(anyhow::Error::from)?;
        Ok(url.into())
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.access_token.lock().unwrap().clone();
        if let Some(token) = token {
            let response = self
                .client
                .post(format!("{}/auth/v1/logout", self.base_url))
                .header("apikey", &self.api_key)
                .bearer_auth(&token)
                .send()
                .map_err(anyhow::Error::from)?;
            if !response.status().is_success()
                && response.status() != reqwest::StatusCode::UNAUTHORIZED
            {
                return Err(anyhow::anyhow!("Sign-out failed: {}", response.status()).into());
            }
        }
        *self.access_token.lock().unwrap() = None;
        self.emit(&SessionEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self, listener: SessionListener) {
        self.listeners.lock().unwrap().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_url_contains_provider_and_redirect() {
        let auth = RestAuth::new("https://backend.example.com", "anon-key");
        let url = auth
            .google_sign_in_url("https://app.example.com/auth/callback")
            .unwrap();
        assert!(url.starts_with("https://backend.example.com/auth/v1/authorize?"));
        assert!(url.contains("provider=google"));
        assert!(url.contains("redirect_to="));
    }

    #[test]
    fn no_token_means_no_session() {
        let auth = RestAuth::new("https://backend.example.com", "anon-key");
        assert_eq!(auth.current_session().unwrap(), None);
    }
}
