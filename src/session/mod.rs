//! Process-wide auth token holder.
//!
//! The token is read by every outgoing request and written only when the
//! user signs in or out. Readers take a snapshot; a login racing with an
//! in-flight request simply means that request used the previous token.

mod store;
mod token;

use std::sync::Arc;

use parking_lot::RwLock;

pub use store::{SessionError, SessionStore};
pub use token::SecureString;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Shared session handle. Cloning shares the same token.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<SecureString>>>,
    store: Option<SessionStore>,
}

impl Session {
    /// In-memory session with no persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session backed by a token file; restores a previously stored token.
    pub fn restore(store: SessionStore) -> Result<Self, SessionError> {
        let token = store.load()?;
        if token.is_some() {
            tracing::debug!(path = %store.path().display(), "Restored session token");
        }
        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            store: Some(store),
        })
    }

    /// Snapshot of the current token.
    pub fn token(&self) -> Option<SecureString> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Store a fresh token after login.
    ///
    /// The in-memory token is always updated; the returned error only
    /// reports a failure to persist it.
    pub fn sign_in(&self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = SecureString::new(token);
        *self.token.write() = Some(token.clone());
        tracing::info!("Session started");

        match &self.store {
            Some(store) => store.save(&token),
            None => Ok(()),
        }
    }

    /// Drop the token and remove it from disk.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        *self.token.write() = None;
        tracing::info!("Session ended");

        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    /// Build the `Authorization` header for the current token.
    ///
    /// Returns `None` when signed out or when the token is empty.
    pub fn bearer_header(&self) -> Option<AuthHeader> {
        match self.token() {
            Some(token) if !token.is_empty() => Some((
                "Authorization".to_string(),
                format!("Bearer {}", token.expose()),
            )),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}
