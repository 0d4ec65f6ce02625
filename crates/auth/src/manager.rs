use std::sync::Arc;

use libris_core::{Navigation, Route};

use crate::roles::Role;
use crate::session::Session;
use crate::store::{
    CredentialStore, MemoryCredentialStore, ROLE_KEY, SESSION_KEYS, StoreError, TOKEN_KEY,
    USERNAME_KEY,
};

/// Sole owner of the stored credentials.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
}

impl core::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Read the current session from one store snapshot. No network.
    pub fn get_session(&self) -> Session {
        let mut values = self
            .store
            .get_all(&[TOKEN_KEY, USERNAME_KEY, ROLE_KEY])
            .into_iter();
        let mut next = || values.next().flatten();
        let (token, username, role) = (next(), next(), next());
        Session::from_stored(token, username, role)
    }

    /// The session, or a redirect to the login screen when there is no token.
    ///
    /// Protected views call this before issuing any fetch.
    pub fn require_session(&self) -> Result<Session, Navigation> {
        let session = self.get_session();
        if session.is_authenticated() {
            Ok(session)
        } else {
            tracing::debug!("no session; redirecting to {}", Route::Login);
            Err(Navigation::login())
        }
    }

    pub fn establish_session(&self, token: &str, username: &str, role: Role) -> Result<(), StoreError> {
        self.store.set_all(&[
            (TOKEN_KEY, token),
            (USERNAME_KEY, username),
            (ROLE_KEY, role.as_str()),
        ])?;
        tracing::info!(username, role = %role, "session established");
        Ok(())
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.store.remove_all(&SESSION_KEYS)?;
        tracing::info!("session cleared");
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.get_session().is_admin()
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.get_session().token().map(str::to_string)
    }

    /// Clear the session and ask for a full reload of the login screen.
    pub fn logout(&self) -> Navigation {
        if let Err(err) = self.clear_session() {
            tracing::warn!("failed to clear session on logout: {err}");
        }
        Navigation::reload(Route::Login)
    }
}
