//! Session-aware handling of API failures.

use libris_auth::SessionManager;
use libris_client::ApiError;
use libris_client::error::GENERIC_FAILURE;
use libris_core::Navigation;

pub const NOT_AUTHORIZED: &str = "You are not authorized to view this page";

/// Peel off `Unauthorized`: clear the session and hand back the login
/// redirect. Every other error is returned for the screen to present.
pub(crate) fn intercept(sessions: &SessionManager, err: ApiError) -> Result<ApiError, Navigation> {
    match err {
        ApiError::Unauthorized => Err(expire(sessions)),
        other => Ok(other),
    }
}

pub(crate) fn expire(sessions: &SessionManager) -> Navigation {
    tracing::info!("session rejected by server; signing out");
    if let Err(err) = sessions.clear_session() {
        tracing::warn!("failed to clear credentials: {err}");
    }
    Navigation::login()
}

/// Message for a failed load.
pub(crate) fn load_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Forbidden => NOT_AUTHORIZED.to_string(),
        _ => fallback.to_string(),
    }
}

/// The server's own message when it sent one, otherwise `fallback`.
pub(crate) fn server_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Failed(msg) if msg != GENERIC_FAILURE => msg.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_auth::Role;

    #[test]
    fn unauthorized_clears_the_session() {
        let sessions = SessionManager::in_memory();
        sessions.establish_session("t", "alice", Role::User).unwrap();

        let nav = intercept(&sessions, ApiError::Unauthorized).unwrap_err();
        assert_eq!(nav, Navigation::login());
        assert!(!sessions.get_session().is_authenticated());
    }

    #[test]
    fn forbidden_leaves_the_session_alone() {
        let sessions = SessionManager::in_memory();
        sessions.establish_session("t", "alice", Role::User).unwrap();

        let err = intercept(&sessions, ApiError::Forbidden).unwrap();
        assert_eq!(load_message(&err, "Failed to load books"), NOT_AUTHORIZED);
        assert!(sessions.get_session().is_authenticated());
    }

    #[test]
    fn generic_failures_fall_back() {
        assert_eq!(server_message(&ApiError::generic(), "Failed to create book"), "Failed to create book");
        assert_eq!(server_message(&ApiError::failed("ISBN already exists"), "x"), "ISBN already exists");
    }
}
