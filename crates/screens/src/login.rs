//! Login screen.

use libris_auth::{SessionManager, resolve_role};
use libris_client::{ApiError, LibraryApi, LoginRequest, LoginResponse};
use libris_core::{Navigation, Route};
use libris_forms::{FieldErrorSet, LoginDraft, Validate};

use crate::gate;

pub const BAD_CREDENTIALS: &str = "Incorrect email or password.";
const LOGIN_FAILED: &str = "Login failed";

pub struct LoginScreen {
    sessions: SessionManager,
    draft: LoginDraft,
    errors: FieldErrorSet,
    notice: Option<String>,
    submitting: bool,
}

impl LoginScreen {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            sessions,
            draft: LoginDraft::default(),
            errors: FieldErrorSet::new(),
            notice: None,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &LoginDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut LoginDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &FieldErrorSet {
        &self.errors
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and build the request. `None` while a submission is in flight.
    pub fn prepare(&mut self) -> Option<LoginRequest> {
        if self.submitting {
            return None;
        }
        self.notice = None;
        self.errors = self.draft.validate();
        if !self.errors.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(LoginRequest::from(&self.draft))
    }

    /// On success the session is stored and the host reloads into `/`.
    pub fn finish(&mut self, result: Result<LoginResponse, ApiError>) -> Option<Navigation> {
        self.submitting = false;
        match result {
            Ok(resp) => {
                let role = resolve_role(resp.role.as_deref(), &resp.token);
                if let Err(err) = self.sessions.establish_session(&resp.token, &resp.username, role) {
                    tracing::warn!("could not store credentials: {err}");
                    self.notice = Some(LOGIN_FAILED.to_string());
                    return None;
                }
                tracing::info!(username = %resp.username, %role, "signed in");
                Some(Navigation::reload(Route::Home))
            }
            Err(ApiError::Unauthorized) => {
                self.notice = Some(BAD_CREDENTIALS.to_string());
                None
            }
            Err(err) => {
                tracing::warn!("login failed: {err}");
                self.notice = Some(gate::server_message(&err, LOGIN_FAILED));
                None
            }
        }
    }

    pub async fn submit<A: LibraryApi>(&mut self, api: &A) -> Option<Navigation> {
        let request = self.prepare()?;
        let result = api.login(&request).await;
        self.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, anonymous};
    use libris_auth::Role;

    #[tokio::test]
    async fn success_establishes_session_and_reloads_home() {
        let api = FakeApi::default().login_role("Admin");
        let sessions = anonymous();
        let mut screen = LoginScreen::new(sessions.clone());
        *screen.draft_mut() = LoginDraft::new("alice@example.com", "secret");

        assert_eq!(screen.submit(&api).await, Some(Navigation::reload(Route::Home)));
        let session = sessions.get_session();
        assert_eq!(session.token(), Some("tok-new"));
        assert_eq!(session.username(), Some("alice"));
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn missing_role_defaults_to_user() {
        let api = FakeApi::default();
        let sessions = anonymous();
        let mut screen = LoginScreen::new(sessions.clone());
        *screen.draft_mut() = LoginDraft::new("alice@example.com", "secret");

        screen.submit(&api).await;
        assert_eq!(sessions.get_session().role(), Some(Role::User));
        assert!(!sessions.is_admin());
    }

    #[tokio::test]
    async fn rejected_credentials_stay_on_the_form() {
        let api = FakeApi::default().failing("login", ApiError::Unauthorized);
        let mut screen = LoginScreen::new(anonymous());
        *screen.draft_mut() = LoginDraft::new("alice@example.com", "wrong");

        assert_eq!(screen.submit(&api).await, None);
        assert_eq!(screen.notice(), Some(BAD_CREDENTIALS));
        assert_eq!(screen.draft().email, "alice@example.com");
        assert!(!screen.is_submitting());
    }

    #[tokio::test]
    async fn blank_fields_are_caught_locally() {
        let api = FakeApi::default();
        let mut screen = LoginScreen::new(anonymous());

        assert_eq!(screen.submit(&api).await, None);
        assert!(screen.errors().contains("email"));
        assert!(api.calls().is_empty());
    }
}
