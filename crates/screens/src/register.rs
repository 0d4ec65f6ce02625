//! Registration screen.

use libris_client::{ApiError, LibraryApi, RegisterRequest};
use libris_core::{Navigation, Route};
use libris_forms::{FieldErrorSet, RegisterDraft, Validate};

use crate::gate;

const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Debug, Default)]
pub struct RegisterScreen {
    draft: RegisterDraft,
    errors: FieldErrorSet,
    notice: Option<String>,
    submitting: bool,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RegisterDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RegisterDraft {
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

    /// Password confirmation is checked before any field rule.
    pub fn prepare(&mut self) -> Option<RegisterRequest> {
        if self.submitting {
            return None;
        }
        self.notice = None;
        self.errors = FieldErrorSet::new();

        if let Err(err) = self.draft.check_passwords() {
            self.notice = Some(err.to_string());
            return None;
        }
        self.errors = self.draft.validate();
        if !self.errors.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(RegisterRequest::from(&self.draft))
    }

    pub fn finish(&mut self, result: Result<(), ApiError>) -> Option<Navigation> {
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(username = %self.draft.username.trim(), "registered");
                Some(Navigation::to(Route::Login))
            }
            Err(err) => {
                tracing::warn!("registration failed: {err}");
                self.notice = Some(gate::server_message(&err, REGISTRATION_FAILED));
                None
            }
        }
    }

    pub async fn submit<A: LibraryApi>(&mut self, api: &A) -> Option<Navigation> {
        let request = self.prepare()?;
        let result = api.register(&request).await;
        self.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;

    fn filled(confirm: &str) -> RegisterDraft {
        RegisterDraft {
            email: "ann@example.com".to_string(),
            username: "ann".to_string(),
            display_name: "Ann Lee".to_string(),
            password: "hunter22".to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn mismatch_is_reported_before_anything_else() {
        let api = FakeApi::default();
        let mut screen = RegisterScreen::new();
        *screen.draft_mut() = RegisterDraft {
            email: String::new(),
            ..filled("different")
        };

        assert_eq!(screen.submit(&api).await, None);
        assert_eq!(screen.notice(), Some("Passwords do not match"));
        assert!(screen.errors().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn success_goes_to_login() {
        let api = FakeApi::default();
        let mut screen = RegisterScreen::new();
        *screen.draft_mut() = filled("hunter22");

        assert_eq!(screen.submit(&api).await, Some(Navigation::to(Route::Login)));
        assert_eq!(api.calls(), vec!["register"]);
    }

    #[tokio::test]
    async fn server_errors_are_shown_verbatim() {
        let api = FakeApi::default().failing("register", ApiError::failed("Taken. Too short."));
        let mut screen = RegisterScreen::new();
        *screen.draft_mut() = filled("hunter22");

        assert_eq!(screen.submit(&api).await, None);
        assert_eq!(screen.notice(), Some("Taken. Too short."));
    }

    #[tokio::test]
    async fn no_response_uses_the_fallback() {
        let api = FakeApi::default().failing("register", ApiError::generic());
        let mut screen = RegisterScreen::new();
        *screen.draft_mut() = filled("hunter22");

        screen.submit(&api).await;
        assert_eq!(screen.notice(), Some("Registration failed"));
    }
}
