use crate::roles::Role;

/// Snapshot of the stored credentials.
///
/// Invariant: a token is present exactly when a username is, and a role is
/// reported only while a token is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
    role: Option<Role>,
}

impl Session {
    /// The all-`None` session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
            role: Some(role),
        }
    }

    /// Assemble a session from raw stored values.
    ///
    /// Half-written credentials (token without username or the reverse) and
    /// blank tokens read as anonymous. A missing role defaults to `User`.
    pub fn from_stored(token: Option<String>, username: Option<String>, role: Option<String>) -> Self {
        match (token.filter(|t| !t.trim().is_empty()), username) {
            (Some(token), Some(username)) => {
                let role = role.as_deref().map(Role::from_stored).unwrap_or_default();
                Self::authenticated(token, username, role)
            }
            _ => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}
