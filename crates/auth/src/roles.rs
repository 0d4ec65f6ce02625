use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role granted to the signed-in user.
///
/// The set is closed; the server only issues these two. A session without an
/// explicit role is a `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    User,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }

    /// Read a role back from storage. Unrecognised values degrade to `User`.
    pub fn from_stored(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err: UnknownRole| {
            tracing::warn!("{err}; treating stored role as User");
            Role::User
        })
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert!("Librarian".parse::<Role>().is_err());
    }

    #[test]
    fn stored_garbage_defaults_to_user() {
        assert_eq!(Role::from_stored("superuser"), Role::User);
        assert_eq!(Role::from_stored(""), Role::User);
        assert_eq!(Role::default(), Role::User);
    }
}
