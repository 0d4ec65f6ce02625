//! Role lookup in the bearer token's claims.
//!
//! The token is opaque to the client except for this: when the login
//! response carries no role, the JWT payload is read (never verified) for a
//! role claim. Authorization is still enforced by the server.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::roles::Role;

/// Claim names that may carry the role, in lookup order.
const ROLE_CLAIMS: [&str; 3] = [
    "role",
    "roles",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];

/// Read the role claim from a JWT payload.
///
/// Returns `None` when the token is not a JWT or carries no recognised role.
/// When several roles are granted, `Admin` wins.
pub fn role_from_token(token: &str) -> Option<Role> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;

    let mut roles = ROLE_CLAIMS
        .iter()
        .filter_map(|name| claims.get(*name))
        .flat_map(|value| match value {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        })
        .filter_map(|raw| raw.parse::<Role>().ok())
        .peekable();

    roles.peek()?;
    Some(if roles.any(|r| r.is_admin()) {
        Role::Admin
    } else {
        Role::User
    })
}

/// Role to store after login: explicit response field, then token claim, then `User`.
pub fn resolve_role(explicit: Option<&str>, token: &str) -> Role {
    explicit
        .and_then(|raw| raw.parse().ok())
        .or_else(|| role_from_token(token))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn reads_plain_role_claim() {
        let token = jwt(serde_json::json!({"sub": "1", "role": "Admin"}));
        assert_eq!(role_from_token(&token), Some(Role::Admin));
    }

    #[test]
    fn reads_aspnet_role_claim_array() {
        let token = jwt(serde_json::json!({
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": ["User", "Admin"]
        }));
        assert_eq!(role_from_token(&token), Some(Role::Admin));
    }

    #[test]
    fn opaque_tokens_have_no_role() {
        assert_eq!(role_from_token("not-a-jwt"), None);
        assert_eq!(role_from_token(&jwt(serde_json::json!({"sub": "1"}))), None);
    }

    #[test]
    fn explicit_role_takes_precedence() {
        let token = jwt(serde_json::json!({"role": "Admin"}));
        assert_eq!(resolve_role(Some("User"), &token), Role::User);
        assert_eq!(resolve_role(None, &token), Role::Admin);
        assert_eq!(resolve_role(None, "opaque"), Role::User);
    }
}
