//! Failure classification for non-2xx responses.

use serde_json::Value;

use crate::error::{ApiError, GENERIC_FAILURE};

/// Failures decided by the status code alone; the body is never consulted.
pub fn classify_status(status: u16) -> Option<ApiError> {
    match status {
        401 => Some(ApiError::Unauthorized),
        403 => Some(ApiError::Forbidden),
        _ => None,
    }
}

/// Map a failed response to an [`ApiError`].
pub fn classify(status: u16, body: &str) -> ApiError {
    classify_status(status).unwrap_or_else(|| {
        ApiError::failed(extract_message(body).unwrap_or_else(|| GENERIC_FAILURE.to_string()))
    })
}

/// Pull a human-readable message out of a structured error body.
///
/// Understands `{"message": ..}`, validation maps `{"errors": {field: [..]}}`,
/// problem details `{"title": ..}`, identity error lists
/// `[{"description": ..}]` and bare JSON strings. Anything else is `None`.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match &value {
        Value::String(s) => non_blank(s),
        Value::Array(items) => join_messages(items.iter()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .and_then(non_blank)
            .or_else(|| match map.get("errors") {
                Some(Value::Object(fields)) => join_messages(fields.values()),
                Some(Value::Array(items)) => join_messages(items.iter()),
                _ => None,
            })
            .or_else(|| map.get("title").and_then(Value::as_str).and_then(non_blank)),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_messages<'a>(values: impl Iterator<Item = &'a Value>) -> Option<String> {
    let mut messages = Vec::new();
    for value in values {
        collect_messages(value, &mut messages);
    }
    (!messages.is_empty()).then(|| messages.join(" "))
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.extend(non_blank(s)),
        Value::Array(items) => items.iter().for_each(|v| collect_messages(v, out)),
        Value::Object(map) => {
            let text = map
                .get("description")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .and_then(non_blank);
            out.extend(text);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_ignore_body() {
        assert_eq!(classify(401, r#"{"message":"expired"}"#), ApiError::Unauthorized);
        assert_eq!(classify(403, ""), ApiError::Forbidden);
        assert_eq!(classify_status(401), Some(ApiError::Unauthorized));
        assert_eq!(classify_status(500), None);
    }

    #[test]
    fn message_field_wins() {
        let err = classify(500, r#"{"message":"Database unavailable","title":"Error"}"#);
        assert_eq!(err, ApiError::failed("Database unavailable"));
    }

    #[test]
    fn validation_errors_are_flattened() {
        let body = r#"{"title":"One or more validation errors occurred.","errors":{"Email":["Taken."],"Password":["Too short.","Needs a digit."]}}"#;
        assert_eq!(
            classify(400, body),
            ApiError::failed("Taken. Too short. Needs a digit.")
        );
    }

    #[test]
    fn identity_error_lists() {
        let body = r#"[{"code":"DuplicateUserName","description":"Username 'ann' is already taken."}]"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("Username 'ann' is already taken.")
        );
    }

    #[test]
    fn bare_json_string() {
        assert_eq!(classify(409, r#""Author has books""#), ApiError::failed("Author has books"));
    }

    #[test]
    fn unstructured_bodies_fall_back() {
        assert_eq!(classify(502, "<html>Bad Gateway</html>"), ApiError::generic());
        assert_eq!(classify(500, ""), ApiError::generic());
        assert_eq!(classify(500, "{}"), ApiError::generic());
        assert_eq!(classify(500, r#"{"message":"  "}"#), ApiError::generic());
    }
}
