use std::collections::BTreeMap;

use thiserror::Error;

/// Field name → message. Empty means the draft is valid.
///
/// Field names are the API's camelCase names so a host can place each
/// message next to its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrorSet(BTreeMap<&'static str, String>);

impl FieldErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromIterator<(&'static str, String)> for FieldErrorSet {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Form-level check on the registration form, made before field rules.
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrorSet),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_previous_message() {
        let mut errors = FieldErrorSet::new();
        errors.insert("title", "Title is required.");
        errors.insert("title", "Title cannot exceed 200 characters.");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("title"), Some("Title cannot exceed 200 characters."));
    }
}
