use chrono::NaiveDate;
use libris_core::Author;
use libris_core::author::split_full_name;
use libris_core::date::form_value;

use crate::Validate;
use crate::errors::FieldErrorSet;
use crate::rules::{max_chars, past_or_today, required_text};

pub const NAME_MAX: usize = 50;
pub const BIOGRAPHY_MAX: usize = 2000;
pub const NATIONALITY_MAX: usize = 50;

/// Name inputs; screens ask for either a split or a single full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorName {
    Split { first_name: String, last_name: String },
    Full(String),
}

impl AuthorName {
    /// `(first, last)` as the API expects them.
    pub fn parts(&self) -> (String, String) {
        match self {
            AuthorName::Split {
                first_name,
                last_name,
            } => (first_name.trim().to_string(), last_name.trim().to_string()),
            AuthorName::Full(full) => split_full_name(full),
        }
    }

    pub fn display(&self) -> String {
        let (first, last) = self.parts();
        if last.is_empty() {
            first
        } else {
            format!("{first} {last}")
        }
    }
}

/// Editable author fields. Optional inputs are empty strings when unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: AuthorName,
    pub biography: String,
    pub nationality: String,
    /// `YYYY-MM-DD` or empty.
    pub date_of_birth: String,
}

impl AuthorDraft {
    /// Empty draft for the create screen.
    pub fn empty() -> Self {
        Self::split("", "")
    }

    pub fn split(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: AuthorName::Split {
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
            biography: String::new(),
            nationality: String::new(),
            date_of_birth: String::new(),
        }
    }

    pub fn with_date_of_birth(mut self, date: impl Into<String>) -> Self {
        self.date_of_birth = date.into();
        self
    }

    /// Pre-populate from a fetched record, splitting the display name.
    pub fn from_author(author: &Author) -> Self {
        let (first_name, last_name) = author.name_parts();
        Self {
            name: AuthorName::Split {
                first_name,
                last_name,
            },
            biography: author.biography.clone().unwrap_or_default(),
            nationality: author.nationality.clone().unwrap_or_default(),
            date_of_birth: author
                .date_of_birth
                .as_deref()
                .map(form_value)
                .unwrap_or_default(),
        }
    }

    /// Apply the draft to a displayed record after a successful update.
    pub fn merge_into(&self, author: &mut Author) {
        author.full_name = self.name.display();
        author.biography = non_empty(&self.biography);
        author.nationality = non_empty(&self.nationality);
        author.date_of_birth = non_empty(&self.date_of_birth);
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl Validate for AuthorDraft {
    fn validate_on(&self, today: NaiveDate) -> FieldErrorSet {
        let mut errors = FieldErrorSet::new();

        match &self.name {
            AuthorName::Split {
                first_name,
                last_name,
            } => {
                required_text(&mut errors, "firstName", "First name", first_name, NAME_MAX);
                required_text(&mut errors, "lastName", "Last name", last_name, NAME_MAX);
            }
            AuthorName::Full(full_name) => {
                required_text(&mut errors, "fullName", "Full name", full_name, NAME_MAX);
            }
        }

        max_chars(&mut errors, "biography", "Biography", &self.biography, BIOGRAPHY_MAX);
        max_chars(&mut errors, "nationality", "Nationality", &self.nationality, NATIONALITY_MAX);
        past_or_today(
            &mut errors,
            "dateOfBirth",
            "Date of birth",
            &self.date_of_birth,
            today,
            false,
        );

        errors
    }
}
