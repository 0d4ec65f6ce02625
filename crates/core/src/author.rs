//! Author records as returned by the `author` resource.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{AuthorId, BookId};

/// Author as returned by `GET author` / `GET author/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub full_name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    /// ISO date or timestamp; see [`crate::date::parse_date`].
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub books: Vec<BookSummary>,
}

impl Author {
    /// Split the display name into first name and the remainder.
    pub fn name_parts(&self) -> (String, String) {
        split_full_name(&self.full_name)
    }
}

impl Entity for Author {
    type Id = AuthorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Books nested in an author record. Only the fields needed for linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
}

/// Author entry for a selection input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorOption {
    pub id: AuthorId,
    pub full_name: String,
}

impl From<&Author> for AuthorOption {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            full_name: author.full_name.clone(),
        }
    }
}

/// First word is the first name; everything after the first space is the last name.
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
