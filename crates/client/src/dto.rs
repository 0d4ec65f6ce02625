//! Request and response bodies.

use serde::{Deserialize, Serialize};

use libris_forms::{AuthorDraft, BookDraft, LoginDraft, RegisterDraft};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<&LoginDraft> for LoginRequest {
    fn from(draft: &LoginDraft) -> Self {
        Self {
            email: draft.email.trim().to_string(),
            password: draft.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub user_name: String,
    pub display_name: String,
    pub password: String,
}

impl From<&RegisterDraft> for RegisterRequest {
    fn from(draft: &RegisterDraft) -> Self {
        Self {
            email: draft.email.trim().to_string(),
            user_name: draft.username.trim().to_string(),
            display_name: draft.display_name.trim().to_string(),
            password: draft.password.clone(),
        }
    }
}

/// Body of `POST author` and `PUT author/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: String,
    pub last_name: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
}

impl From<&AuthorDraft> for AuthorPayload {
    fn from(draft: &AuthorDraft) -> Self {
        let (first_name, last_name) = draft.name.parts();
        Self {
            first_name,
            last_name,
            biography: optional(&draft.biography),
            nationality: optional(&draft.nationality),
            date_of_birth: optional(&draft.date_of_birth),
        }
    }
}

/// Body of `POST book` and `PUT book/{id}`.
///
/// Built only from drafts that passed validation, so genre and page count
/// are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub description: Option<String>,
    pub genre: i64,
    pub author_id: String,
    pub published_date: Option<String>,
    pub isbn: String,
    pub page_count: i64,
    pub publisher: String,
    pub is_available: bool,
}

impl From<&BookDraft> for BookPayload {
    fn from(draft: &BookDraft) -> Self {
        Self {
            title: draft.title.trim().to_string(),
            description: optional(&draft.description),
            genre: draft.genre.unwrap_or_default(),
            author_id: draft.author_id.trim().to_string(),
            published_date: optional(&draft.published_date),
            isbn: draft.isbn.clone(),
            page_count: draft.page_count.unwrap_or_default(),
            publisher: draft.publisher.trim().to_string(),
            is_available: draft.is_available,
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
