//! Book records as returned by the `book` resource.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::genre::BookGenre;
use crate::id::{AuthorId, BookId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub genre: BookGenre,
    pub author_id: AuthorId,
    /// Denormalized by the detail endpoint; absent on some list responses.
    #[serde(default)]
    pub author_name: Option<String>,
    pub published_date: String,
    pub isbn: String,
    pub page_count: i64,
    pub publisher: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_travels_as_code() {
        let json = r#"{
            "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
            "title": "The Dispossessed",
            "genre": 2,
            "authorId": "6fa459ea-ee8a-3ca4-894e-db77e160355e",
            "authorName": "Ursula K. Le Guin",
            "publishedDate": "1974-05-01T00:00:00",
            "isbn": "9780060512750",
            "pageCount": 387,
            "publisher": "Harper & Row"
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.genre, BookGenre::ScienceFiction);
        assert!(book.is_available);

        let back = serde_json::to_value(&book).unwrap();
        assert_eq!(back["genre"], 2);
        assert_eq!(back["pageCount"], 387);
    }
}
