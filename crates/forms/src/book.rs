use std::sync::LazyLock;

use chrono::NaiveDate;
use libris_core::date::form_value;
use libris_core::{Book, BookGenre};
use regex::Regex;

use crate::Validate;
use crate::errors::FieldErrorSet;
use crate::rules::{max_chars, past_or_today, required, required_text};

pub const TITLE_MAX: usize = 200;
pub const PUBLISHER_MAX: usize = 100;

/// ISBN-10, or ISBN-13 with a 978/979 prefix; the check digit may be `X`.
static ISBN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(97[89])?[0-9]{9}[0-9X]$").expect("static ISBN pattern"));

pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_PATTERN.is_match(isbn)
}

/// Per-screen limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookRules {
    pub description_max: usize,
}

impl BookRules {
    /// Add-book screen.
    pub const CREATE: BookRules = BookRules {
        description_max: 1000,
    };
    /// Book detail edit screen.
    pub const EDIT: BookRules = BookRules {
        description_max: 2000,
    };
}

impl Default for BookRules {
    fn default() -> Self {
        Self::CREATE
    }
}

/// Editable book fields.
///
/// `genre` and `page_count` hold whatever the inputs resolved to; `None`
/// means the input was empty or not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author_id: String,
    /// `YYYY-MM-DD` or empty.
    pub published_date: String,
    pub isbn: String,
    pub page_count: Option<i64>,
    pub publisher: String,
    pub genre: Option<i64>,
    pub description: String,
    pub is_available: bool,
    pub rules: BookRules,
}

impl BookDraft {
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            author_id: String::new(),
            published_date: String::new(),
            isbn: String::new(),
            page_count: None,
            publisher: String::new(),
            genre: None,
            description: String::new(),
            is_available: true,
            rules: BookRules::CREATE,
        }
    }

    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author_id: book.author_id.to_string(),
            published_date: form_value(&book.published_date),
            isbn: book.isbn.clone(),
            page_count: Some(book.page_count),
            publisher: book.publisher.clone(),
            genre: Some(book.genre.code()),
            description: book.description.clone().unwrap_or_default(),
            is_available: book.is_available,
            rules: BookRules::EDIT,
        }
    }

    /// Set the genre from a raw select value (`""` and non-numbers clear it).
    pub fn set_genre_input(&mut self, raw: &str) {
        self.genre = raw.trim().parse().ok();
    }

    /// Set the page count from a raw number input.
    pub fn set_page_count_input(&mut self, raw: &str) {
        self.page_count = raw.trim().parse().ok();
    }

    /// The selected genre, when it resolves to a known code.
    pub fn resolved_genre(&self) -> Option<BookGenre> {
        self.genre.and_then(|code| BookGenre::from_code(code).ok())
    }

    /// Apply the draft to a displayed record after a successful update.
    pub fn merge_into(&self, book: &mut Book) {
        book.title = self.title.trim().to_string();
        if let Ok(author_id) = self.author_id.parse() {
            book.author_id = author_id;
        }
        book.published_date = self.published_date.clone();
        book.isbn = self.isbn.clone();
        if let Some(pages) = self.page_count {
            book.page_count = pages;
        }
        book.publisher = self.publisher.trim().to_string();
        if let Some(genre) = self.resolved_genre() {
            book.genre = genre;
        }
        let description = self.description.trim();
        book.description = (!description.is_empty()).then(|| description.to_string());
        book.is_available = self.is_available;
    }
}

impl Default for BookDraft {
    fn default() -> Self {
        Self::empty()
    }
}

impl Validate for BookDraft {
    fn validate_on(&self, today: NaiveDate) -> FieldErrorSet {
        let mut errors = FieldErrorSet::new();

        required_text(&mut errors, "title", "Title", &self.title, TITLE_MAX);
        if self.author_id.trim().is_empty() {
            errors.insert("authorId", "Author is required.");
        }
        past_or_today(
            &mut errors,
            "publishedDate",
            "Published date",
            &self.published_date,
            today,
            true,
        );

        if required(&mut errors, "isbn", "ISBN", &self.isbn) && !is_valid_isbn(&self.isbn) {
            errors.insert("isbn", "ISBN must be a valid ISBN-10 or ISBN-13.");
        }

        match self.page_count {
            None => errors.insert("pageCount", "Page count is required."),
            Some(pages) if pages <= 0 => errors.insert("pageCount", "Page count must be greater than 0."),
            Some(_) => {}
        }

        required_text(&mut errors, "publisher", "Publisher", &self.publisher, PUBLISHER_MAX);

        match self.genre {
            None => errors.insert("genre", "Genre is required."),
            Some(code) if BookGenre::from_code(code).is_err() => {
                errors.insert("genre", "Genre is not a valid selection.")
            }
            Some(_) => {}
        }

        max_chars(
            &mut errors,
            "description",
            "Description",
            &self.description,
            self.rules.description_max,
        );

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid_draft() -> BookDraft {
        BookDraft {
            title: "The Dispossessed".to_string(),
            author_id: "a1".to_string(),
            published_date: "2020-01-01".to_string(),
            isbn: "9781234567897".to_string(),
            page_count: Some(100),
            publisher: "P".to_string(),
            genre: Some(2),
            ..BookDraft::empty()
        }
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(valid_draft().validate_on(today()).is_empty());
    }

    #[test]
    fn blank_title_is_the_only_error() {
        let draft = BookDraft {
            title: String::new(),
            ..valid_draft()
        };
        let expected: FieldErrorSet = [("title", "Title is required.".to_string())]
            .into_iter()
            .collect();
        assert_eq!(draft.validate(), expected);
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = BookDraft::empty().validate_on(today());
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec!["authorId", "genre", "isbn", "pageCount", "publishedDate", "publisher", "title"]
        );
        assert_eq!(errors.get("isbn"), Some("ISBN is required."));
        assert_eq!(errors.get("pageCount"), Some("Page count is required."));
        assert_eq!(errors.get("genre"), Some("Genre is required."));
    }

    #[test]
    fn genre_select_values() {
        let mut draft = valid_draft();
        draft.set_genre_input("");
        assert_eq!(draft.validate_on(today()).get("genre"), Some("Genre is required."));

        draft.set_genre_input("NaN");
        assert_eq!(draft.validate_on(today()).get("genre"), Some("Genre is required."));

        draft.set_genre_input("10");
        assert_eq!(
            draft.validate_on(today()).get("genre"),
            Some("Genre is not a valid selection.")
        );

        draft.set_genre_input("0");
        assert!(draft.validate_on(today()).is_empty());
        assert_eq!(draft.resolved_genre(), Some(BookGenre::Fiction));
    }

    #[test]
    fn description_limit_depends_on_screen() {
        let mut draft = valid_draft();
        draft.description = "d".repeat(1500);
        assert_eq!(
            draft.validate_on(today()).get("description"),
            Some("Description cannot exceed 1000 characters.")
        );

        draft.rules = BookRules::EDIT;
        assert!(draft.validate_on(today()).is_empty());
    }

    #[test]
    fn future_publication_is_rejected() {
        let draft = BookDraft {
            published_date: "2024-06-02".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            draft.validate_on(today()).get("publishedDate"),
            Some("Published date cannot be in the future.")
        );
    }

    #[test]
    fn over_long_text_fields() {
        let draft = BookDraft {
            title: "t".repeat(201),
            publisher: "p".repeat(101),
            ..valid_draft()
        };
        let errors = draft.validate_on(today());
        assert_eq!(errors.get("title"), Some("Title cannot exceed 200 characters."));
        assert_eq!(errors.get("publisher"), Some("Publisher cannot exceed 100 characters."));
    }

    #[test]
    fn isbn_examples() {
        assert!(is_valid_isbn("0306406152"));
        assert!(is_valid_isbn("080442957X"));
        assert!(is_valid_isbn("9790306406157"));
        assert!(!is_valid_isbn("9771234567897"));
        assert!(!is_valid_isbn("978-0306406157"));
        assert!(!is_valid_isbn("080442957x"));
        assert!(!is_valid_isbn(" 0306406152"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn non_positive_page_counts_are_rejected(pages in i64::MIN..=0) {
                let draft = BookDraft { page_count: Some(pages), ..valid_draft() };
                let errors = draft.validate_on(today());
                prop_assert_eq!(errors.get("pageCount"), Some("Page count must be greater than 0."));
            }

            #[test]
            fn positive_page_counts_are_accepted(pages in 1..=i64::MAX) {
                let draft = BookDraft { page_count: Some(pages), ..valid_draft() };
                prop_assert!(draft.validate_on(today()).is_empty());
            }

            #[test]
            fn matching_isbns_produce_no_error(isbn in "(97[89])?[0-9]{9}[0-9X]") {
                let draft = BookDraft { isbn, ..valid_draft() };
                prop_assert!(!draft.validate_on(today()).contains("isbn"));
            }

            #[test]
            fn other_strings_produce_an_isbn_error(isbn in ".{0,16}") {
                prop_assume!(!Regex::new(r"^(97[89])?[0-9]{9}[0-9X]$").unwrap().is_match(&isbn));
                let draft = BookDraft { isbn, ..valid_draft() };
                prop_assert!(draft.validate_on(today()).contains("isbn"));
            }
        }
    }
}
