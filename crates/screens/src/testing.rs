//! In-process stand-in for the REST API.

use std::cell::RefCell;
use std::collections::HashMap;

use libris_auth::{Role, SessionManager};
use libris_client::{
    ApiError, AuthorPayload, BookPayload, LibraryApi, LoginRequest, LoginResponse, RegisterRequest,
};
use libris_core::{Author, AuthorId, Book, BookGenre, BookId};

pub(crate) const AUTHOR_ID: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";
pub(crate) const BOOK_ID: &str = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";

pub(crate) fn author_id() -> AuthorId {
    AUTHOR_ID.parse().unwrap()
}

pub(crate) fn book_id() -> BookId {
    BOOK_ID.parse().unwrap()
}

pub(crate) fn anonymous() -> SessionManager {
    SessionManager::in_memory()
}

pub(crate) fn signed_in(role: Role) -> SessionManager {
    let sessions = SessionManager::in_memory();
    sessions.establish_session("tok-1", "alice", role).unwrap();
    sessions
}

pub(crate) fn author() -> Author {
    Author {
        id: author_id(),
        full_name: "Ursula Le Guin".to_string(),
        biography: Some("Wrote Earthsea.".to_string()),
        nationality: Some("American".to_string()),
        date_of_birth: Some("1929-10-21T00:00:00".to_string()),
        books: Vec::new(),
    }
}

pub(crate) fn book() -> Book {
    Book {
        id: book_id(),
        title: "A Wizard of Earthsea".to_string(),
        description: None,
        genre: BookGenre::Fantasy,
        author_id: author_id(),
        author_name: Some("Ursula Le Guin".to_string()),
        published_date: "1968-11-01T00:00:00".to_string(),
        isbn: "9780547773742".to_string(),
        page_count: 183,
        publisher: "Parnassus".to_string(),
        is_available: true,
    }
}

/// Records every call by operation name and fails the ones it is told to.
#[derive(Default)]
pub(crate) struct FakeApi {
    authors: Vec<Author>,
    books: Vec<Book>,
    failures: HashMap<&'static str, ApiError>,
    login_role: Option<String>,
    calls: RefCell<Vec<&'static str>>,
    pub(crate) last_author: RefCell<Option<AuthorPayload>>,
    pub(crate) last_book: RefCell<Option<BookPayload>>,
}

impl FakeApi {
    pub(crate) fn with_fixtures() -> Self {
        Self {
            authors: vec![author()],
            books: vec![book()],
            ..Self::default()
        }
    }

    pub(crate) fn failing(mut self, op: &'static str, err: ApiError) -> Self {
        self.failures.insert(op, err);
        self
    }

    pub(crate) fn login_role(mut self, role: &str) -> Self {
        self.login_role = Some(role.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn call(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(op);
        match self.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl LibraryApi for FakeApi {
    async fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        self.call("list_authors")?;
        Ok(self.authors.clone())
    }

    async fn get_author(&self, id: AuthorId) -> Result<Author, ApiError> {
        self.call("get_author")?;
        self.authors
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::failed("Author not found"))
    }

    async fn create_author(&self, payload: &AuthorPayload) -> Result<(), ApiError> {
        self.call("create_author")?;
        *self.last_author.borrow_mut() = Some(payload.clone());
        Ok(())
    }

    async fn update_author(&self, _id: AuthorId, payload: &AuthorPayload) -> Result<(), ApiError> {
        self.call("update_author")?;
        *self.last_author.borrow_mut() = Some(payload.clone());
        Ok(())
    }

    async fn delete_author(&self, _id: AuthorId) -> Result<(), ApiError> {
        self.call("delete_author")
    }

    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.call("list_books")?;
        Ok(self.books.clone())
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        self.call("get_book")?;
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| ApiError::failed("Book not found"))
    }

    async fn create_book(&self, payload: &BookPayload) -> Result<(), ApiError> {
        self.call("create_book")?;
        *self.last_book.borrow_mut() = Some(payload.clone());
        Ok(())
    }

    async fn update_book(&self, _id: BookId, payload: &BookPayload) -> Result<(), ApiError> {
        self.call("update_book")?;
        *self.last_book.borrow_mut() = Some(payload.clone());
        Ok(())
    }

    async fn delete_book(&self, _id: BookId) -> Result<(), ApiError> {
        self.call("delete_book")
    }

    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call("login")?;
        Ok(LoginResponse {
            token: "tok-new".to_string(),
            username: "alice".to_string(),
            role: self.login_role.clone(),
        })
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
        self.call("register")
    }
}
