//! Typed operations over the REST resources.

use libris_core::{Author, AuthorId, AuthorOption, Book, BookId};
use reqwest::Method;

use crate::client::{Access, ApiClient, decode};
use crate::dto::{AuthorPayload, BookPayload, LoginRequest, LoginResponse, RegisterRequest};
use crate::error::ApiError;

const AUTHORS: &str = "author";
const BOOKS: &str = "book";
const LOGIN: &str = "Account/login";
const REGISTER: &str = "Account/register";

/// The library API as the screens see it.
///
/// [`ApiClient`] is the production implementation; screens are generic over
/// this trait so they can be driven without a server.
#[allow(async_fn_in_trait)]
pub trait LibraryApi {
    async fn list_authors(&self) -> Result<Vec<Author>, ApiError>;
    async fn get_author(&self, id: AuthorId) -> Result<Author, ApiError>;
    async fn create_author(&self, payload: &AuthorPayload) -> Result<(), ApiError>;
    async fn update_author(&self, id: AuthorId, payload: &AuthorPayload) -> Result<(), ApiError>;
    async fn delete_author(&self, id: AuthorId) -> Result<(), ApiError>;

    async fn list_books(&self) -> Result<Vec<Book>, ApiError>;
    async fn get_book(&self, id: BookId) -> Result<Book, ApiError>;
    async fn create_book(&self, payload: &BookPayload) -> Result<(), ApiError>;
    async fn update_book(&self, id: BookId, payload: &BookPayload) -> Result<(), ApiError>;
    async fn delete_book(&self, id: BookId) -> Result<(), ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    /// Author choices for selection inputs.
    async fn author_options(&self) -> Result<Vec<AuthorOption>, ApiError> {
        let authors = self.list_authors().await?;
        Ok(authors.iter().map(AuthorOption::from).collect())
    }
}

impl LibraryApi for ApiClient {
    async fn list_authors(&self) -> Result<Vec<Author>, ApiError> {
        self.get_json(AUTHORS).await
    }

    async fn get_author(&self, id: AuthorId) -> Result<Author, ApiError> {
        self.get_json(&format!("{AUTHORS}/{id}")).await
    }

    async fn create_author(&self, payload: &AuthorPayload) -> Result<(), ApiError> {
        self.send(Method::POST, AUTHORS, Some(payload), Access::Protected)
            .await
    }

    async fn update_author(&self, id: AuthorId, payload: &AuthorPayload) -> Result<(), ApiError> {
        self.send(Method::PUT, &format!("{AUTHORS}/{id}"), Some(payload), Access::Protected)
            .await
    }

    async fn delete_author(&self, id: AuthorId) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, &format!("{AUTHORS}/{id}"), None, Access::Protected)
            .await
    }

    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get_json(BOOKS).await
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        self.get_json(&format!("{BOOKS}/{id}")).await
    }

    async fn create_book(&self, payload: &BookPayload) -> Result<(), ApiError> {
        self.send(Method::POST, BOOKS, Some(payload), Access::Protected)
            .await
    }

    async fn update_book(&self, id: BookId, payload: &BookPayload) -> Result<(), ApiError> {
        self.send(Method::PUT, &format!("{BOOKS}/{id}"), Some(payload), Access::Protected)
            .await
    }

    async fn delete_book(&self, id: BookId) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, &format!("{BOOKS}/{id}"), None, Access::Protected)
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let body = self
            .request(Method::POST, LOGIN, Some(request), Access::Public)
            .await?;
        decode(&body)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.send(Method::POST, REGISTER, Some(request), Access::Public)
            .await
    }
}
