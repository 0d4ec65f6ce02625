//! `libris-core`: library domain building blocks.
//!
//! Wire-shaped records for authors and books, the genre enumeration, typed
//! identifiers and the navigation targets every front end shares. No IO.

pub mod author;
pub mod book;
pub mod date;
pub mod entity;
pub mod error;
pub mod genre;
pub mod id;
pub mod route;

pub use author::{Author, AuthorOption, BookSummary};
pub use book::Book;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use genre::{BookGenre, GenreOption};
pub use id::{AuthorId, BookId};
pub use route::{Navigation, Route};
