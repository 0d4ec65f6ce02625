//! Navigation targets shared by every front end.
//!
//! Controllers never navigate themselves; they return a [`Navigation`] and
//! the host decides how to perform it.

use crate::id::{AuthorId, BookId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Authors,
    Books,
    Author(AuthorId),
    Book(BookId),
    AddAuthor,
    AddBook,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Authors => "/authors".to_string(),
            Route::Books => "/books".to_string(),
            Route::Author(id) => format!("/authors/{id}"),
            Route::Book(id) => format!("/books/{id}"),
            Route::AddAuthor => "/add-author".to_string(),
            Route::AddBook => "/add-book".to_string(),
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}

/// A navigation intent.
///
/// `full_reload` asks the host for a full-page load so that every view
/// starts from freshly read state (used around login and logout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub full_reload: bool,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self {
            route,
            full_reload: false,
        }
    }

    pub fn reload(route: Route) -> Self {
        Self {
            route,
            full_reload: true,
        }
    }

    /// Redirect to the login screen (in-app).
    pub fn login() -> Self {
        Self::to(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_router_table() {
        let id: BookId = "3f2504e0-4f89-11d3-9a0c-0305e82c3301".parse().unwrap();
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::AddBook.path(), "/add-book");
        assert_eq!(Route::Book(id).path(), "/books/3f2504e0-4f89-11d3-9a0c-0305e82c3301");
    }
}
