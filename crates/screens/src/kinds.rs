//! Per-entity configuration for the generic list, detail and create screens.

use libris_client::{ApiError, AuthorPayload, BookPayload, LibraryApi};
use libris_core::{Author, AuthorId, AuthorOption, Book, BookId, Entity, Route};
use libris_forms::{AuthorDraft, BookDraft, Validate};

/// Identifier type of a kind's entity.
pub type IdOf<K> = <<K as EntityKind>::Entity as Entity>::Id;

/// Everything that differs between the author and book screens.
#[allow(async_fn_in_trait)]
pub trait EntityKind: Sized {
    type Entity: Entity + Clone;
    type Draft: Validate + Clone;

    /// Lowercase singular, used in user-facing messages.
    const NOUN: &'static str;
    /// Whether editing needs the Admin role. Deleting always does.
    const EDIT_REQUIRES_ADMIN: bool;
    /// Whether forms for this kind offer an author selection.
    const USES_AUTHOR_OPTIONS: bool;

    fn list_route() -> Route;
    fn detail_route(id: &IdOf<Self>) -> Route;

    fn empty_draft() -> Self::Draft;
    fn draft_from(entity: &Self::Entity) -> Self::Draft;
    /// Apply a submitted draft to the displayed record.
    fn merge(draft: &Self::Draft, entity: &mut Self::Entity, authors: &[AuthorOption]);

    async fn list<A: LibraryApi>(api: &A) -> Result<Vec<Self::Entity>, ApiError>;
    async fn fetch<A: LibraryApi>(api: &A, id: IdOf<Self>) -> Result<Self::Entity, ApiError>;
    async fn create<A: LibraryApi>(api: &A, draft: &Self::Draft) -> Result<(), ApiError>;
    async fn update<A: LibraryApi>(api: &A, id: IdOf<Self>, draft: &Self::Draft) -> Result<(), ApiError>;
    async fn delete<A: LibraryApi>(api: &A, id: IdOf<Self>) -> Result<(), ApiError>;

    /// Author choices for the form, or nothing for kinds that have none.
    async fn author_options<A: LibraryApi>(api: &A) -> Result<Vec<AuthorOption>, ApiError> {
        if Self::USES_AUTHOR_OPTIONS {
            api.author_options().await
        } else {
            Ok(Vec::new())
        }
    }
}

pub(crate) fn list_failed<K: EntityKind>() -> String {
    format!("Failed to load {}s", K::NOUN)
}

pub(crate) fn load_failed<K: EntityKind>() -> String {
    format!("Error loading {} details", K::NOUN)
}

pub(crate) fn create_failed<K: EntityKind>() -> String {
    format!("Failed to create {}", K::NOUN)
}

pub(crate) fn update_failed<K: EntityKind>() -> String {
    format!("Failed to update {}", K::NOUN)
}

pub(crate) fn delete_failed<K: EntityKind>() -> String {
    format!("Failed to delete {}", K::NOUN)
}

/// Prompt shown before a delete is issued.
pub fn delete_prompt<K: EntityKind>() -> String {
    format!("Are you sure you want to delete this {}?", K::NOUN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorKind;

impl EntityKind for AuthorKind {
    type Entity = Author;
    type Draft = AuthorDraft;

    const NOUN: &'static str = "author";
    const EDIT_REQUIRES_ADMIN: bool = false;
    const USES_AUTHOR_OPTIONS: bool = false;

    fn list_route() -> Route {
        Route::Authors
    }

    fn detail_route(id: &AuthorId) -> Route {
        Route::Author(*id)
    }

    fn empty_draft() -> AuthorDraft {
        AuthorDraft::empty()
    }

    fn draft_from(author: &Author) -> AuthorDraft {
        AuthorDraft::from_author(author)
    }

    fn merge(draft: &AuthorDraft, author: &mut Author, _authors: &[AuthorOption]) {
        draft.merge_into(author);
    }

    async fn list<A: LibraryApi>(api: &A) -> Result<Vec<Author>, ApiError> {
        api.list_authors().await
    }

    async fn fetch<A: LibraryApi>(api: &A, id: AuthorId) -> Result<Author, ApiError> {
        api.get_author(id).await
    }

    async fn create<A: LibraryApi>(api: &A, draft: &AuthorDraft) -> Result<(), ApiError> {
        api.create_author(&AuthorPayload::from(draft)).await
    }

    async fn update<A: LibraryApi>(api: &A, id: AuthorId, draft: &AuthorDraft) -> Result<(), ApiError> {
        api.update_author(id, &AuthorPayload::from(draft)).await
    }

    async fn delete<A: LibraryApi>(api: &A, id: AuthorId) -> Result<(), ApiError> {
        api.delete_author(id).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookKind;

impl EntityKind for BookKind {
    type Entity = Book;
    type Draft = BookDraft;

    const NOUN: &'static str = "book";
    const EDIT_REQUIRES_ADMIN: bool = true;
    const USES_AUTHOR_OPTIONS: bool = true;

    fn list_route() -> Route {
        Route::Books
    }

    fn detail_route(id: &BookId) -> Route {
        Route::Book(*id)
    }

    fn empty_draft() -> BookDraft {
        BookDraft::empty()
    }

    fn draft_from(book: &Book) -> BookDraft {
        BookDraft::from_book(book)
    }

    fn merge(draft: &BookDraft, book: &mut Book, authors: &[AuthorOption]) {
        draft.merge_into(book);
        if let Some(author) = authors.iter().find(|a| a.id == book.author_id) {
            book.author_name = Some(author.full_name.clone());
        }
    }

    async fn list<A: LibraryApi>(api: &A) -> Result<Vec<Book>, ApiError> {
        api.list_books().await
    }

    async fn fetch<A: LibraryApi>(api: &A, id: BookId) -> Result<Book, ApiError> {
        api.get_book(id).await
    }

    async fn create<A: LibraryApi>(api: &A, draft: &BookDraft) -> Result<(), ApiError> {
        api.create_book(&BookPayload::from(draft)).await
    }

    async fn update<A: LibraryApi>(api: &A, id: BookId, draft: &BookDraft) -> Result<(), ApiError> {
        api.update_book(id, &BookPayload::from(draft)).await
    }

    async fn delete<A: LibraryApi>(api: &A, id: BookId) -> Result<(), ApiError> {
        api.delete_book(id).await
    }
}
