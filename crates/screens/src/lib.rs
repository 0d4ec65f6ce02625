//! `libris-screens`: view controllers shared by every front end.
//!
//! Each screen is a plain state machine (`Idle → Loading → Ready | Error`,
//! plus the terminal `Redirected`). Controllers never perform IO or
//! navigation themselves: loads are split into a synchronous `mount`, an
//! async `fetch` the host runs, and a synchronous `resolve` that drops stale
//! results. Every controller also offers an all-in-one `async` method for
//! hosts that can simply await.

pub mod create;
pub mod detail;
pub mod gate;
pub mod kinds;
pub mod list;
pub mod login;
pub mod nav;
pub mod register;
pub mod state;

#[cfg(test)]
mod testing;

pub use create::{CreateForm, CreateScreen, Creation};
pub use detail::{Deletion, DetailLoad, DetailScreen, DetailView, Submission};
pub use gate::NOT_AUTHORIZED;
pub use kinds::{AuthorKind, BookKind, EntityKind, IdOf, delete_prompt};
pub use list::ListScreen;
pub use login::{BAD_CREDENTIALS, LoginScreen};
pub use nav::{NavItem, nav_menu};
pub use register::RegisterScreen;
pub use state::{LoadTicket, Mode, Mount, ScreenState};

/// Screens for each entity kind.
pub type AuthorList = ListScreen<AuthorKind>;
pub type BookList = ListScreen<BookKind>;
pub type AuthorDetail = DetailScreen<AuthorKind>;
pub type BookDetail = DetailScreen<BookKind>;
pub type AddAuthor = CreateScreen<AuthorKind>;
pub type AddBook = CreateScreen<BookKind>;
