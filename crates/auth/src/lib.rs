//! `libris-auth`: client-side session state.
//!
//! Every read or write of the stored credentials goes through
//! [`SessionManager`]; views never touch a [`CredentialStore`] directly.
//! The crate is decoupled from HTTP: redirects are returned as
//! [`libris_core::Navigation`] values for the host to perform.

pub mod claims;
pub mod manager;
pub mod roles;
pub mod session;
pub mod store;

pub use claims::{resolve_role, role_from_token};
pub use manager::SessionManager;
pub use roles::{Role, UnknownRole};
pub use session::Session;
pub use store::{CredentialStore, MemoryCredentialStore, StoreError};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileCredentialStore;
