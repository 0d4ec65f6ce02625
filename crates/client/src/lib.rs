//! `libris-client`: gateway to the library REST API.
//!
//! One attempt per call: no retries, no timeout, no backoff. Failures are
//! classified into [`ApiError`] and surfaced to the caller immediately.

pub mod api;
pub mod classify;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;

pub use api::LibraryApi;
pub use client::{Access, ApiClient};
pub use config::ApiConfig;
pub use dto::{AuthorPayload, BookPayload, LoginRequest, LoginResponse, RegisterRequest};
pub use error::ApiError;
pub use reqwest::Method;
