//! `libris-forms`: client-side validation of form drafts.
//!
//! Validation is pure: a draft maps to a [`FieldErrorSet`], recomputed from
//! scratch on every pass. An empty set is the only thing that lets a draft
//! reach the network.

pub mod account;
pub mod author;
pub mod book;
pub mod errors;
mod rules;

use chrono::NaiveDate;

pub use account::{LoginDraft, RegisterDraft};
pub use author::{AuthorDraft, AuthorName};
pub use book::{BookDraft, BookRules, is_valid_isbn};
pub use errors::{FieldErrorSet, FormError};

/// A draft that can be checked before submission.
pub trait Validate {
    /// Validate against an explicit "today" (deterministic).
    fn validate_on(&self, today: NaiveDate) -> FieldErrorSet;

    /// Validate against the current local date.
    fn validate(&self) -> FieldErrorSet {
        self.validate_on(libris_core::date::today())
    }

    /// `Ok` when the draft may be submitted.
    fn check(&self) -> Result<(), FormError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(errors))
        }
    }
}
