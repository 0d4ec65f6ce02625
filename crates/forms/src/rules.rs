//! Shared field rules. `label` is the human name used in messages.

use chrono::NaiveDate;
use libris_core::date::parse_date;

use crate::errors::FieldErrorSet;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Required (non-blank after trimming). Returns whether the value is present.
pub(crate) fn required(errors: &mut FieldErrorSet, field: &'static str, label: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required."));
        false
    } else {
        true
    }
}

pub(crate) fn max_chars(errors: &mut FieldErrorSet, field: &'static str, label: &str, value: &str, max: usize) {
    if char_len(value) > max {
        errors.insert(field, format!("{label} cannot exceed {max} characters."));
    }
}

pub(crate) fn required_text(
    errors: &mut FieldErrorSet,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) {
    if required(errors, field, label, value) {
        max_chars(errors, field, label, value, max);
    }
}

/// Date that must not be strictly later than `today`. Blank is accepted
/// unless `mandatory`.
pub(crate) fn past_or_today(
    errors: &mut FieldErrorSet,
    field: &'static str,
    label: &str,
    value: &str,
    today: NaiveDate,
    mandatory: bool,
) {
    if value.trim().is_empty() {
        if mandatory {
            errors.insert(field, format!("{label} is required."));
        }
        return;
    }

    match parse_date(value) {
        Ok(date) if date > today => {
            errors.insert(field, format!("{label} cannot be in the future."));
        }
        Ok(_) => {}
        Err(_) => {
            errors.insert(field, format!("{label} must be a valid date."));
        }
    }
}
