//! Book genres.
//!
//! The server transmits genre as the ordinal of a fixed ten-value
//! enumeration, so the order of `BookGenre::ALL` is part of the wire contract.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum BookGenre {
    Fiction,
    NonFiction,
    ScienceFiction,
    Biography,
    Mystery,
    Romance,
    Fantasy,
    History,
    Thriller,
    SelfHelp,
}

impl BookGenre {
    /// Every genre, in wire-code order.
    pub const ALL: [BookGenre; 10] = [
        BookGenre::Fiction,
        BookGenre::NonFiction,
        BookGenre::ScienceFiction,
        BookGenre::Biography,
        BookGenre::Mystery,
        BookGenre::Romance,
        BookGenre::Fantasy,
        BookGenre::History,
        BookGenre::Thriller,
        BookGenre::SelfHelp,
    ];

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(DomainError::UnknownGenre(code))
    }

    pub fn label(self) -> &'static str {
        match self {
            BookGenre::Fiction => "Fiction",
            BookGenre::NonFiction => "NonFiction",
            BookGenre::ScienceFiction => "ScienceFiction",
            BookGenre::Biography => "Biography",
            BookGenre::Mystery => "Mystery",
            BookGenre::Romance => "Romance",
            BookGenre::Fantasy => "Fantasy",
            BookGenre::History => "History",
            BookGenre::Thriller => "Thriller",
            BookGenre::SelfHelp => "SelfHelp",
        }
    }

    /// Selection-input options for every genre.
    pub fn options() -> Vec<GenreOption> {
        Self::ALL
            .iter()
            .map(|g| GenreOption {
                code: g.code(),
                label: g.label(),
            })
            .collect()
    }
}

impl core::fmt::Display for BookGenre {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for BookGenre {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_code(value)
    }
}

impl From<BookGenre> for i64 {
    fn from(value: BookGenre) -> Self {
        value.code()
    }
}

/// Read-only id+label pair for a genre selection input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreOption {
    pub code: i64,
    pub label: &'static str,
}
