//! Screen lifecycle shared by every controller.

use libris_core::Navigation;
use libris_forms::FieldErrorSet;

/// Where a screen is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    /// Constructed, not yet mounted.
    Idle,
    Loading,
    Ready(T),
    Error(String),
    /// Terminal: the host has been told to navigate away.
    Redirected(Navigation),
}

impl<T> ScreenState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ScreenState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ScreenState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<Navigation> {
        match self {
            ScreenState::Redirected(nav) => Some(*nav),
            _ => None,
        }
    }
}

/// What the host must do right after mounting a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Mount {
    /// Run the screen's fetch and hand the result back with this ticket.
    Load(LoadTicket),
    /// Navigate away. Nothing was fetched.
    Redirect(Navigation),
    /// Nothing to fetch; the screen is already `Ready`.
    Ready,
}

/// Proof that a result belongs to the screen's current load.
///
/// Unmounting or remounting bumps the generation, so a fetch that resolves
/// for a torn-down view carries a stale ticket and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub(crate) struct Generation(u64);

impl Generation {
    pub(crate) fn issue(&mut self) -> LoadTicket {
        self.0 += 1;
        LoadTicket(self.0)
    }

    /// Ticket for work that belongs to the current load without superseding it.
    pub(crate) fn current(&self) -> LoadTicket {
        LoadTicket(self.0)
    }

    pub(crate) fn invalidate(&mut self) {
        self.0 += 1;
    }

    pub(crate) fn accepts(&self, ticket: LoadTicket) -> bool {
        let current = ticket.0 == self.0;
        if !current {
            tracing::debug!(ticket = ticket.0, current = self.0, "dropping stale result");
        }
        current
    }
}

/// Detail screen sub-state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<D> {
    Viewing,
    Editing { draft: D, errors: FieldErrorSet },
}

impl<D> Mode<D> {
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing { .. })
    }
}
