//! Authors and books list screens.

use std::marker::PhantomData;

use libris_auth::SessionManager;
use libris_client::{ApiError, LibraryApi};
use libris_core::Navigation;

use crate::gate;
use crate::kinds::{EntityKind, list_failed};
use crate::state::{Generation, LoadTicket, Mount, ScreenState};

pub struct ListScreen<K: EntityKind> {
    sessions: SessionManager,
    generation: Generation,
    state: ScreenState<Vec<K::Entity>>,
    _kind: PhantomData<K>,
}

impl<K: EntityKind> ListScreen<K> {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            sessions,
            generation: Generation::default(),
            state: ScreenState::Idle,
            _kind: PhantomData,
        }
    }

    pub fn state(&self) -> &ScreenState<Vec<K::Entity>> {
        &self.state
    }

    /// Check the session, then start loading.
    pub fn mount(&mut self) -> Mount {
        match self.sessions.require_session() {
            Err(nav) => {
                self.state = ScreenState::Redirected(nav);
                Mount::Redirect(nav)
            }
            Ok(_) => {
                self.state = ScreenState::Loading;
                Mount::Load(self.generation.issue())
            }
        }
    }

    pub fn unmount(&mut self) {
        self.generation.invalidate();
    }

    pub async fn fetch<A: LibraryApi>(api: &A) -> Result<Vec<K::Entity>, ApiError> {
        K::list(api).await
    }

    /// Apply a finished fetch. Returns a navigation when the session expired.
    pub fn resolve(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<K::Entity>, ApiError>,
    ) -> Option<Navigation> {
        if !self.generation.accepts(ticket) {
            return None;
        }
        match result {
            Ok(items) => {
                tracing::debug!(kind = K::NOUN, count = items.len(), "list loaded");
                self.state = ScreenState::Ready(items);
                None
            }
            Err(err) => match gate::intercept(&self.sessions, err) {
                Err(nav) => {
                    self.state = ScreenState::Redirected(nav);
                    Some(nav)
                }
                Ok(err) => {
                    self.state = ScreenState::Error(gate::load_message(&err, &list_failed::<K>()));
                    None
                }
            },
        }
    }

    /// Mount and load in one go. Returns the navigation the host must perform, if any.
    pub async fn open<A: LibraryApi>(&mut self, api: &A) -> Option<Navigation> {
        match self.mount() {
            Mount::Redirect(nav) => Some(nav),
            Mount::Ready => None,
            Mount::Load(ticket) => {
                let result = Self::fetch(api).await;
                self.resolve(ticket, result)
            }
        }
    }
}
