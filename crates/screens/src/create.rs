//! Add-author and add-book screens.

use libris_auth::SessionManager;
use libris_client::{ApiError, LibraryApi};
use libris_core::{AuthorOption, Navigation};
use libris_forms::{FieldErrorSet, Validate};

use crate::gate;
use crate::kinds::{EntityKind, create_failed};
use crate::state::{Generation, LoadTicket, Mount, ScreenState};

pub struct CreateForm<K: EntityKind> {
    pub draft: K::Draft,
    pub errors: FieldErrorSet,
    pub authors: Vec<AuthorOption>,
}

impl<K: EntityKind> CreateForm<K> {
    fn new(authors: Vec<AuthorOption>) -> Self {
        Self {
            draft: K::empty_draft(),
            errors: FieldErrorSet::new(),
            authors,
        }
    }
}

/// A validated draft, ready to send.
pub struct Creation<K: EntityKind> {
    ticket: LoadTicket,
    draft: K::Draft,
}

impl<K: EntityKind> Creation<K> {
    pub async fn send<A: LibraryApi>(&self, api: &A) -> Result<(), ApiError> {
        K::create(api, &self.draft).await
    }
}

pub struct CreateScreen<K: EntityKind> {
    sessions: SessionManager,
    generation: Generation,
    state: ScreenState<CreateForm<K>>,
    notice: Option<String>,
    submitting: bool,
}

impl<K: EntityKind> CreateScreen<K> {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            sessions,
            generation: Generation::default(),
            state: ScreenState::Idle,
            notice: None,
            submitting: false,
        }
    }

    pub fn state(&self) -> &ScreenState<CreateForm<K>> {
        &self.state
    }

    pub fn form(&self) -> Option<&CreateForm<K>> {
        self.state.ready()
    }

    pub fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        self.state.ready_mut().map(|form| &mut form.draft)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Author options are only requested once the session check passed.
    pub fn mount(&mut self) -> Mount {
        self.notice = None;
        self.submitting = false;
        if let Err(nav) = self.sessions.require_session() {
            self.state = ScreenState::Redirected(nav);
            return Mount::Redirect(nav);
        }
        if K::USES_AUTHOR_OPTIONS {
            self.state = ScreenState::Loading;
            Mount::Load(self.generation.issue())
        } else {
            self.state = ScreenState::Ready(CreateForm::new(Vec::new()));
            Mount::Ready
        }
    }

    pub fn unmount(&mut self) {
        self.generation.invalidate();
        self.submitting = false;
    }

    pub async fn fetch<A: LibraryApi>(api: &A) -> Result<Vec<AuthorOption>, ApiError> {
        K::author_options(api).await
    }

    /// Option failures still open the form, with a notice.
    pub fn resolve(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<AuthorOption>, ApiError>,
    ) -> Option<Navigation> {
        if !self.generation.accepts(ticket) {
            return None;
        }
        let authors = match result {
            Ok(authors) => authors,
            Err(err) => match gate::intercept(&self.sessions, err) {
                Err(nav) => {
                    self.state = ScreenState::Redirected(nav);
                    return Some(nav);
                }
                Ok(err) => {
                    tracing::warn!("author options unavailable: {err}");
                    self.notice = Some("Failed to load authors".to_string());
                    Vec::new()
                }
            },
        };
        self.state = ScreenState::Ready(CreateForm::new(authors));
        None
    }

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

    /// `None` while invalid or while a submission is in flight.
    pub fn prepare_submit(&mut self) -> Option<Creation<K>> {
        if self.submitting {
            return None;
        }
        let form = self.state.ready_mut()?;
        form.errors = form.draft.validate();
        if !form.errors.is_empty() {
            tracing::debug!(kind = K::NOUN, fields = form.errors.len(), "draft rejected by validation");
            return None;
        }
        let draft = form.draft.clone();
        self.notice = None;
        self.submitting = true;
        Some(Creation {
            ticket: self.generation.current(),
            draft,
        })
    }

    /// Success leaves for the list screen; failure keeps the form as typed.
    pub fn finish_submit(&mut self, creation: Creation<K>, result: Result<(), ApiError>) -> Option<Navigation> {
        if !self.generation.accepts(creation.ticket) {
            return None;
        }
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(kind = K::NOUN, "created");
                let nav = Navigation::to(K::list_route());
                self.state = ScreenState::Redirected(nav);
                Some(nav)
            }
            Err(err) => match gate::intercept(&self.sessions, err) {
                Err(nav) => {
                    self.state = ScreenState::Redirected(nav);
                    Some(nav)
                }
                Ok(err) => {
                    tracing::warn!(kind = K::NOUN, "create failed: {err}");
                    self.notice = Some(gate::server_message(&err, &create_failed::<K>()));
                    None
                }
            },
        }
    }

    pub async fn submit<A: LibraryApi>(&mut self, api: &A) -> Option<Navigation> {
        let creation = self.prepare_submit()?;
        let result = creation.send(api).await;
        self.finish_submit(creation, result)
    }
}
