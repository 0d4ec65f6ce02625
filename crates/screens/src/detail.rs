//! Author and book detail screens: view, edit in place, delete.

use futures_util::future::join;
use libris_auth::SessionManager;
use libris_client::{ApiError, LibraryApi};
use libris_core::{AuthorOption, Navigation};
use libris_forms::{FieldErrorSet, Validate};

use crate::gate;
use crate::kinds::{EntityKind, IdOf, delete_failed, delete_prompt, load_failed, update_failed};
use crate::state::{Generation, LoadTicket, Mode, Mount, ScreenState};

/// A loaded detail screen.
pub struct DetailView<K: EntityKind> {
    pub entity: K::Entity,
    /// Author choices for the edit form; empty for kinds without one.
    pub authors: Vec<AuthorOption>,
    pub mode: Mode<K::Draft>,
}

/// Both halves of a detail fetch. Neither blocks the other.
pub struct DetailLoad<K: EntityKind> {
    entity: Result<K::Entity, ApiError>,
    authors: Result<Vec<AuthorOption>, ApiError>,
}

/// A validated edit, ready to send.
pub struct Submission<K: EntityKind> {
    ticket: LoadTicket,
    id: IdOf<K>,
    draft: K::Draft,
}

impl<K: EntityKind> Submission<K> {
    pub async fn send<A: LibraryApi>(&self, api: &A) -> Result<(), ApiError> {
        K::update(api, self.id.clone(), &self.draft).await
    }
}

/// A confirmed delete, ready to send.
pub struct Deletion<K: EntityKind> {
    ticket: LoadTicket,
    id: IdOf<K>,
}

impl<K: EntityKind> Deletion<K> {
    pub async fn send<A: LibraryApi>(&self, api: &A) -> Result<(), ApiError> {
        K::delete(api, self.id.clone()).await
    }
}

pub struct DetailScreen<K: EntityKind> {
    sessions: SessionManager,
    id: IdOf<K>,
    generation: Generation,
    state: ScreenState<DetailView<K>>,
    notice: Option<String>,
    /// An update or delete is in flight.
    submitting: bool,
}

impl<K: EntityKind> DetailScreen<K> {
    pub fn new(sessions: SessionManager, id: IdOf<K>) -> Self {
        Self {
            sessions,
            id,
            generation: Generation::default(),
            state: ScreenState::Idle,
            notice: None,
            submitting: false,
        }
    }

    pub fn id(&self) -> &IdOf<K> {
        &self.id
    }

    pub fn state(&self) -> &ScreenState<DetailView<K>> {
        &self.state
    }

    pub fn view(&self) -> Option<&DetailView<K>> {
        self.state.ready()
    }

    /// Dismissible failure message from the last action.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn mount(&mut self) -> Mount {
        self.notice = None;
        self.submitting = false;
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
        self.submitting = false;
    }

    /// Fetch the record and the author options concurrently.
    pub async fn fetch<A: LibraryApi>(api: &A, id: IdOf<K>) -> DetailLoad<K> {
        let (entity, authors) = join(K::fetch(api, id), K::author_options(api)).await;
        DetailLoad { entity, authors }
    }

    pub fn resolve(&mut self, ticket: LoadTicket, load: DetailLoad<K>) -> Option<Navigation> {
        if !self.generation.accepts(ticket) {
            return None;
        }

        let entity = match load.entity {
            Ok(entity) => entity,
            Err(err) => {
                return match gate::intercept(&self.sessions, err) {
                    Err(nav) => self.redirect(nav),
                    Ok(err) => {
                        tracing::warn!(kind = K::NOUN, id = %self.id, "load failed: {err}");
                        self.state = ScreenState::Error(gate::load_message(&err, &load_failed::<K>()));
                        None
                    }
                };
            }
        };

        let authors = match load.authors {
            Ok(authors) => authors,
            Err(err) => match gate::intercept(&self.sessions, err) {
                Err(nav) => return self.redirect(nav),
                Ok(err) => {
                    tracing::warn!("author options unavailable: {err}");
                    self.notice = Some("Failed to load authors".to_string());
                    Vec::new()
                }
            },
        };

        self.state = ScreenState::Ready(DetailView {
            entity,
            authors,
            mode: Mode::Viewing,
        });
        None
    }

    pub async fn open<A: LibraryApi>(&mut self, api: &A) -> Option<Navigation> {
        match self.mount() {
            Mount::Redirect(nav) => Some(nav),
            Mount::Ready => None,
            Mount::Load(ticket) => {
                let load = Self::fetch(api, self.id.clone()).await;
                self.resolve(ticket, load)
            }
        }
    }

    pub fn can_edit(&self) -> bool {
        let session = self.sessions.get_session();
        session.is_authenticated() && (!K::EDIT_REQUIRES_ADMIN || session.is_admin())
    }

    pub fn can_delete(&self) -> bool {
        self.sessions.is_admin()
    }

    /// `Viewing → Editing` with a draft of the displayed record.
    pub fn begin_edit(&mut self) -> bool {
        if !self.can_edit() {
            tracing::debug!(kind = K::NOUN, "edit not permitted for this role");
            return false;
        }
        match self.state.ready_mut() {
            Some(view) if !view.mode.is_editing() => {
                view.mode = Mode::Editing {
                    draft: K::draft_from(&view.entity),
                    errors: FieldErrorSet::new(),
                };
                true
            }
            _ => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(view) = self.state.ready_mut() {
            view.mode = Mode::Viewing;
        }
        self.notice = None;
    }

    pub fn draft(&self) -> Option<&K::Draft> {
        match self.view().map(|view| &view.mode) {
            Some(Mode::Editing { draft, .. }) => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        match self.state.ready_mut().map(|view| &mut view.mode) {
            Some(Mode::Editing { draft, .. }) => Some(draft),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrorSet> {
        match self.view().map(|view| &view.mode) {
            Some(Mode::Editing { errors, .. }) => Some(errors),
            _ => None,
        }
    }

    /// Validate the draft. Invalid drafts stay in `Editing` with their errors.
    /// `None` while another update or delete is in flight.
    pub fn prepare_submit(&mut self) -> Option<Submission<K>> {
        if self.submitting {
            return None;
        }
        let Some(view) = self.state.ready_mut() else {
            return None;
        };
        let Mode::Editing { draft, errors } = &mut view.mode else {
            return None;
        };

        *errors = draft.validate();
        if !errors.is_empty() {
            tracing::debug!(kind = K::NOUN, fields = errors.len(), "edit rejected by validation");
            return None;
        }

        let draft = draft.clone();
        self.notice = None;
        self.submitting = true;
        Some(Submission {
            ticket: self.generation.current(),
            id: self.id.clone(),
            draft,
        })
    }

    pub fn finish_submit(
        &mut self,
        submission: Submission<K>,
        result: Result<(), ApiError>,
    ) -> Option<Navigation> {
        if !self.generation.accepts(submission.ticket) {
            return None;
        }
        self.submitting = false;
        match result {
            Ok(()) => {
                if let Some(view) = self.state.ready_mut() {
                    K::merge(&submission.draft, &mut view.entity, &view.authors);
                    view.mode = Mode::Viewing;
                }
                tracing::info!(kind = K::NOUN, id = %self.id, "updated");
                None
            }
            Err(err) => match gate::intercept(&self.sessions, err) {
                Err(nav) => self.redirect(nav),
                Ok(err) => {
                    tracing::warn!(kind = K::NOUN, id = %self.id, "update failed: {err}");
                    self.notice = Some(update_failed::<K>());
                    None
                }
            },
        }
    }

    pub async fn submit<A: LibraryApi>(&mut self, api: &A) -> Option<Navigation> {
        let submission = self.prepare_submit()?;
        let result = submission.send(api).await;
        self.finish_submit(submission, result)
    }

    /// Admin only. `confirm` is asked first and must affirm.
    pub fn prepare_delete(&mut self, confirm: impl FnOnce(&str) -> bool) -> Option<Deletion<K>> {
        if self.submitting {
            return None;
        }
        if !self.can_delete() {
            tracing::debug!(kind = K::NOUN, "delete not permitted for this role");
            return None;
        }
        self.view()?;
        if !confirm(&delete_prompt::<K>()) {
            return None;
        }
        self.notice = None;
        self.submitting = true;
        Some(Deletion {
            ticket: self.generation.current(),
            id: self.id.clone(),
        })
    }

    pub fn finish_delete(&mut self, deletion: Deletion<K>, result: Result<(), ApiError>) -> Option<Navigation> {
        if !self.generation.accepts(deletion.ticket) {
            return None;
        }
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!(kind = K::NOUN, id = %self.id, "deleted");
                self.redirect(Navigation::to(K::list_route()))
            }
            Err(err) => match gate::intercept(&self.sessions, err) {
                Err(nav) => self.redirect(nav),
                Ok(err) => {
                    tracing::warn!(kind = K::NOUN, id = %self.id, "delete failed: {err}");
                    self.notice = Some(delete_failed::<K>());
                    None
                }
            },
        }
    }

    pub async fn delete<A: LibraryApi>(
        &mut self,
        api: &A,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Option<Navigation> {
        let deletion = self.prepare_delete(confirm)?;
        let result = deletion.send(api).await;
        self.finish_delete(deletion, result)
    }

    fn redirect(&mut self, nav: Navigation) -> Option<Navigation> {
        self.state = ScreenState::Redirected(nav);
        Some(nav)
    }
}
