//! Page components and the glue between screen controllers and signals.
//!
//! Controllers live in `RwSignal`s. Async results are applied with
//! `try_update`, so a page torn down before its fetch resolves is left alone.

mod account;
mod create;
mod details;
mod lists;

use std::future::Future;

use leptos::*;
use libris_core::Navigation;
use libris_forms::{AuthorDraft, AuthorName, BookDraft, LoginDraft, RegisterDraft};
use libris_screens::{CreateScreen, DetailScreen, EntityKind, LoginScreen, RegisterScreen, ScreenState};

use crate::app::Go;

pub use account::{LoginPage, RegisterPage};
pub use create::{AddAuthorPage, AddBookPage};
pub use details::{AuthorDetailPage, BookDetailPage};
pub use lists::{AuthorsPage, BooksPage};

/// Await `work` off the render path, then apply its result if the screen still exists.
pub(crate) fn settle<S, R, F>(
    screen: RwSignal<S>,
    work: F,
    apply: impl FnOnce(&mut S, R) -> Option<Navigation> + 'static,
    go: Go,
) where
    S: 'static,
    R: 'static,
    F: Future<Output = R> + 'static,
{
    spawn_local(async move {
        let result = work.await;
        if let Some(Some(nav)) = screen.try_update(|s| apply(s, result)) {
            go(nav);
        }
    });
}

/// What a page should draw, derived once per transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Phase {
    Loading,
    Failed(String),
    Ready,
    Editing,
}

pub(crate) fn phase_of<T>(state: &ScreenState<T>, editing: impl FnOnce(&T) -> bool) -> Phase {
    match state {
        ScreenState::Ready(view) if editing(view) => Phase::Editing,
        ScreenState::Ready(_) => Phase::Ready,
        ScreenState::Error(msg) => Phase::Failed(msg.clone()),
        ScreenState::Idle | ScreenState::Loading | ScreenState::Redirected(_) => Phase::Loading,
    }
}

pub(crate) fn notice_view(notice: Signal<Option<String>>, dismiss: Callback<()>) -> impl IntoView {
    move || {
        notice.get().map(|msg| {
            view! {
                <p class="notice">
                    {msg}
                    <button class="dismiss" on:click=move |_| dismiss.call(())>"×"</button>
                </p>
            }
        })
    }
}

/// Screens that expose an editable draft.
pub(crate) trait DraftHost<D> {
    fn draft(&self) -> Option<&D>;
    fn draft_mut(&mut self) -> Option<&mut D>;
    fn field_error(&self, field: &str) -> Option<String>;
}

impl<K: EntityKind> DraftHost<K::Draft> for DetailScreen<K> {
    fn draft(&self) -> Option<&K::Draft> {
        DetailScreen::draft(self)
    }

    fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        DetailScreen::draft_mut(self)
    }

    fn field_error(&self, field: &str) -> Option<String> {
        self.errors()?.get(field).map(str::to_string)
    }
}

impl<K: EntityKind> DraftHost<K::Draft> for CreateScreen<K> {
    fn draft(&self) -> Option<&K::Draft> {
        self.form().map(|form| &form.draft)
    }

    fn draft_mut(&mut self) -> Option<&mut K::Draft> {
        CreateScreen::draft_mut(self)
    }

    fn field_error(&self, field: &str) -> Option<String> {
        self.form()?.errors.get(field).map(str::to_string)
    }
}

impl DraftHost<LoginDraft> for LoginScreen {
    fn draft(&self) -> Option<&LoginDraft> {
        Some(LoginScreen::draft(self))
    }

    fn draft_mut(&mut self) -> Option<&mut LoginDraft> {
        Some(LoginScreen::draft_mut(self))
    }

    fn field_error(&self, field: &str) -> Option<String> {
        self.errors().get(field).map(str::to_string)
    }
}

impl DraftHost<RegisterDraft> for RegisterScreen {
    fn draft(&self) -> Option<&RegisterDraft> {
        Some(RegisterScreen::draft(self))
    }

    fn draft_mut(&mut self) -> Option<&mut RegisterDraft> {
        Some(RegisterScreen::draft_mut(self))
    }

    fn field_error(&self, field: &str) -> Option<String> {
        self.errors().get(field).map(str::to_string)
    }
}

/// A text-like input bound to one draft field.
pub(crate) fn input<S, D>(
    screen: RwSignal<S>,
    label: &'static str,
    kind: &'static str,
    field: &'static str,
    get: fn(&D) -> String,
    set: fn(&mut D, String),
) -> impl IntoView
where
    S: DraftHost<D> + 'static,
    D: 'static,
{
    let value = move || screen.with(|s| s.draft().map(get).unwrap_or_default());
    let error = move || screen.with(|s| s.field_error(field));
    let on_input = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        screen.update(|s| {
            if let Some(draft) = s.draft_mut() {
                set(draft, raw);
            }
        });
    };

    view! {
        <label class="field">
            <span>{label}</span>
            {if kind == "textarea" {
                view! { <textarea prop:value=value on:input=on_input></textarea> }.into_view()
            } else {
                view! { <input type=kind prop:value=value on:input=on_input/> }.into_view()
            }}
            {move || error().map(|msg| view! { <span class="field-error">{msg}</span> })}
        </label>
    }
}

/// A select bound to one draft field. `options` are `(value, label)` pairs.
pub(crate) fn select<S, D>(
    screen: RwSignal<S>,
    label: &'static str,
    field: &'static str,
    options: Signal<Vec<(String, String)>>,
    get: fn(&D) -> String,
    set: fn(&mut D, String),
) -> impl IntoView
where
    S: DraftHost<D> + 'static,
    D: 'static,
{
    let value = move || screen.with(|s| s.draft().map(get).unwrap_or_default());
    let error = move || screen.with(|s| s.field_error(field));

    view! {
        <label class="field">
            <span>{label}</span>
            <select on:change=move |ev: web_sys::Event| {
                let raw = event_target_value(&ev);
                screen.update(|s| {
                    if let Some(draft) = s.draft_mut() {
                        set(draft, raw);
                    }
                });
            }>
                <option value="">"Select..."</option>
                {move || {
                    let current = value();
                    options
                        .get()
                        .into_iter()
                        .map(|(value, text)| {
                            let selected = value == current;
                            view! { <option value=value selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            {move || error().map(|msg| view! { <span class="field-error">{msg}</span> })}
        </label>
    }
}

fn name_parts(draft: &AuthorDraft) -> (String, String) {
    match &draft.name {
        AuthorName::Split {
            first_name,
            last_name,
        } => (first_name.clone(), last_name.clone()),
        AuthorName::Full(full) => libris_core::author::split_full_name(full),
    }
}

pub(crate) fn author_fields<S>(screen: RwSignal<S>) -> impl IntoView
where
    S: DraftHost<AuthorDraft> + 'static,
{
    view! {
        {input(screen, "First name", "text", "firstName", |d: &AuthorDraft| name_parts(d).0, |d, v| {
            let (_, last_name) = name_parts(d);
            d.name = AuthorName::Split { first_name: v, last_name };
        })}
        {input(screen, "Last name", "text", "lastName", |d: &AuthorDraft| name_parts(d).1, |d, v| {
            let (first_name, _) = name_parts(d);
            d.name = AuthorName::Split { first_name, last_name: v };
        })}
        {input(screen, "Nationality", "text", "nationality", |d: &AuthorDraft| d.nationality.clone(), |d, v| d.nationality = v)}
        {input(screen, "Date of birth", "date", "dateOfBirth", |d: &AuthorDraft| d.date_of_birth.clone(), |d, v| d.date_of_birth = v)}
        {input(screen, "Biography", "textarea", "biography", |d: &AuthorDraft| d.biography.clone(), |d, v| d.biography = v)}
    }
}

pub(crate) fn book_fields<S>(screen: RwSignal<S>, authors: Signal<Vec<(String, String)>>) -> impl IntoView
where
    S: DraftHost<BookDraft> + 'static,
{
    let genres = Signal::derive(|| {
        libris_core::BookGenre::options()
            .into_iter()
            .map(|g| (g.code.to_string(), g.label.to_string()))
            .collect::<Vec<_>>()
    });
    let available = move || screen.with(|s| s.draft().is_some_and(|d| d.is_available));

    view! {
        {input(screen, "Title", "text", "title", |d: &BookDraft| d.title.clone(), |d, v| d.title = v)}
        {select(screen, "Author", "authorId", authors, |d: &BookDraft| d.author_id.clone(), |d, v| d.author_id = v)}
        {input(screen, "Published", "date", "publishedDate", |d: &BookDraft| d.published_date.clone(), |d, v| d.published_date = v)}
        {input(screen, "ISBN", "text", "isbn", |d: &BookDraft| d.isbn.clone(), |d, v| d.isbn = v)}
        {input(screen, "Pages", "number", "pageCount",
            |d: &BookDraft| d.page_count.map(|n| n.to_string()).unwrap_or_default(),
            |d, v| d.set_page_count_input(&v))}
        {input(screen, "Publisher", "text", "publisher", |d: &BookDraft| d.publisher.clone(), |d, v| d.publisher = v)}
        {select(screen, "Genre", "genre", genres,
            |d: &BookDraft| d.genre.map(|g| g.to_string()).unwrap_or_default(),
            |d, v| d.set_genre_input(&v))}
        {input(screen, "Description", "textarea", "description", |d: &BookDraft| d.description.clone(), |d, v| d.description = v)}
        <label class="field checkbox">
            <input
                type="checkbox"
                prop:checked=available
                on:change=move |ev: web_sys::Event| {
                    let checked = event_target_checked(&ev);
                    screen.update(|s| {
                        if let Some(draft) = s.draft_mut() {
                            draft.is_available = checked;
                        }
                    });
                }
            />
            <span>"Available"</span>
        </label>
    }
}
