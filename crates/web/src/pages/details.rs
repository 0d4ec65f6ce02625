use leptos::*;
use leptos_router::{A, use_params_map};
use libris_core::date::form_value;
use libris_core::{AuthorId, BookId, Route};
use libris_screens::{AuthorDetail, BookDetail, DetailScreen, EntityKind, IdOf, Mount};

use super::{Phase, author_fields, book_fields, notice_view, phase_of, settle};
use crate::app::{Go, Services, navigator};

/// Mount a detail screen and start its fetch.
fn start<K>(screen: RwSignal<DetailScreen<K>>, services: &Services, go: Go)
where
    K: EntityKind + 'static,
{
    on_cleanup(move || {
        screen.try_update(|s| s.unmount());
    });

    match screen.try_update(|s| s.mount()) {
        Some(Mount::Load(ticket)) => {
            let api = services.api.clone();
            let id: IdOf<K> = screen.with_untracked(|s| s.id().clone());
            settle(
                screen,
                async move { DetailScreen::<K>::fetch(&api, id).await },
                move |s, load| s.resolve(ticket, load),
                go,
            );
        }
        Some(Mount::Redirect(nav)) => go(nav),
        _ => {}
    }
}

/// Toolbar and form plumbing shared by both detail pages.
fn controls<K>(screen: RwSignal<DetailScreen<K>>, services: &Services, go: Go) -> impl IntoView
where
    K: EntityKind + 'static,
{
    let submit = {
        let api = services.api.clone();
        let go = go.clone();
        move |_| {
            let Some(Some(submission)) = screen.try_update(|s| s.prepare_submit()) else {
                return;
            };
            let api = api.clone();
            let go = go.clone();
            spawn_local(async move {
                let result = submission.send(&api).await;
                if let Some(Some(nav)) = screen.try_update(|s| s.finish_submit(submission, result)) {
                    go(nav);
                }
            });
        }
    };

    let delete = {
        let api = services.api.clone();
        move |_| {
            let confirmed = |prompt: &str| {
                web_sys::window()
                    .and_then(|w| w.confirm_with_message(prompt).ok())
                    .unwrap_or(false)
            };
            let Some(Some(deletion)) = screen.try_update(|s| s.prepare_delete(confirmed)) else {
                return;
            };
            let api = api.clone();
            let go = go.clone();
            spawn_local(async move {
                let result = deletion.send(&api).await;
                if let Some(Some(nav)) = screen.try_update(|s| s.finish_delete(deletion, result)) {
                    go(nav);
                }
            });
        }
    };

    let editing = create_memo(move |_| screen.with(|s| s.view().is_some_and(|v| v.mode.is_editing())));
    let can_edit = move || screen.with(|s| s.can_edit());
    let can_delete = move || screen.with(|s| s.can_delete());

    view! {
        <div class="actions">
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <Show when=can_edit>
                            <button on:click=move |_| {
                                screen.update(|s| {
                                    s.begin_edit();
                                });
                            }>"Edit"</button>
                        </Show>
                        <Show when=can_delete>
                            <button class="danger" on:click=delete.clone()>"Delete"</button>
                        </Show>
                    }
                }
            >
                <button on:click=submit.clone()>"Save"</button>
                <button on:click=move |_| screen.update(|s| s.cancel_edit())>"Cancel"</button>
            </Show>
            <A href=K::list_route().path()>"Back"</A>
        </div>
    }
}

fn phase_memo<K: EntityKind + 'static>(screen: RwSignal<DetailScreen<K>>) -> Memo<Phase> {
    create_memo(move |_| screen.with(|s| phase_of(s.state(), |v| v.mode.is_editing())))
}

fn notice<K: EntityKind + 'static>(screen: RwSignal<DetailScreen<K>>) -> impl IntoView {
    notice_view(
        Signal::derive(move || screen.with(|s| s.notice().map(str::to_string))),
        Callback::new(move |_| screen.update(|s| s.dismiss_notice())),
    )
}

#[component]
pub fn AuthorDetailPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let id = use_params_map().with_untracked(|p| p.get("id").and_then(|raw| raw.parse::<AuthorId>().ok()));
    let Some(id) = id else {
        return view! { <p class="error">"Author not found"</p> }.into_view();
    };

    let screen = create_rw_signal(AuthorDetail::new(services.sessions.clone(), id));
    start(screen, &services, go.clone());
    let phase = phase_memo(screen);

    view! {
        <section class="author-details">
            {notice(screen)}
            {move || match phase.get() {
                Phase::Loading => view! { <p>"Loading..."</p> }.into_view(),
                Phase::Failed(msg) => view! { <p class="error">{msg}</p> }.into_view(),
                Phase::Editing => view! { <form class="edit-form">{author_fields(screen)}</form> }.into_view(),
                Phase::Ready => screen.with(|s| {
                    s.view()
                        .map(|v| {
                            let author = &v.entity;
                            view! {
                                <h2>{author.full_name.clone()}</h2>
                                <p>{author.nationality.clone().unwrap_or_default()}</p>
                                <p>{author.date_of_birth.as_deref().map(form_value).unwrap_or_default()}</p>
                                <p class="bio">{author.biography.clone().unwrap_or_default()}</p>
                                <ul class="books">
                                    {author
                                        .books
                                        .iter()
                                        .map(|b| view! {
                                            <li><A href=Route::Book(b.id).path()>{b.title.clone()}</A></li>
                                        })
                                        .collect_view()}
                                </ul>
                            }
                            .into_view()
                        })
                        .unwrap_or_else(|| ().into_view())
                }),
            }}
            {controls(screen, &services, go)}
        </section>
    }
    .into_view()
}

#[component]
pub fn BookDetailPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let id = use_params_map().with_untracked(|p| p.get("id").and_then(|raw| raw.parse::<BookId>().ok()));
    let Some(id) = id else {
        return view! { <p class="error">"Book not found"</p> }.into_view();
    };

    let screen = create_rw_signal(BookDetail::new(services.sessions.clone(), id));
    start(screen, &services, go.clone());
    let phase = phase_memo(screen);
    let authors = Signal::derive(move || {
        screen.with(|s| {
            s.view()
                .map(|v| {
                    v.authors
                        .iter()
                        .map(|a| (a.id.to_string(), a.full_name.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    });

    view! {
        <section class="book-details">
            {notice(screen)}
            {move || match phase.get() {
                Phase::Loading => view! { <p>"Loading..."</p> }.into_view(),
                Phase::Failed(msg) => view! { <p class="error">{msg}</p> }.into_view(),
                Phase::Editing => view! { <form class="edit-form">{book_fields(screen, authors)}</form> }.into_view(),
                Phase::Ready => screen.with(|s| {
                    s.view()
                        .map(|v| {
                            let book = &v.entity;
                            view! {
                                <h2>{book.title.clone()}</h2>
                                <p>
                                    <A href=Route::Author(book.author_id).path()>
                                        {book.author_name.clone().unwrap_or_default()}
                                    </A>
                                </p>
                                <dl>
                                    <dt>"Genre"</dt><dd>{book.genre.label()}</dd>
                                    <dt>"Published"</dt><dd>{form_value(&book.published_date)}</dd>
                                    <dt>"ISBN"</dt><dd>{book.isbn.clone()}</dd>
                                    <dt>"Pages"</dt><dd>{book.page_count}</dd>
                                    <dt>"Publisher"</dt><dd>{book.publisher.clone()}</dd>
                                    <dt>"Available"</dt><dd>{if book.is_available { "Yes" } else { "No" }}</dd>
                                </dl>
                                <p class="description">{book.description.clone().unwrap_or_default()}</p>
                            }
                            .into_view()
                        })
                        .unwrap_or_else(|| ().into_view())
                }),
            }}
            {controls(screen, &services, go)}
        </section>
    }
    .into_view()
}
