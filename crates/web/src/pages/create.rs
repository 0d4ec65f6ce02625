use leptos::*;
use leptos_router::A;
use libris_screens::{AddAuthor, AddBook, CreateScreen, EntityKind, Mount};

use super::{Phase, author_fields, book_fields, notice_view, phase_of, settle};
use crate::app::{Go, Services, navigator};

fn start<K: EntityKind + 'static>(screen: RwSignal<CreateScreen<K>>, services: &Services, go: Go) {
    on_cleanup(move || {
        screen.try_update(|s| s.unmount());
    });

    match screen.try_update(|s| s.mount()) {
        Some(Mount::Load(ticket)) => {
            let api = services.api.clone();
            settle(
                screen,
                async move { CreateScreen::<K>::fetch(&api).await },
                move |s, result| s.resolve(ticket, result),
                go,
            );
        }
        Some(Mount::Redirect(nav)) => go(nav),
        _ => {}
    }
}

/// Page frame around a create form: notice, fields, submit.
fn frame<K, V>(
    screen: RwSignal<CreateScreen<K>>,
    services: &Services,
    go: Go,
    title: &'static str,
    fields: impl Fn() -> V + 'static,
) -> impl IntoView
where
    K: EntityKind + 'static,
    V: IntoView,
{
    let phase = create_memo(move |_| screen.with(|s| phase_of(s.state(), |_| false)));
    let api = services.api.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Some(creation)) = screen.try_update(|s| s.prepare_submit()) else {
            return;
        };
        let api = api.clone();
        let go = go.clone();
        spawn_local(async move {
            let result = creation.send(&api).await;
            if let Some(Some(nav)) = screen.try_update(|s| s.finish_submit(creation, result)) {
                go(nav);
            }
        });
    };

    view! {
        <section class="create-form">
            <h2>{title}</h2>
            {notice_view(
                Signal::derive(move || screen.with(|s| s.notice().map(str::to_string))),
                Callback::new(move |_| screen.update(|s| s.dismiss_notice())),
            )}
            {move || match phase.get() {
                Phase::Failed(msg) => view! { <p class="error">{msg}</p> }.into_view(),
                Phase::Ready | Phase::Editing => view! {
                    <form on:submit=on_submit.clone()>
                        {fields()}
                        <button type="submit">"Create"</button>
                    </form>
                }
                    .into_view(),
                Phase::Loading => view! { <p>"Loading..."</p> }.into_view(),
            }}
            <A href=K::list_route().path()>"Back"</A>
        </section>
    }
}

#[component]
pub fn AddAuthorPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let screen = create_rw_signal(AddAuthor::new(services.sessions.clone()));
    start(screen, &services, go.clone());

    frame(screen, &services, go, "Add author", move || author_fields(screen))
}

#[component]
pub fn AddBookPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let screen = create_rw_signal(AddBook::new(services.sessions.clone()));
    start(screen, &services, go.clone());

    let authors = Signal::derive(move || {
        screen.with(|s| {
            s.form()
                .map(|form| {
                    form.authors
                        .iter()
                        .map(|a| (a.id.to_string(), a.full_name.clone()))
                        .collect()
                })
                .unwrap_or_default()
        })
    });

    frame(screen, &services, go, "Add book", move || book_fields(screen, authors))
}
