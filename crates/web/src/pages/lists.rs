use leptos::*;
use leptos_router::A;
use libris_core::Route;
use libris_screens::{AuthorList, BookList, Mount, ScreenState};

use super::settle;
use crate::app::{Services, navigator};

#[component]
pub fn AuthorsPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let screen = create_rw_signal(AuthorList::new(services.sessions.clone()));
    on_cleanup(move || {
        screen.try_update(|s| s.unmount());
    });

    match screen.try_update(|s| s.mount()) {
        Some(Mount::Load(ticket)) => {
            let api = services.api.clone();
            settle(
                screen,
                async move { AuthorList::fetch(&api).await },
                move |s, result| s.resolve(ticket, result),
                go,
            );
        }
        Some(Mount::Redirect(nav)) => go(nav),
        _ => {}
    }

    view! {
        <section class="authors-list">
            <h2>"Authors"</h2>
            {move || screen.with(|s| match s.state() {
                ScreenState::Ready(authors) if authors.is_empty() => {
                    view! { <p>"No authors yet."</p> }.into_view()
                }
                ScreenState::Ready(authors) => view! {
                    <ul>
                        {authors
                            .iter()
                            .map(|a| view! {
                                <li><A href=Route::Author(a.id).path()>{a.full_name.clone()}</A></li>
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_view(),
                ScreenState::Error(msg) => view! { <p class="error">{msg.clone()}</p> }.into_view(),
                _ => view! { <p>"Loading..."</p> }.into_view(),
            })}
        </section>
    }
}

#[component]
pub fn BooksPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let screen = create_rw_signal(BookList::new(services.sessions.clone()));
    on_cleanup(move || {
        screen.try_update(|s| s.unmount());
    });

    match screen.try_update(|s| s.mount()) {
        Some(Mount::Load(ticket)) => {
            let api = services.api.clone();
            settle(
                screen,
                async move { BookList::fetch(&api).await },
                move |s, result| s.resolve(ticket, result),
                go,
            );
        }
        Some(Mount::Redirect(nav)) => go(nav),
        _ => {}
    }

    view! {
        <section class="books-list">
            <h2>"Books"</h2>
            {move || screen.with(|s| match s.state() {
                ScreenState::Ready(books) if books.is_empty() => {
                    view! { <p>"No books yet."</p> }.into_view()
                }
                ScreenState::Ready(books) => view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Author"</th>
                                <th>"Genre"</th>
                                <th>"Available"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {books
                                .iter()
                                .map(|b| view! {
                                    <tr>
                                        <td><A href=Route::Book(b.id).path()>{b.title.clone()}</A></td>
                                        <td>{b.author_name.clone().unwrap_or_default()}</td>
                                        <td>{b.genre.label()}</td>
                                        <td>{if b.is_available { "Yes" } else { "No" }}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                    .into_view(),
                ScreenState::Error(msg) => view! { <p class="error">{msg.clone()}</p> }.into_view(),
                _ => view! { <p>"Loading..."</p> }.into_view(),
            })}
        </section>
    }
}
