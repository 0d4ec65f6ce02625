//! Application shell: services, navigation bar and routes.

use std::rc::Rc;
use std::sync::Arc;

use leptos::*;
use leptos_router::*;
use libris_auth::SessionManager;
use libris_client::config::DEFAULT_API_URL;
use libris_client::{ApiClient, ApiConfig};
use libris_core::Navigation;
use libris_screens::{NavItem, nav_menu};

use crate::pages::{
    AddAuthorPage, AddBookPage, AuthorDetailPage, AuthorsPage, BookDetailPage, BooksPage,
    LoginPage, RegisterPage,
};
use crate::storage::LocalStorageCredentialStore;

/// Shared by every page through the Leptos context.
#[derive(Clone)]
pub struct Services {
    pub sessions: SessionManager,
    pub api: ApiClient,
}

impl Services {
    fn new() -> Self {
        let sessions = SessionManager::new(Arc::new(LocalStorageCredentialStore));
        let config = ApiConfig::new(option_env!("LIBRIS_API_URL").unwrap_or(DEFAULT_API_URL));
        let api = ApiClient::new(config, sessions.clone());
        Self { sessions, api }
    }
}

/// Performs a [`Navigation`] handed back by a screen.
pub type Go = Rc<dyn Fn(Navigation)>;

/// Must be called inside the router.
pub fn navigator() -> Go {
    let navigate = use_navigate();
    Rc::new(move |nav: Navigation| {
        let path = nav.route.path();
        if nav.full_reload {
            full_reload(&path);
        } else {
            let navigate = navigate.clone();
            request_animation_frame(move || navigate(&path, Default::default()));
        }
    })
}

fn full_reload(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(path) {
            tracing::warn!("navigation to {path} failed: {err:?}");
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(Services::new());

    view! {
        <Router>
            <NavBar/>
            <main>
                <Routes>
                    <Route path="/" view=BooksPage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/authors" view=AuthorsPage/>
                    <Route path="/authors/:id" view=AuthorDetailPage/>
                    <Route path="/add-author" view=AddAuthorPage/>
                    <Route path="/books" view=BooksPage/>
                    <Route path="/books/:id" view=BookDetailPage/>
                    <Route path="/add-book" view=AddBookPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Reads the session once; login and logout reload the page.
#[component]
fn NavBar() -> impl IntoView {
    let services = expect_context::<Services>();
    let items = nav_menu(&services.sessions.get_session());
    let sessions = services.sessions;

    view! {
        <nav class="library-navbar">
            <div class="navbar-logo">"Library"</div>
            <ul class="navbar-links">
                {items
                    .into_iter()
                    .map(|item| match item {
                        NavItem::Link { label, route } => {
                            view! { <li><A href=route.path() class="nav-link">{label}</A></li> }
                                .into_view()
                        }
                        NavItem::Account(username) => {
                            view! { <li class="nav-user">{username}</li> }.into_view()
                        }
                        NavItem::Logout => {
                            let sessions = sessions.clone();
                            view! {
                                <li>
                                    <button
                                        class="nav-link"
                                        on:click=move |_| full_reload(&sessions.logout().route.path())
                                    >
                                        "Logout"
                                    </button>
                                </li>
                            }
                                .into_view()
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
