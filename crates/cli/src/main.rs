//! `libris`: terminal front end for the library API.

mod args;
mod render;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use libris_auth::{FileCredentialStore, SessionManager};
use libris_client::{ApiClient, ApiConfig};
use libris_core::{Navigation, Route};
use libris_screens::{
    AuthorDetail, AuthorList, BookDetail, BookList, DetailScreen, EntityKind, LoginScreen,
    RegisterScreen, ScreenState,
};

use crate::args::Command;

const CREDENTIALS_ENV: &str = "LIBRIS_CREDENTIALS";

#[tokio::main]
async fn main() -> Result<()> {
    libris_observability::init();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("libris");
    let command = match args::parse(argv.get(1..).unwrap_or_default()) {
        Ok(Command::Help) => {
            args::print_usage(program);
            return Ok(());
        }
        Ok(command) => command,
        Err(err) => {
            args::print_usage(program);
            return Err(err);
        }
    };

    let store = match std::env::var(CREDENTIALS_ENV) {
        Ok(path) if !path.trim().is_empty() => FileCredentialStore::new(path.trim()),
        _ => FileCredentialStore::default_location().context("no location for stored credentials")?,
    };
    tracing::debug!(path = %store.path().display(), "credential store");

    let sessions = SessionManager::new(Arc::new(store));
    let config = ApiConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "api");
    let api = ApiClient::new(config, sessions.clone());

    run(command, &api, &sessions).await
}

async fn run(command: Command, api: &ApiClient, sessions: &SessionManager) -> Result<()> {
    match command {
        Command::Help => Ok(()),
        Command::Login { email, password } => {
            let mut screen = LoginScreen::new(sessions.clone());
            screen.draft_mut().email = email;
            screen.draft_mut().password = password;
            if screen.submit(api).await.is_some() {
                let session = sessions.get_session();
                println!(
                    "Signed in as {} ({}).",
                    session.username().unwrap_or_default(),
                    session.role().unwrap_or_default()
                );
                return Ok(());
            }
            render::field_errors(screen.errors());
            bail!(screen.notice().unwrap_or("login rejected").to_string())
        }
        Command::Register {
            email,
            username,
            password,
            confirm,
            display_name,
        } => {
            let mut screen = RegisterScreen::new();
            let draft = screen.draft_mut();
            draft.email = email;
            draft.username = username;
            draft.password = password;
            draft.confirm_password = confirm;
            draft.display_name = display_name;
            if screen.submit(api).await.is_some() {
                println!("Account created. Sign in with `libris login`.");
                return Ok(());
            }
            render::field_errors(screen.errors());
            bail!(screen.notice().unwrap_or("registration rejected").to_string())
        }
        Command::Logout => {
            let _ = sessions.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            let session = sessions.get_session();
            match session.username() {
                Some(username) => println!("{username} ({})", session.role().unwrap_or_default()),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Command::Authors => {
            let mut screen = AuthorList::new(sessions.clone());
            if let Some(nav) = screen.open(api).await {
                return Err(navigation_error(nav));
            }
            render::authors(ready(screen.state())?);
            Ok(())
        }
        Command::Books => {
            let mut screen = BookList::new(sessions.clone());
            if let Some(nav) = screen.open(api).await {
                return Err(navigation_error(nav));
            }
            render::books(ready(screen.state())?);
            Ok(())
        }
        Command::Author(id) => {
            let mut screen = AuthorDetail::new(sessions.clone(), id);
            if let Some(nav) = screen.open(api).await {
                return Err(navigation_error(nav));
            }
            render::author(&ready(screen.state())?.entity);
            Ok(())
        }
        Command::Book(id) => {
            let mut screen = BookDetail::new(sessions.clone(), id);
            if let Some(nav) = screen.open(api).await {
                return Err(navigation_error(nav));
            }
            render::book(&ready(screen.state())?.entity);
            Ok(())
        }
        Command::DeleteAuthor(id) => delete(AuthorDetail::new(sessions.clone(), id), api).await,
        Command::DeleteBook(id) => delete(BookDetail::new(sessions.clone(), id), api).await,
    }
}

async fn delete<K: EntityKind>(mut screen: DetailScreen<K>, api: &ApiClient) -> Result<()> {
    if let Some(nav) = screen.open(api).await {
        return Err(navigation_error(nav));
    }
    ready(screen.state())?;
    if !screen.can_delete() {
        bail!("only administrators can delete a {}", K::NOUN);
    }

    match screen.delete(api, confirm).await {
        Some(nav) if nav.route == K::list_route() => {
            println!("Deleted.");
            Ok(())
        }
        Some(nav) => Err(navigation_error(nav)),
        None => match screen.notice() {
            Some(notice) => bail!(notice.to_string()),
            None => {
                println!("Cancelled.");
                Ok(())
            }
        },
    }
}

fn ready<T>(state: &ScreenState<T>) -> Result<&T> {
    match state {
        ScreenState::Ready(view) => Ok(view),
        ScreenState::Error(msg) => Err(anyhow!(msg.clone())),
        ScreenState::Redirected(nav) => Err(navigation_error(*nav)),
        ScreenState::Idle | ScreenState::Loading => Err(anyhow!("screen did not finish loading")),
    }
}

fn navigation_error(nav: Navigation) -> anyhow::Error {
    match nav.route {
        Route::Login => anyhow!("not signed in; run `libris login <email> <password>`"),
        route => anyhow!("unexpected redirect to {route}"),
    }
}

/// Synchronous y/N prompt on the terminal.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}
