use leptos::*;
use leptos_router::A;
use libris_client::LibraryApi;
use libris_core::Route;
use libris_forms::{LoginDraft, RegisterDraft};
use libris_screens::{LoginScreen, RegisterScreen};

use super::{input, notice_view};
use crate::app::{Services, navigator};

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let screen = create_rw_signal(LoginScreen::new(services.sessions.clone()));
    let api = services.api.clone();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Some(request)) = screen.try_update(|s| s.prepare()) else {
            return;
        };
        let api = api.clone();
        let go = go.clone();
        spawn_local(async move {
            let result = api.login(&request).await;
            if let Some(Some(nav)) = screen.try_update(|s| s.finish(result)) {
                go(nav);
            }
        });
    };

    view! {
        <section class="login">
            <h2>"Login"</h2>
            {notice_view(
                Signal::derive(move || screen.with(|s| s.notice().map(str::to_string))),
                Callback::new(move |_| screen.update(|s| s.dismiss_notice())),
            )}
            <form on:submit=on_submit>
                {input(screen, "Email", "email", "email", |d: &LoginDraft| d.email.clone(), |d, v| d.email = v)}
                {input(screen, "Password", "password", "password", |d: &LoginDraft| d.password.clone(), |d, v| d.password = v)}
                <button type="submit" disabled=move || screen.with(|s| s.is_submitting())>
                    {move || if screen.with(|s| s.is_submitting()) { "Signing in..." } else { "Login" }}
                </button>
            </form>
            <A href=Route::Register.path()>"Create an account"</A>
        </section>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let services = expect_context::<Services>();
    let go = navigator();
    let screen = create_rw_signal(RegisterScreen::new());
    let api = services.api.clone();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Some(request)) = screen.try_update(|s| s.prepare()) else {
            return;
        };
        let api = api.clone();
        let go = go.clone();
        spawn_local(async move {
            let result = api.register(&request).await;
            if let Some(Some(nav)) = screen.try_update(|s| s.finish(result)) {
                go(nav);
            }
        });
    };

    view! {
        <section class="register">
            <h2>"Register"</h2>
            {notice_view(
                Signal::derive(move || screen.with(|s| s.notice().map(str::to_string))),
                Callback::new(move |_| screen.update(|s| s.dismiss_notice())),
            )}
            <form on:submit=on_submit>
                {input(screen, "Email", "email", "email", |d: &RegisterDraft| d.email.clone(), |d, v| d.email = v)}
                {input(screen, "Username", "text", "username", |d: &RegisterDraft| d.username.clone(), |d, v| d.username = v)}
                {input(screen, "Display name", "text", "displayName", |d: &RegisterDraft| d.display_name.clone(), |d, v| d.display_name = v)}
                {input(screen, "Password", "password", "password", |d: &RegisterDraft| d.password.clone(), |d, v| d.password = v)}
                {input(screen, "Confirm password", "password", "confirmPassword", |d: &RegisterDraft| d.confirm_password.clone(), |d, v| d.confirm_password = v)}
                <button type="submit" disabled=move || screen.with(|s| s.is_submitting())>"Register"</button>
            </form>
            <A href=Route::Login.path()>"Back to login"</A>
        </section>
    }
}
