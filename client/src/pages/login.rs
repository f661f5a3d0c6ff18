//! Login page: enter the user id experiments are stored under.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use cloudlab::{AuthError, Session};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::util::auth::LocalIdentity;

/// Message shown under the login form for a failed sign-in.
pub fn login_error_message(error: &AuthError) -> &'static str {
    match error {
        AuthError::Incomplete | AuthError::NotSignedIn => "Enter a user id to continue.",
        AuthError::Provider(_) => "Could not save your sign-in in this browser.",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let user_id = RwSignal::new(String::new());
    let display_name = RwSignal::new(String::new());
    let info = RwSignal::new(None::<&'static str>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match LocalIdentity::sign_in(&user_id.get(), &display_name.get()) {
            Ok(identity) => {
                info.set(None);
                session.update(|s| s.finish_resolve(Ok(identity)));
                navigate("/experiments", NavigateOptions::default());
            }
            Err(error) => {
                leptos::logging::warn!("sign-in failed: {error}");
                info.set(Some(login_error_message(&error)));
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"CloudLab"</h1>
                <p class="login-card__subtitle">"Sign in to manage your experiments"</p>
                <form class="login-form" on:submit=on_submit>
                    <label for="login-user-id">"User ID"</label>
                    <input
                        id="login-user-id"
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        prop:value=move || user_id.get()
                        on:input=move |ev| user_id.set(event_target_value(&ev))
                    />
                    <label for="login-display-name">"Display name (optional)"</label>
                    <input
                        id="login-display-name"
                        class="login-input"
                        type="text"
                        prop:value=move || display_name.get()
                        on:input=move |ev| display_name.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary login-button" type="submit">
                        "Sign in"
                    </button>
                </form>
                <p class="login-card__info" role="alert">
                    {move || info.get().unwrap_or_default()}
                </p>
            </div>
        </div>
    }
}
