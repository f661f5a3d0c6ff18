//! Top navigation with the signed-in user and sign-out.

use cloudlab::Session;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::util::auth;

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let navigate = use_navigate();
    let user_label = move || session.with(|s| s.identity().map(|identity| identity.label().to_owned()));

    let on_sign_out = move |_| {
        auth::sign_out(session);
        navigate("/", NavigateOptions::default());
    };

    view! {
        <header class="nav-bar">
            <A href="/" attr:class="nav-bar__brand">"CloudLab"</A>
            <nav class="nav-bar__links">
                <A href="/experiments/new">"New Experiment"</A>
                <A href="/experiments">"My Experiments"</A>
            </nav>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__sign-in" hidden=move || user_label().is_some()>
                <A href="/login" attr:class="btn">"Sign in"</A>
            </span>
            <span class="nav-bar__user" hidden=move || user_label().is_none()>
                {move || user_label().unwrap_or_default()}
            </span>
            <button
                type="button"
                class="btn nav-bar__sign-out"
                hidden=move || user_label().is_none()
                on:click=on_sign_out
            >
                "Sign out"
            </button>
        </header>
    }
}
