//! Root application component with routing and context providers.

use cloudlab::Session;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::net::api::api_client;
use crate::pages::{
    experiments::ExperimentsPage, landing::LandingPage, login::LoginPage, new_experiment::NewExperimentPage,
    ongoing::OngoingPage,
};
use crate::util::auth::resolve_session;

/// Root application component.
///
/// Provides the identity session and API client contexts, resolves the
/// session once on mount, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::default());
    provide_context(session);
    provide_context(api_client());
    resolve_session(session);

    view! {
        <Title text="CloudLab"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=(StaticSegment("experiments"), StaticSegment("new")) view=NewExperimentPage/>
                    <Route path=StaticSegment("experiments") view=ExperimentsPage/>
                    <Route path=(StaticSegment("experiments"), ParamSegment("id")) view=OngoingPage/>
                </Routes>
            </main>
        </Router>
    }
}
