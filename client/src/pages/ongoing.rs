//! Ongoing experiment page: population, fitness entry, next generation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The experiment is fetched on mount and again whenever the `:id` route
//! parameter changes. Results are tagged with the id they were requested
//! for, so a late response for a previous route is dropped by
//! `OngoingExperiment` instead of overwriting the current view.

use cloudlab::workflow::notice::POPULATION_EMPTY;
use cloudlab::workflow::{OngoingExperiment, Phase};
use cloudlab::{AdvanceRequest, Session};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::notice_banner::NoticeBanner;
use crate::components::population_table::PopulationTable;
use crate::net::api::Api;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn OngoingPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let api = StoredValue::new(expect_context::<Api>());
    let params = use_params_map();
    let state = RwSignal::new(OngoingExperiment::default());
    install_unauth_redirect(session, use_navigate());

    let experiment_id = Memo::new(move |_| params.read().get("id").unwrap_or_default());
    Effect::new(move || {
        let id = experiment_id.get();
        state.update(|s| s.begin_load(&id));
        spawn_fetch(api.get_value(), state, id);
    });

    let on_advance = move |_| {
        let Some(begun) = state.try_update(OngoingExperiment::begin_advance) else {
            return;
        };
        match begun {
            Ok(request) => {
                let id = state.with_untracked(|s| s.experiment_id().to_owned());
                spawn_advance(api.get_value(), state, id, request);
            }
            Err(error) => leptos::logging::log!("generation not requested: {error}"),
        }
    };

    let phase = move || state.with(|s| s.phase);
    let header = move || {
        state.with(|s| {
            s.experiment
                .as_ref()
                .map(|e| (e.experiment_name.clone(), e.goal_label(), e.population_size))
        })
    };
    let has_population = move || state.with(|s| s.experiment.as_ref().is_some_and(|e| !e.population.is_empty()));

    view! {
        <div class="ongoing-page">
            <Show when=move || phase() == Phase::Loading>
                <p>"Loading experiment data..."</p>
            </Show>
            <NoticeBanner notice=Signal::derive(move || state.with(|s| s.notice.clone()))/>

            <div hidden=move || header().is_none()>
                <h1>
                    "Ongoing Experiment: "
                    {move || header().map(|(name, _, _)| name).unwrap_or_default()}
                </h1>
                <dl class="ongoing-page__summary">
                    <dt>"Goal"</dt>
                    <dd>{move || header().map(|(_, goal, _)| goal).unwrap_or_default()}</dd>
                    <dt>"Population Size"</dt>
                    <dd>{move || header().map(|(_, _, size)| size).unwrap_or_default()}</dd>
                </dl>

                <button
                    type="button"
                    class="btn btn--primary"
                    prop:disabled=move || phase() != Phase::Ready
                    on:click=on_advance
                >
                    {move || if phase() == Phase::Submitting { "Generating..." } else { "Generate Next Generation" }}
                </button>

                <Show
                    when=has_population
                    fallback=|| view! { <p class="ongoing-page__empty">{POPULATION_EMPTY}</p> }
                >
                    <h2>"Population"</h2>
                    <PopulationTable state=state/>
                </Show>
            </div>
        </div>
    }
}

fn spawn_fetch(api: Api, state: RwSignal<OngoingExperiment>, experiment_id: String) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = api.fetch_experiment(&experiment_id).await;
        state.update(|s| {
            if let Err(error) = s.finish_load(&experiment_id, result) {
                leptos::logging::warn!("experiment load: {error}");
            }
        });
    });
    #[cfg(not(feature = "csr"))]
    let _ = (api, state, experiment_id);
}

fn spawn_advance(api: Api, state: RwSignal<OngoingExperiment>, experiment_id: String, request: AdvanceRequest) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = api.advance_generation(&experiment_id, &request).await;
        state.update(|s| {
            if let Err(error) = s.finish_advance(&experiment_id, result) {
                leptos::logging::warn!("generation advance: {error}");
            }
        });
    });
    #[cfg(not(feature = "csr"))]
    let _ = (api, state, experiment_id, request);
}
