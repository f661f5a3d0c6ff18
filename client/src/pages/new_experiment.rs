//! New experiment page: the experiment form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Validation, identity checks, and the one-request-at-a-time rule live in
//! `cloudlab::workflow::ExperimentForm`; this page binds inputs to it and runs
//! the create request.

use cloudlab::workflow::{ExperimentForm, SubmitStatus};
use cloudlab::{Goal, NewExperiment, Session};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::notice_banner::NoticeBanner;
use crate::components::variable_list::VariableList;
use crate::net::api::Api;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn NewExperimentPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let api = StoredValue::new(expect_context::<Api>());
    let form = RwSignal::new(ExperimentForm::new());
    install_unauth_redirect(session, use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let begun = session.with_untracked(|s| form.try_update(|f| f.begin_submit(s)));
        match begun {
            Some(Ok(body)) => spawn_create(api.get_value(), form, body),
            Some(Err(error)) => leptos::logging::log!("experiment not submitted: {error}"),
            None => {}
        }
    };

    let saved = move || form.with(|f| matches!(f.status, SubmitStatus::Saved { .. }));
    let submitting = move || form.with(ExperimentForm::is_submitting);

    view! {
        <div class="form-page">
            <h1>"Create New Experiment"</h1>
            <form class="experiment-form" on:submit=on_submit>
                <div class="experiment-form__row">
                    <label for="experiment-name">"Experiment Name"</label>
                    <input
                        id="experiment-name"
                        type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </div>
                <div class="experiment-form__row">
                    <label for="experiment-goal">"Goal"</label>
                    <select
                        id="experiment-goal"
                        on:change=move |ev| {
                            let goal = event_target_value(&ev).parse::<Goal>().unwrap_or_default();
                            form.update(|f| f.goal = goal);
                        }
                    >
                        <option value="minimize" prop:selected=move || form.with(|f| f.goal == Goal::Minimize)>
                            {Goal::Minimize.label()}
                        </option>
                        <option value="maximize" prop:selected=move || form.with(|f| f.goal == Goal::Maximize)>
                            {Goal::Maximize.label()}
                        </option>
                    </select>
                </div>
                <div class="experiment-form__row">
                    <label for="experiment-population">"Population Size"</label>
                    <input
                        id="experiment-population"
                        type="number"
                        min="1"
                        step="1"
                        prop:value=move || form.with(|f| f.population_size.clone())
                        on:input=move |ev| form.update(|f| f.population_size = event_target_value(&ev))
                    />
                </div>

                <VariableList form=form/>

                <ul class="form-errors">
                    {move || {
                        form.with(|f| {
                            f.errors.iter().map(|error| view! { <li>{error.to_string()}</li> }).collect_view()
                        })
                    }}
                </ul>

                <NoticeBanner notice=Signal::derive(move || form.with(|f| f.notice.clone()))/>
                <Show when=saved>
                    <A href="/experiments" attr:class="experiment-form__list-link">"View your experiments"</A>
                </Show>

                <button type="submit" class="btn btn--primary" prop:disabled=submitting>
                    {move || if submitting() { "Saving..." } else { "Save Experiment" }}
                </button>
            </form>
        </div>
    }
}

fn spawn_create(api: Api, form: RwSignal<ExperimentForm>, body: NewExperiment) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = api.create_experiment(&body).await;
        form.update(|f| {
            if let Err(error) = f.finish_submit(result) {
                leptos::logging::warn!("experiment save failed: {error}");
            }
        });
    });
    #[cfg(not(feature = "csr"))]
    let _ = (api, form, body);
}
