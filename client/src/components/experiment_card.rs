//! Expandable card for one saved experiment on the list page.
//!
//! DESIGN
//! ======
//! The card only renders; expansion and the delete confirmation live in the
//! page's `ExperimentList` state and are reached through callbacks. Toggling
//! reports the entry key, deleting reports the experiment id. A record with
//! no id gets neither Open nor Delete.

#[cfg(test)]
#[path = "experiment_card_test.rs"]
mod experiment_card_test;

use cloudlab::workflow::ListEntry;
use cloudlab::{Variable, VariableKind};
use leptos::prelude::*;
use leptos_router::components::A;

/// Route of the ongoing view for `experiment_id`; none without an id.
pub fn ongoing_href(experiment_id: &str) -> Option<String> {
    let experiment_id = experiment_id.trim();
    (!experiment_id.is_empty()).then(|| format!("/experiments/{experiment_id}"))
}

/// One-line description of a variable's domain.
pub fn variable_summary(variable: &Variable) -> String {
    let bounds = |min: &str, max: &str| format!("{} to {}", or_dash(min), or_dash(max));
    match variable.kind {
        VariableKind::Continuous => {
            let mut summary = format!("Continuous, {}", bounds(&variable.min, &variable.max));
            if let Some(step) = variable.interval_size.as_deref().filter(|s| !s.trim().is_empty()) {
                summary.push_str(&format!(", interval {step}"));
            }
            summary
        }
        VariableKind::Discrete => {
            let values = if variable.custom_values.is_empty() {
                "no values".to_owned()
            } else {
                variable.custom_values.join(", ")
            };
            if variable.min.trim().is_empty() && variable.max.trim().is_empty() {
                format!("Discrete: {values}")
            } else {
                format!("Discrete: {values} ({})", bounds(&variable.min, &variable.max))
            }
        }
    }
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() { "-" } else { text }
}

#[component]
pub fn ExperimentCard(
    entry: ListEntry,
    #[prop(into)] expanded: Signal<bool>,
    on_toggle: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let ListEntry { key, experiment } = entry;
    let actions = ongoing_href(&experiment.experiment_id).map(|href| {
        let delete_id = experiment.experiment_id.clone();
        view! {
            <A href=href attr:class="btn experiment-card__open">"Open"</A>
            <button
                type="button"
                class="btn btn--danger experiment-card__delete"
                on:click=move |_| on_delete.run(delete_id.clone())
            >
                "Delete"
            </button>
        }
    });
    let goal = experiment.goal_label();
    let population_size = experiment.population_size;
    let variables = StoredValue::new(experiment.variables);

    view! {
        <article class="experiment-card" class:experiment-card--expanded=move || expanded.get()>
            <header class="experiment-card__header">
                <button
                    type="button"
                    class="experiment-card__name"
                    aria-expanded=move || expanded.get().to_string()
                    on:click=move |_| on_toggle.run(key.clone())
                >
                    {experiment.experiment_name}
                </button>
                {actions}
            </header>
            <Show when=move || expanded.get()>
                <dl class="experiment-card__details">
                    <dt>"Goal"</dt>
                    <dd>{goal}</dd>
                    <dt>"Population Size"</dt>
                    <dd>{population_size}</dd>
                </dl>
                <ul class="experiment-card__variables">
                    {move || {
                        variables
                            .get_value()
                            .into_iter()
                            .map(|variable| {
                                view! {
                                    <li>
                                        <span class="experiment-card__variable-name">{variable.name.clone()}</span>
                                        ": "
                                        {variable_summary(&variable)}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </article>
    }
}
