//! Population table with one editable fitness cell per member.

#[cfg(test)]
#[path = "population_table_test.rs"]
mod population_table_test;

use cloudlab::workflow::{FitnessSlot, OngoingExperiment, Phase};
use leptos::prelude::*;

/// Render a population value compactly: integers without a fraction,
/// everything else with up to four decimals.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// CSS modifier for a fitness input.
pub fn slot_class(slot: Option<&FitnessSlot>) -> &'static str {
    match slot {
        Some(slot) if slot.is_set() => "fitness-input",
        Some(slot) if !slot.text().trim().is_empty() => "fitness-input fitness-input--invalid",
        _ => "fitness-input fitness-input--empty",
    }
}

#[component]
pub fn PopulationTable(state: RwSignal<OngoingExperiment>) -> impl IntoView {
    let labels = Memo::new(move |_| {
        state.with(|s| s.experiment.as_ref().map(cloudlab::Experiment::column_labels).unwrap_or_default())
    });
    let population = Memo::new(move |_| {
        state.with(|s| s.experiment.as_ref().map(|e| e.population.clone()).unwrap_or_default())
    });
    let locked = move || state.with(|s| s.phase != Phase::Ready);

    view! {
        <table class="population-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    {move || labels.get().into_iter().map(|label| view! { <th>{label}</th> }).collect_view()}
                    <th>"Fitness Score"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    population
                        .get()
                        .into_rows()
                        .into_iter()
                        .enumerate()
                        .map(|(index, row)| {
                            let cells = row
                                .into_iter()
                                .map(|value| view! { <td class="population-table__value">{format_value(value)}</td> })
                                .collect_view();
                            view! {
                                <tr>
                                    <td class="population-table__index">{index + 1}</td>
                                    {cells}
                                    <td>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            aria-label=format!("Fitness score for member {}", index + 1)
                                            class=move || state.with(|s| slot_class(s.fitness.get(index)))
                                            prop:value=move || {
                                                state.with(|s| s.fitness.get(index).map(|slot| slot.text().to_owned()).unwrap_or_default())
                                            }
                                            prop:disabled=locked
                                            on:input=move |ev| {
                                                let text = event_target_value(&ev);
                                                state.update(|s| {
                                                    s.set_fitness(index, &text);
                                                });
                                            }
                                        />
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}
