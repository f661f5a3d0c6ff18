//! Variable collection editor: one `VariableEditor` per draft plus "Add".

use cloudlab::workflow::{ExperimentForm, VariableEdit};
use leptos::prelude::*;

use super::variable_editor::VariableEditor;

#[component]
pub fn VariableList(form: RwSignal<ExperimentForm>) -> impl IntoView {
    // Editors are rebuilt only when the count changes, so typing in one field
    // does not recreate the inputs.
    let count = Memo::new(move |_| form.with(|f| f.variables.len()));
    let on_add = move |_| form.update(|f| f.variables.add());

    view! {
        <section class="variable-list">
            <h2>"Variables"</h2>
            <Show when=move || count.get() == 0>
                <p class="variable-list__empty">"No variables yet. Add one for each parameter you want to optimize."</p>
            </Show>
            {move || {
                (0..count.get())
                    .map(|index| {
                        let draft = Signal::derive(move || {
                            form.with(|f| f.variables.get(index).cloned().unwrap_or_default())
                        });
                        let on_edit = Callback::new(move |edit: VariableEdit| {
                            form.update(|f| {
                                f.variables.update(index, edit);
                            });
                        });
                        let on_remove = Callback::new(move |()| {
                            form.update(|f| {
                                f.variables.remove(index);
                            });
                        });
                        view! { <VariableEditor index=index draft=draft on_edit=on_edit on_remove=on_remove/> }
                    })
                    .collect_view()
            }}
            <button type="button" class="btn variable-list__add" on:click=on_add>
                "Add Variable"
            </button>
        </section>
    }
}
