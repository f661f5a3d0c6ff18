//! Editor for a single decision variable.
//!
//! DESIGN
//! ======
//! The editor is stateless apart from the raw custom-values text: every
//! keystroke is reported as one `VariableEdit` and the owning form applies it.
//! Nothing is validated here; errors are listed by the form on submit.

#[cfg(test)]
#[path = "variable_editor_test.rs"]
mod variable_editor_test;

use cloudlab::VariableKind;
use cloudlab::workflow::{VariableDraft, VariableEdit};
use leptos::prelude::*;

/// Map the type `<select>` value to a variable kind.
pub fn kind_from_value(value: &str) -> VariableKind {
    if value == VariableKind::Discrete.as_str() {
        VariableKind::Discrete
    } else {
        VariableKind::Continuous
    }
}

#[component]
pub fn VariableEditor(
    index: usize,
    #[prop(into)] draft: Signal<VariableDraft>,
    on_edit: Callback<VariableEdit>,
    on_remove: Callback<()>,
) -> impl IntoView {
    // Kept locally so partially typed lists ("a,") are not reformatted.
    let values_text = RwSignal::new(draft.with_untracked(VariableDraft::custom_values_text));
    let is_discrete = move || draft.with(|d| d.kind == VariableKind::Discrete);
    let field_id = move |field: &str| format!("variable-{index}-{field}");

    view! {
        <fieldset class="variable-editor">
            <legend>{format!("Variable {}", index + 1)}</legend>

            <label for=field_id("name")>"Name"</label>
            <input
                id=field_id("name")
                type="text"
                prop:value=move || draft.with(|d| d.name.clone())
                on:input=move |ev| on_edit.run(VariableEdit::Name(event_target_value(&ev)))
            />

            <label for=field_id("min")>"Min"</label>
            <input
                id=field_id("min")
                type="text"
                inputmode="decimal"
                prop:value=move || draft.with(|d| d.min.clone())
                on:input=move |ev| on_edit.run(VariableEdit::Min(event_target_value(&ev)))
            />

            <label for=field_id("max")>"Max"</label>
            <input
                id=field_id("max")
                type="text"
                inputmode="decimal"
                prop:value=move || draft.with(|d| d.max.clone())
                on:input=move |ev| on_edit.run(VariableEdit::Max(event_target_value(&ev)))
            />

            <label for=field_id("type")>"Type"</label>
            <select
                id=field_id("type")
                on:change=move |ev| on_edit.run(VariableEdit::Kind(kind_from_value(&event_target_value(&ev))))
            >
                <option value="continuous" selected=move || !is_discrete()>
                    {VariableKind::Continuous.label()}
                </option>
                <option value="discrete" selected=is_discrete>
                    {VariableKind::Discrete.label()}
                </option>
            </select>

            <Show
                when=is_discrete
                fallback=move || {
                    view! {
                        <label for=field_id("interval")>"Interval Size (optional)"</label>
                        <input
                            id=field_id("interval")
                            type="text"
                            inputmode="decimal"
                            prop:value=move || draft.with(|d| d.interval_size.clone())
                            on:input=move |ev| on_edit.run(VariableEdit::IntervalSize(event_target_value(&ev)))
                        />
                    }
                }
            >
                <label for=field_id("values")>"Custom Values (comma-separated)"</label>
                <input
                    id=field_id("values")
                    type="text"
                    prop:value=move || values_text.get()
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        values_text.set(text.clone());
                        on_edit.run(VariableEdit::CustomValues(text));
                    }
                />
            </Show>

            <button type="button" class="btn btn--danger variable-editor__remove" on:click=move |_| on_remove.run(())>
                "Remove"
            </button>
        </fieldset>
    }
}
