//! Experiment list page with expandable cards and confirmed delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list is requested once, as soon as the session has settled with an
//! identity. Deletes go through a confirmation dialog backed by
//! `ExperimentList::pending_delete`.

use cloudlab::workflow::notice::LIST_EMPTY;
use cloudlab::workflow::{ExperimentList, ListStatus};
use cloudlab::{Identity, Session};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::experiment_card::ExperimentCard;
use crate::components::notice_banner::NoticeBanner;
use crate::net::api::Api;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ExperimentsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let api = StoredValue::new(expect_context::<Api>());
    let list = RwSignal::new(ExperimentList::new());
    install_unauth_redirect(session, use_navigate());

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get() || !session.with(Session::is_settled) {
            return;
        }
        requested.set(true);
        let begun = session.with_untracked(|s| list.try_update(|l| l.begin_load(s)));
        match begun {
            Some(Ok(identity)) => spawn_load(api.get_value(), list, identity),
            Some(Err(error)) => leptos::logging::log!("experiment list not loaded: {error}"),
            None => {}
        }
    });

    let on_toggle = Callback::new(move |key: String| list.update(|l| l.toggle_expanded(&key)));
    let on_delete_request = Callback::new(move |id: String| list.update(|l| l.request_delete(&id)));
    let on_delete_cancel = move |_| list.update(ExperimentList::cancel_delete);
    let on_delete_confirm = move |_| {
        let begun = list.try_update(ExperimentList::begin_delete);
        match begun {
            Some(Ok(experiment_id)) => spawn_delete(api.get_value(), list, experiment_id),
            Some(Err(error)) => leptos::logging::log!("delete not sent: {error}"),
            None => {}
        }
    };

    let pending_name = move || {
        list.with(|l| {
            let id = l.pending_delete.as_deref()?;
            l.items
                .iter()
                .find(|entry| entry.experiment.experiment_id == id)
                .map(|entry| entry.experiment.experiment_name.clone())
        })
    };

    view! {
        <div class="list-page">
            <h1>"My Experiments"</h1>
            <NoticeBanner notice=Signal::derive(move || list.with(|l| l.notice.clone()))/>

            <Show when=move || list.with(|l| l.status == ListStatus::Loading)>
                <p class="list-page__loading">"Loading experiments..."</p>
            </Show>
            <Show when=move || list.with(ExperimentList::is_empty)>
                <p class="list-page__empty">{LIST_EMPTY}</p>
            </Show>

            <div class="list-page__cards">
                <For
                    each=move || list.with(|l| l.items.clone())
                    key=|entry| entry.key.clone()
                    children=move |entry| {
                        let key = entry.key.clone();
                        let expanded = Signal::derive(move || list.with(|l| l.is_expanded(&key)));
                        view! {
                            <ExperimentCard
                                entry=entry
                                expanded=expanded
                                on_toggle=on_toggle
                                on_delete=on_delete_request
                            />
                        }
                    }
                />
            </div>

            <div class="confirm-dialog" role="dialog" aria-modal="true" hidden=move || pending_name().is_none()>
                <p>
                    "Delete "
                    <strong>{move || pending_name().unwrap_or_default()}</strong>
                    "? This cannot be undone."
                </p>
                <button type="button" class="btn" prop:disabled=move || list.with(|l| l.deleting) on:click=on_delete_cancel>
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="btn btn--danger"
                    prop:disabled=move || list.with(|l| l.deleting)
                    on:click=on_delete_confirm
                >
                    {move || if list.with(|l| l.deleting) { "Deleting..." } else { "Delete" }}
                </button>
            </div>
        </div>
    }
}

fn spawn_load(api: Api, list: RwSignal<ExperimentList>, identity: Identity) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = api.list_experiments(&identity).await;
        list.update(|l| {
            if let Err(error) = l.finish_load(result) {
                leptos::logging::warn!("experiment list failed: {error}");
            }
        });
    });
    #[cfg(not(feature = "csr"))]
    let _ = (api, list, identity);
}

fn spawn_delete(api: Api, list: RwSignal<ExperimentList>, experiment_id: String) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = api.delete_experiment(&experiment_id).await;
        list.update(|l| {
            if let Err(error) = l.finish_delete(&experiment_id, result) {
                leptos::logging::warn!("experiment delete failed: {error}");
            }
        });
    });
    #[cfg(not(feature = "csr"))]
    let _ = (api, list, experiment_id);
}
