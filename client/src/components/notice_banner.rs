//! Inline notice for workflow success and failure messages.

use cloudlab::workflow::Notice;
use leptos::prelude::*;

#[component]
pub fn NoticeBanner(#[prop(into)] notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            let role = if notice.is_error() { "alert" } else { "status" };
            view! {
                <p class=format!("notice {}", notice.kind.class()) role=role>
                    {notice.message}
                </p>
            }
        })
    }
}
