use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::{RedirectTo, Route};
use crate::views::assessment::ResultRow;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::SessionReviewVm;

#[component]
pub fn SessionReviewView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let resource = use_resource(use_reactive!(|id| {
        let progress = progress.clone();
        async move {
            let record = progress
                .session_record(&id)
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            Ok(SessionReviewVm::from(&record))
        }
    }));
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page session-review",
            Link { class: "button", to: Route::Dashboard {}, "Back to dashboard" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading session..." }
                },
                ViewState::Ready(vm) => rsx! {
                    header { class: "page-header",
                        h2 { "{vm.topic}" }
                        span { class: "badge", "{vm.technique}" }
                    }
                    div { class: "session-meta",
                        span { "Score: {vm.score_label}" }
                        span { "{vm.status}" }
                        if let Some(date) = vm.date {
                            span { "{date}" }
                        }
                    }
                    if vm.answers.is_empty() {
                        p { class: "muted", "No answers were recorded for this session." }
                    } else {
                        ol { class: "results-rows",
                            for answer in vm.answers {
                                li { key: "{answer.result.number}", class: "reviewed-answer",
                                    p { class: "reviewed-question", "{answer.question}" }
                                    ul { ResultRow { row: answer.result } }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(ViewError::SignedOut) => rsx! {
                    RedirectTo { to: Route::Auth {} }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}
