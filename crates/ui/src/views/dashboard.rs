use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use brainpath_core::model::{Technique, Topic};

use crate::context::AppContext;
use crate::routes::{RedirectTo, Route};
use crate::views::{Toasts, ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, RecentSessionVm, SpeedBucketVm};

/// Flows untouched for this long are abandoned lessons.
const STALE_FLOW_AGE: chrono::Duration = chrono::Duration::hours(6);

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let flows = ctx.flows();
    let auth = ctx.auth();
    let greeting = ctx
        .session()
        .user()
        .map(|user| user.email)
        .unwrap_or_default();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let summary = progress
                .progress()
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            Ok(DashboardVm::from(&summary))
        }
    });
    let state = view_state_from_resource(&resource);

    use_hook({
        let flows = ctx.flows();
        move || {
            let pruned = flows.prune_older_than(STALE_FLOW_AGE);
            if pruned > 0 {
                tracing::debug!(pruned, "dropped stale learning flows");
            }
        }
    });

    let mut topic = use_signal(String::new);

    let choose = use_callback(move |technique: Technique| {
        match Topic::parse(&topic.read()) {
            Ok(parsed) => {
                let id = flows.start(parsed, technique);
                let _ = navigator.push(Route::Learn {
                    flow: id.to_string(),
                });
            }
            Err(err) => toasts.error(err.to_string()),
        }
    });

    let logout = move |_| {
        let auth = auth.clone();
        spawn(async move {
            if let Err(err) = auth.logout().await {
                tracing::warn!(error = %err, "logout did not clear stored session");
            }
            let _ = navigator.replace(Route::Auth {});
        });
    };

    rsx! {
        div { class: "page dashboard",
            header { class: "page-header",
                h2 { "Dashboard" }
                if !greeting.is_empty() {
                    span { class: "muted", "Signed in as {greeting}" }
                }
                button { class: "button", r#type: "button", onclick: logout, "Log out" }
            }

            section { class: "card start-learning",
                h3 { "What do you want to learn?" }
                input {
                    class: "topic-input",
                    placeholder: "e.g. Photosynthesis",
                    value: "{topic}",
                    oninput: move |evt| topic.set(evt.value()),
                }
                div { class: "technique-buttons",
                    for technique in Technique::ALL {
                        button {
                            class: "button button--technique",
                            r#type: "button",
                            onclick: move |_| choose.call(technique),
                            "{technique.label()}"
                        }
                    }
                }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading your progress..." }
                },
                ViewState::Ready(vm) => rsx! { ProgressPanel { vm } },
                ViewState::Error(ViewError::SignedOut) => rsx! {
                    RedirectTo { to: Route::Auth {} }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            Link { class: "button", to: Route::Performance {}, "View detailed performance" }
        }
    }
}

#[component]
fn ProgressPanel(vm: DashboardVm) -> Element {
    if !vm.has_sessions {
        return rsx! {
            section { class: "card empty-state",
                p { "No learning sessions yet. Pick a topic above to get started." }
            }
        };
    }

    rsx! {
        section { class: "stats",
            Stat { label: "Accuracy", value: vm.accuracy }
            Stat { label: "Sessions", value: vm.sessions }
            Stat { label: "Questions", value: vm.questions }
        }
        SpeedBreakdown { buckets: vm.speed }
        section { class: "card recent-sessions",
            h3 { "Recent sessions" }
            ul {
                for session in vm.recent {
                    RecentSession { key: "{session.id}", session }
                }
            }
        }
    }
}

#[component]
fn Stat(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
        }
    }
}

#[component]
pub(crate) fn SpeedBreakdown(buckets: Vec<SpeedBucketVm>) -> Element {
    rsx! {
        section { class: "card speed",
            h3 { "Answer speed" }
            if buckets.is_empty() {
                p { class: "muted", "No timing data yet." }
            } else {
                ul {
                    for bucket in buckets {
                        li { "{bucket.label}: {bucket.count}" }
                    }
                }
            }
        }
    }
}

#[component]
fn RecentSession(session: RecentSessionVm) -> Element {
    let status = if session.completed { "Completed" } else { "In progress" };
    rsx! {
        li { class: "recent-session",
            Link { to: Route::SessionReview { id: session.id.clone() },
                span { class: "recent-topic", "{session.topic}" }
                span { class: "recent-technique", "{session.technique_label}" }
                span { class: "recent-score", "{session.score_label}" }
                span { class: "recent-status", "{status}" }
                if let Some(date) = session.date {
                    span { class: "recent-date", "{date}" }
                }
            }
        }
    }
}
