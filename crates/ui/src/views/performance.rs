use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::{RedirectTo, Route};
use crate::views::dashboard::SpeedBreakdown;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{PerformanceVm, TechniqueRowVm};

#[component]
pub fn PerformanceView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let overview = progress
                .performance_overview()
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            Ok(PerformanceVm::from(&overview))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page performance",
            header { class: "page-header",
                h2 { "Performance" }
                Link { class: "button", to: Route::Dashboard {}, "Back to dashboard" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Loading analytics..." }
                },
                ViewState::Ready(vm) if vm.has_data => rsx! { PerformanceBody { vm } },
                ViewState::Error(ViewError::SignedOut) => rsx! {
                    RedirectTo { to: Route::Auth {} }
                },
                ViewState::Ready(_) | ViewState::Error(_) => rsx! { NoAnalytics {} },
            }
        }
    }
}

#[component]
fn NoAnalytics() -> Element {
    rsx! {
        section { class: "card empty-state",
            p { "No performance data yet. Complete an assessment to see your analytics." }
        }
    }
}

#[component]
fn PerformanceBody(vm: PerformanceVm) -> Element {
    rsx! {
        section { class: "stats",
            div { class: "stat",
                span { class: "stat-label", "Overall accuracy" }
                span { class: "stat-value", "{vm.accuracy}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Avg. time per question" }
                span { class: "stat-value", "{vm.avg_time}" }
            }
            div { class: "stat",
                span { class: "stat-label", "Total learning time" }
                span { class: "stat-value", "{vm.total_time}" }
            }
        }
        section { class: "card techniques-breakdown",
            h3 { "By technique" }
            for row in vm.techniques {
                TechniqueRow { key: "{row.label}", row }
            }
        }
        SpeedBreakdown { buckets: vm.speed }
        div { class: "insights",
            Insight { title: "Strengths", items: vm.strengths }
            Insight { title: "Needs work", items: vm.weaknesses }
        }
    }
}

#[component]
fn TechniqueRow(row: TechniqueRowVm) -> Element {
    rsx! {
        div { class: "technique-row",
            div { class: "technique-row-header",
                span { "{row.label}" }
                span { "{row.accuracy}" }
            }
            div { class: "bar",
                div { class: "bar-fill", style: "width: {row.width}%" }
            }
            span { class: "muted", "{row.detail}" }
        }
    }
}

#[component]
fn Insight(title: &'static str, items: Vec<String>) -> Element {
    rsx! {
        section { class: "card insight",
            h3 { "{title}" }
            if items.is_empty() {
                p { class: "muted", "Nothing to show yet." }
            } else {
                ul {
                    for item in items {
                        li { "{item}" }
                    }
                }
            }
        }
    }
}
