mod scripts;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use brainpath_core::model::{FlowId, LearningContent, Technique, VideoContent};

use crate::context::AppContext;
use crate::routes::{RedirectTo, Route};
use crate::views::{Toasts, ViewError, ViewState, view_state_from_resource};
use crate::vm::markdown_to_html;

#[component]
pub fn LearningView(flow: String) -> Element {
    let ctx = use_context::<AppContext>();
    match ctx.flows().resolve(Some(&flow)) {
        Some(found) => rsx! {
            LearningPage {
                key: "{found.id}",
                flow_id: found.id,
                topic: found.topic.as_str().to_string(),
                technique: found.technique,
            }
        },
        None => {
            tracing::debug!(flow = %flow, "learning page opened without a known flow");
            rsx! { RedirectTo { to: Route::Dashboard {} } }
        }
    }
}

#[component]
fn LearningPage(flow_id: FlowId, topic: String, technique: Technique) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let navigator = use_navigator();
    let mut starting = use_signal(|| false);

    let learning = ctx.learning();
    let content = use_resource(move || {
        let learning = learning.clone();
        async move {
            learning
                .generate_content(flow_id)
                .await
                .map_err(|err| ViewError::Message(err.user_message()))
        }
    });

    use_effect(move || {
        if let Some(Err(err)) = content.read().as_ref() {
            toasts.error(err.message());
            let _ = navigator.replace(Route::Dashboard {});
        }
    });

    let learning = ctx.learning();
    let on_continue = move |_| {
        if starting() {
            return;
        }
        starting.set(true);
        let learning = learning.clone();
        spawn(async move {
            let result = learning.start_assessment(flow_id).await;
            starting.set(false);
            match result {
                Ok(handoff) => {
                    tracing::info!(
                        flow = %flow_id,
                        session = %handoff.session_id,
                        questions = handoff.questions.len(),
                        "assessment ready"
                    );
                    let _ = navigator.push(Route::Assessment {
                        flow: flow_id.to_string(),
                    });
                }
                Err(err) => {
                    tracing::warn!(flow = %flow_id, error = %err, "could not start assessment");
                    toasts.error(err.user_message());
                }
            }
        });
    };

    let state = view_state_from_resource(&content);

    rsx! {
        div { class: "page learning",
            header { class: "page-header",
                h2 { "{topic}" }
                span { class: "badge", "{technique.label()}" }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "muted", "Preparing your {technique.label()} lesson..." }
                },
                ViewState::Ready(content) => rsx! {
                    ContentBody { content }
                    button {
                        class: "button button--primary",
                        r#type: "button",
                        disabled: starting(),
                        onclick: on_continue,
                        if starting() { "Preparing questions..." } else { "Continue to assessment" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ContentBody(content: LearningContent) -> Element {
    match content {
        LearningContent::Passage(text) => {
            let html = markdown_to_html(&text);
            rsx! {
                article { class: "passage markdown", dangerous_inner_html: "{html}" }
            }
        }
        LearningContent::Video(video) => rsx! { VideoLesson { video } },
        LearningContent::Flowchart(source) => rsx! { Flowchart { source } },
    }
}

#[component]
fn VideoLesson(video: VideoContent) -> Element {
    rsx! {
        div { class: "video",
            div { class: "video-frame",
                iframe {
                    src: "{video.embed_url()}",
                    title: "{video.title}",
                    "allow": "accelerometer; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                    "allowfullscreen": "true",
                }
            }
            if !video.title.is_empty() {
                h3 { "{video.title}" }
            }
            if !video.description.is_empty() {
                p { class: "video-description", "{video.description}" }
            }
        }
    }
}

#[component]
fn Flowchart(source: String) -> Element {
    use_effect(move || {
        let _ = eval(scripts::RENDER_MERMAID);
    });

    rsx! {
        div { class: "flowchart",
            div { class: "mermaid", "{source}" }
            details { class: "flowchart-source",
                summary { "Diagram source" }
                pre { code { "{source}" } }
            }
        }
    }
}
