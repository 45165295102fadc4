use dioxus::prelude::*;
use dioxus_router::Link;

use brainpath_core::model::Technique;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let (cta_label, cta_route) = if ctx.is_authenticated() {
        ("Go to dashboard", Route::Dashboard {})
    } else {
        ("Get started", Route::Auth {})
    };

    rsx! {
        div { class: "page landing",
            section { class: "hero",
                h1 { "Learn the way your brain works best" }
                p {
                    "Pick a topic, choose how you want to learn it, then check your understanding with a timed assessment."
                }
                Link { class: "button button--primary", to: cta_route, "{cta_label}" }
            }
            section { class: "techniques",
                for technique in Technique::ALL {
                    div { class: "technique-card",
                        h3 { "{technique.label()}" }
                        p { "{technique.blurb()}" }
                    }
                }
            }
        }
    }
}
