use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};

use crate::context::AppContext;
use crate::views::{
    AssessmentView, AuthView, DashboardView, LandingView, LearningView, PerformanceView,
    SessionReviewView, ToastHost,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/auth", AuthView)] Auth {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/learn?:flow", LearningView)] Learn { flow: String },
        #[route("/assessment?:flow", AssessmentView)] Assessment { flow: String },
        #[route("/performance", PerformanceView)] Performance {},
        #[route("/sessions/:id", SessionReviewView)] SessionReview { id: String },
    #[end_layout]
    #[route("/:..segments", NotFound)] NotFound { segments: Vec<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reachable whether or not the user is logged in.
    Public,
    /// Only for logged-out users.
    GuestOnly,
    Protected,
}

impl Route {
    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Route::Landing {} | Route::NotFound { .. } => Access::Public,
            Route::Auth {} => Access::GuestOnly,
            Route::Dashboard {}
            | Route::Learn { .. }
            | Route::Assessment { .. }
            | Route::Performance {}
            | Route::SessionReview { .. } => Access::Protected,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

/// Decide whether `route` may render for the current auth state.
#[must_use]
pub fn guard(route: &Route, authenticated: bool) -> GuardDecision {
    match (route.access(), authenticated) {
        (Access::Protected, false) => GuardDecision::Redirect(Route::Auth {}),
        (Access::GuestOnly, true) => GuardDecision::Redirect(Route::Dashboard {}),
        _ => GuardDecision::Render,
    }
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let route = use_route::<Route>();
    let authenticated = ctx.is_authenticated();

    rsx! {
        div { class: "app",
            TopBar { authenticated }
            main { class: "content",
                match guard(&route, authenticated) {
                    GuardDecision::Render => rsx! { Outlet::<Route> {} },
                    GuardDecision::Redirect(to) => rsx! { RedirectTo { to } },
                }
            }
            ToastHost {}
        }
    }
}

#[component]
fn TopBar(authenticated: bool) -> Element {
    rsx! {
        nav { class: "topbar",
            Link { class: "brand", to: Route::Landing {}, "BrainPath" }
            if authenticated {
                ul {
                    li { Link { to: Route::Dashboard {}, "Dashboard" } }
                    li { Link { to: Route::Performance {}, "Performance" } }
                }
            }
        }
    }
}

/// Replace the current location once mounted.
#[component]
pub fn RedirectTo(to: Route) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        tracing::debug!(target_route = %to, "redirecting");
        let _ = navigator.replace(to.clone());
    });
    rsx! {
        p { class: "redirecting", "Redirecting..." }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!(path = %segments.join("/"), "unknown route");
    rsx! {
        RedirectTo { to: Route::Landing {} }
    }
}
