use std::sync::Arc;

use services::{
    AppServices, AssessmentService, AuthService, FlowRegistry, LearningService, ProgressService,
    SessionStore,
};

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn flows(&self) -> Arc<FlowRegistry>;
    fn auth(&self) -> Arc<AuthService>;
    fn learning(&self) -> Arc<LearningService>;
    fn assessment(&self) -> Arc<AssessmentService>;
    fn progress(&self) -> Arc<ProgressService>;
}

impl UiApp for AppServices {
    fn session(&self) -> Arc<SessionStore> {
        AppServices::session(self)
    }

    fn flows(&self) -> Arc<FlowRegistry> {
        AppServices::flows(self)
    }

    fn auth(&self) -> Arc<AuthService> {
        AppServices::auth(self)
    }

    fn learning(&self) -> Arc<LearningService> {
        AppServices::learning(self)
    }

    fn assessment(&self) -> Arc<AssessmentService> {
        AppServices::assessment(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        AppServices::progress(self)
    }
}

/// Service handles shared with every view through Dioxus context.
#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionStore>,
    flows: Arc<FlowRegistry>,
    auth: Arc<AuthService>,
    learning: Arc<LearningService>,
    assessment: Arc<AssessmentService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            flows: app.flows(),
            auth: app.auth(),
            learning: app.learning(),
            assessment: app.assessment(),
            progress: app.progress(),
        }
    }

    /// Whether a session token is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn flows(&self) -> Arc<FlowRegistry> {
        Arc::clone(&self.flows)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn learning(&self) -> Arc<LearningService> {
        Arc::clone(&self.learning)
    }

    #[must_use]
    pub fn assessment(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

// Provided by the composition root (`crates/app`) through `LaunchBuilder::with_context`.

/// Build the context handed to the view tree from the app's services.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
