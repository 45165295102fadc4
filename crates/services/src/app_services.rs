use std::sync::Arc;

use brainpath_core::model::PassPolicy;
use storage::repository::Storage;

use crate::Clock;
use crate::api::{BrainPathApi, HttpApi};
use crate::assessment_service::AssessmentService;
use crate::auth_service::AuthService;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::flows::FlowRegistry;
use crate::learning_service::LearningService;
use crate::progress_service::ProgressService;
use crate::session_store::SessionStore;

/// Assembles app-facing services around one session store and one API client.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionStore>,
    flows: Arc<FlowRegistry>,
    auth: Arc<AuthService>,
    learning: Arc<LearningService>,
    assessment: Arc<AssessmentService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` client storage and the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the HTTP
    /// client cannot be built.
    pub async fn new_sqlite(config: ApiConfig, db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(config, storage).await
    }

    /// Build services over any storage backend, restoring a saved session.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub async fn new(config: ApiConfig, storage: Storage) -> Result<Self, AppServicesError> {
        let session = Arc::new(SessionStore::new(storage.client_state));
        session.load().await;
        tracing::info!(api = %config.base_url(), "connecting to backend");
        let api: Arc<dyn BrainPathApi> = Arc::new(HttpApi::new(config, Arc::clone(&session))?);
        Ok(Self::assemble(api, session, Clock::system()))
    }

    /// Build services over a caller-supplied API, e.g. a test double.
    pub async fn with_api(api: Arc<dyn BrainPathApi>, storage: Storage, clock: Clock) -> Self {
        let session = Arc::new(SessionStore::new(storage.client_state));
        session.load().await;
        Self::assemble(api, session, clock)
    }

    fn assemble(api: Arc<dyn BrainPathApi>, session: Arc<SessionStore>, clock: Clock) -> Self {
        let flows = Arc::new(FlowRegistry::new(clock));
        let auth = Arc::new(AuthService::new(Arc::clone(&api), Arc::clone(&session)));
        let learning = Arc::new(LearningService::new(Arc::clone(&api), Arc::clone(&flows)));
        let assessment = Arc::new(AssessmentService::new(
            Arc::clone(&api),
            Arc::clone(&flows),
            PassPolicy::default(),
        ));
        let progress = Arc::new(ProgressService::new(api, Arc::clone(&session)));

        Self {
            session,
            flows,
            auth,
            learning,
            assessment,
            progress,
        }
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
