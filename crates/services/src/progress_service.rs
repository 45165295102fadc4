use std::sync::Arc;

use brainpath_core::model::{DashboardAnalytics, ProgressSummary, SessionRecord};

use crate::api::BrainPathApi;
use crate::error::ApiError;
use crate::session_store::SessionStore;

/// Analytics and progress shown together on the performance page.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceOverview {
    pub analytics: DashboardAnalytics,
    pub progress: ProgressSummary,
}

/// Read-only progress queries. A 401 from any of them signs the user out.
#[derive(Clone)]
pub struct ProgressService {
    api: Arc<dyn BrainPathApi>,
    session: Arc<SessionStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(api: Arc<dyn BrainPathApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if `GET /progress` fails.
    pub async fn progress(&self) -> Result<ProgressSummary, ApiError> {
        match self.api.progress().await {
            Ok(summary) => Ok(summary),
            Err(err) => {
                tracing::warn!(error = %err, "could not load progress");
                Err(self.expire_on_unauthorized(err).await)
            }
        }
    }

    /// Fetch analytics and progress concurrently; either failure fails both.
    ///
    /// # Errors
    ///
    /// Returns the first `ApiError` from either request.
    pub async fn performance_overview(&self) -> Result<PerformanceOverview, ApiError> {
        match tokio::try_join!(self.api.dashboard_analytics(), self.api.progress()) {
            Ok((analytics, progress)) => Ok(PerformanceOverview {
                analytics,
                progress,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "could not load performance overview");
                Err(self.expire_on_unauthorized(err).await)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the session cannot be fetched.
    pub async fn session_record(&self, id: &str) -> Result<SessionRecord, ApiError> {
        match self.api.session(id).await {
            Ok(record) => Ok(record),
            Err(err) => {
                tracing::warn!(session = %id, error = %err, "could not load session");
                Err(self.expire_on_unauthorized(err).await)
            }
        }
    }

    /// The stored token was rejected; drop it so the route guard sends the
    /// user back to sign in.
    async fn expire_on_unauthorized(&self, err: ApiError) -> ApiError {
        if err.is_unauthorized() && self.session.is_authenticated() {
            tracing::info!("stored session rejected by backend; signing out");
            if let Err(store_err) = self.session.clear_session().await {
                tracing::warn!(error = %store_err, "could not clear rejected session");
            }
        }
        err
    }
}
