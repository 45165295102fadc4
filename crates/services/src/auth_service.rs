use std::sync::Arc;

use brainpath_core::model::{AuthSession, LoginForm, SignupForm};

use crate::api::BrainPathApi;
use crate::error::AuthError;
use crate::session_store::SessionStore;

/// Login, signup and logout against the backend, persisting the result.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn BrainPathApi>,
    session: Arc<SessionStore>,
}

impl AuthService {
    #[must_use]
    pub fn new(api: Arc<dyn BrainPathApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Login` without touching the network when the form is
    /// incomplete, otherwise the API or persistence failure.
    pub async fn login(&self, form: &LoginForm) -> Result<AuthSession, AuthError> {
        let request = form.validate()?;
        let session = self.api.login(&request).await?;
        self.session.set_session(session.clone()).await?;
        tracing::info!(email = %session.user.email, "logged in");
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Signup` without touching the network when the form is
    /// incomplete, otherwise the API or persistence failure.
    pub async fn signup(&self, form: &SignupForm) -> Result<AuthSession, AuthError> {
        let request = form.validate()?;
        let session = self.api.signup(&request).await?;
        self.session.set_session(session.clone()).await?;
        tracing::info!(email = %session.user.email, level = %session.user.education_level.as_str(), "signed up");
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Store` if persisted state could not be cleared. The
    /// in-memory session is gone regardless.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear_session().await?;
        Ok(())
    }
}
