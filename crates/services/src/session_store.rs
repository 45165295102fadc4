use std::sync::{Arc, PoisonError, RwLock};

use brainpath_core::model::{AuthSession, AuthToken, UserProfile};
use storage::repository::ClientStorage;

use crate::error::SessionStoreError;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Authenticated session, mirrored between memory and durable client storage.
///
/// Token and profile are written together and cleared together, so readers
/// never observe one without the other.
pub struct SessionStore {
    current: RwLock<Option<AuthSession>>,
    storage: Arc<dyn ClientStorage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            current: RwLock::new(None),
            storage,
        }
    }

    /// Restore the session persisted by a previous run.
    ///
    /// Missing, partial, or unreadable entries leave the store logged out.
    pub async fn load(&self) -> Option<AuthSession> {
        let restored = self.read_persisted().await;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = restored.clone();
        match &restored {
            Some(session) => tracing::info!(email = %session.user.email, "restored saved session"),
            None => tracing::debug!("no saved session"),
        }
        restored
    }

    async fn read_persisted(&self) -> Option<AuthSession> {
        let token = match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved token");
                return None;
            }
        };
        let user = match self.storage.get(USER_KEY).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved user");
                return None;
            }
        };

        match (token, user) {
            (None, None) => None,
            (Some(token), Some(user)) if !token.trim().is_empty() => {
                match serde_json::from_str::<UserProfile>(&user) {
                    Ok(user) => Some(AuthSession::new(AuthToken::new(token), user)),
                    Err(err) => {
                        tracing::warn!(error = %err, "saved user profile is corrupt; treating as logged out");
                        self.discard_persisted().await;
                        None
                    }
                }
            }
            _ => {
                tracing::warn!("saved session is incomplete; treating as logged out");
                self.discard_persisted().await;
                None
            }
        }
    }

    async fn discard_persisted(&self) {
        if let Err(err) = self.storage.clear().await {
            tracing::warn!(error = %err, "could not discard unusable saved session");
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token.clone())
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist and activate a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the profile cannot be encoded or storage rejects the
    /// write. The in-memory session is left unchanged in that case.
    pub async fn set_session(&self, session: AuthSession) -> Result<(), SessionStoreError> {
        let user = serde_json::to_string(&session.user)?;
        self.storage
            .set(&[(TOKEN_KEY, session.token.expose()), (USER_KEY, &user)])
            .await?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Drop the session from memory, then from storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if storage cannot be cleared; the in-memory
    /// session is already gone by then.
    pub async fn clear_session(&self) -> Result<(), SessionStoreError> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.storage.clear().await?;
        tracing::info!("session cleared");
        Ok(())
    }
}
