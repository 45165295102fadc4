//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use brainpath_core::model::{AssessmentError, ContentError, LoginError, SignupError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Fallback shown when the backend gives no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors emitted by the backend API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid resource id: {0:?}")]
    InvalidPath(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided `detail` when there is one, otherwise a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ApiError::Transport(err) if err.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            ApiError::Transport(err) if err.is_connect() => {
                "Could not reach the BrainPath server.".to_string()
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Errors emitted by `SessionStore` writes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error(transparent)]
    Signup(#[from] SignupError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl AuthError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Login(err) => err.to_string(),
            AuthError::Signup(err) => err.to_string(),
            AuthError::Api(err) => err.user_message(),
            AuthError::Store(_) => "Signed in, but the session could not be saved.".to_string(),
        }
    }
}

/// Step of the start-assessment chain that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SagaStep {
    GenerateQuestions,
    CreateSession,
}

impl std::fmt::Display for SagaStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SagaStep::GenerateQuestions => f.write_str("generate questions"),
            SagaStep::CreateSession => f.write_str("create session"),
        }
    }
}

/// Errors emitted by `LearningService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearningError {
    #[error("learning flow not found")]
    FlowNotFound,
    #[error("content has not been loaded for this flow")]
    ContentNotLoaded,
    #[error("no questions were generated")]
    NoQuestions,
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error("could not load content: {0}")]
    GenerateContent(#[source] ApiError),
    #[error("could not {step}: {source}")]
    Step {
        step: SagaStep,
        #[source]
        source: ApiError,
    },
}

impl LearningError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LearningError::FlowNotFound | LearningError::ContentNotLoaded => {
                "This lesson is no longer available. Please start again.".to_string()
            }
            LearningError::NoQuestions => "No questions could be generated for this topic.".into(),
            LearningError::Content(_) => "The generated content could not be displayed.".into(),
            LearningError::GenerateContent(source) | LearningError::Step { source, .. } => {
                source.user_message()
            }
        }
    }
}

/// Errors emitted by `AssessmentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AssessmentServiceError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AssessmentServiceError::Assessment(err) => err.to_string(),
            AssessmentServiceError::Api(err) => err.user_message(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
