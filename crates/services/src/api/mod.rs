//! Backend API surface: one trait method per endpoint plus the wire DTOs.

mod http;

pub use http::HttpApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use brainpath_core::model::{
    AnswerSubmission, AssessmentSessionId, AuthSession, AuthToken, ContentPayload,
    DashboardAnalytics, Evaluation, LoginRequest, ProgressSummary, Question, SessionRecord,
    SignupRequest, Technique, UserProfile,
};

use crate::error::ApiError;

/// Difficulty sent with `generate-questions`; the backend treats 1 as "basic".
pub const DEFAULT_DIFFICULTY: u8 = 1;

/// Every backend call the app makes.
///
/// Authenticated calls read the bearer token from the session store at call time.
#[async_trait]
pub trait BrainPathApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError>;

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, ApiError>;

    async fn progress(&self) -> Result<ProgressSummary, ApiError>;

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ContentPayload, ApiError>;

    async fn generate_questions(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> Result<Vec<Question>, ApiError>;

    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<AssessmentSessionId, ApiError>;

    async fn evaluate_answer(&self, submission: &AnswerSubmission)
    -> Result<Evaluation, ApiError>;

    async fn session(&self, id: &str) -> Result<SessionRecord, ApiError>;

    async fn dashboard_analytics(&self) -> Result<DashboardAnalytics, ApiError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    pub topic: String,
    pub technique: Technique,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerateQuestionsRequest {
    pub topic: String,
    /// Text the questions are drawn from.
    pub content: String,
    pub technique: Technique,
    pub difficulty: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateSessionRequest {
    pub topic: String,
    pub technique: Technique,
    pub content: ContentPayload,
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    token: String,
    user: UserProfile,
}

impl From<AuthResponse> for AuthSession {
    fn from(response: AuthResponse) -> Self {
        AuthSession::new(AuthToken::new(response.token), response.user)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedContentResponse {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    pub(crate) kind: Option<String>,
    pub(crate) content: ContentPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResponse {
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateSessionResponse {
    pub(crate) session_id: AssessmentSessionId,
}
