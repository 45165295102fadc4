use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use brainpath_core::model::{
    AnswerSubmission, AssessmentSessionId, AuthSession, ContentPayload, DashboardAnalytics,
    Evaluation, LoginRequest, ProgressSummary, Question, SessionRecord, SignupRequest,
};

use super::{
    AuthResponse, BrainPathApi, CreateSessionRequest, CreateSessionResponse,
    GenerateContentRequest, GenerateQuestionsRequest, GeneratedContentResponse, QuestionsResponse,
};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session_store::SessionStore;

/// `BrainPathApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
    session: Arc<SessionStore>,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str, authed: bool) -> RequestBuilder {
        self.request_to(method, self.config.endpoint(path), authed)
    }

    fn request_to(&self, method: Method, url: impl IntoUrl, authed: bool) -> RequestBuilder {
        let builder = self.client.request(method, url);
        if !authed {
            return builder;
        }
        match self.session.token() {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            tracing::warn!(%path, %status, detail = detail.as_deref().unwrap_or(""), "request rejected");
            return Err(ApiError::Status { status, detail });
        }

        serde_json::from_slice(&body).map_err(|err| {
            tracing::warn!(%path, error = %err, "could not decode response");
            ApiError::Decode(format!("{path}: {err}"))
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Handles both `{"detail": "..."}` and validation errors shaped
/// `{"detail": [{"msg": "..."}]}`.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

#[async_trait]
impl BrainPathApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        let path = "auth/login";
        let builder = self.request(Method::POST, path, false).json(request);
        let response: AuthResponse = self.send(path, builder).await?;
        Ok(response.into())
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, ApiError> {
        let path = "auth/signup";
        let builder = self.request(Method::POST, path, false).json(request);
        let response: AuthResponse = self.send(path, builder).await?;
        Ok(response.into())
    }

    async fn progress(&self) -> Result<ProgressSummary, ApiError> {
        let path = "progress";
        self.send(path, self.request(Method::GET, path, true)).await
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ContentPayload, ApiError> {
        let path = "learning/generate-content";
        let builder = self.request(Method::POST, path, true).json(request);
        let response: GeneratedContentResponse = self.send(path, builder).await?;
        Ok(response.content)
    }

    async fn generate_questions(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> Result<Vec<Question>, ApiError> {
        let path = "learning/generate-questions";
        let builder = self.request(Method::POST, path, true).json(request);
        let response: QuestionsResponse = self.send(path, builder).await?;
        Ok(response.questions)
    }

    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<AssessmentSessionId, ApiError> {
        let path = "learning/create-session";
        let builder = self.request(Method::POST, path, true).json(request);
        let response: CreateSessionResponse = self.send(path, builder).await?;
        Ok(response.session_id)
    }

    async fn evaluate_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<Evaluation, ApiError> {
        let path = "learning/evaluate-answer";
        let builder = self.request(Method::POST, path, true).json(submission);
        self.send(path, builder).await
    }

    async fn session(&self, id: &str) -> Result<SessionRecord, ApiError> {
        let url = self.config.resource("learning/session", id)?;
        let path = url.path().to_string();
        self.send(&path, self.request_to(Method::GET, url, true)).await
    }

    async fn dashboard_analytics(&self) -> Result<DashboardAnalytics, ApiError> {
        let path = "analytics/dashboard";
        self.send(path, self.request(Method::GET, path, true)).await
    }
}
