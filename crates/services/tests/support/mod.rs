#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use brainpath_core::model::{
    AnswerSubmission, AssessmentSessionId, AuthSession, AuthToken, ContentPayload,
    DashboardAnalytics, EducationLevel, Evaluation, LoginRequest, ProgressSummary, Question,
    QuestionId, QuestionKind, SessionRecord, SignupRequest, UserProfile,
};
use services::ApiError;
use services::api::{
    BrainPathApi, CreateSessionRequest, GenerateContentRequest, GenerateQuestionsRequest,
};

/// Scripted backend. Failures are armed per endpoint and consumed one call at a time.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<HashMap<&'static str, usize>>,
    failures: Mutex<HashMap<&'static str, usize>>,
    pub question_count: AtomicUsize,
    pub progress: Mutex<ProgressSummary>,
    pub analytics: Mutex<DashboardAnalytics>,
    pub created_sessions: Mutex<Vec<CreateSessionRequest>>,
    /// Every endpoint except login/signup answers 401 while set.
    pub token_expired: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.question_count.store(6, Ordering::SeqCst);
        api
    }

    pub fn fail_next(&self, endpoint: &'static str, times: usize) {
        self.failures.lock().unwrap().insert(endpoint, times);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    fn record(&self, endpoint: &'static str) -> Result<(), ApiError> {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
        if self.token_expired.load(Ordering::SeqCst) && !matches!(endpoint, "login" | "signup") {
            return Err(ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                detail: Some("Could not validate credentials".into()),
            });
        }
        let mut failures = self.failures.lock().unwrap();
        match failures.get_mut(endpoint) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(ApiError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    detail: Some(format!("{endpoint} unavailable")),
                })
            }
            _ => Ok(()),
        }
    }
}

pub fn profile(email: &str) -> UserProfile {
    UserProfile {
        id: None,
        email: email.to_string(),
        education_level: EducationLevel::College,
        sub_level: None,
        board: None,
        created_at: None,
    }
}

pub fn question(n: usize) -> Question {
    Question::new(
        QuestionId::new(format!("q{n}")),
        QuestionKind::Short,
        format!("Question {n}?"),
        30,
    )
    .unwrap()
}

#[async_trait]
impl BrainPathApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        self.record("login")?;
        if request.password == "wrong" {
            return Err(ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                detail: Some("Invalid credentials".into()),
            });
        }
        Ok(AuthSession::new(
            AuthToken::new("token-login"),
            profile(&request.email),
        ))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession, ApiError> {
        self.record("signup")?;
        let mut user = profile(&request.email);
        user.education_level = request.education_level.clone();
        user.sub_level = request.sub_level.clone();
        user.board = request.board.clone();
        Ok(AuthSession::new(AuthToken::new("token-signup"), user))
    }

    async fn progress(&self) -> Result<ProgressSummary, ApiError> {
        self.record("progress")?;
        Ok(self.progress.lock().unwrap().clone())
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ContentPayload, ApiError> {
        self.record("generate_content")?;
        Ok(ContentPayload::Text(format!(
            "# {}\n\nAll about the topic.",
            request.topic
        )))
    }

    async fn generate_questions(
        &self,
        _request: &GenerateQuestionsRequest,
    ) -> Result<Vec<Question>, ApiError> {
        self.record("generate_questions")?;
        let count = self.question_count.load(Ordering::SeqCst);
        Ok((1..=count).map(question).collect())
    }

    async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<AssessmentSessionId, ApiError> {
        self.record("create_session")?;
        let mut created = self.created_sessions.lock().unwrap();
        created.push(request.clone());
        Ok(AssessmentSessionId::new(format!("session-{}", created.len())))
    }

    /// Answers reading "right" are correct; everything else is wrong.
    async fn evaluate_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<Evaluation, ApiError> {
        self.record("evaluate_answer")?;
        let is_correct = submission.answer.trim().eq_ignore_ascii_case("right");
        Ok(Evaluation {
            is_correct,
            feedback: if is_correct { "Correct!".into() } else { "Not quite.".into() },
            speed_score: Some("optimal".into()),
        })
    }

    async fn session(&self, id: &str) -> Result<SessionRecord, ApiError> {
        self.record("session")?;
        Ok(SessionRecord {
            id: id.to_string(),
            topic: "Photosynthesis".into(),
            technique: "passage".into(),
            questions: Vec::new(),
            responses: Vec::new(),
            score: 0,
            completed: false,
            created_at: None,
        })
    }

    async fn dashboard_analytics(&self) -> Result<DashboardAnalytics, ApiError> {
        self.record("dashboard_analytics")?;
        Ok(self.analytics.lock().unwrap().clone())
    }
}
