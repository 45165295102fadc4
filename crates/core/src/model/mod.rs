mod answer;
mod assessment;
mod auth;
mod content;
mod ids;
mod progress;
mod question;
mod technique;
mod user;

pub use answer::{AnswerRecord, AnswerSubmission, Evaluation};
pub use assessment::{
    AssessmentError, AssessmentPhase, AssessmentSession, AssessmentSummary, PassPolicy,
    QuestionTimer, SubmitOutcome, TimerUrgency,
};
pub use auth::{
    AuthSession, AuthToken, LoginError, LoginForm, LoginRequest, SignupError, SignupForm,
    SignupRequest,
};
pub use content::{ContentError, ContentPayload, LearningContent, VideoContent};
pub use ids::{AssessmentSessionId, FlowId, QuestionId, UserId};
pub use progress::{
    DashboardAnalytics, ProgressSummary, SessionRecord, SpeedAnalysis, StoredQuestion,
    TechniquePerformance,
};
pub use question::{Question, QuestionError, QuestionKind};
pub use technique::{Technique, Topic, TopicError, UnknownTechnique};
pub use user::{Board, EducationLevel, SubLevel, UserProfile};
