use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{AssessmentSessionId, QuestionId};

/// Body of `POST /learning/evaluate-answer`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerSubmission {
    pub session_id: AssessmentSessionId,
    pub question_id: QuestionId,
    pub answer: String,
    /// Seconds spent on the question.
    pub time_taken: f64,
}

/// Backend verdict for one submitted answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_correct: bool,
    #[serde(default)]
    pub feedback: String,
    /// Backend speed bucket (`fast`, `optimal`, `slow`, ...), shown verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_score: Option<String>,
}

/// One answered question within the current assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub answer: String,
    pub time_taken: f64,
    pub is_correct: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_score: Option<String>,
    #[serde(default, rename = "timestamp", skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
}

impl AnswerRecord {
    #[must_use]
    pub fn from_evaluation(submission: &AnswerSubmission, evaluation: Evaluation) -> Self {
        Self {
            question_id: submission.question_id.clone(),
            answer: submission.answer.clone(),
            time_taken: submission.time_taken,
            is_correct: evaluation.is_correct,
            feedback: evaluation.feedback,
            speed_score: evaluation.speed_score,
            answered_at: None,
        }
    }
}
