use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,
    #[error("question text cannot be empty")]
    EmptyText,
    #[error("unknown question type: {0}")]
    UnknownType(String),
    #[error("multiple choice question {0} has no options")]
    MissingOptions(String),
    #[error("expected time must be a non-negative number of seconds")]
    InvalidExpectedTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    Mcq { options: Vec<String> },
    Short,
}

/// One generated quiz question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", into = "RawQuestion")]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    text: String,
    expected_time_secs: u32,
    correct_hint: Option<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or text is blank, or an MCQ has no options.
    pub fn new(
        id: QuestionId,
        kind: QuestionKind,
        text: impl Into<String>,
        expected_time_secs: u32,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if id.as_str().trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if let QuestionKind::Mcq { options } = &kind
            && options.is_empty()
        {
            return Err(QuestionError::MissingOptions(id.to_string()));
        }
        Ok(Self {
            id,
            kind,
            text,
            expected_time_secs,
            correct_hint: None,
        })
    }

    /// Keep the backend's answer key so the question can be sent back to `create-session` intact.
    #[must_use]
    pub fn with_correct_hint(mut self, correct: Option<String>) -> Self {
        self.correct_hint = correct;
        self
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::Mcq { options } => Some(options),
            QuestionKind::Short => None,
        }
    }

    #[must_use]
    pub fn is_mcq(&self) -> bool {
        matches!(self.kind, QuestionKind::Mcq { .. })
    }

    #[must_use]
    pub fn expected_time_secs(&self) -> u32 {
        self.expected_time_secs
    }
}

/// Wire shape: `{"id","type":"mcq"|"short","question","options"?,"correct"?,"expected_time"}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correct: Option<String>,
    expected_time: f64,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        if !raw.expected_time.is_finite() || raw.expected_time < 0.0 {
            return Err(QuestionError::InvalidExpectedTime);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let expected_time_secs = raw.expected_time.round().min(f64::from(u32::MAX)) as u32;
        let kind = match raw.kind.trim().to_ascii_lowercase().as_str() {
            "mcq" => QuestionKind::Mcq {
                options: raw.options.unwrap_or_default(),
            },
            "short" => QuestionKind::Short,
            other => return Err(QuestionError::UnknownType(other.to_string())),
        };
        Ok(Question::new(QuestionId::new(raw.id), kind, raw.question, expected_time_secs)?
            .with_correct_hint(raw.correct))
    }
}

impl From<Question> for RawQuestion {
    fn from(question: Question) -> Self {
        let (kind, options) = match question.kind {
            QuestionKind::Mcq { options } => ("mcq", Some(options)),
            QuestionKind::Short => ("short", None),
        };
        Self {
            id: question.id.as_str().to_string(),
            kind: kind.to_string(),
            question: question.text,
            options,
            correct: question.correct_hint,
            expected_time: f64::from(question.expected_time_secs),
        }
    }
}
