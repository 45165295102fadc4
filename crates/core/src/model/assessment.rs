use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

use crate::model::answer::{AnswerRecord, AnswerSubmission, Evaluation};
use crate::model::ids::{AssessmentSessionId, QuestionId};
use crate::model::question::Question;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("please enter an answer")]
    EmptyAnswer,
    #[error("an answer is already being submitted")]
    NotAnswering,
    #[error("no answer is being submitted")]
    NotSubmitting,
    #[error("assessment already completed")]
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssessmentPhase {
    Answering(usize),
    Submitting(usize),
    Completed,
}

/// How far over its time budget the current question is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerUrgency {
    Normal,
    Warning,
    Danger,
}

impl TimerUrgency {
    /// ratio ≤ 1.0 is normal, ≤ 1.5 warning, above that danger. A zero budget is always normal.
    #[must_use]
    pub fn classify(elapsed: Duration, expected_secs: u32) -> Self {
        if expected_secs == 0 {
            return Self::Normal;
        }
        Self::from_ratio(elapsed.as_secs_f64() / f64::from(expected_secs))
    }

    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= 1.0 {
            Self::Normal
        } else if ratio <= 1.5 {
            Self::Warning
        } else {
            Self::Danger
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "timer timer--normal",
            Self::Warning => "timer timer--warning",
            Self::Danger => "timer timer--danger",
        }
    }
}

/// Per-question stopwatch. Time only accumulates through `advance`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuestionTimer {
    elapsed: Duration,
}

impl QuestionTimer {
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed seconds rounded to one decimal, the precision sent as `time_taken`.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 10.0).round() / 10.0
    }
}

/// Pass rule expressed against a nominal quiz length and scaled to the real one.
///
/// The default is "4 of 6": exactly `score >= 4` for six questions, and the same
/// two-thirds ratio for any other count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassPolicy {
    pass_threshold: u32,
    nominal_total: u32,
}

impl Default for PassPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: 4,
            nominal_total: 6,
        }
    }
}

impl PassPolicy {
    /// `nominal_total` is clamped to at least 1.
    #[must_use]
    pub fn new(pass_threshold: u32, nominal_total: u32) -> Self {
        Self {
            pass_threshold,
            nominal_total: nominal_total.max(1),
        }
    }

    #[must_use]
    pub fn passed(&self, score: u32, total: u32) -> bool {
        if total == 0 {
            return false;
        }
        u64::from(score) * u64::from(self.nominal_total)
            >= u64::from(self.pass_threshold) * u64::from(total)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssessmentSummary {
    pub score: u32,
    pub total: u32,
    pub passed: bool,
}

impl AssessmentSummary {
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }
}

/// What happened after an evaluation was applied.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitOutcome {
    pub record: AnswerRecord,
    pub completed: bool,
}

/// Client-side state of one quiz attempt.
///
/// Questions are answered strictly in order; each submission is a two-step
/// `begin_submit` / `complete_submit` pair around the network call.
#[derive(Clone, Debug, PartialEq)]
pub struct AssessmentSession {
    session_id: AssessmentSessionId,
    questions: Vec<Question>,
    phase: AssessmentPhase,
    answers: HashMap<QuestionId, String>,
    results: Vec<AnswerRecord>,
    score: u32,
    timer: QuestionTimer,
}

impl AssessmentSession {
    #[must_use]
    pub fn new(session_id: AssessmentSessionId, questions: Vec<Question>) -> Self {
        let phase = if questions.is_empty() {
            AssessmentPhase::Completed
        } else {
            AssessmentPhase::Answering(0)
        };
        Self {
            session_id,
            questions,
            phase,
            answers: HashMap::new(),
            results: Vec::new(),
            score: 0,
            timer: QuestionTimer::default(),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &AssessmentSessionId {
        &self.session_id
    }

    #[must_use]
    pub fn phase(&self) -> AssessmentPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Index of the question on screen; equals `total()` once completed.
    #[must_use]
    pub fn current_index(&self) -> usize {
        match self.phase {
            AssessmentPhase::Answering(i) | AssessmentPhase::Submitting(i) => i,
            AssessmentPhase::Completed => self.questions.len(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            AssessmentPhase::Answering(i) | AssessmentPhase::Submitting(i) => self.questions.get(i),
            AssessmentPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase == AssessmentPhase::Completed
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, AssessmentPhase::Submitting(_))
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn results(&self) -> &[AnswerRecord] {
        &self.results
    }

    #[must_use]
    pub fn timer(&self) -> QuestionTimer {
        self.timer
    }

    #[must_use]
    pub fn urgency(&self) -> TimerUrgency {
        self.current_question().map_or(TimerUrgency::Normal, |question| {
            TimerUrgency::classify(self.timer.elapsed(), question.expected_time_secs())
        })
    }

    /// Draft answer for the current question.
    #[must_use]
    pub fn current_answer(&self) -> &str {
        self.current_question()
            .and_then(|question| self.answers.get(question.id()))
            .map_or("", String::as_str)
    }

    /// Edit the draft for the current question. Ignored unless answering.
    pub fn set_answer(&mut self, answer: impl Into<String>) {
        if let AssessmentPhase::Answering(i) = self.phase
            && let Some(question) = self.questions.get(i)
        {
            self.answers.insert(question.id().clone(), answer.into());
        }
    }

    /// Advance the current question's timer. Ignored unless answering.
    pub fn tick(&mut self, delta: Duration) {
        if matches!(self.phase, AssessmentPhase::Answering(_)) {
            self.timer.advance(delta);
        }
    }

    /// Freeze the current answer and produce the request to send.
    ///
    /// # Errors
    ///
    /// `EmptyAnswer` for blank drafts, `NotAnswering` while a submission is in
    /// flight, `Completed` after the last question. None of these change state.
    pub fn begin_submit(&mut self) -> Result<AnswerSubmission, AssessmentError> {
        let index = match self.phase {
            AssessmentPhase::Answering(i) => i,
            AssessmentPhase::Submitting(_) => return Err(AssessmentError::NotAnswering),
            AssessmentPhase::Completed => return Err(AssessmentError::Completed),
        };
        let Some(question) = self.questions.get(index) else {
            return Err(AssessmentError::Completed);
        };
        let answer = self.answers.get(question.id()).map_or("", String::as_str);
        if answer.trim().is_empty() {
            return Err(AssessmentError::EmptyAnswer);
        }

        let submission = AnswerSubmission {
            session_id: self.session_id.clone(),
            question_id: question.id().clone(),
            answer: answer.to_string(),
            time_taken: self.timer.seconds(),
        };
        self.phase = AssessmentPhase::Submitting(index);
        Ok(submission)
    }

    /// Record the backend verdict and move to the next question (or finish).
    ///
    /// # Errors
    ///
    /// `NotSubmitting` unless `begin_submit` succeeded and hasn't been resolved yet.
    pub fn complete_submit(
        &mut self,
        submission: &AnswerSubmission,
        evaluation: Evaluation,
    ) -> Result<SubmitOutcome, AssessmentError> {
        let AssessmentPhase::Submitting(index) = self.phase else {
            return Err(AssessmentError::NotSubmitting);
        };

        let record = AnswerRecord::from_evaluation(submission, evaluation);
        if record.is_correct {
            self.score = self.score.saturating_add(1);
        }
        self.results.push(record.clone());

        let next = index + 1;
        self.timer.reset();
        self.phase = if next < self.questions.len() {
            AssessmentPhase::Answering(next)
        } else {
            AssessmentPhase::Completed
        };

        Ok(SubmitOutcome {
            record,
            completed: self.is_completed(),
        })
    }

    /// Return to answering after a failed request, keeping the draft and the timer.
    pub fn abort_submit(&mut self) {
        if let AssessmentPhase::Submitting(index) = self.phase {
            self.phase = AssessmentPhase::Answering(index);
        }
    }

    /// Pass/fail summary, available once every question has been answered.
    #[must_use]
    pub fn summary(&self, policy: PassPolicy) -> Option<AssessmentSummary> {
        if !self.is_completed() {
            return None;
        }
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Some(AssessmentSummary {
            score: self.score,
            total,
            passed: policy.passed(self.score, total),
        })
    }
}
