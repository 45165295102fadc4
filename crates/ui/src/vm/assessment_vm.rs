use brainpath_core::model::{AnswerRecord, AssessmentSession, AssessmentSummary, PassPolicy};

use crate::vm::time_fmt::format_seconds;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub text: String,
    pub selected: bool,
}

/// Everything the question screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub position: String,
    pub progress_width: u8,
    pub text: String,
    pub options: Option<Vec<OptionVm>>,
    pub answer: String,
    pub timer_label: String,
    pub target_label: String,
    pub timer_class: &'static str,
    pub submitting: bool,
    pub can_submit: bool,
}

impl QuestionVm {
    #[must_use]
    pub fn from_session(session: &AssessmentSession) -> Option<Self> {
        let question = session.current_question()?;
        let answer = session.current_answer().to_string();
        let submitting = session.is_submitting();
        let options = question.options().map(|options| {
            options
                .iter()
                .map(|text| OptionVm {
                    text: text.clone(),
                    selected: *text == answer,
                })
                .collect()
        });

        Some(Self {
            position: format!(
                "Question {} of {}",
                session.current_index() + 1,
                session.total()
            ),
            progress_width: percent(session.current_index(), session.total()),
            text: question.text().to_string(),
            options,
            timer_label: format_seconds(session.timer().seconds()),
            target_label: format!("Target: {}s", question.expected_time_secs()),
            timer_class: session.urgency().css_class(),
            can_submit: !submitting,
            answer,
            submitting,
        })
    }
}

/// Toast shown after each verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub message: String,
}

impl FeedbackVm {
    #[must_use]
    pub fn from_record(record: &AnswerRecord) -> Self {
        let message = match record.feedback.trim() {
            "" if record.is_correct => "Correct!".to_string(),
            "" => "Incorrect".to_string(),
            feedback => feedback.to_string(),
        };
        Self {
            correct: record.is_correct,
            message,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub number: usize,
    pub correct: bool,
    pub answer: String,
    pub time_label: String,
    pub speed: Option<String>,
    pub feedback: String,
}

impl ResultRowVm {
    #[must_use]
    pub fn from_record(number: usize, record: &AnswerRecord) -> Self {
        Self {
            number,
            correct: record.is_correct,
            answer: record.answer.clone(),
            time_label: format_seconds(record.time_taken),
            speed: record.speed_score.clone(),
            feedback: record.feedback.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub passed: bool,
    pub headline: &'static str,
    pub message: &'static str,
    pub rows: Vec<ResultRowVm>,
}

impl ResultsVm {
    #[must_use]
    pub fn new(summary: AssessmentSummary, results: &[AnswerRecord]) -> Self {
        let (headline, message) = if summary.passed {
            ("Great work!", "You've shown a solid understanding of this topic.")
        } else {
            (
                "Keep practicing",
                "Review the material once more and try again.",
            )
        };
        Self {
            score_label: summary.score_label(),
            passed: summary.passed,
            headline,
            message,
            rows: results
                .iter()
                .enumerate()
                .map(|(i, record)| ResultRowVm::from_record(i + 1, record))
                .collect(),
        }
    }

    #[must_use]
    pub fn from_session(session: &AssessmentSession, policy: PassPolicy) -> Option<Self> {
        session
            .summary(policy)
            .map(|summary| Self::new(summary, session.results()))
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    u8::try_from(done.min(total) * 100 / total).unwrap_or(100)
}
