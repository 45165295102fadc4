use brainpath_core::model::SessionRecord;

use crate::vm::assessment_vm::ResultRowVm;
use crate::vm::dashboard_vm::technique_label;
use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewedAnswerVm {
    pub question: String,
    pub result: ResultRowVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReviewVm {
    pub topic: String,
    pub technique: String,
    pub score_label: String,
    pub status: &'static str,
    pub date: Option<String>,
    pub answers: Vec<ReviewedAnswerVm>,
}

impl From<&SessionRecord> for SessionReviewVm {
    fn from(record: &SessionRecord) -> Self {
        let answers = record
            .responses
            .iter()
            .enumerate()
            .map(|(i, response)| ReviewedAnswerVm {
                question: record
                    .questions
                    .iter()
                    .find(|q| q.id == response.question_id.as_str())
                    .map_or_else(
                        || response.question_id.to_string(),
                        |q| q.question.clone(),
                    ),
                result: ResultRowVm::from_record(i + 1, response),
            })
            .collect();

        Self {
            topic: record.topic.clone(),
            technique: technique_label(&record.technique),
            score_label: format!("{}/{}", record.correct_count(), record.questions.len()),
            status: if record.completed {
                "Completed"
            } else {
                "In progress"
            },
            date: record.created_at.map(format_date),
            answers,
        }
    }
}
