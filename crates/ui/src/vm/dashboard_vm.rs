use brainpath_core::model::{ProgressSummary, SessionRecord, SpeedAnalysis, Technique};

use crate::vm::time_fmt::{format_date, format_percent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedBucketVm {
    pub label: String,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentSessionVm {
    pub id: String,
    pub topic: String,
    pub technique_label: String,
    pub score_label: String,
    pub completed: bool,
    pub date: Option<String>,
}

impl From<&SessionRecord> for RecentSessionVm {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: record.id.clone(),
            topic: record.topic.clone(),
            technique_label: technique_label(&record.technique),
            score_label: format!("{}/{}", record.score, record.questions.len()),
            completed: record.completed,
            date: record.created_at.map(format_date),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub has_sessions: bool,
    pub accuracy: String,
    pub sessions: String,
    pub questions: String,
    pub speed: Vec<SpeedBucketVm>,
    pub recent: Vec<RecentSessionVm>,
}

impl From<&ProgressSummary> for DashboardVm {
    fn from(progress: &ProgressSummary) -> Self {
        Self {
            has_sessions: progress.has_sessions(),
            accuracy: format_percent(progress.accuracy),
            sessions: format!(
                "{} of {} completed",
                progress.completed_sessions, progress.total_sessions
            ),
            questions: format!(
                "{} of {} correct",
                progress.correct_answers, progress.total_questions
            ),
            speed: speed_buckets(&progress.speed_analysis),
            recent: progress
                .recent_sessions
                .iter()
                .map(RecentSessionVm::from)
                .collect(),
        }
    }
}

#[must_use]
pub fn speed_buckets(speed: &SpeedAnalysis) -> Vec<SpeedBucketVm> {
    speed
        .buckets()
        .into_iter()
        .map(|(bucket, count)| SpeedBucketVm {
            label: capitalize(bucket),
            count,
        })
        .collect()
}

/// Display label for a technique as stored server-side; unknown values pass through.
#[must_use]
pub fn technique_label(raw: &str) -> String {
    raw.parse::<Technique>()
        .map_or_else(|_| raw.to_string(), |technique| technique.label().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
