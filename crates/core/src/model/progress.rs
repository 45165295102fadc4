use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::answer::AnswerRecord;
use crate::model::technique::Technique;

/// Backend speed buckets (`fast`, `optimal`, `slow`, ...) with counts, shown verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedAnalysis(BTreeMap<String, u32>);

impl SpeedAnalysis {
    #[must_use]
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    #[must_use]
    pub fn get(&self, bucket: &str) -> u32 {
        self.0.get(bucket).copied().unwrap_or(0)
    }

    /// Known buckets first in their natural order, then anything else alphabetically.
    #[must_use]
    pub fn buckets(&self) -> Vec<(&str, u32)> {
        const KNOWN: [&str; 3] = ["fast", "optimal", "slow"];
        let mut out: Vec<(&str, u32)> = KNOWN
            .iter()
            .filter_map(|name| self.0.get(*name).map(|count| (*name, *count)))
            .collect();
        out.extend(
            self.0
                .iter()
                .filter(|(name, _)| !KNOWN.contains(&name.as_str()))
                .map(|(name, count)| (name.as_str(), *count)),
        );
        out
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().copied().fold(0, u32::saturating_add)
    }
}

/// Lightweight view of a stored question; only what history screens display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// A server-side learning session (`GET /learning/session/{id}` and `recent_sessions`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub topic: String,
    pub technique: String,
    #[serde(default)]
    pub questions: Vec<StoredQuestion>,
    #[serde(default)]
    pub responses: Vec<AnswerRecord>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    #[must_use]
    pub fn technique(&self) -> Option<Technique> {
        self.technique.parse().ok()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_correct).count()
    }
}

/// `GET /progress`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub completed_sessions: u32,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub speed_analysis: SpeedAnalysis,
    #[serde(default)]
    pub recent_sessions: Vec<SessionRecord>,
}

impl ProgressSummary {
    #[must_use]
    pub fn has_sessions(&self) -> bool {
        self.total_sessions > 0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniquePerformance {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub total: u32,
}

/// `GET /analytics/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    #[serde(default)]
    pub avg_time_per_question: f64,
    #[serde(default)]
    pub total_learning_time: f64,
    #[serde(default)]
    pub technique_performance: BTreeMap<String, TechniquePerformance>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_progress_with_recent_sessions() {
        let json = r#"{
            "total_sessions": 2,
            "completed_sessions": 1,
            "total_questions": 6,
            "correct_answers": 4,
            "accuracy": 66.67,
            "speed_analysis": {"slow": 1, "fast": 2, "optimal": 3, "blazing": 0},
            "recent_sessions": [{
                "id": "s1",
                "user_id": "u1",
                "topic": "Photosynthesis",
                "technique": "video",
                "content": {"videoId": "x"},
                "questions": [{"id": "q1", "type": "mcq", "question": "?", "options": ["A"]}],
                "responses": [{
                    "question_id": "q1", "answer": "A", "is_correct": true,
                    "time_taken": 12.5, "speed_score": "fast", "feedback": "Correct!",
                    "timestamp": "2024-05-01T10:00:00.123456+00:00"
                }],
                "score": 1,
                "completed": false,
                "created_at": "2024-05-01T09:59:00+00:00"
            }]
        }"#;
        let progress: ProgressSummary = serde_json::from_str(json).unwrap();
        assert!(progress.has_sessions());
        assert_eq!(
            progress.speed_analysis.buckets(),
            vec![("fast", 2), ("optimal", 3), ("slow", 1), ("blazing", 0)]
        );
        let recent = &progress.recent_sessions[0];
        assert_eq!(recent.technique(), Some(Technique::Video));
        assert_eq!(recent.correct_count(), 1);
        assert!(recent.responses[0].answered_at.is_some());
    }

    #[test]
    fn empty_progress_has_no_sessions() {
        let progress: ProgressSummary = serde_json::from_str("{}").unwrap();
        assert!(!progress.has_sessions());
        assert_eq!(progress.speed_analysis.total(), 0);
    }

    #[test]
    fn decodes_dashboard_analytics() {
        let json = r#"{
            "technique_performance": {"passage": {"correct": 3, "total": 4, "accuracy": 75.0}},
            "total_learning_time": 120.0,
            "avg_time_per_question": 30.0,
            "strengths": ["passage"],
            "weaknesses": []
        }"#;
        let analytics: DashboardAnalytics = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.technique_performance["passage"].correct, 3);
        assert_eq!(analytics.strengths, vec!["passage".to_string()]);
    }
}
