use brainpath_core::model::Technique;
use services::PerformanceOverview;

use crate::vm::dashboard_vm::{SpeedBucketVm, speed_buckets, technique_label};
use crate::vm::time_fmt::{format_duration, format_percent, format_seconds};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TechniqueRowVm {
    pub label: String,
    pub accuracy: String,
    pub detail: String,
    /// Bar width, 0..=100.
    pub width: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerformanceVm {
    pub has_data: bool,
    pub accuracy: String,
    pub avg_time: String,
    pub total_time: String,
    pub techniques: Vec<TechniqueRowVm>,
    pub speed: Vec<SpeedBucketVm>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl From<&PerformanceOverview> for PerformanceVm {
    fn from(overview: &PerformanceOverview) -> Self {
        let analytics = &overview.analytics;

        // Known techniques in their canonical order, then anything else the backend reports.
        let mut keys: Vec<&str> = Technique::ALL
            .iter()
            .map(|technique| technique.as_str())
            .filter(|key| analytics.technique_performance.contains_key(*key))
            .collect();
        keys.extend(
            analytics
                .technique_performance
                .keys()
                .map(String::as_str)
                .filter(|key| key.parse::<Technique>().is_err()),
        );

        let techniques = keys
            .into_iter()
            .filter_map(|key| {
                analytics
                    .technique_performance
                    .get(key)
                    .map(|perf| TechniqueRowVm {
                        label: technique_label(key),
                        accuracy: format_percent(perf.accuracy),
                        detail: format!("{} of {} correct", perf.correct, perf.total),
                        width: bar_width(perf.accuracy),
                    })
            })
            .collect();

        Self {
            has_data: overview.progress.has_sessions(),
            accuracy: format_percent(overview.progress.accuracy),
            avg_time: format_seconds(analytics.avg_time_per_question),
            total_time: format_duration(analytics.total_learning_time),
            techniques,
            speed: speed_buckets(&overview.progress.speed_analysis),
            strengths: analytics.strengths.iter().map(|s| technique_label(s)).collect(),
            weaknesses: analytics.weaknesses.iter().map(|s| technique_label(s)).collect(),
        }
    }
}

fn bar_width(accuracy: f64) -> u8 {
    if !accuracy.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let width = accuracy.clamp(0.0, 100.0).round() as u8;
    width
}
