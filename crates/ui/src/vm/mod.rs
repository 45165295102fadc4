mod assessment_vm;
mod auth_vm;
mod dashboard_vm;
mod markdown_vm;
mod performance_vm;
mod session_review_vm;
mod time_fmt;

pub use assessment_vm::{FeedbackVm, OptionVm, QuestionVm, ResultRowVm, ResultsVm};
pub use auth_vm::{
    AuthMode, SelectOption, board_options, education_level_options, parse_selection,
    sub_level_options,
};
pub use dashboard_vm::{DashboardVm, RecentSessionVm, SpeedBucketVm, technique_label};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use performance_vm::{PerformanceVm, TechniqueRowVm};
pub use session_review_vm::{ReviewedAnswerVm, SessionReviewVm};
pub use time_fmt::{format_date, format_duration, format_percent, format_seconds};
