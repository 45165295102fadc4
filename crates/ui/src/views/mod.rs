mod assessment;
mod auth;
mod dashboard;
mod landing;
mod learning;
mod performance;
mod session_review;
mod state;
mod toast;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use assessment::AssessmentView;
pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use landing::LandingView;
pub use learning::LearningView;
pub use performance::PerformanceView;
pub use session_review::SessionReviewView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use toast::{Toast, ToastHost, ToastKind, Toasts};
