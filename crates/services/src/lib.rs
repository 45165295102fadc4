#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod assessment_service;
pub mod auth_service;
pub mod config;
pub mod error;
pub mod flows;
pub mod learning_service;
pub mod progress_service;
pub mod session_store;

pub use brainpath_core::Clock;

pub use api::{BrainPathApi, HttpApi};
pub use app_services::AppServices;
pub use assessment_service::AssessmentService;
pub use auth_service::AuthService;
pub use config::ApiConfig;
pub use error::{
    ApiError, AppServicesError, AssessmentServiceError, AuthError, GENERIC_ERROR_MESSAGE,
    LearningError, SagaStep, SessionStoreError,
};
pub use flows::{AssessmentHandoff, FlowRegistry, LearningFlow};
pub use learning_service::LearningService;
pub use progress_service::{PerformanceOverview, ProgressService};
pub use session_store::SessionStore;
