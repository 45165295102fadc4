mod support;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use brainpath_core::model::{LoginForm, SpeedAnalysis, TechniquePerformance};
use services::{AppServices, Clock};
use storage::repository::{InMemoryStorage, Storage};

use support::FakeApi;

#[tokio::test]
async fn overview_combines_analytics_and_progress() {
    let api = Arc::new(FakeApi::new());
    {
        let mut progress = api.progress.lock().unwrap();
        progress.total_sessions = 3;
        progress.speed_analysis = SpeedAnalysis::from_pairs([("fast", 2), ("slow", 1)]);
        let mut analytics = api.analytics.lock().unwrap();
        analytics.technique_performance.insert(
            "video".into(),
            TechniquePerformance {
                accuracy: 75.0,
                correct: 3,
                total: 4,
            },
        );
    }
    let app = AppServices::with_api(api.clone(), Storage::in_memory(), Clock::system()).await;

    let overview = app.progress().performance_overview().await.unwrap();
    assert_eq!(overview.progress.total_sessions, 3);
    assert_eq!(overview.progress.speed_analysis.get("fast"), 2);
    assert_eq!(overview.analytics.technique_performance["video"].total, 4);
    assert_eq!(api.calls("progress"), 1);
    assert_eq!(api.calls("dashboard_analytics"), 1);
}

#[tokio::test]
async fn either_failure_fails_the_overview() {
    let api = Arc::new(FakeApi::new());
    let app = AppServices::with_api(api.clone(), Storage::in_memory(), Clock::system()).await;

    api.fail_next("progress", 1);
    assert!(app.progress().performance_overview().await.is_err());

    api.fail_next("dashboard_analytics", 1);
    assert!(app.progress().performance_overview().await.is_err());

    assert!(app.progress().performance_overview().await.is_ok());
}

#[tokio::test]
async fn session_record_is_fetched_by_id() {
    let api = Arc::new(FakeApi::new());
    let app = AppServices::with_api(api.clone(), Storage::in_memory(), Clock::system()).await;

    let record = app.progress().session_record("abc").await.unwrap();
    assert_eq!(record.id, "abc");
    assert_eq!(api.calls("session"), 1);
}

#[tokio::test]
async fn rejected_token_signs_the_user_out() {
    let backing = InMemoryStorage::new();
    let api = Arc::new(FakeApi::new());
    let storage = Storage {
        client_state: Arc::new(backing.clone()),
    };
    let app = AppServices::with_api(api.clone(), storage, Clock::system()).await;
    let form = LoginForm {
        email: "ada@example.com".into(),
        password: "secret".into(),
    };
    app.auth().login(&form).await.unwrap();

    api.token_expired.store(true, Ordering::SeqCst);
    let err = app.progress().progress().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!app.session().is_authenticated());
    assert!(backing.is_empty());
}

#[tokio::test]
async fn other_failures_keep_the_session() {
    let api = Arc::new(FakeApi::new());
    let app = AppServices::with_api(api.clone(), Storage::in_memory(), Clock::system()).await;
    let form = LoginForm {
        email: "ada@example.com".into(),
        password: "secret".into(),
    };
    app.auth().login(&form).await.unwrap();

    api.fail_next("session", 1);
    let err = app.progress().session_record("abc").await.unwrap_err();
    assert!(!err.is_unauthorized());
    assert!(app.session().is_authenticated());
}
