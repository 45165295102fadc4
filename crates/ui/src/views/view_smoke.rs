use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::AtomicBool;

use brainpath_core::model::{
    AssessmentSession, AssessmentSessionId, AuthSession, AuthToken, EducationLevel, Evaluation,
    PassPolicy, ProgressSummary, Question, QuestionId, QuestionKind, SessionRecord, SpeedAnalysis,
    StoredQuestion, Technique, Topic, UserProfile,
};

use super::test_harness::{
    StubApi, ViewKind, mount, seed_assessment, setup_view_harness, setup_view_harness_with,
    test_services,
};
use services::GENERIC_ERROR_MESSAGE;
use crate::vm::ResultsVm;

fn finished_session(correct: usize) -> AssessmentSession {
    let questions = (1..=6)
        .map(|i| {
            Question::new(
                QuestionId::new(format!("q{i}")),
                QuestionKind::Short,
                format!("Question {i}"),
                10,
            )
            .unwrap()
        })
        .collect();
    let mut session = AssessmentSession::new(AssessmentSessionId::new("s1"), questions);
    for i in 0..6 {
        session.set_answer(format!("answer {i}"));
        let submission = session.begin_submit().unwrap();
        session
            .complete_submit(
                &submission,
                Evaluation {
                    is_correct: i < correct,
                    feedback: String::new(),
                    speed_score: Some("fast".into()),
                },
            )
            .unwrap();
    }
    session
}

fn results_view(correct: usize) -> ViewKind {
    let vm = ResultsVm::from_session(&finished_session(correct), PassPolicy::default()).unwrap();
    ViewKind::Results {
        vm,
        topic: Topic::parse("Cells").unwrap(),
        technique: Technique::Passage,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_without_sessions_shows_placeholder() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No learning sessions yet"), "missing placeholder in {html}");
    assert!(html.contains("Text Passage"), "missing technique buttons in {html}");
    assert_eq!(harness.api.calls(), vec!["progress"]);
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_progress_and_recent_sessions() {
    let api = StubApi {
        progress: Mutex::new(ProgressSummary {
            accuracy: 75.0,
            completed_sessions: 2,
            total_sessions: 3,
            correct_answers: 9,
            total_questions: 12,
            speed_analysis: SpeedAnalysis::from_pairs([("fast", 4), ("slow", 2)]),
            recent_sessions: vec![SessionRecord {
                id: "s1".into(),
                topic: "Cells".into(),
                technique: "passage".into(),
                questions: vec![StoredQuestion {
                    id: "q1".into(),
                    question: "What is a cell?".into(),
                    kind: "short".into(),
                }],
                responses: Vec::new(),
                score: 1,
                completed: true,
                created_at: None,
            }],
        }),
        ..StubApi::default()
    };
    let mut harness = setup_view_harness_with(api, ViewKind::Dashboard).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("75%"), "missing accuracy in {html}");
    assert!(html.contains("2 of 3 completed"), "missing session count in {html}");
    assert!(html.contains("9 of 12 correct"), "missing question count in {html}");
    assert!(html.contains("Cells"), "missing recent session in {html}");
    assert!(!html.contains("No learning sessions yet"));
}

#[tokio::test(flavor = "current_thread")]
async fn learning_without_known_flow_redirects_without_requests() {
    let mut harness = setup_view_harness(ViewKind::Learn("not-a-flow".into())).await;
    harness.settle().await;

    let html = harness.render();
    assert!(harness.api.calls().is_empty(), "unexpected calls {:?}", harness.api.calls());
    assert!(!html.contains("Continue to assessment"));
    assert!(
        html.contains("navigated to /dashboard") || html.contains("Redirecting"),
        "no redirect in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn learning_renders_sanitised_passage_once() {
    let api = Arc::new(StubApi::default());
    let app = test_services(&api).await;
    let flow = app
        .flows()
        .start(Topic::parse("Cells").unwrap(), Technique::Passage);

    let mut harness = mount(api, app, ViewKind::Learn(flow.to_string()));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("<strong>basic unit</strong>"), "missing passage in {html}");
    assert!(html.contains("Continue to assessment"), "missing continue in {html}");
    assert_eq!(harness.api.calls(), vec!["generate_content"]);
    assert!(harness.app.flows().get(flow).unwrap().content.is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn four_of_six_passes_without_retry() {
    let mut harness = setup_view_harness(results_view(4)).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Score: 4/6"), "missing score in {html}");
    assert!(html.contains("Great work!"), "missing pass headline in {html}");
    assert!(!html.contains("Try again"));
}

#[tokio::test(flavor = "current_thread")]
async fn three_of_six_offers_retry() {
    let mut harness = setup_view_harness(results_view(3)).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Score: 3/6"), "missing score in {html}");
    assert!(html.contains("Keep practicing"), "missing fail headline in {html}");
    assert!(html.contains("Try again"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn performance_falls_back_to_placeholder_when_analytics_fail() {
    let api = StubApi {
        analytics_down: AtomicBool::new(true),
        ..StubApi::default()
    };
    let mut harness = setup_view_harness_with(api, ViewKind::Performance).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No performance data yet"), "missing placeholder in {html}");
}

fn verdict(is_correct: bool, feedback: &str) -> Evaluation {
    Evaluation {
        is_correct,
        feedback: feedback.into(),
        speed_score: Some("optimal".into()),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_toasts_each_verdict_and_forgets_the_flow() {
    let mut verdicts: VecDeque<Evaluation> = (0..4)
        .map(|_| verdict(true, ""))
        .chain([verdict(false, "Cells divide by mitosis."), verdict(false, "")])
        .collect();
    verdicts[0].feedback = "Spot on.".into();
    let api = Arc::new(StubApi {
        verdicts: Mutex::new(verdicts),
        ..StubApi::default()
    });
    let app = test_services(&api).await;
    let flow = seed_assessment(&app, 6);

    let mut harness = mount(api, app, ViewKind::Assessment(flow.to_string()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 6"), "missing first question in {html}");

    harness.answer_and_submit("answer 1").await;
    let html = harness.render();
    assert!(html.contains("toast toast--success"), "missing success toast in {html}");
    assert!(html.contains("Spot on."), "missing feedback in {html}");
    assert!(html.contains("Question 2 of 6"), "did not advance in {html}");
    assert!(harness.app.flows().get(flow).is_some());

    for i in 2..=6 {
        harness.answer_and_submit(&format!("answer {i}")).await;
    }

    let html = harness.render();
    assert!(html.contains("Correct!"), "missing fallback feedback in {html}");
    assert!(html.contains("Cells divide by mitosis."), "missing feedback in {html}");
    assert!(html.contains("toast toast--error"), "missing error toast in {html}");
    assert!(html.contains("Score: 4/6"), "missing score in {html}");
    assert!(!html.contains("Try again"));
    assert_eq!(
        harness
            .api
            .calls()
            .iter()
            .filter(|call| **call == "evaluate_answer")
            .count(),
        6
    );
    assert!(harness.app.flows().get(flow).is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_rejects_blank_answer_without_a_request() {
    let api = Arc::new(StubApi::default());
    let app = test_services(&api).await;
    let flow = seed_assessment(&app, 6);

    let mut harness = mount(api, app, ViewKind::Assessment(flow.to_string()));
    harness.settle().await;
    harness.answer_and_submit("   ").await;

    let html = harness.render();
    assert!(html.contains("please enter an answer"), "missing toast in {html}");
    assert!(html.contains("Question 1 of 6"), "question changed in {html}");
    assert!(harness.api.calls().is_empty(), "unexpected calls {:?}", harness.api.calls());
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_keeps_the_question_when_evaluation_fails() {
    let api = Arc::new(StubApi::default());
    let app = test_services(&api).await;
    let flow = seed_assessment(&app, 6);

    let mut harness = mount(api, app, ViewKind::Assessment(flow.to_string()));
    harness.settle().await;
    harness.answer_and_submit("mitosis").await;

    let html = harness.render();
    assert!(html.contains(GENERIC_ERROR_MESSAGE), "missing error toast in {html}");
    assert!(html.contains("Question 1 of 6"), "question changed in {html}");
    assert!(html.contains("Submit answer"), "still submitting in {html}");
    assert_eq!(harness.api.calls(), vec!["evaluate_answer"]);
    assert!(harness.app.flows().get(flow).is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_with_rejected_token_returns_to_sign_in() {
    let api = Arc::new(StubApi {
        token_expired: AtomicBool::new(true),
        ..StubApi::default()
    });
    let app = test_services(&api).await;
    app.session()
        .set_session(AuthSession::new(
            AuthToken::new("stale"),
            UserProfile {
                id: None,
                email: "ada@example.com".into(),
                education_level: EducationLevel::College,
                sub_level: None,
                board: None,
                created_at: None,
            },
        ))
        .await
        .unwrap();

    let mut harness = mount(api, app, ViewKind::Dashboard);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("navigated to /auth") || html.contains("Redirecting"),
        "no redirect in {html}"
    );
    assert!(!html.contains("Could not validate credentials"));
    assert!(!harness.app.session().is_authenticated());
}
