use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use brainpath_core::model::{
    AnswerSubmission, AssessmentSessionId, AuthSession, ContentPayload, DashboardAnalytics,
    Evaluation, FlowId, LearningContent, LoginRequest, ProgressSummary, Question, QuestionId,
    QuestionKind, SessionRecord, SignupRequest, Technique, Topic,
};
use brainpath_core::time::fixed_clock;
use services::api::{
    BrainPathApi, CreateSessionRequest, GenerateContentRequest, GenerateQuestionsRequest,
};
use services::{ApiError, AppServices, AssessmentHandoff};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::assessment::{AssessmentTestHandles, ResultsActions, ResultsSummary};
use crate::views::{AssessmentView, DashboardView, LearningView, PerformanceView, ToastHost, Toasts};
use crate::vm::ResultsVm;

/// Backend double that records every call. Endpoints a test doesn't need fail.
#[derive(Default)]
pub struct StubApi {
    pub log: Mutex<Vec<&'static str>>,
    pub progress: Mutex<ProgressSummary>,
    pub analytics_down: AtomicBool,
    /// `progress` answers 401 while set.
    pub token_expired: AtomicBool,
    /// Verdicts handed out by `evaluate_answer`, in order. Empty means the request fails.
    pub verdicts: Mutex<VecDeque<Evaluation>>,
}

impl StubApi {
    pub fn calls(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str) {
        self.log.lock().unwrap().push(endpoint);
    }
}

fn unavailable(endpoint: &str) -> ApiError {
    ApiError::Decode(format!("{endpoint} is not scripted"))
}

#[async_trait]
impl BrainPathApi for StubApi {
    async fn login(&self, _request: &LoginRequest) -> Result<AuthSession, ApiError> {
        self.record("login");
        Err(unavailable("login"))
    }

    async fn signup(&self, _request: &SignupRequest) -> Result<AuthSession, ApiError> {
        self.record("signup");
        Err(unavailable("signup"))
    }

    async fn progress(&self) -> Result<ProgressSummary, ApiError> {
        self.record("progress");
        if self.token_expired.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                detail: Some("Could not validate credentials".into()),
            });
        }
        Ok(self.progress.lock().unwrap().clone())
    }

    async fn generate_content(
        &self,
        _request: &GenerateContentRequest,
    ) -> Result<ContentPayload, ApiError> {
        self.record("generate_content");
        Ok(ContentPayload::Text(
            "# Cells\n\nCells are the **basic unit** of life.".into(),
        ))
    }

    async fn generate_questions(
        &self,
        _request: &GenerateQuestionsRequest,
    ) -> Result<Vec<Question>, ApiError> {
        self.record("generate_questions");
        Err(unavailable("generate_questions"))
    }

    async fn create_session(
        &self,
        _request: &CreateSessionRequest,
    ) -> Result<AssessmentSessionId, ApiError> {
        self.record("create_session");
        Err(unavailable("create_session"))
    }

    async fn evaluate_answer(
        &self,
        _submission: &AnswerSubmission,
    ) -> Result<Evaluation, ApiError> {
        self.record("evaluate_answer");
        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unavailable("evaluate_answer"))
    }

    async fn session(&self, _id: &str) -> Result<SessionRecord, ApiError> {
        self.record("session");
        Err(unavailable("session"))
    }

    async fn dashboard_analytics(&self) -> Result<DashboardAnalytics, ApiError> {
        self.record("dashboard_analytics");
        if self.analytics_down.load(Ordering::SeqCst) {
            return Err(unavailable("dashboard_analytics"));
        }
        Ok(DashboardAnalytics::default())
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Dashboard,
    Learn(String),
    Performance,
    Assessment(String),
    Results {
        vm: ResultsVm,
        topic: Topic,
        technique: Technique,
    },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    assessment_handles: Option<AssessmentTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(Toasts::new);
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.assessment_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! {
        Router::<TestRoute> {}
        ToastHost {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/:..segments")]
    Elsewhere { segments: Vec<String> },
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Learn(flow) => rsx! { LearningView { flow } },
        ViewKind::Performance => rsx! { PerformanceView {} },
        ViewKind::Assessment(flow) => rsx! { AssessmentView { flow } },
        ViewKind::Results {
            vm,
            topic,
            technique,
        } => {
            let passed = vm.passed;
            rsx! {
                ResultsSummary { vm }
                ResultsActions { topic, technique, passed }
            }
        }
    }
}

/// Where a redirect landed; the real routes don't exist under the test router.
#[component]
fn Elsewhere(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        p { class: "navigated", "navigated to /{path}" }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: Arc<StubApi>,
    pub app: Arc<AppServices>,
    pub assessment_handles: Option<AssessmentTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let spawned resources and effects run to completion.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Type `text` into the current question and press submit.
    pub async fn answer_and_submit(&mut self, text: &str) {
        let handles = self
            .assessment_handles
            .clone()
            .expect("assessment view mounted");
        let text = text.to_string();
        self.dom.in_runtime(|| handles.answer().call(text));
        drive_dom(&mut self.dom);
        self.dom.in_runtime(|| handles.submit().call(()));
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn test_services(api: &Arc<StubApi>) -> Arc<AppServices> {
    let api: Arc<dyn BrainPathApi> = Arc::clone(api) as Arc<dyn BrainPathApi>;
    Arc::new(AppServices::with_api(api, Storage::in_memory(), fixed_clock()).await)
}

pub fn mount(api: Arc<StubApi>, app: Arc<AppServices>, view: ViewKind) -> ViewHarness {
    let assessment_handles = match view {
        ViewKind::Assessment(_) => Some(AssessmentTestHandles::default()),
        _ => None,
    };
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
            assessment_handles: assessment_handles.clone(),
        },
    );
    ViewHarness {
        dom,
        api,
        app,
        assessment_handles,
    }
}

/// A flow that has already reached the assessment stage with `count` short questions.
pub fn seed_assessment(app: &AppServices, count: usize) -> FlowId {
    let flow = app
        .flows()
        .start(Topic::parse("Cells").unwrap(), Technique::Passage);
    let questions = (1..=count)
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
    app.flows().update(flow, |found| {
        found.content = Some(LearningContent::Passage("Cells are small.".into()));
        found.assessment = Some(AssessmentHandoff {
            session_id: AssessmentSessionId::new("s1"),
            questions,
        });
    });
    flow
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(StubApi::default(), view).await
}

pub async fn setup_view_harness_with(api: StubApi, view: ViewKind) -> ViewHarness {
    let api = Arc::new(api);
    let app = test_services(&api).await;
    mount(api, app, view)
}
