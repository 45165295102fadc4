#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tokio::time::Instant;

use brainpath_core::model::{
    AssessmentError, AssessmentPhase, AssessmentSession, FlowId, Technique, Topic,
};

use crate::context::AppContext;
use crate::routes::{RedirectTo, Route};
use crate::views::Toasts;
use crate::vm::{FeedbackVm, QuestionVm, ResultRowVm, ResultsVm};

const TIMER_TICK: Duration = Duration::from_millis(100);

#[component]
pub fn AssessmentView(flow: String) -> Element {
    let ctx = use_context::<AppContext>();
    match ctx
        .flows()
        .resolve(Some(&flow))
        .filter(|found| found.assessment.is_some())
    {
        Some(found) => rsx! {
            AssessmentPage {
                key: "{found.id}",
                flow_id: found.id,
                topic: found.topic,
                technique: found.technique,
            }
        },
        None => {
            tracing::debug!(flow = %flow, "assessment opened without a prepared flow");
            rsx! { RedirectTo { to: Route::Dashboard {} } }
        }
    }
}

#[component]
fn AssessmentPage(flow_id: FlowId, topic: Topic, technique: Technique) -> Element {
    let ctx = use_context::<AppContext>();
    let toasts = use_context::<Toasts>();
    let service = ctx.assessment();
    let policy = service.policy();

    let mut session = use_signal({
        let service = service.clone();
        move || service.start(flow_id).ok()
    });

    use_future(move || async move {
        let mut last = Instant::now();
        loop {
            tokio::time::sleep(TIMER_TICK).await;
            let now = Instant::now();
            let delta = now - last;
            last = now;
            let answering = session
                .peek()
                .as_ref()
                .is_some_and(|current| matches!(current.phase(), AssessmentPhase::Answering(_)));
            if answering && let Some(current) = session.write().as_mut() {
                current.tick(delta);
            }
        }
    });

    let on_answer = use_callback(move |value: String| {
        if let Some(current) = session.write().as_mut() {
            current.set_answer(value);
        }
    });

    let on_submit = use_callback(move |()| {
        let begun = session.write().as_mut().map(AssessmentSession::begin_submit);
        let submission = match begun {
            None => return,
            Some(Ok(submission)) => submission,
            Some(Err(AssessmentError::EmptyAnswer)) => {
                toasts.error(AssessmentError::EmptyAnswer.to_string());
                return;
            }
            Some(Err(err)) => {
                tracing::debug!(error = %err, "submit ignored");
                return;
            }
        };

        let service = service.clone();
        spawn(async move {
            match service.evaluate(&submission).await {
                Ok(evaluation) => {
                    let recorded = session.write().as_mut().map(|current| {
                        service.record(flow_id, current, &submission, evaluation)
                    });
                    match recorded {
                        Some(Ok(outcome)) => {
                            let feedback = FeedbackVm::from_record(&outcome.record);
                            if feedback.correct {
                                toasts.success(feedback.message);
                            } else {
                                toasts.error(feedback.message);
                            }
                        }
                        Some(Err(err)) => {
                            tracing::warn!(flow = %flow_id, error = %err, "evaluation arrived out of phase");
                        }
                        None => {}
                    }
                }
                Err(err) => {
                    if let Some(current) = session.write().as_mut() {
                        current.abort_submit();
                    }
                    toasts.error(err.user_message());
                }
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AssessmentTestHandles>() {
                handles.register(on_answer, on_submit);
            }
        }
    }

    let Some(current) = session.read().clone() else {
        return rsx! { RedirectTo { to: Route::Dashboard {} } };
    };

    if let Some(results) = ResultsVm::from_session(&current, policy) {
        let passed = results.passed;
        return rsx! {
            div { class: "page assessment",
                ResultsSummary { vm: results }
                ResultsActions { topic, technique, passed }
            }
        };
    }

    let Some(question) = QuestionVm::from_session(&current) else {
        return rsx! { RedirectTo { to: Route::Dashboard {} } };
    };

    rsx! {
        div { class: "page assessment",
            header { class: "page-header",
                h2 { "{topic.as_str()}" }
                span { class: "badge", "{technique.label()}" }
            }
            QuestionCard { question, on_answer, on_submit }
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    on_answer: Callback<String>,
    on_submit: Callback<()>,
) -> Element {
    let submitting = question.submitting;
    rsx! {
        section { class: "card question",
            div { class: "question-meta",
                span { class: "question-position", "{question.position}" }
                span { class: question.timer_class, "{question.timer_label}" }
                span { class: "timer-target", "{question.target_label}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {question.progress_width}%" }
            }
            p { class: "question-text", "{question.text}" }
            match question.options {
                Some(options) => rsx! {
                    div { class: "options",
                        for option in options {
                            button {
                                class: if option.selected { "option option--selected" } else { "option" },
                                r#type: "button",
                                disabled: submitting,
                                onclick: {
                                    let text = option.text.clone();
                                    move |_| on_answer.call(text.clone())
                                },
                                "{option.text}"
                            }
                        }
                    }
                },
                None => rsx! {
                    textarea {
                        class: "answer-input",
                        placeholder: "Type your answer",
                        value: "{question.answer}",
                        disabled: submitting,
                        oninput: move |evt| on_answer.call(evt.value()),
                    }
                },
            }
            button {
                class: "button button--primary",
                r#type: "button",
                disabled: !question.can_submit,
                onclick: move |_| on_submit.call(()),
                if submitting { "Checking..." } else { "Submit answer" }
            }
        }
    }
}

/// Score, verdict and per-question breakdown of a finished assessment.
#[component]
pub(crate) fn ResultsSummary(vm: ResultsVm) -> Element {
    let verdict = if vm.passed { "results results--passed" } else { "results results--failed" };
    rsx! {
        section { class: verdict,
            h2 { "{vm.headline}" }
            p { class: "results-score", "Score: {vm.score_label}" }
            p { class: "results-message", "{vm.message}" }
            ol { class: "results-rows",
                for row in vm.rows {
                    ResultRow { key: "{row.number}", row }
                }
            }
        }
    }
}

#[component]
pub(crate) fn ResultRow(row: ResultRowVm) -> Element {
    let mark = if row.correct { "Correct" } else { "Incorrect" };
    rsx! {
        li { class: if row.correct { "result result--correct" } else { "result result--incorrect" },
            div { class: "result-header",
                span { class: "result-mark", "{mark}" }
                span { class: "result-time", "{row.time_label}" }
                if let Some(speed) = row.speed {
                    span { class: "result-speed", "{speed}" }
                }
            }
            p { class: "result-answer", "Your answer: {row.answer}" }
            if !row.feedback.is_empty() {
                p { class: "result-feedback", "{row.feedback}" }
            }
        }
    }
}

/// Follow-up actions under the results. A failed attempt offers a fresh flow on the same topic.
#[component]
pub(crate) fn ResultsActions(topic: Topic, technique: Technique, passed: bool) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let flows = ctx.flows();

    let retry = move |_| {
        let id = flows.start(topic.clone(), technique);
        let _ = navigator.push(Route::Learn {
            flow: id.to_string(),
        });
    };

    rsx! {
        div { class: "results-actions",
            if !passed {
                button {
                    class: "button button--primary",
                    r#type: "button",
                    onclick: retry,
                    "Try again"
                }
            }
            Link { class: "button", to: Route::Dashboard {}, "Back to dashboard" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AssessmentTestHandles {
    answer: Rc<RefCell<Option<Callback<String>>>>,
    submit: Rc<RefCell<Option<Callback<()>>>>,
}

#[cfg(test)]
impl AssessmentTestHandles {
    pub(crate) fn register(&self, answer: Callback<String>, submit: Callback<()>) {
        *self.answer.borrow_mut() = Some(answer);
        *self.submit.borrow_mut() = Some(submit);
    }

    pub(crate) fn answer(&self) -> Callback<String> {
        (*self.answer.borrow()).expect("assessment answer registered")
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("assessment submit registered")
    }
}
