use std::sync::Arc;

use brainpath_core::model::{
    AnswerSubmission, AssessmentSession, Evaluation, FlowId, PassPolicy, SubmitOutcome,
};

use crate::api::BrainPathApi;
use crate::error::{AssessmentServiceError, LearningError};
use crate::flows::FlowRegistry;

/// Drives an `AssessmentSession` against `evaluate-answer`.
#[derive(Clone)]
pub struct AssessmentService {
    api: Arc<dyn BrainPathApi>,
    flows: Arc<FlowRegistry>,
    policy: PassPolicy,
}

impl AssessmentService {
    #[must_use]
    pub fn new(api: Arc<dyn BrainPathApi>, flows: Arc<FlowRegistry>, policy: PassPolicy) -> Self {
        Self { api, flows, policy }
    }

    #[must_use]
    pub fn policy(&self) -> PassPolicy {
        self.policy
    }

    /// Build the client-side session from a flow's assessment handoff.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::FlowNotFound` if the flow is unknown or has not
    /// reached the assessment stage.
    pub fn start(&self, flow_id: FlowId) -> Result<AssessmentSession, LearningError> {
        let handoff = self
            .flows
            .get(flow_id)
            .and_then(|flow| flow.assessment)
            .ok_or(LearningError::FlowNotFound)?;
        Ok(AssessmentSession::new(handoff.session_id, handoff.questions))
    }

    /// Send one answer. Does not touch session state.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Api` when the request fails.
    pub async fn evaluate(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<Evaluation, AssessmentServiceError> {
        tracing::debug!(question = %submission.question_id, "submitting answer");
        let evaluation = self.api.evaluate_answer(submission).await?;
        Ok(evaluation)
    }

    /// Apply a verdict to the session that produced `submission`. The flow is
    /// forgotten as soon as the last answer has been evaluated.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotSubmitting` when the session is no longer
    /// waiting for this verdict.
    pub fn record(
        &self,
        flow_id: FlowId,
        session: &mut AssessmentSession,
        submission: &AnswerSubmission,
        evaluation: Evaluation,
    ) -> Result<SubmitOutcome, AssessmentServiceError> {
        let outcome = session.complete_submit(submission, evaluation)?;
        if outcome.completed {
            tracing::info!(flow = %flow_id, score = session.score(), "assessment completed");
            self.finish(flow_id);
        }
        Ok(outcome)
    }

    /// Forget the flow; its assessment can no longer be started.
    pub fn finish(&self, flow_id: FlowId) {
        self.flows.remove(flow_id);
    }
}
