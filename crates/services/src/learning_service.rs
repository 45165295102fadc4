use std::sync::Arc;

use brainpath_core::model::{FlowId, LearningContent, Question};

use crate::api::{
    BrainPathApi, CreateSessionRequest, DEFAULT_DIFFICULTY, GenerateContentRequest,
    GenerateQuestionsRequest,
};
use crate::error::{LearningError, SagaStep};
use crate::flows::{AssessmentHandoff, FlowRegistry};

/// Content loading and the generate-questions / create-session chain for a flow.
#[derive(Clone)]
pub struct LearningService {
    api: Arc<dyn BrainPathApi>,
    flows: Arc<FlowRegistry>,
}

impl LearningService {
    #[must_use]
    pub fn new(api: Arc<dyn BrainPathApi>, flows: Arc<FlowRegistry>) -> Self {
        Self { api, flows }
    }

    /// Content for the flow's topic and technique, fetched at most once per flow.
    ///
    /// # Errors
    ///
    /// `FlowNotFound` for unknown flows (no request is made), `GenerateContent`
    /// when the backend call fails, `Content` when the payload does not match the
    /// technique.
    pub async fn generate_content(&self, flow_id: FlowId) -> Result<LearningContent, LearningError> {
        let flow = self.flows.get(flow_id).ok_or(LearningError::FlowNotFound)?;
        if let Some(content) = flow.content {
            return Ok(content);
        }

        tracing::debug!(flow = %flow_id, technique = %flow.technique, "generating content");
        let request = GenerateContentRequest {
            topic: flow.topic.as_str().to_string(),
            technique: flow.technique,
        };
        let payload = self
            .api
            .generate_content(&request)
            .await
            .map_err(LearningError::GenerateContent)?;
        let content = LearningContent::from_payload(flow.technique, payload)?;

        self.flows
            .update(flow_id, |flow| flow.content = Some(content.clone()))
            .ok_or(LearningError::FlowNotFound)?;
        Ok(content)
    }

    /// Generate questions, open a backend session and record the handoff.
    ///
    /// Each completed step is stored on the flow, so calling this again after a
    /// failure resumes at the step that failed. Questions already generated are
    /// reused rather than regenerated.
    ///
    /// # Errors
    ///
    /// `ContentNotLoaded` before `generate_content` succeeded, `NoQuestions` for
    /// an empty question set, `Step` naming the request that failed.
    pub async fn start_assessment(
        &self,
        flow_id: FlowId,
    ) -> Result<AssessmentHandoff, LearningError> {
        let flow = self.flows.get(flow_id).ok_or(LearningError::FlowNotFound)?;
        if let Some(handoff) = flow.assessment {
            return Ok(handoff);
        }
        let content = flow.content.ok_or(LearningError::ContentNotLoaded)?;

        let questions = match flow.pending_questions {
            Some(questions) => {
                tracing::debug!(flow = %flow_id, "reusing generated questions");
                questions
            }
            None => {
                let questions = self
                    .generate_questions(flow_id, flow.topic.as_str(), &content)
                    .await?;
                self.flows
                    .update(flow_id, |flow| flow.pending_questions = Some(questions.clone()))
                    .ok_or(LearningError::FlowNotFound)?;
                questions
            }
        };

        let request = CreateSessionRequest {
            topic: flow.topic.as_str().to_string(),
            technique: flow.technique,
            content: content.to_payload(),
            questions: questions.clone(),
        };
        let session_id = self
            .api
            .create_session(&request)
            .await
            .map_err(|source| {
                tracing::warn!(flow = %flow_id, error = %source, "create session failed");
                LearningError::Step {
                    step: SagaStep::CreateSession,
                    source,
                }
            })?;

        let handoff = AssessmentHandoff {
            session_id,
            questions,
        };
        self.flows
            .update(flow_id, |flow| {
                flow.pending_questions = None;
                flow.assessment = Some(handoff.clone());
            })
            .ok_or(LearningError::FlowNotFound)?;
        tracing::info!(flow = %flow_id, session = %handoff.session_id, "assessment session created");
        Ok(handoff)
    }

    async fn generate_questions(
        &self,
        flow_id: FlowId,
        topic: &str,
        content: &LearningContent,
    ) -> Result<Vec<Question>, LearningError> {
        let request = GenerateQuestionsRequest {
            topic: topic.to_string(),
            content: content.question_source(),
            technique: content.technique(),
            difficulty: DEFAULT_DIFFICULTY,
        };
        let questions = self
            .api
            .generate_questions(&request)
            .await
            .map_err(|source| {
                tracing::warn!(flow = %flow_id, error = %source, "generate questions failed");
                LearningError::Step {
                    step: SagaStep::GenerateQuestions,
                    source,
                }
            })?;
        if questions.is_empty() {
            return Err(LearningError::NoQuestions);
        }
        Ok(questions)
    }
}
