use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use brainpath_core::Clock;
use brainpath_core::model::{
    AssessmentSessionId, FlowId, LearningContent, Question, Technique, Topic,
};

/// Everything the assessment page needs once the backend session exists.
#[derive(Clone, Debug, PartialEq)]
pub struct AssessmentHandoff {
    pub session_id: AssessmentSessionId,
    pub questions: Vec<Question>,
}

/// One topic + technique attempt, from technique choice to assessment results.
#[derive(Clone, Debug, PartialEq)]
pub struct LearningFlow {
    pub id: FlowId,
    pub topic: Topic,
    pub technique: Technique,
    pub created_at: DateTime<Utc>,
    pub content: Option<LearningContent>,
    /// Questions generated but not yet attached to a backend session.
    pub pending_questions: Option<Vec<Question>>,
    pub assessment: Option<AssessmentHandoff>,
}

/// In-process map of live flows. Routes carry only the `FlowId`.
pub struct FlowRegistry {
    clock: Clock,
    flows: Mutex<HashMap<FlowId, LearningFlow>>,
}

impl FlowRegistry {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            flows: Mutex::new(HashMap::new()),
        }
    }

    pub fn start(&self, topic: Topic, technique: Technique) -> FlowId {
        let id = FlowId::generate();
        let flow = LearningFlow {
            id,
            topic,
            technique,
            created_at: self.clock.now(),
            content: None,
            pending_questions: None,
            assessment: None,
        };
        tracing::debug!(flow = %id, technique = %technique, "flow started");
        self.lock().insert(id, flow);
        id
    }

    #[must_use]
    pub fn get(&self, id: FlowId) -> Option<LearningFlow> {
        self.lock().get(&id).cloned()
    }

    /// Look a flow up from an untrusted route parameter.
    #[must_use]
    pub fn resolve(&self, raw: Option<&str>) -> Option<LearningFlow> {
        let id = raw?.trim().parse::<FlowId>().ok()?;
        self.get(id)
    }

    /// Mutate a flow in place; `None` if it no longer exists.
    pub fn update<R>(&self, id: FlowId, f: impl FnOnce(&mut LearningFlow) -> R) -> Option<R> {
        self.lock().get_mut(&id).map(f)
    }

    pub fn remove(&self, id: FlowId) -> Option<LearningFlow> {
        let removed = self.lock().remove(&id);
        if removed.is_some() {
            tracing::debug!(flow = %id, "flow removed");
        }
        removed
    }

    /// Drop flows created more than `max_age` ago. Returns how many were removed.
    pub fn prune_older_than(&self, max_age: Duration) -> usize {
        let mut flows = self.lock();
        let before = flows.len();
        flows.retain(|_, flow| self.clock.since(flow.created_at) <= max_age);
        before - flows.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<FlowId, LearningFlow>> {
        self.flows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for FlowRegistry {
    fn default() -> Self {
        Self::new(Clock::system())
    }
}
