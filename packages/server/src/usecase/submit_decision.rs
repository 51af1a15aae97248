//! UseCase: decision submission.

use std::sync::Arc;

use quorum_shared::time::now_millis;

use crate::domain::{
    DecisionText, MessagePusher, SessionError, SessionRepository, SubmitOutcome, Timestamp, UserId,
};

/// Records the caller's decision in their current room. A resubmission
/// replaces the earlier one.
pub struct SubmitDecisionUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SubmitDecisionUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        user_id: UserId,
        raw_decision: &str,
    ) -> Result<SubmitOutcome, SessionError> {
        let text = DecisionText::new(raw_decision)?;
        let submitted_at = Timestamp::new(now_millis());
        self.repository
            .submit_decision(user_id, text, submitted_at)
            .await
    }

    /// Fan the refreshed decision list out to the whole room, submitter
    /// included.
    pub async fn broadcast_decisions(&self, targets: Vec<UserId>, message: &str) {
        self.message_pusher.broadcast(targets, message).await;
    }
}
