use tracing::{debug, info};

use super::decisions::apply_decision;
use super::{AdvanceOutcome, GameFlow};
use crate::domain::decision::{normalize_text, Reply};
use crate::domain::roster::player_tag;
use crate::domain::state::GameState;
use crate::errors::domain::{GameError, SubmissionErrorKind};

impl GameFlow {
    /// Answer the human's pending action, then keep the game moving.
    ///
    /// `action_id` must be one of the offered option ids (case-insensitive),
    /// `skip` included when abstaining is allowed. Text is trimmed and capped;
    /// blank text counts as none. A rejected submission leaves the pending
    /// action in place.
    pub async fn submit(
        &self,
        state: &mut GameState,
        action_id: &str,
        text: Option<&str>,
    ) -> Result<AdvanceOutcome, GameError> {
        if state.is_over() {
            return Err(GameError::GameOver);
        }
        let request = state.pending_action.clone().ok_or_else(|| {
            GameError::submission(SubmissionErrorKind::NoPendingAction, "nothing is awaiting an answer")
        })?;
        let choice = request.accept(action_id.trim()).ok_or_else(|| {
            GameError::submission(
                SubmissionErrorKind::UnknownAction,
                format!("'{}' is not one of the offered actions", action_id.trim()),
            )
        })?;
        let text = normalize_text(text, state.config.max_text_len);
        if text.is_some() && !request.allow_free_text {
            return Err(GameError::submission(
                SubmissionErrorKind::TextNotAllowed,
                format!("{} does not take free text", request.kind.as_str()),
            ));
        }

        debug!(
            day = state.day,
            actor = %player_tag(request.actor),
            kind = request.kind.as_str(),
            ?choice,
            "human submission"
        );
        apply_decision(state, &request, Reply { choice, text })?;
        state.pending_action = None;
        info!(day = state.day, kind = request.kind.as_str(), "human answered");

        self.advance(state).await
    }
}
