//! Deferred retaliation, resolved after night settlement and after last words.

use tracing::info;

use super::decisions::{display, player_options, target_of};
use super::steps::{ensure_turns, pass_turn};
use super::{GameFlow, StepProgress};
use crate::domain::abilities;
use crate::domain::decision::{Choice, DecisionKind, PendingAction};
use crate::domain::roster::PlayerId;
use crate::domain::state::GameState;
use crate::domain::victory;
use crate::errors::domain::GameError;

pub(super) async fn resolve(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| s.roster.pending_retaliators());
    if let Some(hunter) = state.current_actor() {
        let candidates = abilities::retaliation_candidates(&state.roster, hunter);
        if candidates.is_empty() {
            state.roster.clear_retaliation(hunter)?;
            pass_turn(state);
            return Ok(StepProgress::Continue);
        }
        let request = PendingAction::new(
            DecisionKind::Retaliation,
            hunter,
            "You have fallen. Take someone down with you?",
        )
        .with_options(player_options(&state.roster, &candidates))
        .abstainable();
        return flow.take_turn(state, request).await;
    }

    if let Some(winner) = victory::evaluate(&state.roster) {
        state.end_game(winner);
        return Ok(StepProgress::Ended);
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply(state: &mut GameState, hunter: PlayerId, choice: &Choice) -> Result<(), GameError> {
    if *choice == Choice::Abstain {
        state.roster.clear_retaliation(hunter)?;
        let line = format!("{} lowers the gun and takes no one along.", display(state, hunter));
        state.announce(line);
        return Ok(());
    }
    let target = target_of(choice)?;
    abilities::apply_retaliation(&mut state.roster, hunter, target, state.day)?;
    let role = state.roster.require(target)?.role;
    let line = format!(
        "{} fires a parting shot. {} falls. They were {}.",
        display(state, hunter),
        display(state, target),
        role.with_article()
    );
    state.announce(line);
    info!(day = state.day, hunter, target, "retaliation");
    Ok(())
}
