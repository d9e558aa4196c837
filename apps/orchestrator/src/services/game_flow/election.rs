//! Drives the sheriff election sub-machine inside the day's `Election` step.

use tracing::info;

use super::day::self_destruct;
use super::decisions::{display, player_options, target_of};
use super::steps::{ensure_turns, pass_turn};
use super::{GameFlow, StepProgress};
use crate::domain::decision::{
    ActionOption, Choice, DecisionKind, PendingAction, Reply, EXPLODE_ID, RUN_ID, STAY_ID,
    WITHDRAW_ID,
};
use crate::domain::election::{ElectionOutcome, ElectionStage, ForfeitReason};
use crate::domain::roster::PlayerId;
use crate::domain::state::GameState;
use crate::errors::domain::{GameError, RuleViolation};

pub(super) async fn run(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    if !state.sheriff.is_due(state.day) {
        return Ok(StepProgress::Complete);
    }
    match state.sheriff.stage() {
        ElectionStage::NotStarted => {
            state.sheriff.open_signup();
            state.turns = None;
            state.announce("The sheriff election begins. Who will run?");
            info!(day = state.day, "sheriff election opened");
            Ok(StepProgress::Continue)
        }
        ElectionStage::Signup => signup(flow, state).await,
        ElectionStage::Speech => speeches(flow, state).await,
        ElectionStage::Vote { round } => ballot(flow, state, round).await,
        ElectionStage::Decided | ElectionStage::Forfeited => Ok(StepProgress::Complete),
    }
}

async fn signup(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| s.roster.living_ids());
    if let Some(actor) = state.current_actor() {
        let role = state.roster.require(actor)?.role;
        if state.config.must_run(role) {
            state.sheriff.record_signup(actor);
            let line = format!("{} runs for sheriff.", display(state, actor));
            state.announce(line);
            pass_turn(state);
            return Ok(StepProgress::Continue);
        }
        let request = PendingAction::new(DecisionKind::SheriffSignup, actor, "Run for sheriff?")
            .with_options(vec![ActionOption::new(RUN_ID, "Run for sheriff")])
            .abstainable();
        return flow.take_turn(state, request).await;
    }
    let outcome = state.sheriff.close_signup();
    narrate(state, outcome);
    Ok(StepProgress::Continue)
}

pub(super) fn apply_signup(state: &mut GameState, actor: PlayerId, choice: &Choice) {
    if choice.is(RUN_ID) {
        state.sheriff.record_signup(actor);
        let line = format!("{} runs for sheriff.", display(state, actor));
        state.announce(line);
    }
}

async fn speeches(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| s.sheriff.candidates().to_vec());
    if let Some(candidate) = state.current_actor() {
        if !state.roster.is_alive(candidate) {
            pass_turn(state);
            return Ok(StepProgress::Continue);
        }
        let role = state.roster.require(candidate)?.role;
        let mut options = vec![ActionOption::new(STAY_ID, "Stay in the race")];
        if !state.config.must_run(role) {
            options.push(ActionOption::new(WITHDRAW_ID, "Withdraw"));
        }
        if role.is_wolf() {
            options.push(ActionOption::new(EXPLODE_ID, "Self-destruct and end the day"));
        }
        let request = PendingAction::new(
            DecisionKind::SheriffSpeech,
            candidate,
            "Give your campaign speech, then stay or withdraw.",
        )
        .with_options(options)
        .abstainable()
        .with_free_text();
        return flow.take_turn(state, request).await;
    }
    let outcome = state.sheriff.close_speeches(&state.roster);
    narrate(state, outcome);
    Ok(StepProgress::Continue)
}

pub(super) fn apply_speech(state: &mut GameState, candidate: PlayerId, reply: Reply) -> Result<(), GameError> {
    if reply.choice.is(EXPLODE_ID) {
        return self_destruct(state, candidate, reply.text);
    }
    let who = display(state, candidate);
    if let Some(text) = &reply.text {
        state.announce(format!("{who} (candidate): {text}"));
    }
    if reply.choice.is(WITHDRAW_ID) {
        let role = state.roster.require(candidate)?.role;
        if state.config.must_run(role) {
            return Err(GameError::rule(
                RuleViolation::AbilityUsed,
                format!("{who} may not withdraw"),
            ));
        }
        state.sheriff.withdraw(candidate);
        state.announce(format!("{who} withdraws from the race."));
    }
    Ok(())
}

async fn ballot(flow: &GameFlow, state: &mut GameState, round: u8) -> Result<StepProgress, GameError> {
    if state.turns.is_none() {
        let voters = state.sheriff.eligible_voters(&state.roster);
        if voters.is_empty() {
            let outcome = state.sheriff.forfeit(ForfeitReason::NoVoters);
            narrate(state, outcome);
            return Ok(StepProgress::Continue);
        }
        let contest = names(state, state.sheriff.contest());
        state.announce(format!("Sheriff vote, round {round}: {contest}."));
    }
    ensure_turns(state, |s| s.sheriff.eligible_voters(&s.roster));
    if let Some(voter) = state.current_actor() {
        let contest = state.sheriff.contest().to_vec();
        let request = PendingAction::new(DecisionKind::SheriffVote, voter, "Vote for a sheriff.")
            .with_options(player_options(&state.roster, &contest));
        return flow.take_turn(state, request).await;
    }

    let ballots = state
        .sheriff
        .ballots()
        .iter()
        .map(|(&v, &t)| format!("{}->{}", display(state, v), display(state, t)))
        .collect::<Vec<_>>()
        .join(", ");
    if !ballots.is_empty() {
        state.announce(format!("Sheriff ballots: {ballots}."));
    }
    let outcome = state.sheriff.close_round();
    narrate(state, outcome);
    Ok(StepProgress::Continue)
}

pub(super) fn apply_vote(state: &mut GameState, voter: PlayerId, choice: &Choice) -> Result<(), GameError> {
    let target = target_of(choice)?;
    if !state.sheriff.contest().contains(&target) || !state.roster.is_alive(target) {
        return Err(GameError::rule(
            RuleViolation::TargetNotAlive,
            format!("{} is not on the ballot", display(state, target)),
        ));
    }
    state.sheriff.record_ballot(voter, target);
    Ok(())
}

fn names(state: &GameState, ids: &[PlayerId]) -> String {
    ids.iter()
        .map(|&id| display(state, id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Announce a stage transition; each new stage starts with a fresh turn queue.
fn narrate(state: &mut GameState, outcome: ElectionOutcome) {
    state.turns = None;
    let line = match outcome {
        ElectionOutcome::Advanced(ElectionStage::Speech) => format!(
            "Candidates: {}. Each may speak, then stay or withdraw.",
            names(state, state.sheriff.candidates())
        ),
        ElectionOutcome::Advanced(_) => return,
        ElectionOutcome::Elected { sheriff, unopposed } => {
            info!(day = state.day, sheriff, unopposed, "sheriff elected");
            if unopposed {
                format!("{} is elected sheriff unopposed.", display(state, sheriff))
            } else {
                format!("{} is elected sheriff.", display(state, sheriff))
            }
        }
        ElectionOutcome::Runoff(tied) => format!(
            "A tie between {}. A second round follows.",
            names(state, &tied)
        ),
        ElectionOutcome::Forfeited(reason) => {
            info!(day = state.day, ?reason, "sheriff badge forfeited");
            format!("The sheriff badge is forfeited: {}.", reason.describe())
        }
    };
    state.announce(line);
}
