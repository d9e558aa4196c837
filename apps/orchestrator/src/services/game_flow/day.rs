//! Day steps: dawn, speaking order, speeches, exile vote, last words.

use tracing::info;

use super::decisions::{display, player_options, target_of};
use super::steps::ensure_turns;
use super::{GameFlow, StepProgress};
use crate::domain::abilities::{self, ExileOutcome};
use crate::domain::decision::{
    ActionOption, Choice, DecisionKind, PendingAction, Reply, DONE_ID, EXPLODE_ID, FORWARD_ID,
    REVERSE_ID, SPEAK_ID,
};
use crate::domain::roles::Role;
use crate::domain::roster::PlayerId;
use crate::domain::speech::{speaking_order, SpeechAnchor};
use crate::domain::state::{GameState, Phase, Step};
use crate::domain::tally::{self, format_votes};
use crate::domain::victory;
use crate::errors::domain::{GameError, RuleViolation};

pub(super) fn daybreak(state: &mut GameState) -> Result<StepProgress, GameError> {
    let line = format!("Day {} begins. Everyone opens their eyes.", state.day);
    state.announce(line);
    info!(day = state.day, "day begins");
    Ok(StepProgress::Complete)
}

/// A living sheriff picks the speaking direction.
pub(super) async fn speech_order(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| {
        s.sheriff.active_sheriff(&s.roster).into_iter().collect()
    });
    if let Some(sheriff) = state.current_actor() {
        let forward = speaking_order(&state.roster, SpeechAnchor::Sheriff { id: sheriff, reverse: false });
        let reverse = speaking_order(&state.roster, SpeechAnchor::Sheriff { id: sheriff, reverse: true });
        let label = |order: &[PlayerId], dir: &str| match order.first() {
            Some(&first) if first != sheriff => format!("{dir}, starting with {}", display(state, first)),
            _ => dir.to_string(),
        };
        let options = vec![
            ActionOption::new(FORWARD_ID, label(forward.as_slice(), "Ascending")),
            ActionOption::new(REVERSE_ID, label(reverse.as_slice(), "Descending")),
        ];
        let request = PendingAction::new(
            DecisionKind::SpeechOrder,
            sheriff,
            "Sheriff, choose the speaking order. You speak last.",
        )
        .with_options(options);
        return flow.take_turn(state, request).await;
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply_speech_order(state: &mut GameState, sheriff: PlayerId, choice: &Choice) {
    state.day_memory.reverse_order = choice.is(REVERSE_ID);
    let dir = if state.day_memory.reverse_order {
        "descending"
    } else {
        "ascending"
    };
    let line = format!("Sheriff {} calls for speeches in {dir} order.", display(state, sheriff));
    state.announce(line);
}

fn speech_anchor(state: &GameState) -> SpeechAnchor {
    if let Some(id) = state.sheriff.active_sheriff(&state.roster) {
        return SpeechAnchor::Sheriff {
            id,
            reverse: state.day_memory.reverse_order,
        };
    }
    match state.day_memory.dawn_victims.last() {
        Some(&victim) => SpeechAnchor::AfterVictim(victim),
        None => SpeechAnchor::FromFirstSeat,
    }
}

pub(super) async fn speech(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| speaking_order(&s.roster, speech_anchor(s)));
    if let Some(speaker) = state.current_actor() {
        let mut options = vec![ActionOption::new(SPEAK_ID, "Speak")];
        if state.roster.require(speaker)?.role.is_wolf() {
            options.push(ActionOption::new(EXPLODE_ID, "Self-destruct and end the day"));
        }
        let request = PendingAction::new(DecisionKind::DaySpeech, speaker, "Your turn to speak.")
            .with_options(options)
            .with_free_text();
        return flow.take_turn(state, request).await;
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply_speech(state: &mut GameState, speaker: PlayerId, reply: Reply) -> Result<(), GameError> {
    if reply.choice.is(EXPLODE_ID) {
        return self_destruct(state, speaker, reply.text);
    }
    let line = match reply.text {
        Some(text) => format!("{}: {text}", display(state, speaker)),
        None => format!("{} stays silent.", display(state, speaker)),
    };
    state.announce(line);
    Ok(())
}

/// A wolf dies by its own hand; the rest of the day is skipped.
pub(super) fn self_destruct(
    state: &mut GameState,
    wolf: PlayerId,
    text: Option<String>,
) -> Result<(), GameError> {
    abilities::apply_self_destruct(&mut state.roster, wolf, state.day)?;
    let who = display(state, wolf);
    let line = match text {
        Some(text) => format!("{who} cries \"{text}\" and self-destructs. They were {}.", Role::Werewolf.with_article()),
        None => format!("{who} self-destructs. They were {}.", Role::Werewolf.with_article()),
    };
    state.announce(line);
    state.day_memory.cut_short = true;
    state.turns = None;
    if state.sheriff.in_progress() {
        let next = state.day + 1;
        state.sheriff.defer_to(next);
        state.announce(format!("The sheriff election is postponed to day {next}."));
    }
    info!(day = state.day, wolf, "self-destruct");
    Ok(())
}

/// Runs once a self-destruct cut the day short.
pub(super) fn after_self_destruct(state: &mut GameState) -> Result<StepProgress, GameError> {
    if let Some(winner) = victory::evaluate(&state.roster) {
        state.end_game(winner);
        return Ok(StepProgress::Ended);
    }
    state.announce("The day ends abruptly. No vote is held.");
    Ok(StepProgress::JumpTo(Phase::Night, Step::NightFall))
}

pub(super) async fn vote(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| {
        s.roster
            .living()
            .filter(|p| p.flags.can_vote)
            .map(|p| p.id)
            .collect()
    });
    if let Some(voter) = state.current_actor() {
        let candidates = abilities::exile_candidates(&state.roster, voter);
        let request = PendingAction::new(DecisionKind::ExileVote, voter, "Vote for someone to exile.")
            .with_options(player_options(&state.roster, &candidates));
        return flow.take_turn(state, request).await;
    }
    resolve_exile(state)
}

pub(super) fn apply_exile_vote(state: &mut GameState, voter: PlayerId, choice: &Choice) -> Result<(), GameError> {
    let target = target_of(choice)?;
    if !abilities::exile_candidates(&state.roster, voter).contains(&target) {
        return Err(GameError::rule(
            RuleViolation::TargetNotAlive,
            format!("{} cannot be voted out by this voter", display(state, target)),
        ));
    }
    state.day_memory.ballots.insert(voter, target);
    Ok(())
}

fn resolve_exile(state: &mut GameState) -> Result<StepProgress, GameError> {
    let outcome = tally::count_weighted(&state.day_memory.ballots, |v| {
        state.sheriff.vote_weight(&state.roster, v)
    });
    if outcome.is_empty() {
        state.announce("No votes were cast. Nobody is exiled.");
        return Ok(StepProgress::Complete);
    }

    let ballots = state
        .day_memory
        .ballots
        .iter()
        .map(|(&v, &t)| format!("{}->{}", display(state, v), display(state, t)))
        .collect::<Vec<_>>()
        .join(", ");
    let totals = outcome
        .totals
        .iter()
        .map(|(&t, &n)| format!("{} {}", display(state, t), format_votes(n)))
        .collect::<Vec<_>>()
        .join(", ");
    state.announce(format!("Ballots: {ballots}. Totals: {totals}."));

    let Some(target) = outcome.pick(&mut state.rng) else {
        return Ok(StepProgress::Complete);
    };
    if outcome.is_tie() {
        let tied = outcome
            .leaders
            .iter()
            .map(|&id| display(state, id))
            .collect::<Vec<_>>()
            .join(" and ");
        let line = format!("A tie between {tied}. Fate chooses {}.", display(state, target));
        state.announce(line);
    }

    match abilities::apply_exile(&mut state.roster, target, state.day)? {
        ExileOutcome::Revealed => {
            let line = format!(
                "{} is voted out but reveals the {} card and survives, losing the right to vote.",
                display(state, target),
                Role::Idiot
            );
            state.announce(line);
            Ok(StepProgress::Complete)
        }
        ExileOutcome::Killed => {
            state.day_memory.exiled = Some(target);
            let role = state.roster.require(target)?.role;
            let line = format!("{} is exiled. They were {}.", display(state, target), role.with_article());
            state.announce(line);
            info!(day = state.day, target, "exiled");
            if let Some(winner) = victory::evaluate(&state.roster) {
                state.end_game(winner);
                return Ok(StepProgress::Ended);
            }
            Ok(StepProgress::Complete)
        }
    }
}

pub(super) async fn last_words(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| {
        s.day_memory
            .exiled
            .filter(|&id| !s.roster.is_alive(id))
            .into_iter()
            .collect()
    });
    if let Some(exiled) = state.current_actor() {
        let request = PendingAction::new(DecisionKind::LastWords, exiled, "Any last words?")
            .with_options(vec![ActionOption::new(DONE_ID, "Done")])
            .with_free_text();
        return flow.take_turn(state, request).await;
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply_last_words(state: &mut GameState, speaker: PlayerId, reply: Reply) {
    let line = match reply.text {
        Some(text) => format!("{}'s last words: {text}", display(state, speaker)),
        None => format!("{} leaves without a word.", display(state, speaker)),
    };
    state.announce(line);
}
