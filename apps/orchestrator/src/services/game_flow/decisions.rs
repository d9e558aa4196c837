//! Obtaining and applying one actor's decision.
//!
//! Every question goes through [`GameFlow::take_turn`]: the human slot gets a
//! pending action and the scheduler suspends; any other seat is answered by its
//! oracle. Both paths converge on [`apply_decision`], which commits the answer
//! and moves the turn cursor. Nothing is committed until the whole answer
//! (choice plus optional text) is in hand, so a failed oracle call can simply
//! be retried.

use tracing::{debug, warn};

use super::{day, election, night, retaliation, GameFlow, StepProgress};
use crate::domain::decision::{
    normalize_text, ActionOption, Choice, DecisionKind, PendingAction, Reply, EXPLODE_ID,
};
use crate::domain::event_log::Visibility;
use crate::domain::roles::Role;
use crate::domain::roster::{parse_player_tag, player_tag, PlayerId, Roster};
use crate::domain::state::GameState;
use crate::errors::domain::{GameError, OracleError, RuleViolation};
use crate::oracle::{resolve_choice, ActorContext, ChoiceRequest};

enum Obtained {
    Suspended,
    Reply(PendingAction, Reply),
}

/// Player targets as options: id is the tag, label the name.
pub(super) fn player_options(roster: &Roster, ids: &[PlayerId]) -> Vec<ActionOption> {
    ids.iter()
        .filter_map(|&id| roster.get(id))
        .map(|p| ActionOption::new(p.tag(), p.name.clone()))
        .collect()
}

/// `P3 (Mara)`, or the bare tag for an unknown id.
pub(super) fn display(state: &GameState, id: PlayerId) -> String {
    state
        .roster
        .get(id)
        .map(|p| p.display())
        .unwrap_or_else(|| player_tag(id))
}

/// Decode a picked player tag.
pub(super) fn target_of(choice: &Choice) -> Result<PlayerId, GameError> {
    match choice {
        Choice::Pick(tag) => parse_player_tag(tag).ok_or_else(|| {
            GameError::rule(RuleViolation::PlayerNotFound, format!("'{tag}' is not a player"))
        }),
        Choice::Abstain => Err(GameError::rule(
            RuleViolation::StepMismatch,
            "a target is required",
        )),
    }
}

/// What the actor legitimately knows, for an oracle.
pub(super) fn actor_context(state: &GameState, actor: PlayerId) -> Result<ActorContext, GameError> {
    let player = state.roster.require(actor)?;
    let living = state
        .roster
        .living()
        .map(|p| (p.tag(), p.name.clone()))
        .collect();
    let teammates = if player.role.is_wolf() {
        state
            .roster
            .players()
            .iter()
            .filter(|p| p.role.is_wolf() && p.id != actor)
            .map(|p| p.tag())
            .collect()
    } else {
        Vec::new()
    };

    let mut knowledge = Vec::new();
    match player.role {
        Role::Seer => {
            let visions = state.log.entries().iter().filter_map(|e| {
                (e.visibility == Visibility::Player(actor))
                    .then(|| e.text.strip_prefix(night::VISION_PREFIX))
                    .flatten()
            });
            knowledge.extend(visions.map(|v| v.trim_end_matches('.').to_string()));
        }
        Role::Witch => {
            if state.potions.remedy_used {
                knowledge.push("Your remedy is spent.".to_string());
            }
            if state.potions.poison_used {
                knowledge.push("Your poison is spent.".to_string());
            }
        }
        _ => {}
    }

    let recent_log = state
        .log
        .recent_visible(Some(player), state.config.context_window)
        .into_iter()
        .map(|e| format!("[day {} {:?}] {}", e.day, e.phase, e.text))
        .collect();

    Ok(ActorContext {
        id: player.tag(),
        name: player.name.clone(),
        role: player.role,
        day: state.day,
        phase: state.phase,
        is_sheriff: state.sheriff.active_sheriff(&state.roster) == Some(actor),
        living,
        teammates,
        knowledge,
        recent_log,
    })
}

impl GameFlow {
    /// Ask the actor of `request` and apply the answer, or suspend on the human slot.
    pub(super) async fn take_turn(
        &self,
        state: &mut GameState,
        request: PendingAction,
    ) -> Result<StepProgress, GameError> {
        match self.obtain(state, request).await? {
            Obtained::Suspended => Ok(StepProgress::Suspended),
            Obtained::Reply(request, reply) => {
                apply_decision(state, &request, reply)?;
                Ok(StepProgress::Continue)
            }
        }
    }

    async fn obtain(&self, state: &mut GameState, request: PendingAction) -> Result<Obtained, GameError> {
        let actor = state.roster.require(request.actor)?;
        if actor.is_human {
            debug!(
                day = state.day,
                actor = %actor.tag(),
                kind = request.kind.as_str(),
                "awaiting human"
            );
            state.pending_action = Some(request);
            return Ok(Obtained::Suspended);
        }

        let tag = actor.tag();
        let key = actor
            .oracle
            .clone()
            .ok_or_else(|| GameError::internal(format!("{tag} has no oracle binding")))?;
        let oracle = self.oracles.get(&key).ok_or_else(|| {
            GameError::oracle(
                tag.clone(),
                OracleError::Transport(format!("oracle '{key}' is not bound")),
            )
        })?;
        let ctx = actor_context(state, request.actor)?;
        let timeout = state.config.oracle_timeout();

        let choice = match (request.options.as_slice(), request.allow_abstain) {
            ([only], false) => Choice::Pick(only.id.clone()),
            _ => {
                let ask = ChoiceRequest {
                    kind: request.kind,
                    prompt: request.prompt.clone(),
                    options: request.options.clone(),
                    allow_abstain: request.allow_abstain,
                };
                let raw = tokio::time::timeout(timeout, oracle.choose(&ctx, &ask))
                    .await
                    .map_err(|_| OracleError::Timeout)
                    .and_then(|reply| reply)
                    .map_err(|e| {
                        warn!(actor = %tag, kind = request.kind.as_str(), error = %e, "oracle choose failed");
                        GameError::oracle(tag.clone(), e)
                    })?;
                resolve_choice(&raw, &request.options, request.allow_abstain).map_err(|e| {
                    warn!(actor = %tag, kind = request.kind.as_str(), reply = %raw, "unrecognized oracle reply");
                    GameError::oracle(tag.clone(), OracleError::Malformed(e.to_string()))
                })?
            }
        };

        let text = if request.allow_free_text && !choice.is(EXPLODE_ID) {
            let raw = tokio::time::timeout(timeout, oracle.speak(&ctx, &request.prompt))
                .await
                .map_err(|_| OracleError::Timeout)
                .and_then(|reply| reply)
                .map_err(|e| {
                    warn!(actor = %tag, kind = request.kind.as_str(), error = %e, "oracle speak failed");
                    GameError::oracle(tag.clone(), e)
                })?;
            normalize_text(Some(&raw), state.config.max_text_len)
        } else {
            None
        };

        debug!(actor = %tag, kind = request.kind.as_str(), ?choice, "oracle answered");
        Ok(Obtained::Reply(request, Reply { choice, text }))
    }
}

/// Commit one actor's answer and advance the turn cursor.
///
/// Shared by oracle replies and human submissions.
pub(super) fn apply_decision(
    state: &mut GameState,
    request: &PendingAction,
    reply: Reply,
) -> Result<(), GameError> {
    if state.current_actor() != Some(request.actor) || request.kind.step() != state.step {
        return Err(GameError::rule(
            RuleViolation::StepMismatch,
            format!(
                "{} answer from {} does not match the current turn",
                request.kind.as_str(),
                player_tag(request.actor)
            ),
        ));
    }

    let actor = request.actor;
    match request.kind {
        DecisionKind::WolfKill => night::apply_wolf_vote(state, actor, &reply.choice)?,
        DecisionKind::SeerCheck => night::apply_inspection(state, actor, &reply.choice)?,
        DecisionKind::WitchRemedy => night::apply_remedy_choice(state, actor, &reply.choice)?,
        DecisionKind::WitchPoison => night::apply_poison_choice(state, actor, &reply.choice)?,
        DecisionKind::Retaliation => retaliation::apply(state, actor, &reply.choice)?,
        DecisionKind::SheriffSignup => election::apply_signup(state, actor, &reply.choice),
        DecisionKind::SheriffSpeech => election::apply_speech(state, actor, reply)?,
        DecisionKind::SheriffVote => election::apply_vote(state, actor, &reply.choice)?,
        DecisionKind::SpeechOrder => day::apply_speech_order(state, actor, &reply.choice),
        DecisionKind::DaySpeech => day::apply_speech(state, actor, reply)?,
        DecisionKind::ExileVote => day::apply_exile_vote(state, actor, &reply.choice)?,
        DecisionKind::LastWords => day::apply_last_words(state, actor, reply),
    }

    if let Some(queue) = state.turns.as_mut() {
        queue.advance();
    }
    Ok(())
}
