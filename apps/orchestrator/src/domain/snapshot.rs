//! Read-only, viewer-scoped projection of a game.
//!
//! Hidden information never leaves through a snapshot: a living player's role
//! is shown only to that player, after death, after a public reveal, or once
//! the game has ended. The pending action is shown only to its actor.

use serde::Serialize;

use crate::domain::decision::{ActionOption, DecisionKind};
use crate::domain::election::ElectionStage;
use crate::domain::roles::{Faction, Role};
use crate::domain::roster::{player_tag, DeathRecord, Player, PlayerId};
use crate::domain::state::{GameState, Phase, Status, Step};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub alive: bool,
    pub role: Option<Role>,
    pub revealed: bool,
    pub can_vote: bool,
    pub is_sheriff: bool,
    pub is_human: bool,
    pub death: Option<DeathRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogLine {
    pub seq: u64,
    pub day: u32,
    pub phase: Phase,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingView {
    pub kind: DecisionKind,
    pub actor: String,
    pub prompt: String,
    /// Includes the abstain id when abstaining is allowed.
    pub options: Vec<ActionOption>,
    pub allow_free_text: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub viewer: Option<String>,
    pub day: u32,
    pub phase: Phase,
    pub step: Step,
    pub status: Status,
    pub winner: Option<Faction>,
    pub sheriff: Option<String>,
    pub election: ElectionStage,
    pub players: Vec<PlayerView>,
    pub log: Vec<LogLine>,
    pub pending: Option<PendingView>,
}

fn role_visible(state: &GameState, viewer: Option<PlayerId>, p: &Player) -> bool {
    state.is_over() || viewer == Some(p.id) || !p.alive || p.flags.revealed
}

/// Project `state` for `viewer` (`None` = spectator).
pub fn snapshot(state: &GameState, viewer: Option<PlayerId>) -> GameSnapshot {
    let viewer_player = viewer.and_then(|id| state.roster().get(id));
    let sheriff = state.sheriff().active_sheriff(state.roster());

    let players = state
        .roster()
        .players()
        .iter()
        .map(|p| PlayerView {
            id: p.tag(),
            name: p.name.clone(),
            alive: p.alive,
            role: role_visible(state, viewer, p).then_some(p.role),
            revealed: p.flags.revealed,
            can_vote: p.flags.can_vote,
            is_sheriff: sheriff == Some(p.id),
            is_human: p.is_human,
            death: p.flags.death,
        })
        .collect();

    let log = state
        .log()
        .recent_visible(viewer_player, state.config().log_window)
        .into_iter()
        .map(|e| LogLine {
            seq: e.seq,
            day: e.day,
            phase: e.phase,
            text: e.text.clone(),
        })
        .collect();

    let pending = state
        .pending_action()
        .filter(|pa| viewer == Some(pa.actor))
        .map(|pa| PendingView {
            kind: pa.kind,
            actor: player_tag(pa.actor),
            prompt: pa.prompt.clone(),
            options: pa.offered(),
            allow_free_text: pa.allow_free_text,
        });

    GameSnapshot {
        viewer: viewer.map(player_tag),
        day: state.day(),
        phase: state.phase(),
        step: state.step(),
        status: state.status(),
        winner: state.winner(),
        sheriff: sheriff.map(player_tag),
        election: state.sheriff().stage(),
        players,
        log,
        pending,
    }
}
