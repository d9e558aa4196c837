//! Decision oracle trait definition.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::decision::{ActionOption, DecisionKind};
use crate::domain::roles::Role;
use crate::domain::state::Phase;
use crate::errors::domain::OracleError;

/// What an oracle may know when deciding for one actor.
///
/// Built fresh for every question from the actor's point of view; it never
/// carries hidden roles beyond what the actor legitimately knows.
#[derive(Debug, Clone, Serialize)]
pub struct ActorContext {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub day: u32,
    pub phase: Phase,
    pub is_sheriff: bool,
    /// `(tag, name)` of every living player.
    pub living: Vec<(String, String)>,
    /// Fellow wolves' tags; empty for good players.
    pub teammates: Vec<String>,
    /// Private facts, e.g. seer results and spent potions.
    pub knowledge: Vec<String>,
    /// Recent log lines visible to the actor, oldest first.
    pub recent_log: Vec<String>,
}

/// A closed question with an enumerated candidate list.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceRequest {
    pub kind: DecisionKind,
    pub prompt: String,
    pub options: Vec<ActionOption>,
    pub allow_abstain: bool,
}

/// Anything that can answer for a non-human seat.
///
/// `choose` returns free-form text that is mapped onto an option id by
/// [`resolve_choice`](super::resolver::resolve_choice); `speak` returns a
/// short natural-language statement. Errors are fatal for the current turn;
/// the scheduler never substitutes a random answer.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn choose(&self, ctx: &ActorContext, request: &ChoiceRequest) -> Result<String, OracleError>;

    async fn speak(&self, ctx: &ActorContext, hint: &str) -> Result<String, OracleError>;
}
