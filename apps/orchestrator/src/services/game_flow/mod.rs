//! Game flow orchestration - drives the night/day step machine.
//!
//! [`GameFlow`] owns the oracle bindings; the [`GameState`](crate::domain::state::GameState)
//! is passed in by the caller. `advance` runs steps until the human slot has
//! to answer or the game ends, and `submit` feeds the human's answer back in.

mod day;
mod decisions;
mod election;
mod night;
mod orchestration;
mod player_actions;
mod retaliation;
pub mod steps;

use crate::domain::roles::Faction;
use crate::domain::state::{Phase, Step};
use crate::oracle::OracleRegistry;

/// Game flow service over a fixed set of oracle bindings.
#[derive(Debug, Clone, Default)]
pub struct GameFlow {
    oracles: OracleRegistry,
}

impl GameFlow {
    pub fn new(oracles: OracleRegistry) -> Self {
        Self { oracles }
    }

    pub fn oracles(&self) -> &OracleRegistry {
        &self.oracles
    }
}

/// Where `advance` stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The human slot has a pending action.
    AwaitingHuman,
    Ended(Faction),
}

/// Result of running the current step once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepProgress {
    /// Run the same step again; its turn queue has moved.
    Continue,
    /// Move on to the successor step.
    Complete,
    /// A pending action was posted for the human.
    Suspended,
    JumpTo(Phase, Step),
    Ended,
}
