//! Domain layer: roles, roster, rules and the game state they act on.

pub mod abilities;
pub mod decision;
pub mod election;
pub mod event_log;
pub mod night;
pub mod roles;
pub mod roster;
pub mod seed_derivation;
pub mod setup;
pub mod snapshot;
pub mod speech;
pub mod state;
pub mod tally;
pub mod victory;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_abilities;
#[cfg(test)]
mod tests_props_tally;
#[cfg(test)]
mod tests_setup;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use decision::{ActionOption, Choice, DecisionKind, PendingAction};
pub use event_log::{EventLog, LogEntry, Visibility};
pub use roles::{Faction, Role};
pub use roster::{player_tag, Player, PlayerId, Roster};
pub use setup::{GameSetup, PlayerSetup};
pub use snapshot::{snapshot, GameSnapshot};
pub use state::{GameState, Phase, Status, Step};
