#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod oracle;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::GameConfig;
pub use domain::snapshot::{snapshot, GameSnapshot};
pub use domain::{
    DecisionKind, Faction, GameSetup, GameState, PendingAction, Phase, PlayerId, PlayerSetup,
    Role, Status, Step,
};
pub use errors::{ErrorCode, GameError, OracleError};
pub use oracle::{DecisionOracle, OracleConfig, OracleRegistry, RandomOracle, ScriptedOracle};
pub use services::{AdvanceOutcome, GameFlow};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
