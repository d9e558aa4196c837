//! How to register an oracle
//!
//! 1) Implement `DecisionOracle` for your type in its module.
//! 2) Add an `OracleFactory` entry to the static list with a stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same config seed => same behavior (where applicable).

use std::sync::Arc;

use super::config::OracleConfig;
use super::random::RandomOracle;
use super::scripted::{ExhaustedPolicy, ScriptedOracle};
use super::trait_def::DecisionOracle;

/// Factory definition for constructing oracle implementations.
pub struct OracleFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &OracleConfig) -> Arc<dyn DecisionOracle>,
}

static ORACLE_FACTORIES: &[OracleFactory] = &[
    OracleFactory {
        name: RandomOracle::NAME,
        version: RandomOracle::VERSION,
        make: make_random,
    },
    OracleFactory {
        name: ScriptedOracle::NAME,
        version: ScriptedOracle::VERSION,
        make: make_first_option,
    },
];

/// Returns the statically registered oracle factories.
pub fn registered_oracles() -> &'static [OracleFactory] {
    ORACLE_FACTORIES
}

/// Finds a registered factory by name, case-insensitively.
pub fn by_name(name: &str) -> Option<&'static OracleFactory> {
    registered_oracles()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_random(config: &OracleConfig) -> Arc<dyn DecisionOracle> {
    Arc::new(RandomOracle::from_config(config))
}

/// An empty script always taking the first option: a deterministic baseline.
fn make_first_option(_config: &OracleConfig) -> Arc<dyn DecisionOracle> {
    Arc::new(ScriptedOracle::new(ExhaustedPolicy::FirstOption))
}
