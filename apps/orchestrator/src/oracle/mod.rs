//! Decision oracles: the contract, the reply resolver, and built-in implementations.

mod bindings;
mod config;
mod random;
pub mod registry;
pub mod resolver;
mod scripted;
mod trait_def;

pub use bindings::OracleRegistry;
pub use config::OracleConfig;
pub use random::RandomOracle;
pub use registry::{by_name, registered_oracles, OracleFactory};
pub use resolver::{resolve_choice, ResolveError};
pub use scripted::{ExhaustedPolicy, ScriptedOracle};
pub use trait_def::{ActorContext, ChoiceRequest, DecisionOracle};
