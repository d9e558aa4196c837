//! Error handling for the werewolf orchestrator.

pub mod domain;
pub mod error_code;

pub use domain::{GameError, OracleError, RuleViolation, SetupErrorKind, SubmissionErrorKind};
pub use error_code::ErrorCode;

#[cfg(test)]
mod tests_error_mapping;
