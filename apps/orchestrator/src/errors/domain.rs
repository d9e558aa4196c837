//! Game-level error type used across the domain, oracle, and scheduler layers.
//!
//! The taxonomy mirrors how a caller recovers:
//! - `InvalidSubmission` and `Setup` are caller-correctable and never mutate state.
//! - `Oracle` halts the current unit of work; retrying `advance` re-asks the same actor.
//! - `Rule` signals a client/programming error (dead target, spent potion, ...).

use thiserror::Error;

use super::error_code::ErrorCode;

/// Why a human submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionErrorKind {
    NoPendingAction,
    UnknownAction,
    TextNotAllowed,
}

/// Why a game setup was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupErrorKind {
    RoleCountMismatch,
    MixedRoleAssignment,
    DuplicateUniqueRole,
    InvalidPlayerName,
    InvalidHumanSeat,
    MissingOracle,
    UnknownOracle,
    UnsupportedPlayerCount,
    UnbalancedFactions,
}

/// Logical rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleViolation {
    TargetNotAlive,
    SelfTarget,
    AbilityUsed,
    NoKillTarget,
    WrongRole,
    StepMismatch,
    PlayerNotFound,
}

/// Errors that can occur while consulting a decision oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Oracle failed to answer within the configured timeout
    #[error("oracle decision timeout")]
    Timeout,
    /// Oracle could not be reached or refused the request
    #[error("oracle transport failure: {0}")]
    Transport(String),
    /// Oracle answered, but nothing in the answer maps to an offered option
    #[error("oracle reply not understood: {0}")]
    Malformed(String),
}

impl OracleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OracleError::Timeout => ErrorCode::OracleTimeout,
            OracleError::Transport(_) => ErrorCode::OracleTransport,
            OracleError::Malformed(_) => ErrorCode::OracleMalformed,
        }
    }
}

/// Central game error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("invalid submission: {detail}")]
    InvalidSubmission {
        kind: SubmissionErrorKind,
        detail: String,
    },
    #[error("oracle failed for {actor}: {source}")]
    Oracle {
        actor: String,
        #[source]
        source: OracleError,
    },
    #[error("setup rejected: {detail}")]
    Setup { kind: SetupErrorKind, detail: String },
    #[error("rule violation: {detail}")]
    Rule { kind: RuleViolation, detail: String },
    #[error("game is over")]
    GameOver,
    #[error("configuration error: {detail}")]
    Config { detail: String },
    #[error("internal error: {detail}")]
    Internal { detail: String },
}

impl GameError {
    pub fn submission(kind: SubmissionErrorKind, detail: impl Into<String>) -> Self {
        Self::InvalidSubmission {
            kind,
            detail: detail.into(),
        }
    }

    pub fn oracle(actor: impl Into<String>, source: OracleError) -> Self {
        Self::Oracle {
            actor: actor.into(),
            source,
        }
    }

    pub fn setup(kind: SetupErrorKind, detail: impl Into<String>) -> Self {
        Self::Setup {
            kind,
            detail: detail.into(),
        }
    }

    pub fn rule(kind: RuleViolation, detail: impl Into<String>) -> Self {
        Self::Rule {
            kind,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// True for errors that leave the game untouched and can be corrected by the caller.
    pub fn is_caller_correctable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidSubmission { .. } | GameError::Setup { .. }
        )
    }

    /// True when retrying `advance` later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GameError::Oracle { .. })
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::InvalidSubmission { kind, .. } => match kind {
                SubmissionErrorKind::NoPendingAction => ErrorCode::NoPendingAction,
                SubmissionErrorKind::UnknownAction => ErrorCode::UnknownAction,
                SubmissionErrorKind::TextNotAllowed => ErrorCode::TextNotAllowed,
            },
            GameError::Oracle { source, .. } => source.code(),
            GameError::Setup { kind, .. } => match kind {
                SetupErrorKind::RoleCountMismatch => ErrorCode::RoleCountMismatch,
                SetupErrorKind::MixedRoleAssignment => ErrorCode::MixedRoleAssignment,
                SetupErrorKind::DuplicateUniqueRole => ErrorCode::DuplicateUniqueRole,
                SetupErrorKind::InvalidPlayerName => ErrorCode::InvalidPlayerName,
                SetupErrorKind::InvalidHumanSeat => ErrorCode::InvalidHumanSeat,
                SetupErrorKind::MissingOracle => ErrorCode::MissingOracle,
                SetupErrorKind::UnknownOracle => ErrorCode::UnknownOracle,
                SetupErrorKind::UnsupportedPlayerCount => ErrorCode::UnsupportedPlayerCount,
                SetupErrorKind::UnbalancedFactions => ErrorCode::UnbalancedFactions,
            },
            GameError::Rule { kind, .. } => match kind {
                RuleViolation::TargetNotAlive => ErrorCode::TargetNotAlive,
                RuleViolation::SelfTarget => ErrorCode::SelfTarget,
                RuleViolation::AbilityUsed => ErrorCode::AbilityUsed,
                RuleViolation::NoKillTarget => ErrorCode::NoKillTarget,
                RuleViolation::WrongRole => ErrorCode::WrongRole,
                RuleViolation::StepMismatch => ErrorCode::StepMismatch,
                RuleViolation::PlayerNotFound => ErrorCode::PlayerNotFound,
            },
            GameError::GameOver => ErrorCode::GameOver,
            GameError::Config { .. } => ErrorCode::ConfigError,
            GameError::Internal { .. } => ErrorCode::Internal,
        }
    }
}
