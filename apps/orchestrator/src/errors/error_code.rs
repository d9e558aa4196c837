//! Error codes for the werewolf orchestrator.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and are what drivers print or serialize.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Human submissions
    /// Submission arrived while nothing was pending
    NoPendingAction,
    /// Submitted action id is not among the offered options
    UnknownAction,
    /// Free text was supplied where none is accepted
    TextNotAllowed,
    /// Submission after the game ended
    GameOver,

    // Decision oracle
    /// Oracle did not answer in time
    OracleTimeout,
    /// Oracle could not be reached
    OracleTransport,
    /// Oracle answered with nothing recognizable
    OracleMalformed,

    // Setup
    /// Role counts do not match the deck
    RoleCountMismatch,
    /// Roles partially assigned
    MixedRoleAssignment,
    /// A unique role appears more than once
    DuplicateUniqueRole,
    /// Player names empty or repeated
    InvalidPlayerName,
    /// Human seat outside the roster
    InvalidHumanSeat,
    /// A non-human seat has no oracle binding
    MissingOracle,
    /// An oracle key is not registered
    UnknownOracle,
    /// No deck exists for this many players
    UnsupportedPlayerCount,
    /// Wolves would win before the first night
    UnbalancedFactions,

    // Rules
    /// Target is not alive
    TargetNotAlive,
    /// Self-targeting is forbidden here
    SelfTarget,
    /// One-shot ability already spent
    AbilityUsed,
    /// Remedy offered with no kill target
    NoKillTarget,
    /// Actor does not hold the required role
    WrongRole,
    /// Action does not belong to the current step
    StepMismatch,
    /// Player id does not exist
    PlayerNotFound,

    /// Configuration error
    ConfigError,
    /// Internal invariant broken
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoPendingAction => "NO_PENDING_ACTION",
            Self::UnknownAction => "UNKNOWN_ACTION",
            Self::TextNotAllowed => "TEXT_NOT_ALLOWED",
            Self::GameOver => "GAME_OVER",

            Self::OracleTimeout => "ORACLE_TIMEOUT",
            Self::OracleTransport => "ORACLE_TRANSPORT",
            Self::OracleMalformed => "ORACLE_MALFORMED",

            Self::RoleCountMismatch => "ROLE_COUNT_MISMATCH",
            Self::MixedRoleAssignment => "MIXED_ROLE_ASSIGNMENT",
            Self::DuplicateUniqueRole => "DUPLICATE_UNIQUE_ROLE",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidHumanSeat => "INVALID_HUMAN_SEAT",
            Self::MissingOracle => "MISSING_ORACLE",
            Self::UnknownOracle => "UNKNOWN_ORACLE",
            Self::UnsupportedPlayerCount => "UNSUPPORTED_PLAYER_COUNT",
            Self::UnbalancedFactions => "UNBALANCED_FACTIONS",

            Self::TargetNotAlive => "TARGET_NOT_ALIVE",
            Self::SelfTarget => "SELF_TARGET",
            Self::AbilityUsed => "ABILITY_USED",
            Self::NoKillTarget => "NO_KILL_TARGET",
            Self::WrongRole => "WRONG_ROLE",
            Self::StepMismatch => "STEP_MISMATCH",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",

            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
