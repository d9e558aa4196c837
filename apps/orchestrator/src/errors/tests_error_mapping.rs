// Unit tests for error classification - pure logic, no oracle or scheduler involved
use crate::errors::domain::{
    GameError, OracleError, RuleViolation, SetupErrorKind, SubmissionErrorKind,
};
use crate::errors::ErrorCode;

#[test]
fn maps_submissions() {
    let e = GameError::submission(SubmissionErrorKind::UnknownAction, "no such option");
    assert_eq!(e.code(), ErrorCode::UnknownAction);
    assert!(e.is_caller_correctable());
    assert!(!e.is_retryable());

    let e = GameError::submission(SubmissionErrorKind::NoPendingAction, "idle");
    assert_eq!(e.code().as_str(), "NO_PENDING_ACTION");
}

#[test]
fn maps_oracle_failures_through_source() {
    let e = GameError::oracle("P3", OracleError::Timeout);
    assert_eq!(e.code(), ErrorCode::OracleTimeout);
    assert!(e.is_retryable());
    assert!(!e.is_caller_correctable());

    let e = GameError::oracle("P2", OracleError::Malformed("hmm".into()));
    assert_eq!(e.code().as_str(), "ORACLE_MALFORMED");
    assert!(e.to_string().contains("P2"), "actor must appear in message: {e}");
}

#[test]
fn maps_setup_and_rules() {
    let e = GameError::setup(SetupErrorKind::RoleCountMismatch, "2 wolves expected");
    assert_eq!(e.code(), ErrorCode::RoleCountMismatch);
    assert!(e.is_caller_correctable());

    let e = GameError::rule(RuleViolation::AbilityUsed, "remedy already spent");
    assert_eq!(e.code(), ErrorCode::AbilityUsed);
    assert!(!e.is_caller_correctable());
}

#[test]
fn game_over_and_internal() {
    assert_eq!(GameError::GameOver.code(), ErrorCode::GameOver);
    assert_eq!(GameError::internal("boom").code(), ErrorCode::Internal);
    assert_eq!(GameError::config("bad env").code(), ErrorCode::ConfigError);
}
