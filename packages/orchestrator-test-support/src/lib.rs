//! Orchestrator test support utilities
//!
//! Shared by the orchestrator's unit and integration tests.

pub mod test_logging;
