#![cfg(test)]

//! Unit tests share the integration suites' subscriber setup
//! (`TEST_LOG`, then `RUST_LOG`, then `"warn"`).

pub fn init() {
    orchestrator_test_support::test_logging::init();
}
