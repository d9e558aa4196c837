//! Logging for integration test binaries, initialized before any test runs.

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    orchestrator_test_support::test_logging::init();
}
