use proptest::prelude::ProptestConfig;

/// Shared proptest settings; `PROPTEST_CASES` still overrides the case count.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(64);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
