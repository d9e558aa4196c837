use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::roles::Role;
use crate::errors::domain::GameError;

/// Tunables for one game. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Log entries exposed through a snapshot
    pub log_window: usize,
    /// Log entries handed to an oracle as context
    pub context_window: usize,
    /// Free-text cap, in characters
    pub max_text_len: usize,
    /// Units of work a single `advance` may perform
    pub max_iterations: usize,
    pub oracle_timeout_ms: u64,
    /// Hold the sheriff election on day 1
    pub sheriff_election: bool,
    /// Roles forced to run for sheriff and barred from withdrawing
    pub must_run_roles: Vec<Role>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_window: 120,
            context_window: 30,
            max_text_len: 80,
            max_iterations: 2000,
            oracle_timeout_ms: 30_000,
            sheriff_election: true,
            must_run_roles: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `WEREWOLF_*` environment variables.
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("WEREWOLF_LOG_WINDOW") {
            cfg.log_window = parse_var("WEREWOLF_LOG_WINDOW", &v)?;
        }
        if let Some(v) = lookup("WEREWOLF_CONTEXT_WINDOW") {
            cfg.context_window = parse_var("WEREWOLF_CONTEXT_WINDOW", &v)?;
        }
        if let Some(v) = lookup("WEREWOLF_MAX_TEXT_LEN") {
            cfg.max_text_len = parse_var("WEREWOLF_MAX_TEXT_LEN", &v)?;
        }
        if let Some(v) = lookup("WEREWOLF_MAX_ITERATIONS") {
            cfg.max_iterations = parse_var("WEREWOLF_MAX_ITERATIONS", &v)?;
        }
        if let Some(v) = lookup("WEREWOLF_ORACLE_TIMEOUT_MS") {
            cfg.oracle_timeout_ms = parse_var("WEREWOLF_ORACLE_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("WEREWOLF_SHERIFF_ELECTION") {
            cfg.sheriff_election = parse_var("WEREWOLF_SHERIFF_ELECTION", &v)?;
        }
        if let Some(v) = lookup("WEREWOLF_MUST_RUN_ROLES") {
            cfg.must_run_roles = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<Role>()
                        .map_err(|e| GameError::config(format!("WEREWOLF_MUST_RUN_ROLES: {e}")))
                })
                .collect::<Result<_, _>>()?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_iterations == 0 {
            return Err(GameError::config("max_iterations must be positive"));
        }
        if self.oracle_timeout_ms == 0 {
            return Err(GameError::config("oracle_timeout_ms must be positive"));
        }
        if self.max_text_len == 0 {
            return Err(GameError::config("max_text_len must be positive"));
        }
        Ok(())
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.oracle_timeout_ms)
    }

    pub fn must_run(&self, role: Role) -> bool {
        self.must_run_roles.contains(&role)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, GameError> {
    raw.trim()
        .parse()
        .map_err(|_| GameError::config(format!("{key}: cannot parse '{raw}'")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.log_window, 120);
        assert_eq!(cfg.max_text_len, 80);
        assert_eq!(cfg.max_iterations, 2000);
        assert_eq!(cfg.oracle_timeout(), Duration::from_secs(30));
        assert!(cfg.must_run_roles.is_empty());
    }

    #[test]
    fn env_overrides() {
        let cfg = GameConfig::from_lookup(lookup(&[
            ("WEREWOLF_LOG_WINDOW", "50"),
            ("WEREWOLF_SHERIFF_ELECTION", "false"),
            ("WEREWOLF_MUST_RUN_ROLES", "seer, witch"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_window, 50);
        assert!(!cfg.sheriff_election);
        assert_eq!(cfg.must_run_roles, vec![Role::Seer, Role::Witch]);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = GameConfig::from_lookup(lookup(&[("WEREWOLF_MAX_TEXT_LEN", "lots")])).unwrap_err();
        assert!(matches!(err, GameError::Config { .. }));

        let err = GameConfig::from_lookup(lookup(&[("WEREWOLF_MUST_RUN_ROLES", "seer,bard")])).unwrap_err();
        assert!(err.to_string().contains("bard"));

        let err = GameConfig::from_lookup(lookup(&[("WEREWOLF_MAX_ITERATIONS", "0")])).unwrap_err();
        assert!(matches!(err, GameError::Config { .. }));

        let err = GameConfig::from_lookup(lookup(&[("WEREWOLF_MAX_TEXT_LEN", "0")])).unwrap_err();
        assert!(err.to_string().contains("max_text_len"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"max_text_len": 40}"#).unwrap();
        assert_eq!(cfg.max_text_len, 40);
        assert_eq!(cfg.log_window, 120);
    }
}
