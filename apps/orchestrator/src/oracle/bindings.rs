//! Seat-to-oracle bindings.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::config::OracleConfig;
use super::registry;
use super::trait_def::DecisionOracle;
use crate::errors::domain::{GameError, SetupErrorKind};

/// Maps oracle keys (as named in a seat's setup) to live oracle instances.
#[derive(Clone, Default)]
pub struct OracleRegistry {
    oracles: BTreeMap<String, Arc<dyn DecisionOracle>>,
}

impl OracleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: impl Into<String>, oracle: Arc<dyn DecisionOracle>) {
        self.oracles.insert(key.into(), oracle);
    }

    pub fn with(mut self, key: impl Into<String>, oracle: Arc<dyn DecisionOracle>) -> Self {
        self.bind(key, oracle);
        self
    }

    /// Build an oracle from a registered factory and bind it under `key`.
    pub fn bind_factory(
        &mut self,
        key: impl Into<String>,
        factory_name: &str,
        config: &OracleConfig,
    ) -> Result<(), GameError> {
        let factory = registry::by_name(factory_name).ok_or_else(|| {
            GameError::setup(
                SetupErrorKind::UnknownOracle,
                format!("no oracle factory named '{factory_name}'"),
            )
        })?;
        self.bind(key, (factory.make)(config));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn DecisionOracle>> {
        self.oracles.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.oracles.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.oracles.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for OracleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleRegistry")
            .field("keys", &self.oracles.keys().collect::<Vec<_>>())
            .finish()
    }
}
