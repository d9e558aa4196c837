//! Oracle configuration handling.
//!
//! Standard fields are typed; anything else an oracle wants is preserved in
//! `custom` so new oracles can add knobs without touching this struct.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Standard configuration for built-in oracles.
///
/// # Example JSON Config
///
/// ```json
/// {"seed": 12345, "save_bias": 0.8, "persona": "cautious"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Optional RNG seed for deterministic oracle behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Probability the witch uses the remedy when offered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_bias: Option<f64>,

    /// Probability the witch uses the poison when offered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poison_bias: Option<f64>,

    /// Probability a wolf self-destructs when given the chance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode_bias: Option<f64>,

    /// Oracle-specific configuration.
    #[serde(flatten)]
    pub custom: JsonValue,
}

impl OracleConfig {
    pub const DEFAULT_SAVE_BIAS: f64 = 0.55;
    pub const DEFAULT_POISON_BIAS: f64 = 0.35;
    pub const DEFAULT_EXPLODE_BIAS: f64 = 0.05;

    /// Parse from optional JSON, falling back to an empty config on error.
    pub fn from_json(config: Option<&JsonValue>) -> Self {
        config
            .and_then(|json| serde_json::from_value(json.clone()).ok())
            .unwrap_or_else(Self::empty)
    }

    pub fn empty() -> Self {
        Self {
            seed: None,
            save_bias: None,
            poison_bias: None,
            explode_bias: None,
            custom: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::empty()
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn save_bias(&self) -> f64 {
        clamp_probability(self.save_bias.unwrap_or(Self::DEFAULT_SAVE_BIAS))
    }

    pub fn poison_bias(&self) -> f64 {
        clamp_probability(self.poison_bias.unwrap_or(Self::DEFAULT_POISON_BIAS))
    }

    pub fn explode_bias(&self) -> f64 {
        clamp_probability(self.explode_bias.unwrap_or(Self::DEFAULT_EXPLODE_BIAS))
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.custom.get(key)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::empty()
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
