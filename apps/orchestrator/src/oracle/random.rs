//! Random oracle - answers every question with a plausible random choice.
//!
//! Reference implementation of [`DecisionOracle`]: interior mutability through
//! `Mutex<StdRng>`, optional seeding for reproducible games, and no panics.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use super::config::OracleConfig;
use super::trait_def::{ActorContext, ChoiceRequest, DecisionOracle};
use crate::domain::decision::{
    DecisionKind, ABSTAIN_ID, EXPLODE_ID, RUN_ID, SAVE_ID, STAY_ID, WITHDRAW_ID,
};
use crate::errors::domain::OracleError;

const RUN_BIAS: f64 = 0.5;
const WITHDRAW_BIAS: f64 = 0.15;
const DECLINE_SHOT_BIAS: f64 = 0.2;

const LINES: &[&str] = &[
    "I have a bad feeling about {who}.",
    "{who} has been far too quiet.",
    "I trust {who}, look elsewhere.",
    "Nothing solid yet. Watch {who} closely.",
    "My vote will probably go to {who}.",
];

pub struct RandomOracle {
    rng: Mutex<StdRng>,
    save_bias: f64,
    poison_bias: f64,
    explode_bias: f64,
}

impl RandomOracle {
    pub const NAME: &'static str = "RandomOracle";
    pub const VERSION: &'static str = "1.0.0";

    /// `None` draws from OS entropy; `Some(seed)` replays the same decisions.
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_config(&OracleConfig {
            seed,
            ..OracleConfig::empty()
        })
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            save_bias: config.save_bias(),
            poison_bias: config.poison_bias(),
            explode_bias: config.explode_bias(),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StdRng>, OracleError> {
        self.rng
            .lock()
            .map_err(|e| OracleError::Transport(format!("rng lock poisoned: {e}")))
    }

    fn pick_any(rng: &mut StdRng, request: &ChoiceRequest) -> String {
        request
            .options
            .choose(rng)
            .map(|o| o.id.clone())
            .unwrap_or_else(|| ABSTAIN_ID.to_string())
    }

    fn offers(request: &ChoiceRequest, id: &str) -> bool {
        request.options.iter().any(|o| o.id == id)
    }
}

#[async_trait]
impl DecisionOracle for RandomOracle {
    async fn choose(&self, _ctx: &ActorContext, request: &ChoiceRequest) -> Result<String, OracleError> {
        let mut rng = self.lock()?;
        let rng = &mut *rng;
        let answer = match request.kind {
            DecisionKind::WitchRemedy => {
                if rng.random_bool(self.save_bias) {
                    SAVE_ID.to_string()
                } else {
                    ABSTAIN_ID.to_string()
                }
            }
            DecisionKind::WitchPoison => {
                if rng.random_bool(self.poison_bias) {
                    Self::pick_any(rng, request)
                } else {
                    ABSTAIN_ID.to_string()
                }
            }
            DecisionKind::Retaliation => {
                if rng.random_bool(DECLINE_SHOT_BIAS) {
                    ABSTAIN_ID.to_string()
                } else {
                    Self::pick_any(rng, request)
                }
            }
            DecisionKind::SheriffSignup => {
                if rng.random_bool(RUN_BIAS) {
                    RUN_ID.to_string()
                } else {
                    ABSTAIN_ID.to_string()
                }
            }
            DecisionKind::SheriffSpeech | DecisionKind::DaySpeech => {
                if Self::offers(request, EXPLODE_ID) && rng.random_bool(self.explode_bias) {
                    EXPLODE_ID.to_string()
                } else if Self::offers(request, WITHDRAW_ID) && rng.random_bool(WITHDRAW_BIAS) {
                    WITHDRAW_ID.to_string()
                } else if Self::offers(request, STAY_ID) {
                    STAY_ID.to_string()
                } else {
                    request
                        .options
                        .iter()
                        .find(|o| o.id != EXPLODE_ID)
                        .map(|o| o.id.clone())
                        .unwrap_or_else(|| ABSTAIN_ID.to_string())
                }
            }
            _ => Self::pick_any(rng, request),
        };
        Ok(answer)
    }

    async fn speak(&self, ctx: &ActorContext, _hint: &str) -> Result<String, OracleError> {
        let mut rng = self.lock()?;
        let rng = &mut *rng;
        let others: Vec<&(String, String)> =
            ctx.living.iter().filter(|(tag, _)| *tag != ctx.id).collect();
        let who = others
            .choose(rng)
            .map(|(tag, _)| tag.clone())
            .unwrap_or_else(|| "anyone".to_string());
        let line = LINES.choose(rng).copied().unwrap_or("No comment.");
        Ok(line.replace("{who}", &who))
    }
}
