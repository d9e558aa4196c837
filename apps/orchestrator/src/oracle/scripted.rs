//! Scripted oracle - replays queued answers per decision kind.
//!
//! Used by tests and by the `FirstOption` factory entry. Each decision kind has
//! its own FIFO queue; when a queue runs dry the [`ExhaustedPolicy`] decides.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::trait_def::{ActorContext, ChoiceRequest, DecisionOracle};
use crate::domain::decision::{DecisionKind, ABSTAIN_ID};
use crate::errors::domain::OracleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustedPolicy {
    /// Answer with the first offered option.
    FirstOption,
    /// Abstain where allowed, else the first option.
    Abstain,
    /// Fail the turn with `OracleError::Malformed`.
    Fail,
}

#[derive(Default)]
struct Script {
    choices: HashMap<DecisionKind, VecDeque<Result<String, OracleError>>>,
    speeches: VecDeque<Result<String, OracleError>>,
    choose_calls: usize,
    speak_calls: usize,
}

pub struct ScriptedOracle {
    script: Mutex<Script>,
    policy: ExhaustedPolicy,
}

impl ScriptedOracle {
    pub const NAME: &'static str = "ScriptedOracle";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(policy: ExhaustedPolicy) -> Self {
        Self {
            script: Mutex::new(Script::default()),
            policy,
        }
    }

    fn push_choice(self, kind: DecisionKind, reply: Result<String, OracleError>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.choices.entry(kind).or_default().push_back(reply);
        }
        self
    }

    /// Queue a raw reply for `kind`.
    pub fn with_choice(self, kind: DecisionKind, reply: impl Into<String>) -> Self {
        self.push_choice(kind, Ok(reply.into()))
    }

    /// Queue a failure for `kind`.
    pub fn with_failure(self, kind: DecisionKind, error: OracleError) -> Self {
        self.push_choice(kind, Err(error))
    }

    pub fn with_speech(self, text: impl Into<String>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.speeches.push_back(Ok(text.into()));
        }
        self
    }

    pub fn with_speech_failure(self, error: OracleError) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.speeches.push_back(Err(error));
        }
        self
    }

    pub fn choose_calls(&self) -> usize {
        self.script.lock().map(|s| s.choose_calls).unwrap_or(0)
    }

    pub fn speak_calls(&self) -> usize {
        self.script.lock().map(|s| s.speak_calls).unwrap_or(0)
    }

    /// Answers still queued for `kind`.
    pub fn remaining(&self, kind: DecisionKind) -> usize {
        self.script
            .lock()
            .map(|s| s.choices.get(&kind).map_or(0, VecDeque::len))
            .unwrap_or(0)
    }

    fn fallback(&self, request: &ChoiceRequest) -> Result<String, OracleError> {
        let first = request.options.first().map(|o| o.id.clone());
        match self.policy {
            ExhaustedPolicy::FirstOption => {
                first.ok_or_else(|| OracleError::Malformed("nothing offered".into()))
            }
            ExhaustedPolicy::Abstain if request.allow_abstain => Ok(ABSTAIN_ID.to_string()),
            ExhaustedPolicy::Abstain => {
                first.ok_or_else(|| OracleError::Malformed("nothing offered".into()))
            }
            ExhaustedPolicy::Fail => Err(OracleError::Malformed(format!(
                "script exhausted for {}",
                request.kind.as_str()
            ))),
        }
    }
}

#[async_trait]
impl DecisionOracle for ScriptedOracle {
    async fn choose(&self, _ctx: &ActorContext, request: &ChoiceRequest) -> Result<String, OracleError> {
        let next = {
            let mut script = self
                .script
                .lock()
                .map_err(|e| OracleError::Transport(format!("script lock poisoned: {e}")))?;
            script.choose_calls += 1;
            script
                .choices
                .get_mut(&request.kind)
                .and_then(VecDeque::pop_front)
        };
        match next {
            Some(reply) => reply,
            None => self.fallback(request),
        }
    }

    async fn speak(&self, ctx: &ActorContext, _hint: &str) -> Result<String, OracleError> {
        let mut script = self
            .script
            .lock()
            .map_err(|e| OracleError::Transport(format!("script lock poisoned: {e}")))?;
        script.speak_calls += 1;
        match script.speeches.pop_front() {
            Some(reply) => reply,
            None if self.policy == ExhaustedPolicy::Fail => Err(OracleError::Malformed(
                "speech script exhausted".into(),
            )),
            None => Ok(format!("{} has nothing to add.", ctx.name)),
        }
    }
}
