//! Decision requests: what an actor is asked, and what they answered.

use serde::Serialize;

use crate::domain::roster::PlayerId;
use crate::domain::state::Step;

/// Synthetic option id accepted wherever abstaining is allowed.
pub const ABSTAIN_ID: &str = "skip";
pub const EXPLODE_ID: &str = "explode";
pub const SAVE_ID: &str = "save";
pub const RUN_ID: &str = "run";
pub const STAY_ID: &str = "stay";
pub const WITHDRAW_ID: &str = "withdraw";
pub const SPEAK_ID: &str = "speak";
pub const DONE_ID: &str = "done";
pub const FORWARD_ID: &str = "forward";
pub const REVERSE_ID: &str = "reverse";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    WolfKill,
    SeerCheck,
    WitchRemedy,
    WitchPoison,
    Retaliation,
    SheriffSignup,
    SheriffSpeech,
    SheriffVote,
    SpeechOrder,
    DaySpeech,
    ExileVote,
    LastWords,
}

impl DecisionKind {
    /// The step during which this decision is asked.
    pub const fn step(self) -> Step {
        match self {
            DecisionKind::WolfKill => Step::WolfKill,
            DecisionKind::SeerCheck => Step::SeerCheck,
            DecisionKind::WitchRemedy => Step::WitchRemedy,
            DecisionKind::WitchPoison => Step::WitchPoison,
            DecisionKind::Retaliation => Step::Retaliation,
            DecisionKind::SheriffSignup
            | DecisionKind::SheriffSpeech
            | DecisionKind::SheriffVote => Step::Election,
            DecisionKind::SpeechOrder => Step::SpeechOrder,
            DecisionKind::DaySpeech => Step::Speech,
            DecisionKind::ExileVote => Step::Vote,
            DecisionKind::LastWords => Step::LastWords,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DecisionKind::WolfKill => "wolf_kill",
            DecisionKind::SeerCheck => "seer_check",
            DecisionKind::WitchRemedy => "witch_remedy",
            DecisionKind::WitchPoison => "witch_poison",
            DecisionKind::Retaliation => "retaliation",
            DecisionKind::SheriffSignup => "sheriff_signup",
            DecisionKind::SheriffSpeech => "sheriff_speech",
            DecisionKind::SheriffVote => "sheriff_vote",
            DecisionKind::SpeechOrder => "speech_order",
            DecisionKind::DaySpeech => "day_speech",
            DecisionKind::ExileVote => "exile_vote",
            DecisionKind::LastWords => "last_words",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOption {
    pub id: String,
    pub label: String,
}

impl ActionOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A question put to one actor. Stored on the game while the actor is the human slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAction {
    pub kind: DecisionKind,
    pub actor: PlayerId,
    pub prompt: String,
    pub options: Vec<ActionOption>,
    pub allow_abstain: bool,
    pub allow_free_text: bool,
}

impl PendingAction {
    pub fn new(kind: DecisionKind, actor: PlayerId, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            actor,
            prompt: prompt.into(),
            options: Vec::new(),
            allow_abstain: false,
            allow_free_text: false,
        }
    }

    pub fn with_options(mut self, options: Vec<ActionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn abstainable(mut self) -> Self {
        self.allow_abstain = true;
        self
    }

    pub fn with_free_text(mut self) -> Self {
        self.allow_free_text = true;
        self
    }

    /// Options as offered to a client, with the abstain id appended when allowed.
    pub fn offered(&self) -> Vec<ActionOption> {
        let mut out = self.options.clone();
        if self.allow_abstain {
            out.push(ActionOption::new(ABSTAIN_ID, "Skip"));
        }
        out
    }

    pub fn option(&self, id: &str) -> Option<&ActionOption> {
        self.options.iter().find(|o| o.id.eq_ignore_ascii_case(id))
    }

    /// Map a raw id to a choice, or `None` if it is not on offer.
    pub fn accept(&self, id: &str) -> Option<Choice> {
        let id = id.trim();
        if self.allow_abstain && id.eq_ignore_ascii_case(ABSTAIN_ID) {
            return Some(Choice::Abstain);
        }
        self.option(id).map(|o| Choice::Pick(o.id.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Pick(String),
    Abstain,
}

impl Choice {
    pub fn is(&self, id: &str) -> bool {
        matches!(self, Choice::Pick(picked) if picked == id)
    }
}

/// An answer ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub choice: Choice,
    pub text: Option<String>,
}

impl Reply {
    pub fn pick(id: impl Into<String>) -> Self {
        Self {
            choice: Choice::Pick(id.into()),
            text: None,
        }
    }

    pub fn abstain() -> Self {
        Self {
            choice: Choice::Abstain,
            text: None,
        }
    }

    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }
}

/// Trim, drop empties, and cap at `max_len` characters.
pub fn normalize_text(text: Option<&str>, max_len: usize) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let capped: String = trimmed.chars().take(max_len).collect();
    (!capped.is_empty()).then_some(capped)
}
