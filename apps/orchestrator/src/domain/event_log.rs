//! Append-only narration log with per-entry visibility.

use serde::Serialize;

use crate::domain::roles::Faction;
use crate::domain::roster::{Player, PlayerId};
use crate::domain::state::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "who", rename_all = "snake_case")]
pub enum Visibility {
    Public,
    /// Only the named player (seer results, witch prompts).
    Player(PlayerId),
    /// Every member of a faction (wolf deliberation).
    Faction(Faction),
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub seq: u64,
    pub day: u32,
    pub phase: Phase,
    pub text: String,
    pub visibility: Visibility,
}

impl LogEntry {
    /// `None` viewer is a spectator and only sees public lines.
    pub fn visible_to(&self, viewer: Option<&Player>) -> bool {
        match (self.visibility, viewer) {
            (Visibility::Public, _) => true,
            (Visibility::Player(id), Some(p)) => p.id == id,
            (Visibility::Faction(f), Some(p)) => p.faction() == f,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: u32, phase: Phase, visibility: Visibility, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!(day, ?phase, ?visibility, %text, "log");
        self.entries.push(LogEntry {
            seq: self.next_seq,
            day,
            phase,
            text,
            visibility,
        });
        self.next_seq += 1;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent `window` entries the viewer may see, oldest first.
    pub fn recent_visible<'a>(&'a self, viewer: Option<&Player>, window: usize) -> Vec<&'a LogEntry> {
        let mut out: Vec<&LogEntry> = self
            .entries
            .iter()
            .rev()
            .filter(|e| e.visible_to(viewer))
            .take(window)
            .collect();
        out.reverse();
        out
    }
}
