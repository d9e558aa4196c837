use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::GameConfig;
use crate::domain::decision::PendingAction;
use crate::domain::election::SheriffState;
use crate::domain::event_log::{EventLog, Visibility};
use crate::domain::roles::Faction;
use crate::domain::roster::{PlayerId, Roster};

/// Alternating halves of a game day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Night,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Running,
    Ended,
}

/// Phase-scoped steps. `Retaliation` appears in both phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    NightFall,
    WolfKill,
    SeerCheck,
    WitchRemedy,
    WitchPoison,
    NightSettle,
    Retaliation,
    DayBreak,
    Election,
    SpeechOrder,
    Speech,
    Vote,
    LastWords,
}

/// Actors of a multi-actor step, in turn order, with a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActorQueue {
    order: Vec<PlayerId>,
    cursor: usize,
}

impl ActorQueue {
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self { order, cursor: 0 }
    }

    pub fn current(&self) -> Option<PlayerId> {
        self.order.get(self.cursor).copied()
    }

    pub fn advance(&mut self) {
        if self.cursor < self.order.len() {
            self.cursor += 1;
        }
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }
}

/// Night scratch, reset at nightfall.
#[derive(Debug, Clone, Default)]
pub struct NightMemory {
    pub wolf_votes: BTreeMap<PlayerId, PlayerId>,
    pub wolf_target: Option<PlayerId>,
    pub seer_target: Option<PlayerId>,
    pub saved_tonight: bool,
    pub poisoned_tonight: Option<PlayerId>,
}

/// Day scratch, reset at nightfall.
#[derive(Debug, Clone, Default)]
pub struct DayMemory {
    /// Deaths announced at dawn, in kill order.
    pub dawn_victims: Vec<PlayerId>,
    pub reverse_order: bool,
    pub ballots: BTreeMap<PlayerId, PlayerId>,
    pub exiled: Option<PlayerId>,
    /// A wolf self-destructed; the rest of the day is skipped.
    pub cut_short: bool,
}

/// Lifetime one-shot potions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WitchPotions {
    pub remedy_used: bool,
    pub poison_used: bool,
}

/// Complete state of a single game. Owned by the caller and threaded through
/// every scheduler call.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) day: u32,
    pub(crate) phase: Phase,
    pub(crate) step: Step,
    pub(crate) status: Status,
    pub(crate) winner: Option<Faction>,
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) log: EventLog,
    pub(crate) roster: Roster,
    pub(crate) night: NightMemory,
    pub(crate) day_memory: DayMemory,
    pub(crate) sheriff: SheriffState,
    pub(crate) potions: WitchPotions,
    /// Turn queue of the step in progress; rebuilt on step entry.
    pub(crate) turns: Option<ActorQueue>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) seed: u64,
    pub(crate) config: GameConfig,
}

impl GameState {
    /// Fresh game at night 1, before any step has run.
    pub fn new(roster: Roster, config: GameConfig, seed: u64) -> Self {
        let sheriff = SheriffState::new(config.sheriff_election);
        Self {
            day: 1,
            phase: Phase::Night,
            step: Step::NightFall,
            status: Status::Running,
            winner: None,
            pending_action: None,
            log: EventLog::new(),
            roster,
            night: NightMemory::default(),
            day_memory: DayMemory::default(),
            sheriff,
            potions: WitchPotions::default(),
            turns: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            config,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn winner(&self) -> Option<Faction> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Ended
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending_action.as_ref()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn sheriff(&self) -> &SheriffState {
        &self.sheriff
    }

    pub fn potions(&self) -> WitchPotions {
        self.potions
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn night(&self) -> &NightMemory {
        &self.night
    }

    pub fn day_memory(&self) -> &DayMemory {
        &self.day_memory
    }

    /// Actor whose turn it is in the current step, if the step has actors.
    pub fn current_actor(&self) -> Option<PlayerId> {
        self.turns.as_ref().and_then(ActorQueue::current)
    }

    /// Append a line stamped with the current day and phase.
    pub(crate) fn narrate(&mut self, visibility: Visibility, text: impl Into<String>) {
        self.log.push(self.day, self.phase, visibility, text);
    }

    pub(crate) fn announce(&mut self, text: impl Into<String>) {
        self.narrate(Visibility::Public, text);
    }

    /// Halt permanently. Later calls observe `Ended` and do nothing.
    pub(crate) fn end_game(&mut self, winner: Faction) {
        self.status = Status::Ended;
        self.winner = Some(winner);
        self.pending_action = None;
        self.turns = None;
        let line = match winner {
            Faction::Good => "The village has rooted out every wolf. Good wins.",
            Faction::Wolves => "The wolves now match the village. Wolves win.",
        };
        self.announce(line);
        tracing::info!(day = self.day, winner = %winner, "game over");
    }
}
