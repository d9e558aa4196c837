//! Player identity, role, liveness, and per-player flags.
//!
//! Players are never removed; elimination flips `alive` and records a
//! [`DeathRecord`]. Mutators are crate-private so only ability resolution,
//! vote resolution, retaliation, and self-destruct can change liveness.

use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};

use crate::domain::roles::{Faction, Role};
use crate::errors::domain::{GameError, RuleViolation};

/// Ordinal seat, 0-based. Rendered as `P1..Pn`.
pub type PlayerId = u8;

/// Render a seat as its public tag (`0 -> "P1"`).
pub fn player_tag(id: PlayerId) -> String {
    format!("P{}", u16::from(id) + 1)
}

/// Parse a public tag (`"p3"`, `"P3"`) back into a seat.
pub fn parse_player_tag(tag: &str) -> Option<PlayerId> {
    let (_, digits) = regex_captures!(r"^[Pp](\d{1,3})$", tag.trim())?;
    let n: u16 = digits.parse().ok()?;
    if n == 0 {
        return None;
    }
    PlayerId::try_from(n - 1).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    WolfKill,
    Poison,
    Exile,
    Retaliation,
    SelfDestruct,
}

impl DeathCause {
    /// Poison is the only death that voids the hunter's shot.
    pub const fn enables_retaliation(self) -> bool {
        !matches!(self, DeathCause::Poison)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DeathCause::WolfKill => "wolf_kill",
            DeathCause::Poison => "poison",
            DeathCause::Exile => "vote",
            DeathCause::Retaliation => "retaliation",
            DeathCause::SelfDestruct => "self_destruct",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub day: u32,
    pub cause: DeathCause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFlags {
    /// Idiot reveal used; publicly known but still alive.
    pub revealed: bool,
    pub can_vote: bool,
    pub retaliation_pending: bool,
    pub death: Option<DeathRecord>,
}

impl Default for PlayerFlags {
    fn default() -> Self {
        Self {
            revealed: false,
            can_vote: true,
            retaliation_pending: false,
            death: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub alive: bool,
    pub is_human: bool,
    /// Oracle key for non-human seats.
    pub oracle: Option<String>,
    pub flags: PlayerFlags,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            alive: true,
            is_human: false,
            oracle: None,
            flags: PlayerFlags::default(),
        }
    }

    pub fn tag(&self) -> String {
        player_tag(self.id)
    }

    /// `P3 (Mara)`
    pub fn display(&self) -> String {
        format!("{} ({})", self.tag(), self.name)
    }

    pub fn faction(&self) -> Faction {
        self.role.faction()
    }
}

/// Ordered roster; index equals `PlayerId`.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Ids are reassigned to match positions.
    pub fn new(mut players: Vec<Player>) -> Self {
        for (idx, p) in players.iter_mut().enumerate() {
            p.id = idx as PlayerId;
        }
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn require(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.get(id).ok_or_else(|| {
            GameError::rule(
                RuleViolation::PlayerNotFound,
                format!("no player {}", player_tag(id)),
            )
        })
    }

    /// Like [`require`](Self::require) but also insists the player is alive.
    pub fn require_living(&self, id: PlayerId) -> Result<&Player, GameError> {
        let p = self.require(id)?;
        if !p.alive {
            return Err(GameError::rule(
                RuleViolation::TargetNotAlive,
                format!("{} is dead", p.tag()),
            ));
        }
        Ok(p)
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.get(id).is_some_and(|p| p.alive)
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    pub fn living_ids(&self) -> Vec<PlayerId> {
        self.living().map(|p| p.id).collect()
    }

    pub fn living_with_role(&self, role: Role) -> Vec<PlayerId> {
        self.living().filter(|p| p.role == role).map(|p| p.id).collect()
    }

    pub fn first_living_with_role(&self, role: Role) -> Option<PlayerId> {
        self.living().find(|p| p.role == role).map(|p| p.id)
    }

    /// Living (wolves, others).
    pub fn living_counts(&self) -> (usize, usize) {
        self.living().fold((0, 0), |(w, o), p| {
            if p.role.is_wolf() {
                (w + 1, o)
            } else {
                (w, o + 1)
            }
        })
    }

    pub fn human(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.is_human).map(|p| p.id)
    }

    /// Dead players still holding an unresolved retaliation.
    pub fn pending_retaliators(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| !p.alive && p.flags.retaliation_pending)
            .map(|p| p.id)
            .collect()
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players.get_mut(id as usize).ok_or_else(|| {
            GameError::rule(
                RuleViolation::PlayerNotFound,
                format!("no player {}", player_tag(id)),
            )
        })
    }

    /// Kill a living player. A hunter dying by anything but poison gains a pending shot.
    pub(crate) fn eliminate(
        &mut self,
        id: PlayerId,
        day: u32,
        cause: DeathCause,
    ) -> Result<(), GameError> {
        let p = self.player_mut(id)?;
        if !p.alive {
            return Err(GameError::rule(
                RuleViolation::TargetNotAlive,
                format!("{} is already dead", p.tag()),
            ));
        }
        p.alive = false;
        p.flags.death = Some(DeathRecord { day, cause });
        if p.role == Role::Hunter && cause.enables_retaliation() {
            p.flags.retaliation_pending = true;
        }
        Ok(())
    }

    /// Idiot survives an exile once: revealed, no longer votes.
    pub(crate) fn reveal_idiot(&mut self, id: PlayerId) -> Result<(), GameError> {
        let p = self.player_mut(id)?;
        if p.role != Role::Idiot || p.flags.revealed {
            return Err(GameError::rule(
                RuleViolation::AbilityUsed,
                format!("{} cannot reveal", p.tag()),
            ));
        }
        p.flags.revealed = true;
        p.flags.can_vote = false;
        Ok(())
    }

    pub(crate) fn clear_retaliation(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.player_mut(id)?.flags.retaliation_pending = false;
        Ok(())
    }
}
