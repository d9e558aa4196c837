//! Game setup: validate an input roster and build the initial [`GameState`].
//!
//! Roles are either all given explicitly or all drawn from a deck (the
//! caller's, or the standard deck for the table size) shuffled with a seed
//! derived from the game seed. Every check runs before any state exists.

use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::domain::roles::Role;
use crate::domain::roster::{Player, PlayerId, Roster};
use crate::domain::seed_derivation::derive_deck_seed;
use crate::domain::state::GameState;
use crate::errors::domain::{GameError, SetupErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Oracle key; required for every seat except the human one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle: Option<String>,
}

impl PlayerSetup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            oracle: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_oracle(mut self, key: impl Into<String>) -> Self {
        self.oracle = Some(key.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSetup {
    pub players: Vec<PlayerSetup>,
    /// 0-based seat of the human slot; `None` for a fully automated table.
    #[serde(default)]
    pub human_seat: Option<usize>,
    /// Custom deck used when no explicit roles are given.
    #[serde(default)]
    pub deck: Option<Vec<Role>>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub config: GameConfig,
}

/// Standard decks by table size.
pub fn standard_deck(players: usize) -> Result<Vec<Role>, GameError> {
    use Role::*;
    let deck = match players {
        6 => vec![Werewolf, Werewolf, Villager, Villager, Seer, Witch],
        9 => vec![
            Werewolf, Werewolf, Werewolf, Villager, Villager, Seer, Witch, Hunter, Idiot,
        ],
        12 => vec![
            Werewolf, Werewolf, Werewolf, Werewolf, Villager, Villager, Villager, Villager, Seer,
            Witch, Hunter, Idiot,
        ],
        n => {
            return Err(GameError::setup(
                SetupErrorKind::UnsupportedPlayerCount,
                format!("no standard deck for {n} players (6, 9, or 12)"),
            ))
        }
    };
    Ok(deck)
}

fn role_counts(roles: &[Role]) -> BTreeMap<Role, usize> {
    let mut counts = BTreeMap::new();
    for &r in roles {
        *counts.entry(r).or_insert(0) += 1;
    }
    counts
}

/// Composition rules shared by explicit roles and decks.
fn validate_composition(roles: &[Role]) -> Result<(), GameError> {
    let counts = role_counts(roles);
    if let Some((role, n)) = counts.iter().find(|(r, n)| r.is_unique() && **n > 1) {
        return Err(GameError::setup(
            SetupErrorKind::DuplicateUniqueRole,
            format!("{role} appears {n} times"),
        ));
    }
    let wolves = counts.get(&Role::Werewolf).copied().unwrap_or(0);
    let others = roles.len() - wolves;
    if wolves == 0 || wolves >= others {
        return Err(GameError::setup(
            SetupErrorKind::UnbalancedFactions,
            format!("{wolves} wolves against {others} others"),
        ));
    }
    Ok(())
}

fn validate_names(players: &[PlayerSetup]) -> Result<(), GameError> {
    let mut seen = HashSet::new();
    for p in players {
        let name = p.name.trim();
        if name.is_empty() {
            return Err(GameError::setup(
                SetupErrorKind::InvalidPlayerName,
                "player names must not be empty",
            ));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(GameError::setup(
                SetupErrorKind::InvalidPlayerName,
                format!("duplicate player name '{name}'"),
            ));
        }
    }
    Ok(())
}

fn validate_oracles<F>(setup: &GameSetup, is_known: F) -> Result<(), GameError>
where
    F: Fn(&str) -> bool,
{
    for (seat, p) in setup.players.iter().enumerate() {
        if setup.human_seat == Some(seat) {
            continue;
        }
        let key = p.oracle.as_deref().ok_or_else(|| {
            GameError::setup(
                SetupErrorKind::MissingOracle,
                format!("seat {} ({}) has no oracle", seat + 1, p.name),
            )
        })?;
        if !is_known(key) {
            return Err(GameError::setup(
                SetupErrorKind::UnknownOracle,
                format!("oracle '{key}' is not registered"),
            ));
        }
    }
    Ok(())
}

/// Resolve final roles: explicit, or a seeded shuffle of the deck.
fn assign_roles(setup: &GameSetup, seed: u64) -> Result<Vec<Role>, GameError> {
    let n = setup.players.len();
    let explicit: Vec<Role> = setup.players.iter().filter_map(|p| p.role).collect();

    if !explicit.is_empty() && explicit.len() != n {
        return Err(GameError::setup(
            SetupErrorKind::MixedRoleAssignment,
            format!("{} of {n} players have roles; assign all or none", explicit.len()),
        ));
    }

    if explicit.len() == n {
        if let Some(deck) = &setup.deck {
            if role_counts(deck) != role_counts(&explicit) {
                return Err(GameError::setup(
                    SetupErrorKind::RoleCountMismatch,
                    "explicit roles do not match the deck",
                ));
            }
        }
        validate_composition(&explicit)?;
        return Ok(explicit);
    }

    let mut deck = match &setup.deck {
        Some(deck) => deck.clone(),
        None => standard_deck(n)?,
    };
    if deck.len() != n {
        return Err(GameError::setup(
            SetupErrorKind::RoleCountMismatch,
            format!("deck has {} roles for {n} players", deck.len()),
        ));
    }
    validate_composition(&deck)?;
    let mut rng = ChaCha8Rng::seed_from_u64(derive_deck_seed(seed));
    deck.shuffle(&mut rng);
    Ok(deck)
}

/// Validate `setup` and build the initial state.
///
/// `is_known_oracle` reports whether an oracle key is bound.
pub fn build_state<F>(setup: GameSetup, is_known_oracle: F) -> Result<GameState, GameError>
where
    F: Fn(&str) -> bool,
{
    if setup.players.is_empty() || setup.players.len() > usize::from(PlayerId::MAX) {
        return Err(GameError::setup(
            SetupErrorKind::UnsupportedPlayerCount,
            format!("{} players", setup.players.len()),
        ));
    }
    if let Some(seat) = setup.human_seat {
        if seat >= setup.players.len() {
            return Err(GameError::setup(
                SetupErrorKind::InvalidHumanSeat,
                format!("human seat {} outside a table of {}", seat + 1, setup.players.len()),
            ));
        }
    }
    setup.config.validate()?;
    validate_names(&setup.players)?;
    validate_oracles(&setup, is_known_oracle)?;

    let seed = setup.seed.unwrap_or_else(|| rand::rng().random());
    let roles = assign_roles(&setup, seed)?;

    let players = setup
        .players
        .into_iter()
        .zip(roles)
        .enumerate()
        .map(|(seat, (p, role))| {
            let mut player = Player::new(seat as PlayerId, p.name.trim(), role);
            player.is_human = setup.human_seat == Some(seat);
            player.oracle = if player.is_human { None } else { p.oracle };
            player
        })
        .collect();

    let state = GameState::new(Roster::new(players), setup.config, seed);
    tracing::info!(
        players = state.roster().len(),
        seed,
        human = ?setup.human_seat,
        "game created"
    );
    Ok(state)
}
