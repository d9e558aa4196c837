//! Test-only builders for rosters and game states.

use crate::config::GameConfig;
use crate::domain::roles::Role;
use crate::domain::roster::{Player, PlayerId, Roster};
use crate::domain::state::GameState;

const NAMES: [&str; 12] = [
    "Ada", "Bram", "Cleo", "Dov", "Esme", "Finn", "Gus", "Hana", "Ivo", "Jun", "Kai", "Lena",
];

/// One player per role, seated in order, named from a fixed list.
pub fn roster_of(roles: &[Role]) -> Roster {
    let players = roles
        .iter()
        .enumerate()
        .map(|(i, &role)| Player::new(i as PlayerId, NAMES[i % NAMES.len()], role))
        .collect();
    Roster::new(players)
}

/// Fresh state with the default config and no sheriff election.
pub fn state_of(roles: &[Role], seed: u64) -> GameState {
    let config = GameConfig {
        sheriff_election: false,
        ..GameConfig::default()
    };
    GameState::new(roster_of(roles), config, seed)
}

/// The six-seat table used across unit tests:
/// P1 wolf, P2 wolf, P3 villager, P4 seer, P5 witch, P6 hunter.
pub fn six_seat() -> Vec<Role> {
    vec![
        Role::Werewolf,
        Role::Werewolf,
        Role::Villager,
        Role::Seer,
        Role::Witch,
        Role::Hunter,
    ]
}
