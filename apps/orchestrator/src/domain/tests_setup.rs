//! Setup validation and deterministic dealing.

use crate::config::GameConfig;
use crate::domain::roles::Role;
use crate::domain::setup::{build_state, standard_deck, GameSetup, PlayerSetup};
use crate::domain::state::{Phase, Step};
use crate::errors::ErrorCode;

const NAMES: [&str; 9] = ["Ada", "Bram", "Cleo", "Dov", "Esme", "Finn", "Gus", "Hana", "Ivo"];

fn bots(n: usize) -> Vec<PlayerSetup> {
    NAMES[..n]
        .iter()
        .map(|name| PlayerSetup::new(*name).with_oracle("bot"))
        .collect()
}

fn known(key: &str) -> bool {
    key == "bot"
}

fn setup_of(players: Vec<PlayerSetup>) -> GameSetup {
    GameSetup {
        players,
        seed: Some(7),
        ..GameSetup::default()
    }
}

fn rejected(setup: GameSetup) -> ErrorCode {
    build_state(setup, known).map(|_| ()).unwrap_err().code()
}

#[test]
fn standard_six_deals_the_standard_deck() {
    let state = build_state(setup_of(bots(6)), known).unwrap();
    let mut dealt: Vec<Role> = state.roster().players().iter().map(|p| p.role).collect();
    let mut deck = standard_deck(6).unwrap();
    dealt.sort();
    deck.sort();
    assert_eq!(dealt, deck);
    assert_eq!(state.day(), 1);
    assert_eq!((state.phase(), state.step()), (Phase::Night, Step::NightFall));
    assert!(state.pending_action().is_none());
}

#[test]
fn same_seed_deals_the_same_roles() {
    let a = build_state(setup_of(bots(9)), known).unwrap();
    let b = build_state(setup_of(bots(9)), known).unwrap();
    let roles = |s: &crate::domain::state::GameState| {
        s.roster().players().iter().map(|p| p.role).collect::<Vec<_>>()
    };
    assert_eq!(roles(&a), roles(&b));
}

#[test]
fn explicit_roles_are_kept_in_seat_order() {
    let roles = [
        Role::Seer,
        Role::Werewolf,
        Role::Villager,
        Role::Werewolf,
        Role::Witch,
        Role::Villager,
    ];
    let players = bots(6)
        .into_iter()
        .zip(roles)
        .map(|(p, r)| p.with_role(r))
        .collect();
    let state = build_state(setup_of(players), known).unwrap();
    let dealt: Vec<Role> = state.roster().players().iter().map(|p| p.role).collect();
    assert_eq!(dealt, roles);
}

#[test]
fn partial_role_assignment_is_rejected() {
    let mut players = bots(6);
    players[0] = players[0].clone().with_role(Role::Seer);
    assert_eq!(rejected(setup_of(players)), ErrorCode::MixedRoleAssignment);
}

#[test]
fn unsupported_table_without_deck_is_rejected() {
    assert_eq!(rejected(setup_of(bots(7))), ErrorCode::UnsupportedPlayerCount);
}

#[test]
fn deck_size_must_match_the_table() {
    let mut setup = setup_of(bots(6));
    setup.deck = Some(vec![Role::Werewolf, Role::Villager, Role::Villager]);
    assert_eq!(rejected(setup), ErrorCode::RoleCountMismatch);
}

#[test]
fn unique_roles_may_not_repeat() {
    let mut setup = setup_of(bots(6));
    setup.deck = Some(vec![
        Role::Werewolf,
        Role::Werewolf,
        Role::Seer,
        Role::Seer,
        Role::Villager,
        Role::Villager,
    ]);
    assert_eq!(rejected(setup), ErrorCode::DuplicateUniqueRole);
}

#[test]
fn wolves_must_start_outnumbered() {
    let mut setup = setup_of(bots(6));
    setup.deck = Some(vec![
        Role::Werewolf,
        Role::Werewolf,
        Role::Werewolf,
        Role::Villager,
        Role::Villager,
        Role::Seer,
    ]);
    assert_eq!(rejected(setup), ErrorCode::UnbalancedFactions);

    let mut setup = setup_of(bots(6));
    setup.deck = Some(vec![Role::Villager; 6]);
    assert_eq!(rejected(setup), ErrorCode::UnbalancedFactions);
}

#[test]
fn names_must_be_present_and_distinct() {
    let mut players = bots(6);
    players[2].name = "  ".into();
    assert_eq!(rejected(setup_of(players)), ErrorCode::InvalidPlayerName);

    let mut players = bots(6);
    players[3].name = "ada".into();
    assert_eq!(rejected(setup_of(players)), ErrorCode::InvalidPlayerName);
}

#[test]
fn every_bot_seat_needs_a_known_oracle() {
    let mut players = bots(6);
    players[1].oracle = None;
    assert_eq!(rejected(setup_of(players)), ErrorCode::MissingOracle);

    let mut players = bots(6);
    players[1].oracle = Some("nobody".into());
    assert_eq!(rejected(setup_of(players)), ErrorCode::UnknownOracle);
}

#[test]
fn human_seat_needs_no_oracle_but_must_exist() {
    let mut players = bots(6);
    players[0].oracle = None;
    let mut setup = setup_of(players);
    setup.human_seat = Some(0);
    let state = build_state(setup.clone(), known).unwrap();
    assert_eq!(state.roster().human(), Some(0));
    assert!(state.roster().get(0).unwrap().oracle.is_none());

    setup.human_seat = Some(6);
    assert_eq!(rejected(setup), ErrorCode::InvalidHumanSeat);
}

#[test]
fn invalid_config_is_rejected() {
    let mut setup = setup_of(bots(6));
    setup.config = GameConfig {
        max_iterations: 0,
        ..GameConfig::default()
    };
    assert_eq!(rejected(setup), ErrorCode::ConfigError);
}
