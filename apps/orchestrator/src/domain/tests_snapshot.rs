//! Viewer-scoped snapshots never leak hidden roles or private log lines.

use crate::domain::decision::{ActionOption, DecisionKind, PendingAction};
use crate::domain::event_log::Visibility;
use crate::domain::roles::{Faction, Role};
use crate::domain::roster::DeathCause;
use crate::domain::snapshot::snapshot;
use crate::domain::test_state_helpers::{six_seat, state_of};

#[test]
fn spectator_sees_no_living_roles() {
    let state = state_of(&six_seat(), 1);
    let snap = snapshot(&state, None);
    assert!(snap.viewer.is_none());
    assert!(snap.players.iter().all(|p| p.role.is_none()));
}

#[test]
fn player_sees_own_role_and_the_dead() {
    let mut state = state_of(&six_seat(), 1);
    state.roster.eliminate(5, 1, DeathCause::WolfKill).unwrap();
    let snap = snapshot(&state, Some(3));
    assert_eq!(snap.viewer.as_deref(), Some("P4"));
    assert_eq!(snap.players[3].role, Some(Role::Seer));
    assert_eq!(snap.players[5].role, Some(Role::Hunter));
    assert_eq!(snap.players[0].role, None);
    assert_eq!(snap.players[4].role, None);
}

#[test]
fn revealed_idiot_is_public() {
    let mut state = state_of(
        &[Role::Werewolf, Role::Villager, Role::Idiot, Role::Villager],
        1,
    );
    state.roster.reveal_idiot(2).unwrap();
    let snap = snapshot(&state, Some(1));
    assert_eq!(snap.players[2].role, Some(Role::Idiot));
    assert!(!snap.players[2].can_vote);
}

#[test]
fn ended_game_shows_every_role() {
    let mut state = state_of(&six_seat(), 1);
    state.end_game(Faction::Good);
    let snap = snapshot(&state, None);
    assert!(snap.players.iter().all(|p| p.role.is_some()));
    assert_eq!(snap.winner, Some(Faction::Good));
}

#[test]
fn private_lines_reach_only_their_audience() {
    let mut state = state_of(&six_seat(), 1);
    state.announce("public line");
    state.narrate(Visibility::Faction(Faction::Wolves), "wolf line");
    state.narrate(Visibility::Player(3), "seer line");

    let texts = |viewer| {
        snapshot(&state, viewer)
            .log
            .into_iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
    };
    assert_eq!(texts(None), vec!["public line"]);
    assert_eq!(texts(Some(0)), vec!["public line", "wolf line"]);
    assert_eq!(texts(Some(3)), vec!["public line", "seer line"]);
    assert_eq!(texts(Some(2)), vec!["public line"]);
}

#[test]
fn log_is_windowed_to_the_newest_lines() {
    let mut state = state_of(&six_seat(), 1);
    state.config.log_window = 2;
    for i in 0..5 {
        state.announce(format!("line {i}"));
    }
    let log = snapshot(&state, None).log;
    let texts: Vec<_> = log.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["line 3", "line 4"]);
}

#[test]
fn pending_action_is_shown_only_to_its_actor() {
    let mut state = state_of(&six_seat(), 1);
    state.pending_action = Some(
        PendingAction::new(DecisionKind::WitchPoison, 4, "Poison someone?")
            .with_options(vec![ActionOption::new("P1", "Ada")])
            .abstainable(),
    );
    assert!(snapshot(&state, Some(0)).pending.is_none());
    assert!(snapshot(&state, None).pending.is_none());

    let pending = snapshot(&state, Some(4)).pending.unwrap();
    assert_eq!(pending.actor, "P5");
    let ids: Vec<_> = pending.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["P1", "skip"]);
}
