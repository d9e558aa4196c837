//! Ability rules and night settlement against a fixed six-seat table.

use crate::domain::abilities::{self, ExileOutcome};
use crate::domain::night::settle;
use crate::domain::roles::Role;
use crate::domain::roster::DeathCause;
use crate::domain::state::{NightMemory, WitchPotions};
use crate::domain::test_state_helpers::{roster_of, six_seat};
use crate::errors::domain::{GameError, RuleViolation};

fn rule_kind(err: GameError) -> RuleViolation {
    match err {
        GameError::Rule { kind, .. } => kind,
        other => panic!("expected a rule violation, got {other:?}"),
    }
}

#[test]
fn wolves_cannot_target_wolves_or_the_dead() {
    let mut roster = roster_of(&six_seat());
    roster.eliminate(2, 1, DeathCause::Exile).unwrap();
    assert_eq!(abilities::wolf_kill_candidates(&roster), vec![3, 4, 5]);

    let mut night = NightMemory::default();
    let err = abilities::record_wolf_vote(&roster, &mut night, 0, 1).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::TargetNotAlive);
    let err = abilities::record_wolf_vote(&roster, &mut night, 0, 2).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::TargetNotAlive);
    abilities::record_wolf_vote(&roster, &mut night, 0, 3).unwrap();
    assert_eq!(night.wolf_votes.get(&0), Some(&3));
}

#[test]
fn only_a_wolf_may_vote_to_kill() {
    let roster = roster_of(&six_seat());
    let mut night = NightMemory::default();
    let err = abilities::record_wolf_vote(&roster, &mut night, 3, 2).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::WrongRole);
}

#[test]
fn seer_sees_true_role_but_not_self() {
    let roster = roster_of(&six_seat());
    assert_eq!(abilities::inspect(&roster, 3, 0).unwrap(), Role::Werewolf);
    assert_eq!(abilities::inspect(&roster, 3, 5).unwrap(), Role::Hunter);
    let err = abilities::inspect(&roster, 3, 3).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::SelfTarget);
    assert!(!abilities::inspect_candidates(&roster, 3).contains(&3));
}

#[test]
fn remedy_is_not_offered_when_the_witch_is_the_victim() {
    let roster = roster_of(&six_seat());
    let night = NightMemory {
        wolf_target: Some(4),
        ..NightMemory::default()
    };
    assert_eq!(abilities::remedy_target(&roster, WitchPotions::default(), &night, 4), None);

    let mut potions = WitchPotions::default();
    let mut night = night;
    let err = abilities::apply_remedy(&roster, &mut potions, &mut night, 4).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::SelfTarget);
    assert!(!potions.remedy_used);
}

#[test]
fn remedy_needs_a_victim_and_works_once() {
    let roster = roster_of(&six_seat());
    let mut potions = WitchPotions::default();
    let mut night = NightMemory::default();
    let err = abilities::apply_remedy(&roster, &mut potions, &mut night, 4).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::NoKillTarget);

    night.wolf_target = Some(2);
    assert_eq!(abilities::apply_remedy(&roster, &mut potions, &mut night, 4).unwrap(), 2);
    assert!(potions.remedy_used);
    assert!(night.saved_tonight);

    let mut next_night = NightMemory {
        wolf_target: Some(3),
        ..NightMemory::default()
    };
    assert_eq!(abilities::remedy_target(&roster, potions, &next_night, 4), None);
    let err = abilities::apply_remedy(&roster, &mut potions, &mut next_night, 4).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::AbilityUsed);
}

#[test]
fn poison_is_one_shot_and_never_self() {
    let roster = roster_of(&six_seat());
    let mut potions = WitchPotions::default();
    let mut night = NightMemory::default();
    let err = abilities::apply_poison(&roster, &mut potions, &mut night, 4, 4).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::SelfTarget);

    abilities::apply_poison(&roster, &mut potions, &mut night, 4, 0).unwrap();
    assert_eq!(night.poisoned_tonight, Some(0));
    let err = abilities::apply_poison(&roster, &mut potions, &mut night, 4, 1).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::AbilityUsed);
}

#[test]
fn saved_victim_survives_settlement() {
    let mut roster = roster_of(&six_seat());
    let night = NightMemory {
        wolf_target: Some(2),
        saved_tonight: true,
        ..NightMemory::default()
    };
    assert!(settle(&mut roster, &night, 1).unwrap().is_empty());
    assert!(roster.is_alive(2));
}

#[test]
fn poison_on_the_wolf_victim_counts_as_poison() {
    let mut roster = roster_of(&six_seat());
    let night = NightMemory {
        wolf_target: Some(5),
        poisoned_tonight: Some(5),
        ..NightMemory::default()
    };
    assert_eq!(settle(&mut roster, &night, 1).unwrap(), vec![5]);
    let hunter = roster.get(5).unwrap();
    assert_eq!(hunter.flags.death.unwrap().cause, DeathCause::Poison);
    assert!(!hunter.flags.retaliation_pending);
}

#[test]
fn wolf_kill_and_poison_both_land() {
    let mut roster = roster_of(&six_seat());
    let night = NightMemory {
        wolf_target: Some(2),
        poisoned_tonight: Some(0),
        ..NightMemory::default()
    };
    assert_eq!(settle(&mut roster, &night, 1).unwrap(), vec![2, 0]);
    assert_eq!(roster.living_counts(), (1, 3));
}

#[test]
fn hunter_killed_by_wolves_may_shoot_once() {
    let mut roster = roster_of(&six_seat());
    let night = NightMemory {
        wolf_target: Some(5),
        ..NightMemory::default()
    };
    settle(&mut roster, &night, 1).unwrap();
    assert_eq!(roster.pending_retaliators(), vec![5]);
    assert!(!abilities::retaliation_candidates(&roster, 5).contains(&5));

    abilities::apply_retaliation(&mut roster, 5, 0, 1).unwrap();
    assert!(!roster.is_alive(0));
    assert_eq!(roster.get(0).unwrap().flags.death.unwrap().cause, DeathCause::Retaliation);
    assert!(roster.pending_retaliators().is_empty());

    let err = abilities::apply_retaliation(&mut roster, 5, 1, 1).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::AbilityUsed);
}

#[test]
fn idiot_survives_the_first_exile_only() {
    let mut roster = roster_of(&[
        Role::Werewolf,
        Role::Villager,
        Role::Villager,
        Role::Idiot,
    ]);
    assert_eq!(abilities::apply_exile(&mut roster, 3, 1).unwrap(), ExileOutcome::Revealed);
    let idiot = roster.get(3).unwrap();
    assert!(idiot.alive);
    assert!(idiot.flags.revealed);
    assert!(!idiot.flags.can_vote);

    assert_eq!(abilities::apply_exile(&mut roster, 3, 2).unwrap(), ExileOutcome::Killed);
    assert!(!roster.is_alive(3));
}

#[test]
fn self_destruct_is_wolves_only() {
    let mut roster = roster_of(&six_seat());
    let err = abilities::apply_self_destruct(&mut roster, 2, 1).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::WrongRole);
    abilities::apply_self_destruct(&mut roster, 1, 1).unwrap();
    assert_eq!(roster.get(1).unwrap().flags.death.unwrap().cause, DeathCause::SelfDestruct);
    let err = abilities::apply_self_destruct(&mut roster, 1, 1).unwrap_err();
    assert_eq!(rule_kind(err), RuleViolation::TargetNotAlive);
}
