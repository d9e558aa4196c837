//! Night steps: nightfall, wolves, seer, witch, settlement.

use tracing::info;

use super::decisions::{display, player_options, target_of};
use super::steps::ensure_turns;
use super::{GameFlow, StepProgress};
use crate::domain::abilities;
use crate::domain::decision::{ActionOption, Choice, DecisionKind, PendingAction, SAVE_ID};
use crate::domain::event_log::Visibility;
use crate::domain::night as night_rules;
use crate::domain::roles::{Faction, Role};
use crate::domain::roster::PlayerId;
use crate::domain::state::{DayMemory, GameState, NightMemory};
use crate::domain::victory;
use crate::errors::domain::GameError;

const WOLVES: Visibility = Visibility::Faction(Faction::Wolves);

/// Leads every private inspection result; the log is the seer's only record.
pub(super) const VISION_PREFIX: &str = "Your vision: ";

pub(super) fn nightfall(state: &mut GameState) -> Result<StepProgress, GameError> {
    state.night = NightMemory::default();
    state.day_memory = DayMemory::default();
    let line = format!("Night {} falls. Everyone closes their eyes.", state.day);
    state.announce(line);
    info!(day = state.day, "night begins");
    Ok(StepProgress::Complete)
}

pub(super) async fn wolf_kill(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| s.roster.living_with_role(Role::Werewolf));
    if let Some(wolf) = state.current_actor() {
        let candidates = abilities::wolf_kill_candidates(&state.roster);
        let request = PendingAction::new(
            DecisionKind::WolfKill,
            wolf,
            "Wolves, choose tonight's victim.",
        )
        .with_options(player_options(&state.roster, &candidates))
        .abstainable();
        return flow.take_turn(state, request).await;
    }

    let target = night_rules::resolve_wolf_target(&state.night, &mut state.rng);
    state.night.wolf_target = target;
    let line = match target {
        Some(t) => format!("The pack settles on {}.", display(state, t)),
        None => "The pack kills nobody tonight.".to_string(),
    };
    state.narrate(WOLVES, line);
    Ok(StepProgress::Complete)
}

pub(super) fn apply_wolf_vote(
    state: &mut GameState,
    wolf: PlayerId,
    choice: &Choice,
) -> Result<(), GameError> {
    let line = match choice {
        Choice::Abstain => format!("{} abstains.", display(state, wolf)),
        Choice::Pick(_) => {
            let target = target_of(choice)?;
            abilities::record_wolf_vote(&state.roster, &mut state.night, wolf, target)?;
            format!("{} votes to kill {}.", display(state, wolf), display(state, target))
        }
    };
    state.narrate(WOLVES, line);
    Ok(())
}

pub(super) async fn seer_check(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| {
        s.roster.first_living_with_role(Role::Seer).into_iter().collect()
    });
    if let Some(seer) = state.current_actor() {
        let candidates = abilities::inspect_candidates(&state.roster, seer);
        let request = PendingAction::new(DecisionKind::SeerCheck, seer, "Seer, choose someone to inspect.")
            .with_options(player_options(&state.roster, &candidates));
        return flow.take_turn(state, request).await;
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply_inspection(
    state: &mut GameState,
    seer: PlayerId,
    choice: &Choice,
) -> Result<(), GameError> {
    let target = target_of(choice)?;
    let role = abilities::inspect(&state.roster, seer, target)?;
    state.night.seer_target = Some(target);
    let line = format!("{VISION_PREFIX}{} is {}.", display(state, target), role.with_article());
    state.narrate(Visibility::Player(seer), line);
    Ok(())
}

pub(super) async fn witch_remedy(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| {
        s.roster
            .first_living_with_role(Role::Witch)
            .filter(|&w| abilities::remedy_target(&s.roster, s.potions, &s.night, w).is_some())
            .into_iter()
            .collect()
    });
    if let Some(witch) = state.current_actor() {
        let Some(victim) = abilities::remedy_target(&state.roster, state.potions, &state.night, witch)
        else {
            super::steps::pass_turn(state);
            return Ok(StepProgress::Continue);
        };
        let name = display(state, victim);
        let request = PendingAction::new(
            DecisionKind::WitchRemedy,
            witch,
            format!("Witch, {name} was attacked tonight. Use your remedy?"),
        )
        .with_options(vec![ActionOption::new(SAVE_ID, format!("Save {name}"))])
        .abstainable();
        return flow.take_turn(state, request).await;
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply_remedy_choice(
    state: &mut GameState,
    witch: PlayerId,
    choice: &Choice,
) -> Result<(), GameError> {
    if !choice.is(SAVE_ID) {
        return Ok(());
    }
    let saved = abilities::apply_remedy(&state.roster, &mut state.potions, &mut state.night, witch)?;
    let line = format!("You used the remedy on {}.", display(state, saved));
    state.narrate(Visibility::Player(witch), line);
    Ok(())
}

pub(super) async fn witch_poison(flow: &GameFlow, state: &mut GameState) -> Result<StepProgress, GameError> {
    ensure_turns(state, |s| {
        s.roster
            .first_living_with_role(Role::Witch)
            .filter(|_| !s.potions.poison_used)
            .into_iter()
            .collect()
    });
    if let Some(witch) = state.current_actor() {
        let candidates = abilities::poison_candidates(&state.roster, witch);
        let request = PendingAction::new(DecisionKind::WitchPoison, witch, "Witch, poison someone?")
            .with_options(player_options(&state.roster, &candidates))
            .abstainable();
        return flow.take_turn(state, request).await;
    }
    Ok(StepProgress::Complete)
}

pub(super) fn apply_poison_choice(
    state: &mut GameState,
    witch: PlayerId,
    choice: &Choice,
) -> Result<(), GameError> {
    if *choice == Choice::Abstain {
        return Ok(());
    }
    let target = target_of(choice)?;
    abilities::apply_poison(&state.roster, &mut state.potions, &mut state.night, witch, target)?;
    let line = format!("You poisoned {}.", display(state, target));
    state.narrate(Visibility::Player(witch), line);
    Ok(())
}

/// Dawn settlement, then the win check.
pub(super) fn settle(state: &mut GameState) -> Result<StepProgress, GameError> {
    let victims = night_rules::settle(&mut state.roster, &state.night, state.day)?;
    if victims.is_empty() {
        state.announce("Dawn breaks on a peaceful night. Nobody died.");
    } else {
        let mut announced = victims.clone();
        announced.sort_unstable();
        for id in announced {
            let role = state.roster.require(id)?.role;
            let line = format!("{} was found dead. They were {}.", display(state, id), role.with_article());
            state.announce(line);
        }
    }
    info!(day = state.day, victims = victims.len(), "night settled");
    state.day_memory.dawn_victims = victims;

    if let Some(winner) = victory::evaluate(&state.roster) {
        state.end_game(winner);
        return Ok(StepProgress::Ended);
    }
    Ok(StepProgress::Complete)
}
