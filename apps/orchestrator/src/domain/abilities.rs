//! Role ability rules: candidate lists and the enforcing mutators.
//!
//! Candidate functions decide what an actor is offered; `apply_*` functions
//! re-check the same rules before mutating so a bad id can never slip through.

use crate::domain::roles::Role;
use crate::domain::roster::{player_tag, DeathCause, PlayerId, Roster};
use crate::domain::state::{NightMemory, WitchPotions};
use crate::errors::domain::{GameError, RuleViolation};

fn require_role(roster: &Roster, actor: PlayerId, role: Role) -> Result<(), GameError> {
    let p = roster.require(actor)?;
    if p.role != role {
        return Err(GameError::rule(
            RuleViolation::WrongRole,
            format!("{} is not the {}", p.tag(), role),
        ));
    }
    Ok(())
}

fn reject_self(actor: PlayerId, target: PlayerId) -> Result<(), GameError> {
    if actor == target {
        return Err(GameError::rule(
            RuleViolation::SelfTarget,
            format!("{} may not target themselves here", player_tag(actor)),
        ));
    }
    Ok(())
}

/// Living non-wolves.
pub fn wolf_kill_candidates(roster: &Roster) -> Vec<PlayerId> {
    roster
        .living()
        .filter(|p| !p.role.is_wolf())
        .map(|p| p.id)
        .collect()
}

pub fn record_wolf_vote(
    roster: &Roster,
    night: &mut NightMemory,
    wolf: PlayerId,
    target: PlayerId,
) -> Result<(), GameError> {
    require_role(roster, wolf, Role::Werewolf)?;
    roster.require_living(wolf)?;
    if !wolf_kill_candidates(roster).contains(&target) {
        return Err(GameError::rule(
            RuleViolation::TargetNotAlive,
            format!("{} is not a valid kill target", player_tag(target)),
        ));
    }
    night.wolf_votes.insert(wolf, target);
    Ok(())
}

/// Anyone alive except the seer.
pub fn inspect_candidates(roster: &Roster, seer: PlayerId) -> Vec<PlayerId> {
    roster.living().filter(|p| p.id != seer).map(|p| p.id).collect()
}

/// Returns the target's true role.
pub fn inspect(roster: &Roster, seer: PlayerId, target: PlayerId) -> Result<Role, GameError> {
    require_role(roster, seer, Role::Seer)?;
    roster.require_living(seer)?;
    reject_self(seer, target)?;
    Ok(roster.require_living(target)?.role)
}

/// Remedy is offered only with an unused potion and a kill target that is not the witch.
pub fn remedy_target(
    roster: &Roster,
    potions: WitchPotions,
    night: &NightMemory,
    witch: PlayerId,
) -> Option<PlayerId> {
    if potions.remedy_used || !roster.is_alive(witch) {
        return None;
    }
    night
        .wolf_target
        .filter(|&t| t != witch && roster.is_alive(t))
}

pub fn apply_remedy(
    roster: &Roster,
    potions: &mut WitchPotions,
    night: &mut NightMemory,
    witch: PlayerId,
) -> Result<PlayerId, GameError> {
    require_role(roster, witch, Role::Witch)?;
    roster.require_living(witch)?;
    if potions.remedy_used {
        return Err(GameError::rule(
            RuleViolation::AbilityUsed,
            "the remedy has already been used",
        ));
    }
    let target = night
        .wolf_target
        .ok_or_else(|| GameError::rule(RuleViolation::NoKillTarget, "nobody was attacked"))?;
    reject_self(witch, target)?;
    roster.require_living(target)?;
    potions.remedy_used = true;
    night.saved_tonight = true;
    Ok(target)
}

/// Anyone alive except the witch, the wolves' victim included.
pub fn poison_candidates(roster: &Roster, witch: PlayerId) -> Vec<PlayerId> {
    roster.living().filter(|p| p.id != witch).map(|p| p.id).collect()
}

pub fn apply_poison(
    roster: &Roster,
    potions: &mut WitchPotions,
    night: &mut NightMemory,
    witch: PlayerId,
    target: PlayerId,
) -> Result<(), GameError> {
    require_role(roster, witch, Role::Witch)?;
    roster.require_living(witch)?;
    if potions.poison_used {
        return Err(GameError::rule(
            RuleViolation::AbilityUsed,
            "the poison has already been used",
        ));
    }
    reject_self(witch, target)?;
    roster.require_living(target)?;
    potions.poison_used = true;
    night.poisoned_tonight = Some(target);
    Ok(())
}

/// Anyone alive other than the shooter.
pub fn retaliation_candidates(roster: &Roster, hunter: PlayerId) -> Vec<PlayerId> {
    roster.living().filter(|p| p.id != hunter).map(|p| p.id).collect()
}

/// Spend a pending shot. Remedy and poison never interact with it.
pub fn apply_retaliation(
    roster: &mut Roster,
    hunter: PlayerId,
    target: PlayerId,
    day: u32,
) -> Result<(), GameError> {
    let shooter = roster.require(hunter)?;
    if !shooter.flags.retaliation_pending {
        return Err(GameError::rule(
            RuleViolation::AbilityUsed,
            format!("{} has no shot to take", shooter.tag()),
        ));
    }
    reject_self(hunter, target)?;
    roster.require_living(target)?;
    roster.eliminate(target, day, DeathCause::Retaliation)?;
    roster.clear_retaliation(hunter)
}

/// Anyone alive other than the voter.
pub fn exile_candidates(roster: &Roster, voter: PlayerId) -> Vec<PlayerId> {
    roster.living().filter(|p| p.id != voter).map(|p| p.id).collect()
}

/// Outcome of a day exile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExileOutcome {
    Killed,
    /// Idiot survived and lost the vote.
    Revealed,
}

pub fn apply_exile(roster: &mut Roster, target: PlayerId, day: u32) -> Result<ExileOutcome, GameError> {
    let p = roster.require_living(target)?;
    if p.role == Role::Idiot && !p.flags.revealed {
        roster.reveal_idiot(target)?;
        return Ok(ExileOutcome::Revealed);
    }
    roster.eliminate(target, day, DeathCause::Exile)?;
    Ok(ExileOutcome::Killed)
}

/// A living wolf removes itself.
pub fn apply_self_destruct(roster: &mut Roster, wolf: PlayerId, day: u32) -> Result<(), GameError> {
    require_role(roster, wolf, Role::Werewolf)?;
    roster.eliminate(wolf, day, DeathCause::SelfDestruct)
}
