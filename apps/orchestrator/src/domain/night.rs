//! Night resolution: the wolves' collective target and dawn settlement.

use rand::Rng;

use crate::domain::roster::{DeathCause, PlayerId, Roster};
use crate::domain::state::NightMemory;
use crate::domain::tally;
use crate::errors::domain::GameError;

/// Unweighted count of the wolves' ballots; ties break at random, no ballots means no kill.
pub fn resolve_wolf_target<R: Rng + ?Sized>(night: &NightMemory, rng: &mut R) -> Option<PlayerId> {
    tally::tally(&night.wolf_votes, |_| tally::NORMAL_WEIGHT, rng)
}

/// Apply the night's kills. Returns victims in kill order.
///
/// The wolves' victim dies unless saved. Poison always kills; when it lands on
/// the wolves' victim the death is recorded as poison.
pub fn settle(roster: &mut Roster, night: &NightMemory, day: u32) -> Result<Vec<PlayerId>, GameError> {
    let mut victims = Vec::new();
    if let Some(target) = night.wolf_target {
        let poisoned_too = night.poisoned_tonight == Some(target);
        if !night.saved_tonight && !poisoned_too && roster.is_alive(target) {
            roster.eliminate(target, day, DeathCause::WolfKill)?;
            victims.push(target);
        }
    }
    if let Some(target) = night.poisoned_tonight {
        if roster.is_alive(target) {
            roster.eliminate(target, day, DeathCause::Poison)?;
            victims.push(target);
        }
    }
    Ok(victims)
}
