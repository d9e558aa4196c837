//! Step transition table and step-entry bookkeeping.

use tracing::{debug, info};

use crate::domain::roster::PlayerId;
use crate::domain::state::{ActorQueue, GameState, Phase, Step};
use crate::errors::domain::GameError;

/// `(phase, step) -> (phase, step)` successor for every step that completes normally.
///
/// Day-to-night crossings advance the day counter in [`enter`].
static TRANSITIONS: &[((Phase, Step), (Phase, Step))] = &[
    ((Phase::Night, Step::NightFall), (Phase::Night, Step::WolfKill)),
    ((Phase::Night, Step::WolfKill), (Phase::Night, Step::SeerCheck)),
    ((Phase::Night, Step::SeerCheck), (Phase::Night, Step::WitchRemedy)),
    ((Phase::Night, Step::WitchRemedy), (Phase::Night, Step::WitchPoison)),
    ((Phase::Night, Step::WitchPoison), (Phase::Night, Step::NightSettle)),
    ((Phase::Night, Step::NightSettle), (Phase::Night, Step::Retaliation)),
    ((Phase::Night, Step::Retaliation), (Phase::Day, Step::DayBreak)),
    ((Phase::Day, Step::DayBreak), (Phase::Day, Step::Election)),
    ((Phase::Day, Step::Election), (Phase::Day, Step::SpeechOrder)),
    ((Phase::Day, Step::SpeechOrder), (Phase::Day, Step::Speech)),
    ((Phase::Day, Step::Speech), (Phase::Day, Step::Vote)),
    ((Phase::Day, Step::Vote), (Phase::Day, Step::LastWords)),
    ((Phase::Day, Step::LastWords), (Phase::Day, Step::Retaliation)),
    ((Phase::Day, Step::Retaliation), (Phase::Night, Step::NightFall)),
];

pub fn successor(phase: Phase, step: Step) -> Option<(Phase, Step)> {
    TRANSITIONS
        .iter()
        .find(|(from, _)| *from == (phase, step))
        .map(|(_, to)| *to)
}

/// Move to the successor of the current step.
pub(super) fn complete(state: &mut GameState) -> Result<(), GameError> {
    let (phase, step) = successor(state.phase, state.step).ok_or_else(|| {
        GameError::internal(format!(
            "no successor for {:?}/{:?}",
            state.phase, state.step
        ))
    })?;
    enter(state, phase, step);
    Ok(())
}

/// Enter `(phase, step)`, dropping the previous step's turn queue.
pub(super) fn enter(state: &mut GameState, phase: Phase, step: Step) {
    if state.phase == Phase::Day && phase == Phase::Night {
        state.day += 1;
    }
    if state.phase != phase {
        info!(day = state.day, ?phase, "phase change");
    }
    state.phase = phase;
    state.step = step;
    state.turns = None;
    debug!(day = state.day, ?phase, ?step, "enter step");
}

/// Build the step's turn queue on first visit.
pub(super) fn ensure_turns<F>(state: &mut GameState, build: F)
where
    F: FnOnce(&GameState) -> Vec<PlayerId>,
{
    if state.turns.is_none() {
        let order = build(state);
        state.turns = Some(ActorQueue::new(order));
    }
}

/// Skip the current actor without a decision.
pub(super) fn pass_turn(state: &mut GameState) {
    if let Some(queue) = state.turns.as_mut() {
        queue.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_but_none_has_a_successor() {
        let night = [
            Step::NightFall,
            Step::WolfKill,
            Step::SeerCheck,
            Step::WitchRemedy,
            Step::WitchPoison,
            Step::NightSettle,
            Step::Retaliation,
        ];
        let day = [
            Step::DayBreak,
            Step::Election,
            Step::SpeechOrder,
            Step::Speech,
            Step::Vote,
            Step::LastWords,
            Step::Retaliation,
        ];
        for s in night {
            assert!(successor(Phase::Night, s).is_some(), "night {s:?}");
        }
        for s in day {
            assert!(successor(Phase::Day, s).is_some(), "day {s:?}");
        }
        assert_eq!(successor(Phase::Night, Step::Vote), None);
    }

    #[test]
    fn cycle_returns_to_nightfall() {
        let mut at = (Phase::Night, Step::NightFall);
        let mut hops = 0;
        loop {
            at = successor(at.0, at.1).unwrap();
            hops += 1;
            if at == (Phase::Night, Step::NightFall) {
                break;
            }
            assert!(hops < 20, "transition table does not cycle");
        }
        assert_eq!(hops, TRANSITIONS.len());
    }

    #[test]
    fn retaliation_follows_settlement_and_last_words() {
        assert_eq!(
            successor(Phase::Night, Step::NightSettle),
            Some((Phase::Night, Step::Retaliation))
        );
        assert_eq!(
            successor(Phase::Day, Step::LastWords),
            Some((Phase::Day, Step::Retaliation))
        );
    }
}
