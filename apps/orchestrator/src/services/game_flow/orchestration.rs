use tracing::{debug, warn};

use super::{day, election, night, retaliation, steps, AdvanceOutcome, GameFlow, StepProgress};
use crate::domain::setup::{self, GameSetup};
use crate::domain::state::{GameState, Phase, Step};
use crate::errors::domain::GameError;

impl GameFlow {
    /// Validate a setup against the bound oracles and deal the roles.
    pub fn new_game(&self, setup: GameSetup) -> Result<GameState, GameError> {
        setup::build_state(setup, |key| self.oracles.contains(key))
    }

    /// Run steps until the human must answer or the game ends.
    ///
    /// Each iteration either moves a turn cursor or changes step, so a game
    /// that exceeds `max_iterations` is stuck; that surfaces as
    /// [`GameError::Internal`] rather than a hang.
    ///
    /// An oracle failure leaves the state exactly as it was before the failed
    /// turn: calling `advance` again retries that turn.
    pub async fn advance(&self, state: &mut GameState) -> Result<AdvanceOutcome, GameError> {
        let limit = state.config.max_iterations;
        for _ in 0..limit {
            if state.is_over() {
                let winner = state
                    .winner
                    .ok_or_else(|| GameError::internal("game ended without a winner"))?;
                return Ok(AdvanceOutcome::Ended(winner));
            }
            if state.pending_action.is_some() {
                return Ok(AdvanceOutcome::AwaitingHuman);
            }

            match self.step_once(state).await? {
                StepProgress::Continue => {}
                StepProgress::Complete => steps::complete(state)?,
                StepProgress::JumpTo(phase, step) => steps::enter(state, phase, step),
                StepProgress::Suspended => return Ok(AdvanceOutcome::AwaitingHuman),
                StepProgress::Ended => {
                    let winner = state
                        .winner
                        .ok_or_else(|| GameError::internal("game ended without a winner"))?;
                    return Ok(AdvanceOutcome::Ended(winner));
                }
            }
        }

        warn!(
            day = state.day,
            step = ?state.step,
            limit,
            "step loop exceeded iteration limit"
        );
        Err(GameError::internal(format!(
            "game did not settle within {limit} iterations"
        )))
    }

    async fn step_once(&self, state: &mut GameState) -> Result<StepProgress, GameError> {
        if state.phase == Phase::Day && state.day_memory.cut_short {
            return day::after_self_destruct(state);
        }
        debug!(day = state.day, step = ?state.step, "step");
        match (state.phase, state.step) {
            (Phase::Night, Step::NightFall) => night::nightfall(state),
            (Phase::Night, Step::WolfKill) => night::wolf_kill(self, state).await,
            (Phase::Night, Step::SeerCheck) => night::seer_check(self, state).await,
            (Phase::Night, Step::WitchRemedy) => night::witch_remedy(self, state).await,
            (Phase::Night, Step::WitchPoison) => night::witch_poison(self, state).await,
            (Phase::Night, Step::NightSettle) => night::settle(state),
            (_, Step::Retaliation) => retaliation::resolve(self, state).await,
            (Phase::Day, Step::DayBreak) => day::daybreak(state),
            (Phase::Day, Step::Election) => election::run(self, state).await,
            (Phase::Day, Step::SpeechOrder) => day::speech_order(self, state).await,
            (Phase::Day, Step::Speech) => day::speech(self, state).await,
            (Phase::Day, Step::Vote) => day::vote(self, state).await,
            (Phase::Day, Step::LastWords) => day::last_words(self, state).await,
            (phase, step) => Err(GameError::internal(format!(
                "{step:?} does not run during {phase:?}"
            ))),
        }
    }
}
