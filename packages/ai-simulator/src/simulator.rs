//! In-memory game runner for oracle evaluation.
//!
//! Every seat is bound to a registered oracle factory, so a game runs to its
//! end inside a single `advance` call. Transient oracle failures are retried
//! the way the interactive driver retries them.

use orchestrator::domain::roster::DeathRecord;
use orchestrator::domain::seed_derivation::derive_oracle_seed;
use orchestrator::domain::{player_tag, PlayerId};
use orchestrator::{
    AdvanceOutcome, Faction, GameConfig, GameError, GameFlow, GameSetup, OracleConfig,
    OracleRegistry, PlayerSetup, Role,
};
use tracing::{debug, warn};

/// Retries per game before a failing oracle aborts it.
const MAX_RETRIES: u32 = 5;

pub struct Simulator {
    seed: u64,
    game_id: u32,
    config: GameConfig,
}

#[derive(Debug, Clone)]
pub struct SeatOutcome {
    pub seat: PlayerId,
    pub oracle: String,
    pub role: Role,
    pub death: Option<DeathRecord>,
}

impl SeatOutcome {
    pub fn won(&self, winner: Faction) -> bool {
        self.role.faction() == winner
    }
}

#[derive(Debug, Clone)]
pub struct GameResult {
    pub winner: Faction,
    /// Day counter when the game ended
    pub days: u32,
    pub seats: Vec<SeatOutcome>,
    pub sheriff: Option<PlayerId>,
    pub retries: u32,
    /// Full public narration, oldest first
    pub public_log: Vec<String>,
}

impl Simulator {
    pub fn new(seed: u64, game_id: u32, config: GameConfig) -> Self {
        Self {
            seed,
            game_id,
            config,
        }
    }

    /// Play one game with `oracles[i]` driving seat `i`.
    pub async fn simulate_game(&self, oracles: &[String]) -> Result<GameResult, GameError> {
        let mut registry = OracleRegistry::new();
        let mut players = Vec::with_capacity(oracles.len());
        for (seat, factory) in oracles.iter().enumerate() {
            let id = seat as PlayerId;
            let key = player_tag(id);
            let config = OracleConfig::with_seed(derive_oracle_seed(self.seed, id));
            registry.bind_factory(key.clone(), factory, &config)?;
            players.push(PlayerSetup::new(format!("Bot {}", seat + 1)).with_oracle(key));
        }

        let flow = GameFlow::new(registry);
        let mut state = flow.new_game(GameSetup {
            players,
            seed: Some(self.seed),
            config: self.config.clone(),
            ..GameSetup::default()
        })?;

        let mut retries = 0;
        let winner = loop {
            match flow.advance(&mut state).await {
                Ok(AdvanceOutcome::Ended(winner)) => break winner,
                Ok(AdvanceOutcome::AwaitingHuman) => {
                    return Err(GameError::internal("simulated game is waiting on a human"));
                }
                Err(e) if e.is_retryable() && retries < MAX_RETRIES => {
                    retries += 1;
                    warn!(game_id = self.game_id, retries, error = %e, "oracle failed; retrying");
                }
                Err(e) => return Err(e),
            }
        };
        debug!(game_id = self.game_id, %winner, day = state.day(), "simulated game finished");

        let seats = state
            .roster()
            .players()
            .iter()
            .zip(oracles)
            .map(|(p, oracle)| SeatOutcome {
                seat: p.id,
                oracle: oracle.clone(),
                role: p.role,
                death: p.flags.death,
            })
            .collect();
        let public_log = state
            .log()
            .entries()
            .iter()
            .filter(|e| e.visible_to(None))
            .map(|e| e.text.clone())
            .collect();

        Ok(GameResult {
            winner,
            days: state.day(),
            seats,
            sheriff: state.sheriff().elected(),
            retries,
            public_log,
        })
    }
}
