//! Metrics collection and output for simulation results.

use std::collections::BTreeMap;

use orchestrator::domain::roster::DeathCause;
use orchestrator::Faction;
use serde::Serialize;

use crate::simulator::{GameResult, SeatOutcome};
use crate::types::MetricsLevel;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    /// Hex-encoded game seed
    pub seed: String,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub public_log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub oracles: Vec<String>,
    pub players: usize,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub winner: Faction,
    pub days: u32,
    pub sheriff: Option<u8>,
    pub survivors: usize,
    pub oracle_retries: u32,
    pub duration_ms: f64,
    /// Deaths per cause, keyed by cause name
    pub deaths: BTreeMap<&'static str, u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: u8,
    pub oracle: String,
    pub role: String,
    pub won: bool,
    pub survived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub died_on_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_cause: Option<DeathCause>,
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    total_games: u32,
    result: &GameResult,
    duration_ms: f64,
    level: &MetricsLevel,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let mut deaths = BTreeMap::new();
    for record in result.seats.iter().filter_map(|s| s.death) {
        *deaths.entry(record.cause.as_str()).or_insert(0) += 1;
    }

    let player_metrics = result
        .seats
        .iter()
        .map(|seat| build_player_metrics(seat, result.winner))
        .collect();

    GameMetrics {
        game_id,
        seed: hex::encode(seed.to_be_bytes()),
        timestamp,
        config: RunConfig {
            oracles: result.seats.iter().map(|s| s.oracle.clone()).collect(),
            players: result.seats.len(),
            total_games,
        },
        result: GameResultMetrics {
            winner: result.winner,
            days: result.days,
            sheriff: result.sheriff,
            survivors: result.seats.iter().filter(|s| s.death.is_none()).count(),
            oracle_retries: result.retries,
            duration_ms,
            deaths,
        },
        player_metrics,
        public_log: match level {
            MetricsLevel::Detailed => result.public_log.clone(),
            MetricsLevel::Basic => Vec::new(),
        },
    }
}

fn build_player_metrics(seat: &SeatOutcome, winner: Faction) -> PlayerMetrics {
    PlayerMetrics {
        seat: seat.seat,
        oracle: seat.oracle.clone(),
        role: seat.role.as_str().to_string(),
        won: seat.won(winner),
        survived: seat.death.is_none(),
        died_on_day: seat.death.map(|d| d.day),
        death_cause: seat.death.map(|d| d.cause),
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: String,
    pub winner: String,
    pub days: u32,
    pub players: usize,
    pub survivors: usize,
    pub sheriff: Option<u8>,
    pub oracle_retries: u32,
    pub duration_ms: f64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed.clone(),
            winner: metrics.result.winner.to_string(),
            days: metrics.result.days,
            players: metrics.config.players,
            survivors: metrics.result.survivors,
            sheriff: metrics.result.sheriff,
            oracle_retries: metrics.result.oracle_retries,
            duration_ms: metrics.result.duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestrator::domain::roster::DeathRecord;
    use orchestrator::Role;

    fn result() -> GameResult {
        let seat = |seat, role, death| SeatOutcome {
            seat,
            oracle: "RandomOracle".into(),
            role,
            death,
        };
        GameResult {
            winner: Faction::Good,
            days: 3,
            seats: vec![
                seat(0, Role::Werewolf, Some(DeathRecord { day: 1, cause: DeathCause::Exile })),
                seat(1, Role::Villager, Some(DeathRecord { day: 1, cause: DeathCause::WolfKill })),
                seat(2, Role::Seer, None),
            ],
            sheriff: Some(2),
            retries: 0,
            public_log: vec!["Night 1 falls.".into()],
        }
    }

    #[test]
    fn counts_deaths_and_winners() {
        let m = build_game_metrics(7, 255, 10, &result(), 1.5, &MetricsLevel::Basic);
        assert_eq!(m.seed, "00000000000000ff");
        assert_eq!(m.result.survivors, 1);
        assert_eq!(m.result.deaths.get("vote"), Some(&1));
        assert_eq!(m.result.deaths.get("wolf_kill"), Some(&1));
        let won: Vec<bool> = m.player_metrics.iter().map(|p| p.won).collect();
        assert_eq!(won, vec![false, true, true]);
        assert!(m.public_log.is_empty());
    }

    #[test]
    fn detailed_level_keeps_the_narration() {
        let m = build_game_metrics(1, 1, 1, &result(), 0.0, &MetricsLevel::Detailed);
        assert_eq!(m.public_log, vec!["Night 1 falls.".to_string()]);
        let row = CsvSummaryRow::from(&m);
        assert_eq!(row.days, 3);
        assert_eq!(row.sheriff, Some(2));
    }
}
