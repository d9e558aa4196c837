//! AI Simulator CLI - runs fully automated Werewolf games in memory.
//!
//! Every seat is driven by a built-in oracle; results go to JSONL and a CSV
//! summary for comparing oracle strategies.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use metrics::build_game_metrics;
use orchestrator::{Faction, GameConfig};
use output::OutputWriter;
use rand::Rng;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Fast in-memory Werewolf simulator for oracle evaluation")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Table size (6, 9, or 12)
    #[arg(short, long, default_value = "6")]
    players: usize,

    /// Oracle for every seat not listed in --seat-oracle
    #[arg(long, default_value = "random")]
    oracle: OracleType,

    /// Per-seat override as SEAT=ORACLE, 1-based (e.g. 3=first-option)
    #[arg(long = "seat-oracle", value_parser = parse_seat_override)]
    seat_oracles: Vec<(usize, OracleType)>,

    /// Base seed; game N uses seed + N - 1
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the sheriff election
    #[arg(long)]
    no_election: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "basic")]
    metrics_level: MetricsLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OracleType {
    Random,
    FirstOption,
}

impl OracleType {
    fn name(self) -> &'static str {
        match self {
            OracleType::Random => "RandomOracle",
            OracleType::FirstOption => "ScriptedOracle", // registry name
        }
    }
}

fn parse_seat_override(raw: &str) -> Result<(usize, OracleType), String> {
    let (seat, oracle) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SEAT=ORACLE, got '{raw}'"))?;
    let seat: usize = seat
        .trim()
        .parse()
        .map_err(|_| format!("invalid seat '{seat}'"))?;
    if seat == 0 {
        return Err("seats are 1-based".into());
    }
    let oracle = OracleType::from_str(oracle.trim(), true)?;
    Ok((seat, oracle))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut seats = vec![args.oracle; args.players];
    for &(seat, oracle) in &args.seat_oracles {
        let slot = seats
            .get_mut(seat - 1)
            .ok_or_else(|| format!("seat {seat} is outside a {}-player table", args.players))?;
        *slot = oracle;
    }
    let oracles: Vec<String> = seats.iter().map(|o| o.name().to_string()).collect();

    let mut config = GameConfig::from_env()?;
    if args.no_election {
        config.sheriff_election = false;
    }

    if args.show_output {
        info!(games = args.games, players = args.players, ?seats, "starting simulator");
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let base_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = base_seed.wrapping_add(u64::from(game_num - 1));
        let simulator = Simulator::new(seed, game_num, config.clone());

        match simulator.simulate_game(&oracles).await {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    seed,
                    args.games,
                    &result,
                    duration_ms,
                    &args.metrics_level,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game_num, winner = %result.winner, days = result.days, "game completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} (seed {}) failed: [{}] {}", game_num, seed, e.code(), e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let (jsonl_path, csv_path) = (jsonl_path.cloned(), csv_path.clone());
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, &oracles, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(results: &[GameResult], oracles: &[String], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let games = results.len() as f64;
    let good = results.iter().filter(|r| r.winner == Faction::Good).count();
    let avg_days = results.iter().map(|r| f64::from(r.days)).sum::<f64>() / games;
    println!(
        "Good wins: {} ({:.1}%), Wolves wins: {} ({:.1}%), avg days {:.1}",
        good,
        good as f64 / games * 100.0,
        results.len() - good,
        (results.len() - good) as f64 / games * 100.0,
        avg_days
    );

    println!("\n=== Results by Seat ===");
    for (seat, oracle) in oracles.iter().enumerate() {
        let outcomes = results.iter().filter_map(|r| r.seats.get(seat).map(|s| (r, s)));
        let (mut wins, mut survived, mut wolf_games) = (0u32, 0u32, 0u32);
        for (result, outcome) in outcomes {
            wins += u32::from(outcome.won(result.winner));
            survived += u32::from(outcome.death.is_none());
            wolf_games += u32::from(outcome.role.is_wolf());
        }
        println!(
            "Seat {} ({}): wins={} ({:.1}%), survived={}, dealt wolf={}",
            seat + 1,
            oracle,
            wins,
            f64::from(wins) / games * 100.0,
            survived,
            wolf_games
        );
    }
}
